//! Shared application state handed to every handler.

use std::sync::Arc;

use domains::ports::{TokenAuthority, UserRepo};
use services::{AuthService, BatchService, CourseService, LectureService};

use crate::metrics::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub courses: Arc<CourseService>,
    pub batches: Arc<BatchService>,
    pub lectures: Arc<LectureService>,
    /// Direct repo handle for the auth extractor's existence check.
    pub users: Arc<dyn UserRepo>,
    pub tokens: Arc<dyn TokenAuthority>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        courses: Arc<CourseService>,
        batches: Arc<BatchService>,
        lectures: Arc<LectureService>,
        users: Arc<dyn UserRepo>,
        tokens: Arc<dyn TokenAuthority>,
    ) -> Self {
        Self {
            auth,
            courses,
            batches,
            lectures,
            users,
            tokens,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}
