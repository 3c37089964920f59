//! # Conflict Checker
//!
//! Decides whether an instructor already has a lecture on the calendar day
//! a proposed start time falls on. Day-granular on purpose: lectures carry
//! no end time, so two lectures on the same day conflict regardless of
//! their clock times. Read-only; the store-level uniqueness index backs
//! this check up at insert time.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use uuid::Uuid;

use domains::models::Lecture;
use domains::ports::LectureRepo;
use domains::DomainResult;

/// Truncates a timestamp to its calendar day in the given schedule offset.
///
/// The day bucket runs from local midnight to the next local midnight;
/// a lecture at 23:59 and one at 00:01 the next day land in different
/// buckets.
pub fn lecture_day(start_time: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    start_time.with_timezone(&offset).date_naive()
}

/// Same-day lookup against the lecture store.
pub struct ConflictChecker {
    lectures: Arc<dyn LectureRepo>,
    offset: FixedOffset,
}

impl ConflictChecker {
    pub fn new(lectures: Arc<dyn LectureRepo>, offset: FixedOffset) -> Self {
        Self { lectures, offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the lecture blocking `proposed_start`, if any.
    ///
    /// `exclude` skips one lecture id so that a future update path can ask
    /// "does anything else block this day".
    pub async fn find_conflict(
        &self,
        instructor_id: Uuid,
        proposed_start: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> DomainResult<Option<Lecture>> {
        let day = lecture_day(proposed_start, self.offset);
        self.lectures.find_on_day(instructor_id, day, exclude).await
    }

    /// Boolean form of [`find_conflict`](Self::find_conflict).
    pub async fn has_conflict(
        &self,
        instructor_id: Uuid,
        proposed_start: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> DomainResult<bool> {
        Ok(self
            .find_conflict(instructor_id, proposed_start, exclude)
            .await?
            .is_some())
    }
}
