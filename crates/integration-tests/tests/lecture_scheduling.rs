//! Service-level scheduling scenarios on a real SQLite store.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use domains::models::{Lecture, Role};
use domains::DomainError;
use services::{CreateLecture, ListFilter};

use integration_tests::fixtures::{seed_course, seed_user, sqlite_stack};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

fn lecture_input(course_id: Uuid, instructor_id: Uuid, start: DateTime<Utc>) -> CreateLecture {
    CreateLecture {
        course_id,
        instructor_id,
        title: "Scheduled Session".into(),
        description: None,
        start_time: start,
    }
}

#[tokio::test]
async fn same_day_double_booking_is_rejected() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    // 09:00 books the day.
    stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 10, 9, 0)),
        )
        .await
        .unwrap();

    // 17:00 the same day conflicts even though the clock times differ.
    let err = stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 10, 17, 0)),
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::Conflict(
            "Scheduling conflict - instructor already has a lecture on this date".into()
        )
    );

    // The next day is free.
    stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 11, 9, 0)),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn day_boundary_is_midnight_exclusive() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 10, 23, 59)),
        )
        .await
        .unwrap();

    // 00:01 the next day is a different calendar day: no conflict.
    stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 11, 0, 1)),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn referential_validation_precedes_conflict_checking() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    // Unknown course.
    let err = stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(Uuid::new_v4(), instructor.id, utc(2025, 3, 10, 9, 0)),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound("Course not found".into()));

    // A valid user id whose role is admin is not an instructor.
    let err = stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, admin.id, utc(2025, 3, 10, 9, 0)),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound("Instructor not found".into()));
}

#[tokio::test]
async fn listing_is_ordered_and_repeatable() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    // Created out of chronological order.
    for start in [
        utc(2025, 3, 14, 9, 0),
        utc(2025, 3, 10, 9, 0),
        utc(2025, 3, 12, 9, 0),
    ] {
        stack
            .lecture_svc
            .create(admin.id, lecture_input(course.id, instructor.id, start))
            .await
            .unwrap();
    }

    let first = stack.lecture_svc.list(ListFilter::All).await.unwrap();
    let second = stack.lecture_svc.list(ListFilter::All).await.unwrap();

    let starts: Vec<_> = first.iter().map(|d| d.lecture.start_time).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        starts,
        second.iter().map(|d| d.lecture.start_time).collect::<Vec<_>>()
    );

    // Enrichment resolved both references.
    assert!(first.iter().all(|d| d.course.is_some() && d.instructor.is_some()));
}

#[tokio::test]
async fn empty_result_policy_differs_per_filter() {
    let stack = sqlite_stack().await;

    // By-course with no rows errors...
    let err = stack
        .lecture_svc
        .list(ListFilter::ByCourse(Uuid::new_v4()))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::NotFound("No lectures found for this course".into())
    );

    // ...while the caller-scoped and instructor-scoped listings are
    // empty successes.
    assert!(stack
        .lecture_svc
        .list(ListFilter::Mine(Uuid::new_v4()))
        .await
        .unwrap()
        .is_empty());
    assert!(stack
        .lecture_svc
        .list(ListFilter::ByInstructor(Uuid::new_v4()))
        .await
        .unwrap()
        .is_empty());
    assert!(stack.lecture_svc.list(ListFilter::All).await.unwrap().is_empty());
}

#[tokio::test]
async fn exclusion_skips_the_named_lecture() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    let details = stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 10, 9, 0)),
        )
        .await
        .unwrap();

    let checker = stack.lecture_svc.conflict_checker();
    // The only same-day lecture is the excluded one.
    assert!(!checker
        .has_conflict(instructor.id, utc(2025, 3, 10, 17, 0), Some(details.lecture.id))
        .await
        .unwrap());
    assert!(checker
        .has_conflict(instructor.id, utc(2025, 3, 10, 17, 0), None)
        .await
        .unwrap());
}

#[tokio::test]
async fn store_constraint_backstops_a_racing_insert() {
    let stack = sqlite_stack().await;
    let admin = seed_user(&stack.users, "admin@example.com", Role::Admin).await;
    let instructor = seed_user(&stack.users, "ada@example.com", Role::Instructor).await;
    let course = seed_course(&stack.courses, "SYS301").await;

    stack
        .lecture_svc
        .create(
            admin.id,
            lecture_input(course.id, instructor.id, utc(2025, 3, 10, 9, 0)),
        )
        .await
        .unwrap();

    // Simulate the request that passed the pre-check concurrently and
    // went straight to the insert: the unique index still refuses it.
    let start = utc(2025, 3, 10, 17, 0);
    let racing = Lecture {
        id: Uuid::new_v4(),
        course_id: course.id,
        instructor_id: instructor.id,
        title: "Racing Session".into(),
        description: None,
        start_time: start,
        start_day: start.date_naive(),
        created_by: admin.id,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let err = stack.lectures.insert(racing).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(_)));
}
