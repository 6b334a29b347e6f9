mod common;

use rust_gradesys::models::DeleteOutcome;
use rust_gradesys::models::academic_years::requests::{
    AcademicYearListQuery, CreateAcademicYearRequest,
};
use rust_gradesys::models::enrollments::requests::CreateEnrollmentRequest;
use rust_gradesys::models::semesters::requests::{CreateSemesterRequest, SemesterListQuery};

use common::{date, fixture, storage};

#[tokio::test]
async fn set_current_leaves_exactly_one_current_year() {
    let storage = storage().await;

    let mut ids = Vec::new();
    for (i, name) in ["2022/2023", "2023/2024", "2024/2025"].iter().enumerate() {
        let start = 2022 + i as i32;
        let year = storage
            .create_academic_year(CreateAcademicYearRequest {
                name: name.to_string(),
                start_date: date(start, 9, 1),
                end_date: date(start + 1, 7, 31),
            })
            .await
            .unwrap();
        ids.push(year.id);
    }

    storage.set_current_academic_year(ids[0]).await.unwrap();
    let current = storage.set_current_academic_year(ids[2]).await.unwrap().unwrap();
    assert!(current.is_current);

    let listed = storage
        .list_academic_years_with_pagination(AcademicYearListQuery {
            page: 1,
            size: 10,
            is_current: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].id, ids[2]);

    assert!(storage.set_current_academic_year(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn set_current_leaves_exactly_one_current_semester() {
    let storage = storage().await;
    let fx = fixture(&storage).await;

    let second = storage
        .create_semester(CreateSemesterRequest {
            academic_year_id: fx.year_id,
            name: "Second Semester".into(),
            start_date: date(2025, 2, 1),
            end_date: date(2025, 7, 31),
        })
        .await
        .unwrap();
    let next_year = storage
        .create_academic_year(CreateAcademicYearRequest {
            name: "2025/2026".into(),
            start_date: date(2025, 9, 1),
            end_date: date(2026, 7, 31),
        })
        .await
        .unwrap();
    let other_year_semester = storage
        .create_semester(CreateSemesterRequest {
            academic_year_id: next_year.id,
            name: "First Semester".into(),
            start_date: date(2025, 9, 1),
            end_date: date(2026, 1, 31),
        })
        .await
        .unwrap();

    storage.set_current_semester(fx.semester_id).await.unwrap();
    storage.set_current_semester(second.id).await.unwrap();
    let current = storage
        .set_current_semester(other_year_semester.id)
        .await
        .unwrap()
        .unwrap();
    assert!(current.is_current);

    // 跨学年也只有一个当前学期
    let listed = storage
        .list_semesters_with_pagination(SemesterListQuery {
            page: 1,
            size: 10,
            is_current: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].id, other_year_semester.id);

    let first = storage.get_semester_by_id(fx.semester_id).await.unwrap().unwrap();
    assert!(!first.is_current);
    assert!(storage.set_current_semester(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_year_with_semesters_is_blocked() {
    let storage = storage().await;
    let fx = fixture(&storage).await;

    let outcome = storage.delete_academic_year(fx.year_id).await.unwrap();
    assert!(matches!(outcome, DeleteOutcome::HasDependents(_)));
    assert!(storage.get_academic_year_by_id(fx.year_id).await.unwrap().is_some());

    assert_eq!(
        storage.delete_academic_year(9999).await.unwrap(),
        DeleteOutcome::NotFound
    );
}

#[tokio::test]
async fn duplicate_enrollment_is_detected() {
    let storage = storage().await;
    let fx = fixture(&storage).await;

    let existing = storage
        .get_enrollment_by_student_and_semester(fx.student_id, fx.semester_id)
        .await
        .unwrap();
    assert_eq!(existing.map(|e| e.id), Some(fx.enrollment_id));

    // 唯一索引兜底
    let second = storage
        .create_enrollment(CreateEnrollmentRequest {
            student_id: fx.student_id,
            class_id: fx.class_id,
            semester_id: fx.semester_id,
        })
        .await;
    assert!(second.is_err());
}

#[tokio::test]
async fn deleting_parents_with_dependents_is_blocked() {
    let storage = storage().await;
    let fx = fixture(&storage).await;

    assert!(matches!(
        storage.delete_semester(fx.semester_id).await.unwrap(),
        DeleteOutcome::HasDependents(_)
    ));
    assert!(matches!(
        storage.delete_class(fx.class_id).await.unwrap(),
        DeleteOutcome::HasDependents(_)
    ));
    assert!(matches!(
        storage.delete_student(fx.student_id).await.unwrap(),
        DeleteOutcome::HasDependents(_)
    ));
    assert!(matches!(
        storage.delete_subject(fx.subject_id).await.unwrap(),
        DeleteOutcome::HasDependents(_)
    ));

    assert_eq!(
        storage.delete_enrollment(fx.enrollment_id).await.unwrap(),
        DeleteOutcome::Deleted
    );
    assert_eq!(
        storage.delete_student(fx.student_id).await.unwrap(),
        DeleteOutcome::Deleted
    );
}
