mod common;

use rust_gradesys::errors::GradeSysError;
use rust_gradesys::models::grade_scales::requests::{
    CreateGradeScaleRequest, UpdateGradeScaleRequest,
};
use rust_gradesys::models::grades::requests::UpsertGradeRequest;
use rust_gradesys::models::results::requests::AcademicYearResultListQuery;
use rust_gradesys::models::subjects::requests::UpdateSubjectRequest;
use rust_gradesys::storage::{GradeScaleWriteOutcome, GradeUpsertOutcome};
use rust_gradesys::utils::grading::{check_scale_ranges, default_grade_scale};

use common::{fixture, seeded_storage, storage};

fn grade(subject_id: i64, exam_mark: f64, assign_mark: f64) -> UpsertGradeRequest {
    UpsertGradeRequest {
        subject_id,
        exam_mark,
        assign_mark,
    }
}

#[tokio::test]
async fn upsert_computes_final_mark_grade_and_gpa() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    let saved = match storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 80.0, 70.0))
        .await
        .unwrap()
    {
        GradeUpsertOutcome::Saved(saved) => saved,
        other => panic!("grade was not saved: {other:?}"),
    };

    assert!((saved.grade.final_mark - 77.0).abs() < 1e-9);
    assert_eq!(saved.grade.grade, "B+");
    assert!((saved.grade.score - 3.3).abs() < 1e-9);
    assert!((saved.grade.grade_point - 9.9).abs() < 1e-9);

    assert_eq!(saved.result.total_credit_hours, 3);
    assert!((saved.result.total_grade_points - 9.9).abs() < 1e-9);
    assert!((saved.result.gpa - 3.3).abs() < 1e-9);

    // 同一课程再次录入为更新
    let GradeUpsertOutcome::Saved(updated) = storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 90.0, 90.0))
        .await
        .unwrap()
    else {
        panic!("grade update was not saved");
    };
    assert_eq!(updated.grade.id, saved.grade.id);
    assert_eq!(updated.grade.grade, "A");
    assert_eq!(
        storage
            .list_grades_for_enrollment(fx.enrollment_id)
            .await
            .unwrap()
            .len(),
        1
    );

    // 学年结果同步更新
    let year_results = storage
        .list_academic_year_results_with_pagination(AcademicYearResultListQuery {
            page: 1,
            size: 10,
            student_id: Some(fx.student_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(year_results.items.len(), 1);
    assert!((year_results.items[0].result.gpa - 4.0).abs() < 1e-9);
}

#[tokio::test]
async fn subject_outside_class_is_rejected() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    let other = storage
        .create_subject(rust_gradesys::models::subjects::requests::CreateSubjectRequest {
            code: "MA101".into(),
            name: "Calculus I".into(),
            credit_hours: 4,
            exam_weight: 0.6,
            assign_weight: 0.4,
        })
        .await
        .unwrap();

    let outcome = storage
        .upsert_grade(fx.enrollment_id, grade(other.id, 50.0, 50.0))
        .await
        .unwrap();
    assert!(matches!(outcome, GradeUpsertOutcome::SubjectNotInClass));

    let outcome = storage
        .upsert_grade(9999, grade(fx.subject_id, 50.0, 50.0))
        .await
        .unwrap();
    assert!(matches!(outcome, GradeUpsertOutcome::EnrollmentNotFound));
}

#[tokio::test]
async fn scale_gap_fails_and_writes_nothing() {
    let storage = storage().await;
    let fx = fixture(&storage).await;

    // 只覆盖 50-100
    let created = storage
        .create_grade_scale(CreateGradeScaleRequest {
            grade: "P".into(),
            min_mark: 50.0,
            max_mark: 100.0,
            score: 1.0,
        })
        .await
        .unwrap();
    assert!(matches!(created, GradeScaleWriteOutcome::Saved(_)));

    let err = storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 30.0, 20.0))
        .await
        .unwrap_err();
    assert!(matches!(err, GradeSysError::GradeScaleGap(_)));

    assert!(
        storage
            .list_grades_for_enrollment(fx.enrollment_id)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        storage
            .get_result_by_enrollment(fx.enrollment_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn overlapping_scale_is_rejected() {
    let storage = seeded_storage().await;

    let outcome = storage
        .create_grade_scale(CreateGradeScaleRequest {
            grade: "X".into(),
            min_mark: 70.0,
            max_mark: 76.0,
            score: 3.0,
        })
        .await
        .unwrap();
    assert!(matches!(outcome, GradeScaleWriteOutcome::Overlaps(_)));

    // 更新自身区间不算重叠
    let scales = storage.list_grade_scales().await.unwrap();
    let a = scales.iter().find(|s| s.grade == "A").unwrap();
    let outcome = storage
        .update_grade_scale(
            a.id,
            UpdateGradeScaleRequest {
                grade: None,
                min_mark: Some(85.0),
                max_mark: Some(100.0),
                score: Some(4.0),
            },
        )
        .await
        .unwrap();
    assert!(matches!(outcome, GradeScaleWriteOutcome::Saved(_)));

    let bands: Vec<_> = storage
        .list_grade_scales()
        .await
        .unwrap()
        .iter()
        .map(|s| s.to_band())
        .collect();
    let coverage = check_scale_ranges(&bands);
    assert!(coverage.covers_full_range);
    assert!(coverage.overlaps.is_empty());
}

#[tokio::test]
async fn seed_is_skipped_when_scale_exists() {
    let storage = seeded_storage().await;
    let again = storage.seed_grade_scales(default_grade_scale()).await.unwrap();
    assert_eq!(again, 0);
    assert_eq!(
        storage.list_grade_scales().await.unwrap().len(),
        default_grade_scale().len()
    );
}

#[tokio::test]
async fn recompute_reports_scale_gap_failures() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 30.0, 30.0))
        .await
        .unwrap();

    // 删除 F 档后 30 分无匹配等级
    let scales = storage.list_grade_scales().await.unwrap();
    let f = scales.iter().find(|s| s.grade == "F").unwrap();
    assert!(storage.delete_grade_scale(f.id).await.unwrap());

    let report = storage
        .recompute_semester_results(fx.semester_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.total, 1);
    assert_eq!(report.recomputed, 0);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].enrollment_id, fx.enrollment_id);

    assert!(
        storage
            .recompute_semester_results(9999)
            .await
            .unwrap()
            .is_none()
    );
}

fn reweight(credit_hours: Option<i32>, exam: f64, assign: f64) -> UpdateSubjectRequest {
    UpdateSubjectRequest {
        code: None,
        name: None,
        credit_hours,
        exam_weight: Some(exam),
        assign_weight: Some(assign),
    }
}

#[tokio::test]
async fn reweighting_subject_regrades_existing_marks() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 80.0, 70.0))
        .await
        .unwrap();

    // 0.3 * 80 + 0.7 * 70 = 73 -> B (3.0)，4 学分
    let subject = storage
        .update_subject(fx.subject_id, reweight(Some(4), 0.3, 0.7))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(subject.credit_hours, 4);

    let result = storage
        .get_result_by_enrollment(fx.enrollment_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.grades.len(), 1);
    let regraded = &result.grades[0].grade;
    assert!((regraded.final_mark - 73.0).abs() < 1e-9);
    assert_eq!(regraded.grade, "B");
    assert!((regraded.grade_point - 12.0).abs() < 1e-9);
    assert_eq!(result.detail.result.total_credit_hours, 4);
    assert!((result.detail.result.gpa - 3.0).abs() < 1e-9);

    let year_results = storage
        .list_academic_year_results_with_pagination(AcademicYearResultListQuery {
            page: 1,
            size: 10,
            student_id: Some(fx.student_id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!((year_results.items[0].result.gpa - 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn reweighting_into_scale_gap_rolls_back() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    // 0.7 * 30 + 0.3 * 90 = 48 -> D
    storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 30.0, 90.0))
        .await
        .unwrap();

    let scales = storage.list_grade_scales().await.unwrap();
    let f = scales.iter().find(|s| s.grade == "F").unwrap();
    assert!(storage.delete_grade_scale(f.id).await.unwrap());

    // 0.9 * 30 + 0.1 * 90 = 36，没有对应等级
    let err = storage
        .update_subject(fx.subject_id, reweight(None, 0.9, 0.1))
        .await
        .unwrap_err();
    assert!(matches!(err, GradeSysError::GradeScaleGap(_)));

    let subject = storage.get_subject_by_id(fx.subject_id).await.unwrap().unwrap();
    assert!((subject.exam_weight - 0.7).abs() < 1e-9);
    let grades = storage.list_grades_for_enrollment(fx.enrollment_id).await.unwrap();
    assert!((grades[0].grade.final_mark - 48.0).abs() < 1e-9);
    assert_eq!(grades[0].grade.grade, "D");
}

#[tokio::test]
async fn delete_grade_recomputes_result() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 80.0, 70.0))
        .await
        .unwrap();

    let result = storage
        .delete_grade(fx.enrollment_id, fx.subject_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.total_credit_hours, 0);
    assert_eq!(result.gpa, 0.0);

    assert!(
        storage
            .delete_grade(fx.enrollment_id, fx.subject_id)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn public_lookup_returns_computed_results() {
    let storage = seeded_storage().await;
    let fx = fixture(&storage).await;

    storage
        .upsert_grade(fx.enrollment_id, grade(fx.subject_id, 80.0, 70.0))
        .await
        .unwrap();

    let found = storage
        .find_public_results(" U2024-0001 ", None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.student_name, "Amina Yusuf");
    assert_eq!(found.results.len(), 1);
    assert_eq!(found.results[0].semester_id, fx.semester_id);
    assert_eq!(found.results[0].grades[0].grade, "B+");

    let filtered = storage
        .find_public_results("U2024-0001", Some(9999))
        .await
        .unwrap()
        .unwrap();
    assert!(filtered.results.is_empty());

    assert!(
        storage
            .find_public_results("U0000-0000", None)
            .await
            .unwrap()
            .is_none()
    );
}
