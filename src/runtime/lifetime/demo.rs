//! 演示数据
//!
//! 仅在数据库中还没有学年时写入。成绩经 `upsert_grade` 写入，
//! 因此绩点与学年结果走的是与正式录入完全相同的计算流程。

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::{GradeSysError, Result};
use crate::models::academic_years::requests::{AcademicYearListQuery, CreateAcademicYearRequest};
use crate::models::classes::requests::CreateClassRequest;
use crate::models::enrollments::requests::CreateEnrollmentRequest;
use crate::models::grades::requests::UpsertGradeRequest;
use crate::models::semesters::requests::CreateSemesterRequest;
use crate::models::students::entities::Gender;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::subjects::requests::CreateSubjectRequest;
use crate::storage::{GradeUpsertOutcome, Storage};

// (代码, 名称, 学分, 考试权重)
const DEMO_SUBJECTS: &[(&str, &str, i32, f64)] = &[
    ("CS101", "Introduction to Programming", 3, 0.7),
    ("MA101", "Calculus I", 4, 0.6),
    ("EN101", "Academic Writing", 2, 0.5),
];

// (学号, 姓名, 性别, 各科考试/平时成绩)
const DEMO_STUDENTS: &[(&str, &str, Gender, [(f64, f64); 3])] = &[
    (
        "U2024-0001",
        "Amina Yusuf",
        Gender::Female,
        [(80.0, 70.0), (91.0, 88.0), (74.0, 82.0)],
    ),
    (
        "U2024-0002",
        "Daniel Okoro",
        Gender::Male,
        [(62.0, 75.0), (55.0, 60.0), (68.0, 71.0)],
    ),
    (
        "U2024-0003",
        "Grace Mensah",
        Gender::Female,
        [(45.0, 52.0), (78.0, 65.0), (88.0, 90.0)],
    ),
];

fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| GradeSysError::date_parse(format!("invalid demo date {y}-{m}-{d}")))
}

pub async fn seed_demo_data(storage: &Arc<dyn Storage>) -> Result<()> {
    let existing = storage
        .list_academic_years_with_pagination(AcademicYearListQuery {
            page: 1,
            size: 1,
            ..Default::default()
        })
        .await?;
    if existing.pagination.total > 0 {
        debug!("Academic years already exist, skipping demo seed");
        return Ok(());
    }

    info!("Seeding demo data...");

    let year = storage
        .create_academic_year(CreateAcademicYearRequest {
            name: "2024/2025".to_string(),
            start_date: date(2024, 9, 1)?,
            end_date: date(2025, 7, 31)?,
        })
        .await?;
    storage.set_current_academic_year(year.id).await?;

    let semester = storage
        .create_semester(CreateSemesterRequest {
            academic_year_id: year.id,
            name: "First Semester".to_string(),
            start_date: date(2024, 9, 1)?,
            end_date: date(2025, 1, 31)?,
        })
        .await?;
    storage.set_current_semester(semester.id).await?;

    let class = storage
        .create_class(CreateClassRequest {
            name: "Computer Science Year 1".to_string(),
            description: Some("Demo class".to_string()),
        })
        .await?;

    let mut subject_ids = Vec::with_capacity(DEMO_SUBJECTS.len());
    for &(code, name, credit_hours, exam_weight) in DEMO_SUBJECTS {
        let subject = storage
            .create_subject(CreateSubjectRequest {
                code: code.to_string(),
                name: name.to_string(),
                credit_hours,
                exam_weight,
                assign_weight: 1.0 - exam_weight,
            })
            .await?;
        storage.add_class_subject(class.id, subject.id).await?;
        subject_ids.push(subject.id);
    }

    for (number, name, gender, marks) in DEMO_STUDENTS {
        let student = storage
            .create_student(CreateStudentRequest {
                student_number: number.to_string(),
                name: name.to_string(),
                email: Some(format!("{}@students.example.edu", number.to_lowercase())),
                gender: Some(*gender),
                date_of_birth: None,
            })
            .await?;

        let enrollment = storage
            .create_enrollment(CreateEnrollmentRequest {
                student_id: student.id,
                class_id: class.id,
                semester_id: semester.id,
            })
            .await?;

        for (subject_id, &(exam_mark, assign_mark)) in subject_ids.iter().zip(marks.iter()) {
            let outcome = storage
                .upsert_grade(
                    enrollment.id,
                    UpsertGradeRequest {
                        subject_id: *subject_id,
                        exam_mark,
                        assign_mark,
                    },
                )
                .await?;
            if !matches!(outcome, GradeUpsertOutcome::Saved(_)) {
                warn!(
                    "Demo grade for enrollment {} subject {} was not saved",
                    enrollment.id, subject_id
                );
            }
        }
    }

    info!(
        "Demo data seeded: {} students, {} subjects",
        DEMO_STUDENTS.len(),
        DEMO_SUBJECTS.len()
    );
    Ok(())
}
