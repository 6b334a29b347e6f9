#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_gradesys::models::academic_years::requests::CreateAcademicYearRequest;
use rust_gradesys::models::classes::requests::CreateClassRequest;
use rust_gradesys::models::enrollments::requests::CreateEnrollmentRequest;
use rust_gradesys::models::semesters::requests::CreateSemesterRequest;
use rust_gradesys::models::students::requests::CreateStudentRequest;
use rust_gradesys::models::subjects::requests::CreateSubjectRequest;
use rust_gradesys::storage::Storage;
use rust_gradesys::storage::sea_orm_storage::SeaOrmStorage;
use rust_gradesys::utils::grading::default_grade_scale;

pub async fn storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::in_memory().await.unwrap();
    Arc::new(storage)
}

pub async fn seeded_storage() -> Arc<dyn Storage> {
    let storage = storage().await;
    storage.seed_grade_scales(default_grade_scale()).await.unwrap();
    storage
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 一个学年、一个学期、一个班级、一门 3 学分课程（0.7/0.3）和一个已选课的学生
pub struct Fixture {
    pub year_id: i64,
    pub semester_id: i64,
    pub class_id: i64,
    pub subject_id: i64,
    pub student_id: i64,
    pub enrollment_id: i64,
}

pub async fn fixture(storage: &Arc<dyn Storage>) -> Fixture {
    let year = storage
        .create_academic_year(CreateAcademicYearRequest {
            name: "2024/2025".into(),
            start_date: date(2024, 9, 1),
            end_date: date(2025, 7, 31),
        })
        .await
        .unwrap();
    let semester = storage
        .create_semester(CreateSemesterRequest {
            academic_year_id: year.id,
            name: "First Semester".into(),
            start_date: date(2024, 9, 1),
            end_date: date(2025, 1, 31),
        })
        .await
        .unwrap();
    let class = storage
        .create_class(CreateClassRequest {
            name: "CS Year 1".into(),
            description: None,
        })
        .await
        .unwrap();
    let subject = storage
        .create_subject(CreateSubjectRequest {
            code: "CS101".into(),
            name: "Introduction to Programming".into(),
            credit_hours: 3,
            exam_weight: 0.7,
            assign_weight: 0.3,
        })
        .await
        .unwrap();
    storage.add_class_subject(class.id, subject.id).await.unwrap();
    let student = storage
        .create_student(CreateStudentRequest {
            student_number: "U2024-0001".into(),
            name: "Amina Yusuf".into(),
            email: None,
            gender: None,
            date_of_birth: None,
        })
        .await
        .unwrap();
    let enrollment = storage
        .create_enrollment(CreateEnrollmentRequest {
            student_id: student.id,
            class_id: class.id,
            semester_id: semester.id,
        })
        .await
        .unwrap();

    Fixture {
        year_id: year.id,
        semester_id: semester.id,
        class_id: class.id,
        subject_id: subject.id,
        student_id: student.id,
        enrollment_id: enrollment.id,
    }
}
