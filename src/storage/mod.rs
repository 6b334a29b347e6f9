use std::sync::Arc;

use crate::models::{
    DeleteOutcome,
    academic_years::{
        entities::AcademicYear,
        requests::{AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest},
        responses::AcademicYearListResponse,
    },
    classes::{
        entities::{Class, ClassSubject},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    enrollments::{
        entities::{Enrollment, EnrollmentDetail},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery},
        responses::EnrollmentListResponse,
    },
    grade_scales::{
        entities::GradeScale,
        requests::{CreateGradeScaleRequest, UpdateGradeScaleRequest},
    },
    grades::{entities::GradeDetail, requests::UpsertGradeRequest, responses::GradeUpsertResponse},
    public::PublicResultResponse,
    results::{
        entities::{
            AcademicYearResultDetail, RecomputeReport, SemesterResult, SemesterResultWithGrades,
        },
        requests::{AcademicYearResultListQuery, ResultListQuery},
        responses::{AcademicYearResultListResponse, SemesterResultListResponse},
    },
    semesters::{
        entities::Semester,
        requests::{CreateSemesterRequest, SemesterListQuery, UpdateSemesterRequest},
        responses::SemesterListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::grading::ScaleBand;

use crate::errors::Result;

pub mod sea_orm_storage;

/// 成绩写入结果
#[derive(Debug)]
pub enum GradeUpsertOutcome {
    Saved(GradeUpsertResponse),
    EnrollmentNotFound,
    SubjectNotFound,
    /// 该课程未在选课记录所属班级开设
    SubjectNotInClass,
}

/// 调整选课班级的结果
#[derive(Debug)]
pub enum EnrollmentUpdateOutcome {
    Updated(Enrollment),
    NotFound,
    ClassNotFound,
    HasGrades,
}

/// 等级标准写入结果
#[derive(Debug)]
pub enum GradeScaleWriteOutcome {
    Saved(GradeScale),
    NotFound,
    /// 与已有等级区间重叠，携带冲突的等级名
    Overlaps(String),
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;

    /// 学年管理方法
    async fn create_academic_year(&self, req: CreateAcademicYearRequest) -> Result<AcademicYear>;
    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>>;
    async fn get_academic_year_by_name(&self, name: &str) -> Result<Option<AcademicYear>>;
    async fn list_academic_years_with_pagination(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<AcademicYearListResponse>;
    async fn update_academic_year(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>>;
    // 存在学期时拒绝删除
    async fn delete_academic_year(&self, id: i64) -> Result<DeleteOutcome>;
    // 设为当前学年，并在同一事务中取消其他学年的当前标记
    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>>;

    /// 学期管理方法
    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester>;
    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>>;
    async fn get_semester_by_year_and_name(
        &self,
        academic_year_id: i64,
        name: &str,
    ) -> Result<Option<Semester>>;
    async fn list_semesters_with_pagination(
        &self,
        query: SemesterListQuery,
    ) -> Result<SemesterListResponse>;
    async fn update_semester(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>>;
    async fn delete_semester(&self, id: i64) -> Result<DeleteOutcome>;
    async fn set_current_semester(&self, id: i64) -> Result<Option<Semester>>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>>;
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    async fn delete_class(&self, class_id: i64) -> Result<DeleteOutcome>;

    /// 班级开设科目
    async fn list_class_subjects(&self, class_id: i64) -> Result<Vec<ClassSubject>>;
    async fn get_class_subject(
        &self,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<ClassSubject>>;
    async fn add_class_subject(&self, class_id: i64, subject_id: i64) -> Result<ClassSubject>;
    // 该班级的选课记录已有此课程成绩时拒绝移除
    async fn remove_class_subject(&self, class_id: i64, subject_id: i64)
    -> Result<DeleteOutcome>;

    /// 课程管理方法
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    // 学分或权重变化时重算该课程的全部成绩
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<DeleteOutcome>;

    /// 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_number(&self, student_number: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    async fn set_student_avatar(&self, id: i64, avatar: &str) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome>;

    /// 选课管理方法
    async fn create_enrollment(&self, req: CreateEnrollmentRequest) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<EnrollmentDetail>>;
    async fn get_enrollment_by_student_and_semester(
        &self,
        student_id: i64,
        semester_id: i64,
    ) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    // 已有成绩时拒绝调整班级
    async fn update_enrollment_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<EnrollmentUpdateOutcome>;
    async fn delete_enrollment(&self, id: i64) -> Result<DeleteOutcome>;

    /// 成绩管理方法
    async fn list_grades_for_enrollment(&self, enrollment_id: i64) -> Result<Vec<GradeDetail>>;
    // 计算并写入成绩，同一事务内重算学期与学年结果
    async fn upsert_grade(
        &self,
        enrollment_id: i64,
        req: UpsertGradeRequest,
    ) -> Result<GradeUpsertOutcome>;
    // 返回重算后的学期结果；成绩不存在时返回 None
    async fn delete_grade(
        &self,
        enrollment_id: i64,
        subject_id: i64,
    ) -> Result<Option<SemesterResult>>;

    /// 等级标准
    async fn list_grade_scales(&self) -> Result<Vec<GradeScale>>;
    async fn get_grade_scale_by_id(&self, id: i64) -> Result<Option<GradeScale>>;
    async fn create_grade_scale(&self, req: CreateGradeScaleRequest)
    -> Result<GradeScaleWriteOutcome>;
    async fn update_grade_scale(
        &self,
        id: i64,
        update: UpdateGradeScaleRequest,
    ) -> Result<GradeScaleWriteOutcome>;
    async fn delete_grade_scale(&self, id: i64) -> Result<bool>;
    // 表为空时写入初始等级标准，返回写入条数
    async fn seed_grade_scales(&self, bands: Vec<ScaleBand>) -> Result<usize>;

    /// 绩点结果
    async fn list_results_with_pagination(
        &self,
        query: ResultListQuery,
    ) -> Result<SemesterResultListResponse>;
    async fn list_results_for_semester(
        &self,
        semester_id: i64,
    ) -> Result<Vec<SemesterResultWithGrades>>;
    async fn get_result_by_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<SemesterResultWithGrades>>;
    // 用当前等级标准重算学期内全部成绩，逐条记录失败
    async fn recompute_semester_results(&self, semester_id: i64)
    -> Result<Option<RecomputeReport>>;
    async fn list_academic_year_results_with_pagination(
        &self,
        query: AcademicYearResultListQuery,
    ) -> Result<AcademicYearResultListResponse>;
    async fn get_academic_year_result(&self, id: i64) -> Result<Option<AcademicYearResultDetail>>;

    /// 公开查询
    async fn find_public_results(
        &self,
        student_number: &str,
        semester_id: Option<i64>,
    ) -> Result<Option<PublicResultResponse>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
