//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academic_years;
mod classes;
mod enrollments;
mod grade_scales;
mod grades;
mod public;
mod recompute;
mod results;
mod semesters;
mod students;
mod subjects;
mod users;

use crate::config::AppConfig;
use crate::errors::{GradeSysError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait, Select};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite，进程内单连接（多连接会各自得到独立的空库）
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| GradeSysError::database_connection(format!("SQLite 连接失败: {e}")))?;
        Self::from_connection(db).await
    }

    /// 分页查询，返回当前页数据与总条数
    pub(crate) async fn fetch_page<E>(
        &self,
        select: Select<E>,
        page: u64,
        size: u64,
        what: &str,
    ) -> Result<(Vec<E::Model>, u64)>
    where
        E: EntityTrait,
        E::Model: Sync,
    {
        let paginator = select.paginate(&self.db, size.max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询{what}总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page.max(1) - 1)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询{what}列表失败: {e}")))?;

        Ok((items, total))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| GradeSysError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| GradeSysError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| GradeSysError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(GradeSysError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
    grades::{entities::GradeDetail, requests::UpsertGradeRequest},
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
use crate::storage::{
    EnrollmentUpdateOutcome, GradeScaleWriteOutcome, GradeUpsertOutcome, Storage,
};
use crate::utils::grading::ScaleBand;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学年管理方法
    async fn create_academic_year(&self, req: CreateAcademicYearRequest) -> Result<AcademicYear> {
        self.create_academic_year_impl(req).await
    }

    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.get_academic_year_by_id_impl(id).await
    }

    async fn get_academic_year_by_name(&self, name: &str) -> Result<Option<AcademicYear>> {
        self.get_academic_year_by_name_impl(name).await
    }

    async fn list_academic_years_with_pagination(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<AcademicYearListResponse> {
        self.list_academic_years_with_pagination_impl(query).await
    }

    async fn update_academic_year(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>> {
        self.update_academic_year_impl(id, update).await
    }

    async fn delete_academic_year(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_academic_year_impl(id).await
    }

    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.set_current_academic_year_impl(id).await
    }

    // 学期管理方法
    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester> {
        self.create_semester_impl(req).await
    }

    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>> {
        self.get_semester_by_id_impl(id).await
    }

    async fn get_semester_by_year_and_name(
        &self,
        academic_year_id: i64,
        name: &str,
    ) -> Result<Option<Semester>> {
        self.get_semester_by_year_and_name_impl(academic_year_id, name).await
    }

    async fn list_semesters_with_pagination(
        &self,
        query: SemesterListQuery,
    ) -> Result<SemesterListResponse> {
        self.list_semesters_with_pagination_impl(query).await
    }

    async fn update_semester(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>> {
        self.update_semester_impl(id, update).await
    }

    async fn delete_semester(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_semester_impl(id).await
    }

    async fn set_current_semester(&self, id: i64) -> Result<Option<Semester>> {
        self.set_current_semester_impl(id).await
    }

    // 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_name(&self, name: &str) -> Result<Option<Class>> {
        self.get_class_by_name_impl(name).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<DeleteOutcome> {
        self.delete_class_impl(class_id).await
    }

    // 班级开设科目
    async fn list_class_subjects(&self, class_id: i64) -> Result<Vec<ClassSubject>> {
        self.list_class_subjects_impl(class_id).await
    }

    async fn get_class_subject(
        &self,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<ClassSubject>> {
        self.get_class_subject_impl(class_id, subject_id).await
    }

    async fn add_class_subject(&self, class_id: i64, subject_id: i64) -> Result<ClassSubject> {
        self.add_class_subject_impl(class_id, subject_id).await
    }

    async fn remove_class_subject(&self, class_id: i64, subject_id: i64) -> Result<DeleteOutcome> {
        self.remove_class_subject_impl(class_id, subject_id).await
    }

    // 课程管理方法
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_code(&self, code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(code).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_subject_impl(id).await
    }

    // 学生管理方法
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_number(&self, student_number: &str) -> Result<Option<Student>> {
        self.get_student_by_number_impl(student_number).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn set_student_avatar(&self, id: i64, avatar: &str) -> Result<Option<Student>> {
        self.set_student_avatar_impl(id, avatar).await
    }

    async fn delete_student(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_student_impl(id).await
    }

    // 选课管理方法
    async fn create_enrollment(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        self.create_enrollment_impl(req).await
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<EnrollmentDetail>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn get_enrollment_by_student_and_semester(
        &self,
        student_id: i64,
        semester_id: i64,
    ) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_student_and_semester_impl(student_id, semester_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn update_enrollment_class(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<EnrollmentUpdateOutcome> {
        self.update_enrollment_class_impl(id, class_id).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<DeleteOutcome> {
        self.delete_enrollment_impl(id).await
    }

    // 成绩管理方法
    async fn list_grades_for_enrollment(&self, enrollment_id: i64) -> Result<Vec<GradeDetail>> {
        self.list_grades_for_enrollment_impl(enrollment_id).await
    }

    async fn upsert_grade(
        &self,
        enrollment_id: i64,
        req: UpsertGradeRequest,
    ) -> Result<GradeUpsertOutcome> {
        self.upsert_grade_impl(enrollment_id, req).await
    }

    async fn delete_grade(
        &self,
        enrollment_id: i64,
        subject_id: i64,
    ) -> Result<Option<SemesterResult>> {
        self.delete_grade_impl(enrollment_id, subject_id).await
    }

    // 等级标准
    async fn list_grade_scales(&self) -> Result<Vec<GradeScale>> {
        self.list_grade_scales_impl().await
    }

    async fn get_grade_scale_by_id(&self, id: i64) -> Result<Option<GradeScale>> {
        self.get_grade_scale_by_id_impl(id).await
    }

    async fn create_grade_scale(
        &self,
        req: CreateGradeScaleRequest,
    ) -> Result<GradeScaleWriteOutcome> {
        self.create_grade_scale_impl(req).await
    }

    async fn update_grade_scale(
        &self,
        id: i64,
        update: UpdateGradeScaleRequest,
    ) -> Result<GradeScaleWriteOutcome> {
        self.update_grade_scale_impl(id, update).await
    }

    async fn delete_grade_scale(&self, id: i64) -> Result<bool> {
        self.delete_grade_scale_impl(id).await
    }

    async fn seed_grade_scales(&self, bands: Vec<ScaleBand>) -> Result<usize> {
        self.seed_grade_scales_impl(bands).await
    }

    // 绩点结果
    async fn list_results_with_pagination(
        &self,
        query: ResultListQuery,
    ) -> Result<SemesterResultListResponse> {
        self.list_results_with_pagination_impl(query).await
    }

    async fn list_results_for_semester(
        &self,
        semester_id: i64,
    ) -> Result<Vec<SemesterResultWithGrades>> {
        self.list_results_for_semester_impl(semester_id).await
    }

    async fn get_result_by_enrollment(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<SemesterResultWithGrades>> {
        self.get_result_by_enrollment_impl(enrollment_id).await
    }

    async fn recompute_semester_results(
        &self,
        semester_id: i64,
    ) -> Result<Option<RecomputeReport>> {
        self.recompute_semester_results_impl(semester_id).await
    }

    async fn list_academic_year_results_with_pagination(
        &self,
        query: AcademicYearResultListQuery,
    ) -> Result<AcademicYearResultListResponse> {
        self.list_academic_year_results_with_pagination_impl(query).await
    }

    async fn get_academic_year_result(&self, id: i64) -> Result<Option<AcademicYearResultDetail>> {
        self.get_academic_year_result_impl(id).await
    }

    // 公开查询
    async fn find_public_results(
        &self,
        student_number: &str,
        semester_id: Option<i64>,
    ) -> Result<Option<PublicResultResponse>> {
        self.find_public_results_impl(student_number, semester_id).await
    }
}
