//! 学生存储操作

use super::SeaOrmStorage;
use crate::entity::academic_year_results::{
    Column as YearResultColumn, Entity as AcademicYearResults,
};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_number: Set(req.student_number.trim().to_string()),
            name: Set(req.name.trim().to_string()),
            email: Set(req.email),
            gender: Set(req.gender.map(|g| g.to_string())),
            date_of_birth: Set(req.date_of_birth),
            avatar: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建学生失败: {e}")))?;

        Ok(result.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_number_impl(
        &self,
        student_number: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::StudentNumber.eq(student_number.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Students::find();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(like_contains(Column::StudentNumber, search))
                    .add(like_contains(Column::Name, search))
                    .add(like_contains(Column::Email, search)),
            );
        }

        if let Some(gender) = query.gender {
            select = select.filter(Column::Gender.eq(gender.to_string()));
        }

        select = match query.sort {
            Some(sort) => {
                let column = match sort.field.as_str() {
                    "student_number" => Column::StudentNumber,
                    "name" => Column::Name,
                    _ => Column::CreatedAt,
                };
                select.order_by(column, sort.into_order())
            }
            None => select.order_by_asc(Column::StudentNumber),
        };

        let (students, total) = self.fetch_page(select, page, size, "学生").await?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(student_number) = update.student_number {
            model.student_number = Set(student_number.trim().to_string());
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        // 空字符串表示清除邮箱
        if let Some(email) = update.email {
            let email = email.trim().to_string();
            model.email = Set((!email.is_empty()).then_some(email));
        }
        if let Some(gender) = update.gender {
            model.gender = Set(Some(gender.to_string()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(Some(date_of_birth));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新学生失败: {e}")))?;

        self.get_student_by_id_impl(id).await
    }

    /// 保存头像文件名
    pub async fn set_student_avatar_impl(&self, id: i64, avatar: &str) -> Result<Option<Student>> {
        let result = Students::update_many()
            .col_expr(
                Column::Avatar,
                sea_orm::sea_query::Expr::value(avatar.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新学生头像失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.get_student_by_id_impl(id).await
    }

    /// 删除学生，存在选课记录时拒绝
    pub async fn delete_student_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if Students::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(id))
            .count(&txn)
            .await?;
        if enrollments > 0 {
            return Ok(DeleteOutcome::HasDependents("enrollments"));
        }

        AcademicYearResults::delete_many()
            .filter(YearResultColumn::StudentId.eq(id))
            .exec(&txn)
            .await?;

        Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除学生失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
