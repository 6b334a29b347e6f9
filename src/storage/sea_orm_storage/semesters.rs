//! 学期存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::semesters::{ActiveModel, Column, Entity as Semesters};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    semesters::{
        entities::Semester,
        requests::{CreateSemesterRequest, SemesterListQuery, UpdateSemesterRequest},
        responses::SemesterListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_semester_impl(&self, req: CreateSemesterRequest) -> Result<Semester> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            academic_year_id: Set(req.academic_year_id),
            name: Set(req.name.trim().to_string()),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            is_current: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建学期失败: {e}")))?;

        Ok(result.into_semester())
    }

    pub async fn get_semester_by_id_impl(&self, id: i64) -> Result<Option<Semester>> {
        let result = Semesters::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    /// 同一学年内按名称查找学期
    pub async fn get_semester_by_year_and_name_impl(
        &self,
        academic_year_id: i64,
        name: &str,
    ) -> Result<Option<Semester>> {
        let result = Semesters::find()
            .filter(Column::AcademicYearId.eq(academic_year_id))
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn list_semesters_with_pagination_impl(
        &self,
        query: SemesterListQuery,
    ) -> Result<SemesterListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Semesters::find();

        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(like_contains(Column::Name, search));
        }

        if let Some(is_current) = query.is_current {
            select = select.filter(Column::IsCurrent.eq(is_current));
        }

        select = match query.sort {
            Some(sort) => {
                let column = match sort.field.as_str() {
                    "name" => Column::Name,
                    "start_date" => Column::StartDate,
                    _ => Column::CreatedAt,
                };
                select.order_by(column, sort.into_order())
            }
            None => select.order_by_desc(Column::StartDate),
        };

        let (semesters, total) = self.fetch_page(select, page, size, "学期").await?;

        Ok(SemesterListResponse {
            items: semesters.into_iter().map(|m| m.into_semester()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_semester_impl(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>> {
        if self.get_semester_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(academic_year_id) = update.academic_year_id {
            model.academic_year_id = Set(academic_year_id);
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(end_date);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新学期失败: {e}")))?;

        self.get_semester_by_id_impl(id).await
    }

    /// 删除学期，存在选课记录时拒绝
    pub async fn delete_semester_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if Semesters::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::SemesterId.eq(id))
            .count(&txn)
            .await?;
        if enrollments > 0 {
            return Ok(DeleteOutcome::HasDependents("enrollments"));
        }

        Semesters::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除学期失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// 设为当前学期，与学年的当前标记相互独立
    pub async fn set_current_semester_impl(&self, id: i64) -> Result<Option<Semester>> {
        let txn = self.db.begin().await?;

        if Semesters::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        Semesters::update_many()
            .col_expr(Column::IsCurrent, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::IsCurrent.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("清除当前学期失败: {e}")))?;

        let updated = ActiveModel {
            id: Set(id),
            is_current: Set(true),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("设置当前学期失败: {e}")))?;

        txn.commit().await?;
        Ok(Some(updated.into_semester()))
    }
}
