//! 学年存储操作

use super::SeaOrmStorage;
use crate::entity::academic_years::{ActiveModel, Column, Entity as AcademicYears};
use crate::entity::semesters::{Column as SemesterColumn, Entity as Semesters};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    academic_years::{
        entities::AcademicYear,
        requests::{AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest},
        responses::AcademicYearListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_academic_year_impl(
        &self,
        req: CreateAcademicYearRequest,
    ) -> Result<AcademicYear> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
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
            .map_err(|e| GradeSysError::database_operation(format!("创建学年失败: {e}")))?;

        Ok(result.into_academic_year())
    }

    pub async fn get_academic_year_by_id_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        let result = AcademicYears::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_academic_year()))
    }

    pub async fn get_academic_year_by_name_impl(&self, name: &str) -> Result<Option<AcademicYear>> {
        let result = AcademicYears::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_academic_year()))
    }

    /// 分页列出学年，默认按开始日期倒序
    pub async fn list_academic_years_with_pagination_impl(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<AcademicYearListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = AcademicYears::find();

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

        let (years, total) = self.fetch_page(select, page, size, "学年").await?;

        Ok(AcademicYearListResponse {
            items: years.into_iter().map(|m| m.into_academic_year()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn update_academic_year_impl(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>> {
        if self.get_academic_year_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

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
            .map_err(|e| GradeSysError::database_operation(format!("更新学年失败: {e}")))?;

        self.get_academic_year_by_id_impl(id).await
    }

    /// 删除学年，存在学期时拒绝
    pub async fn delete_academic_year_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if AcademicYears::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let semesters = Semesters::find()
            .filter(SemesterColumn::AcademicYearId.eq(id))
            .count(&txn)
            .await?;
        if semesters > 0 {
            return Ok(DeleteOutcome::HasDependents("semesters"));
        }

        AcademicYears::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除学年失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// 设为当前学年：同一事务内先清除全部当前标记，再设置目标
    pub async fn set_current_academic_year_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        let txn = self.db.begin().await?;

        if AcademicYears::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        AcademicYears::update_many()
            .col_expr(Column::IsCurrent, Expr::value(false))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::IsCurrent.eq(true))
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("清除当前学年失败: {e}")))?;

        let updated = ActiveModel {
            id: Set(id),
            is_current: Set(true),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("设置当前学年失败: {e}")))?;

        txn.commit().await?;
        Ok(Some(updated.into_academic_year()))
    }
}
