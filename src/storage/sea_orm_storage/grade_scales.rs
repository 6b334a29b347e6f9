//! 等级标准存储操作

use super::SeaOrmStorage;
use crate::entity::grade_scales::{ActiveModel, Column, Entity as GradeScales, Model};
use crate::errors::{GradeSysError, Result};
use crate::models::grade_scales::{
    entities::GradeScale,
    requests::{CreateGradeScaleRequest, UpdateGradeScaleRequest},
};
use crate::storage::GradeScaleWriteOutcome;
use crate::utils::grading::{self, ScaleBand};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 校验区间与分值
fn validate_band(min_mark: f64, max_mark: f64, score: f64) -> Result<()> {
    grading::validate_range(min_mark, max_mark)?;
    if !score.is_finite() || score < 0.0 {
        return Err(GradeSysError::validation(format!(
            "Score must be a non-negative number, got {score}"
        )));
    }
    Ok(())
}

/// 查找与给定区间重叠的其他等级
async fn find_overlap<C: ConnectionTrait>(
    conn: &C,
    min_mark: f64,
    max_mark: f64,
    exclude_id: Option<i64>,
) -> Result<Option<Model>> {
    let mut select = GradeScales::find();
    if let Some(id) = exclude_id {
        select = select.filter(Column::Id.ne(id));
    }

    let rows = select
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询等级标准失败: {e}")))?;

    Ok(rows
        .into_iter()
        .find(|row| grading::ranges_overlap(min_mark, max_mark, row.min_mark, row.max_mark)))
}

impl SeaOrmStorage {
    /// 按最低分升序列出全部等级
    pub async fn list_grade_scales_impl(&self) -> Result<Vec<GradeScale>> {
        let rows = GradeScales::find()
            .order_by_asc(Column::MinMark)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询等级标准失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_grade_scale()).collect())
    }

    pub async fn get_grade_scale_by_id_impl(&self, id: i64) -> Result<Option<GradeScale>> {
        let result = GradeScales::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询等级标准失败: {e}")))?;

        Ok(result.map(|m| m.into_grade_scale()))
    }

    pub async fn create_grade_scale_impl(
        &self,
        req: CreateGradeScaleRequest,
    ) -> Result<GradeScaleWriteOutcome> {
        validate_band(req.min_mark, req.max_mark, req.score)?;

        let txn = self.db.begin().await?;

        if let Some(conflict) = find_overlap(&txn, req.min_mark, req.max_mark, None).await? {
            return Ok(GradeScaleWriteOutcome::Overlaps(conflict.grade));
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            grade: Set(req.grade.trim().to_string()),
            min_mark: Set(req.min_mark),
            max_mark: Set(req.max_mark),
            score: Set(req.score),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let saved = model
            .insert(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建等级标准失败: {e}")))?;

        txn.commit().await?;
        Ok(GradeScaleWriteOutcome::Saved(saved.into_grade_scale()))
    }

    /// 更新等级，校验合并后的区间
    pub async fn update_grade_scale_impl(
        &self,
        id: i64,
        update: UpdateGradeScaleRequest,
    ) -> Result<GradeScaleWriteOutcome> {
        let txn = self.db.begin().await?;

        let Some(existing) = GradeScales::find_by_id(id).one(&txn).await? else {
            return Ok(GradeScaleWriteOutcome::NotFound);
        };

        let min_mark = update.min_mark.unwrap_or(existing.min_mark);
        let max_mark = update.max_mark.unwrap_or(existing.max_mark);
        let score = update.score.unwrap_or(existing.score);
        validate_band(min_mark, max_mark, score)?;

        if let Some(conflict) = find_overlap(&txn, min_mark, max_mark, Some(id)).await? {
            return Ok(GradeScaleWriteOutcome::Overlaps(conflict.grade));
        }

        let mut model: ActiveModel = existing.into();
        if let Some(grade) = update.grade {
            model.grade = Set(grade.trim().to_string());
        }
        model.min_mark = Set(min_mark);
        model.max_mark = Set(max_mark);
        model.score = Set(score);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let saved = model
            .update(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新等级标准失败: {e}")))?;

        txn.commit().await?;
        Ok(GradeScaleWriteOutcome::Saved(saved.into_grade_scale()))
    }

    pub async fn delete_grade_scale_impl(&self, id: i64) -> Result<bool> {
        let result = GradeScales::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除等级标准失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 等级标准为空时写入给定区间
    pub async fn seed_grade_scales_impl(&self, bands: Vec<ScaleBand>) -> Result<usize> {
        let txn = self.db.begin().await?;

        if GradeScales::find().count(&txn).await? > 0 {
            return Ok(0);
        }

        let now = chrono::Utc::now().timestamp();
        let count = bands.len();
        for band in bands {
            validate_band(band.min_mark, band.max_mark, band.score)?;
            ActiveModel {
                grade: Set(band.grade),
                min_mark: Set(band.min_mark),
                max_mark: Set(band.max_mark),
                score: Set(band.score),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("写入等级标准失败: {e}")))?;
        }

        txn.commit().await?;
        Ok(count)
    }
}
