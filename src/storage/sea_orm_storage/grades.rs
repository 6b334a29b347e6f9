//! 成绩存储操作

use super::SeaOrmStorage;
use super::recompute;
use crate::entity::class_subjects::{Column as ClassSubjectColumn, Entity as ClassSubjects};
use crate::entity::enrollments::Entity as Enrollments;
use crate::entity::grades::{Column, Entity as Grades};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    grades::{entities::GradeDetail, requests::UpsertGradeRequest, responses::GradeUpsertResponse},
    results::entities::SemesterResult,
};
use crate::storage::GradeUpsertOutcome;
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use tracing::debug;

impl SeaOrmStorage {
    /// 列出选课记录的全部成绩，按课程代码排序
    pub async fn list_grades_for_enrollment_impl(
        &self,
        enrollment_id: i64,
    ) -> Result<Vec<GradeDetail>> {
        let rows = Grades::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .find_also_related(Subjects)
            .order_by_asc(SubjectColumn::Code)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(grade, subject)| subject.map(|s| grade.into_grade_detail(&s)))
            .collect())
    }

    /// 录入成绩
    ///
    /// 在一个事务中：校验课程属于班级、按当前等级标准计算、写入成绩、
    /// 重算学期结果与学年结果。等级标准无匹配区间时返回
    /// `GradeSysError::GradeScaleGap`，事务回滚，不写入任何数据。
    pub async fn upsert_grade_impl(
        &self,
        enrollment_id: i64,
        req: UpsertGradeRequest,
    ) -> Result<GradeUpsertOutcome> {
        let txn = self.db.begin().await?;

        let Some(enrollment) = Enrollments::find_by_id(enrollment_id).one(&txn).await? else {
            return Ok(GradeUpsertOutcome::EnrollmentNotFound);
        };

        let Some(subject) = Subjects::find_by_id(req.subject_id).one(&txn).await? else {
            return Ok(GradeUpsertOutcome::SubjectNotFound);
        };

        let offered = ClassSubjects::find()
            .filter(ClassSubjectColumn::ClassId.eq(enrollment.class_id))
            .filter(ClassSubjectColumn::SubjectId.eq(subject.id))
            .count(&txn)
            .await?;
        if offered == 0 {
            return Ok(GradeUpsertOutcome::SubjectNotInClass);
        }

        let bands = recompute::load_scale_bands(&txn).await?;
        let outcome =
            recompute::grade_for_subject(&subject, req.exam_mark, req.assign_mark, &bands)?;

        let existing = Grades::find()
            .filter(Column::EnrollmentId.eq(enrollment.id))
            .filter(Column::SubjectId.eq(subject.id))
            .one(&txn)
            .await?;

        let grade = recompute::write_grade(
            &txn,
            existing,
            enrollment.id,
            subject.id,
            req.exam_mark,
            req.assign_mark,
            &outcome,
        )
        .await?;

        let result = recompute::recompute_for_enrollment(&txn, &enrollment).await?;

        txn.commit().await?;

        debug!(
            "Grade saved for enrollment {} subject {}: {} ({})",
            enrollment.id, subject.code, outcome.final_mark, outcome.grade
        );

        Ok(GradeUpsertOutcome::Saved(GradeUpsertResponse {
            grade: grade.into_grade(),
            result: result.into_result(),
        }))
    }

    /// 删除成绩并重算结果
    pub async fn delete_grade_impl(
        &self,
        enrollment_id: i64,
        subject_id: i64,
    ) -> Result<Option<SemesterResult>> {
        let txn = self.db.begin().await?;

        let Some(enrollment) = Enrollments::find_by_id(enrollment_id).one(&txn).await? else {
            return Ok(None);
        };

        let deleted = Grades::delete_many()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .filter(Column::SubjectId.eq(subject_id))
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除成绩失败: {e}")))?;
        if deleted.rows_affected == 0 {
            return Ok(None);
        }

        let result = recompute::recompute_for_enrollment(&txn, &enrollment).await?;

        txn.commit().await?;
        Ok(Some(result.into_result()))
    }
}
