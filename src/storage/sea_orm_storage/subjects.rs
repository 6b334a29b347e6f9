//! 课程存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use super::recompute;
use crate::entity::class_subjects::{Column as ClassSubjectColumn, Entity as ClassSubjects};
use crate::entity::enrollments::Entity as Enrollments;
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            code: Set(req.code.trim().to_string()),
            name: Set(req.name.trim().to_string()),
            credit_hours: Set(req.credit_hours),
            exam_weight: Set(req.exam_weight),
            assign_weight: Set(req.assign_weight),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建课程失败: {e}")))?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_code_impl(&self, code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::Code.eq(code.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Subjects::find();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(like_contains(Column::Code, search))
                    .add(like_contains(Column::Name, search)),
            );
        }

        select = match query.sort {
            Some(sort) => {
                let column = match sort.field.as_str() {
                    "code" => Column::Code,
                    "name" => Column::Name,
                    "credit_hours" => Column::CreditHours,
                    _ => Column::CreatedAt,
                };
                select.order_by(column, sort.into_order())
            }
            None => select.order_by_asc(Column::Code),
        };

        let (subjects, total) = self.fetch_page(select, page, size, "课程").await?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新课程
    ///
    /// 学分或权重改变时，用当前等级标准重算该课程的全部成绩以及受影响的结果，
    /// 任一成绩无法定级则整体回滚。
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let txn = self.db.begin().await?;

        let Some(current) = Subjects::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let regrade = update.credit_hours.is_some_and(|c| c != current.credit_hours)
            || update.exam_weight.is_some_and(|w| w != current.exam_weight)
            || update.assign_weight.is_some_and(|w| w != current.assign_weight);

        let mut model: ActiveModel = current.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(code) = update.code {
            model.code = Set(code.trim().to_string());
        }
        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(credit_hours) = update.credit_hours {
            model.credit_hours = Set(credit_hours);
        }
        if let Some(exam_weight) = update.exam_weight {
            model.exam_weight = Set(exam_weight);
        }
        if let Some(assign_weight) = update.assign_weight {
            model.assign_weight = Set(assign_weight);
        }

        let subject = model
            .update(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新课程失败: {e}")))?;

        if regrade {
            let bands = recompute::load_scale_bands(&txn).await?;
            let grades = Grades::find()
                .filter(GradeColumn::SubjectId.eq(subject.id))
                .all(&txn)
                .await?;

            let mut enrollment_ids = HashSet::new();
            for grade in grades {
                let outcome = recompute::grade_for_subject(
                    &subject,
                    grade.exam_mark,
                    grade.assign_mark,
                    &bands,
                )?;
                let (enrollment_id, exam, assign) =
                    (grade.enrollment_id, grade.exam_mark, grade.assign_mark);
                recompute::write_grade(
                    &txn,
                    Some(grade),
                    enrollment_id,
                    subject.id,
                    exam,
                    assign,
                    &outcome,
                )
                .await?;
                enrollment_ids.insert(enrollment_id);
            }

            for enrollment_id in &enrollment_ids {
                if let Some(enrollment) = Enrollments::find_by_id(*enrollment_id).one(&txn).await? {
                    recompute::recompute_for_enrollment(&txn, &enrollment).await?;
                }
            }

            info!(
                "Subject {} changed weighting, regraded {} enrollment(s)",
                subject.code,
                enrollment_ids.len()
            );
        }

        txn.commit().await?;
        Ok(Some(subject.into_subject()))
    }

    /// 删除课程，已被班级开设或已有成绩时拒绝
    pub async fn delete_subject_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if Subjects::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let offered = ClassSubjects::find()
            .filter(ClassSubjectColumn::SubjectId.eq(id))
            .count(&txn)
            .await?;
        if offered > 0 {
            return Ok(DeleteOutcome::HasDependents("class_subjects"));
        }

        let graded = Grades::find()
            .filter(GradeColumn::SubjectId.eq(id))
            .count(&txn)
            .await?;
        if graded > 0 {
            return Ok(DeleteOutcome::HasDependents("grades"));
        }

        Subjects::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除课程失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
