//! 选课存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::classes::{Entity as Classes, Model as ClassModel};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::results::{Column as ResultColumn, Entity as Results};
use crate::entity::semesters::{Entity as Semesters, Model as SemesterModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students, Model as StudentModel};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    enrollments::{
        entities::{Enrollment, EnrollmentDetail},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery},
        responses::EnrollmentListResponse,
    },
};
use crate::storage::EnrollmentUpdateOutcome;
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

/// 选课记录关联的学生、班级与学期
pub(super) struct EnrollmentNames {
    pub students: HashMap<i64, StudentModel>,
    pub classes: HashMap<i64, ClassModel>,
    pub semesters: HashMap<i64, SemesterModel>,
}

impl EnrollmentNames {
    /// 批量加载一组选课记录的关联行
    pub(super) async fn load<C: ConnectionTrait>(conn: &C, enrollments: &[Model]) -> Result<Self> {
        let student_ids: Vec<i64> = enrollments.iter().map(|e| e.student_id).collect();
        let class_ids: Vec<i64> = enrollments.iter().map(|e| e.class_id).collect();
        let semester_ids: Vec<i64> = enrollments.iter().map(|e| e.semester_id).collect();

        let students = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(conn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学生失败: {e}")))?;
        let classes = Classes::find()
            .filter(crate::entity::classes::Column::Id.is_in(class_ids))
            .all(conn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询班级失败: {e}")))?;
        let semesters = Semesters::find()
            .filter(crate::entity::semesters::Column::Id.is_in(semester_ids))
            .all(conn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(Self {
            students: students.into_iter().map(|s| (s.id, s)).collect(),
            classes: classes.into_iter().map(|c| (c.id, c)).collect(),
            semesters: semesters.into_iter().map(|s| (s.id, s)).collect(),
        })
    }

    pub(super) fn detail(&self, enrollment: Model) -> EnrollmentDetail {
        let student = self.students.get(&enrollment.student_id);
        let class_name = self
            .classes
            .get(&enrollment.class_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let semester_name = self
            .semesters
            .get(&enrollment.semester_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        EnrollmentDetail {
            student_number: student.map(|s| s.student_number.clone()).unwrap_or_default(),
            student_name: student.map(|s| s.name.clone()).unwrap_or_default(),
            class_name,
            semester_name,
            enrollment: enrollment.into_enrollment(),
        }
    }
}

impl SeaOrmStorage {
    pub async fn create_enrollment_impl(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            class_id: Set(req.class_id),
            semester_id: Set(req.semester_id),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建选课记录失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<EnrollmentDetail>> {
        let Some(enrollment) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询选课记录失败: {e}")))?
        else {
            return Ok(None);
        };

        let names = EnrollmentNames::load(&self.db, std::slice::from_ref(&enrollment)).await?;
        Ok(Some(names.detail(enrollment)))
    }

    pub async fn get_enrollment_by_student_and_semester_impl(
        &self,
        student_id: i64,
        semester_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SemesterId.eq(semester_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Enrollments::find().join(
            JoinType::InnerJoin,
            crate::entity::enrollments::Relation::Student.def(),
        );

        if let Some(semester_id) = query.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(like_contains(StudentColumn::Name, search))
                    .add(like_contains(StudentColumn::StudentNumber, search)),
            );
        }

        select = match query.sort {
            Some(sort) if sort.field == "student_name" => {
                select.order_by(StudentColumn::Name, sort.into_order())
            }
            Some(sort) => select.order_by(Column::EnrolledAt, sort.into_order()),
            None => select.order_by_desc(Column::EnrolledAt),
        };

        let (enrollments, total) = self.fetch_page(select, page, size, "选课记录").await?;
        let names = EnrollmentNames::load(&self.db, &enrollments).await?;

        Ok(EnrollmentListResponse {
            items: enrollments.into_iter().map(|m| names.detail(m)).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 调整选课记录的班级
    pub async fn update_enrollment_class_impl(
        &self,
        id: i64,
        class_id: i64,
    ) -> Result<EnrollmentUpdateOutcome> {
        let txn = self.db.begin().await?;

        let Some(enrollment) = Enrollments::find_by_id(id).one(&txn).await? else {
            return Ok(EnrollmentUpdateOutcome::NotFound);
        };

        if enrollment.class_id == class_id {
            return Ok(EnrollmentUpdateOutcome::Updated(enrollment.into_enrollment()));
        }

        if Classes::find_by_id(class_id).one(&txn).await?.is_none() {
            return Ok(EnrollmentUpdateOutcome::ClassNotFound);
        }

        let grades = Grades::find()
            .filter(GradeColumn::EnrollmentId.eq(id))
            .count(&txn)
            .await?;
        if grades > 0 {
            return Ok(EnrollmentUpdateOutcome::HasGrades);
        }

        let mut model: ActiveModel = enrollment.into();
        model.class_id = Set(class_id);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新选课记录失败: {e}")))?;

        txn.commit().await?;
        Ok(EnrollmentUpdateOutcome::Updated(updated.into_enrollment()))
    }

    /// 删除选课记录，已有成绩时拒绝
    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if Enrollments::find_by_id(id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let grades = Grades::find()
            .filter(GradeColumn::EnrollmentId.eq(id))
            .count(&txn)
            .await?;
        if grades > 0 {
            return Ok(DeleteOutcome::HasDependents("grades"));
        }

        // 没有成绩的结果行只剩零学分汇总
        Results::delete_many()
            .filter(ResultColumn::EnrollmentId.eq(id))
            .exec(&txn)
            .await?;

        Enrollments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除选课记录失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
