//! 班级与班级开设科目存储操作

use super::SeaOrmStorage;
use crate::entity::class_subjects::{
    ActiveModel as ClassSubjectActiveModel, Column as ClassSubjectColumn,
    Entity as ClassSubjects,
};
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    DeleteOutcome, PaginationInfo,
    classes::{
        entities::{Class, ClassSubject},
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建班级
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("创建班级失败: {e}")))?;

        Ok(result.into_class())
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    pub async fn get_class_by_name_impl(&self, name: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::Name.eq(name.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Classes::find();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(like_contains(Column::Name, search));
        }

        select = match query.sort {
            Some(sort) if sort.field == "name" => select.order_by(Column::Name, sort.into_order()),
            Some(sort) => select.order_by(Column::CreatedAt, sort.into_order()),
            None => select.order_by_asc(Column::Name),
        };

        let (classes, total) = self.fetch_page(select, page, size, "班级").await?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        if self.get_class_by_id_impl(class_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级，存在选课记录或开设科目时拒绝
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        if Classes::find_by_id(class_id).one(&txn).await?.is_none() {
            return Ok(DeleteOutcome::NotFound);
        }

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .count(&txn)
            .await?;
        if enrollments > 0 {
            return Ok(DeleteOutcome::HasDependents("enrollments"));
        }

        let subjects = ClassSubjects::find()
            .filter(ClassSubjectColumn::ClassId.eq(class_id))
            .count(&txn)
            .await?;
        if subjects > 0 {
            return Ok(DeleteOutcome::HasDependents("class_subjects"));
        }

        Classes::delete_by_id(class_id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("删除班级失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// 列出班级开设的科目，按课程代码排序
    pub async fn list_class_subjects_impl(&self, class_id: i64) -> Result<Vec<ClassSubject>> {
        let rows = ClassSubjects::find()
            .filter(ClassSubjectColumn::ClassId.eq(class_id))
            .find_also_related(Subjects)
            .order_by_asc(SubjectColumn::Code)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询班级科目失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(link, subject)| subject.map(|s| link.into_class_subject(s)))
            .collect())
    }

    pub async fn get_class_subject_impl(
        &self,
        class_id: i64,
        subject_id: i64,
    ) -> Result<Option<ClassSubject>> {
        let row = ClassSubjects::find()
            .filter(ClassSubjectColumn::ClassId.eq(class_id))
            .filter(ClassSubjectColumn::SubjectId.eq(subject_id))
            .find_also_related(Subjects)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询班级科目失败: {e}")))?;

        Ok(row.and_then(|(link, subject)| subject.map(|s| link.into_class_subject(s))))
    }

    pub async fn add_class_subject_impl(
        &self,
        class_id: i64,
        subject_id: i64,
    ) -> Result<ClassSubject> {
        ClassSubjectActiveModel {
            class_id: Set(class_id),
            subject_id: Set(subject_id),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("添加班级科目失败: {e}")))?;

        self.get_class_subject_impl(class_id, subject_id)
            .await?
            .ok_or_else(|| GradeSysError::not_found("班级科目写入后未找到"))
    }

    /// 移除班级科目，该班级选课记录中已有此课程成绩时拒绝
    pub async fn remove_class_subject_impl(
        &self,
        class_id: i64,
        subject_id: i64,
    ) -> Result<DeleteOutcome> {
        let txn = self.db.begin().await?;

        let Some(link) = ClassSubjects::find()
            .filter(ClassSubjectColumn::ClassId.eq(class_id))
            .filter(ClassSubjectColumn::SubjectId.eq(subject_id))
            .one(&txn)
            .await?
        else {
            return Ok(DeleteOutcome::NotFound);
        };

        let graded = Grades::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::grades::Relation::Enrollment.def(),
            )
            .filter(GradeColumn::SubjectId.eq(subject_id))
            .filter(EnrollmentColumn::ClassId.eq(class_id))
            .count(&txn)
            .await?;
        if graded > 0 {
            return Ok(DeleteOutcome::HasDependents("grades"));
        }

        ClassSubjects::delete_by_id(link.id)
            .exec(&txn)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("移除班级科目失败: {e}")))?;

        txn.commit().await?;
        Ok(DeleteOutcome::Deleted)
    }
}
