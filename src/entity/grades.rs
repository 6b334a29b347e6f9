//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grades")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub enrollment_id: i64,
    pub subject_id: i64,
    pub exam_mark: f64,
    pub assign_mark: f64,
    pub final_mark: f64,
    pub grade: String,
    pub score: f64,
    pub grade_point: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_grade(self) -> crate::models::grades::entities::Grade {
        crate::models::grades::entities::Grade {
            id: self.id,
            enrollment_id: self.enrollment_id,
            subject_id: self.subject_id,
            exam_mark: self.exam_mark,
            assign_mark: self.assign_mark,
            final_mark: self.final_mark,
            grade: self.grade,
            score: self.score,
            grade_point: self.grade_point,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn into_grade_detail(
        self,
        subject: &super::subjects::Model,
    ) -> crate::models::grades::entities::GradeDetail {
        crate::models::grades::entities::GradeDetail {
            grade: self.into_grade(),
            subject_code: subject.code.clone(),
            subject_name: subject.name.clone(),
            credit_hours: subject.credit_hours,
        }
    }
}
