//! 学期 GPA 结果实体，每个选课记录一条

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub enrollment_id: i64,
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub computed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollments::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollments::Column::Id"
    )]
    Enrollment,
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_result(self) -> crate::models::results::entities::SemesterResult {
        crate::models::results::entities::SemesterResult {
            id: self.id,
            enrollment_id: self.enrollment_id,
            total_credit_hours: self.total_credit_hours,
            total_grade_points: self.total_grade_points,
            gpa: self.gpa,
            computed_at: super::to_datetime(self.computed_at),
        }
    }
}
