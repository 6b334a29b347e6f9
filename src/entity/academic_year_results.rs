//! 学年 GPA 结果实体，每个 (学生, 学年) 一条

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "academic_year_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub academic_year_id: i64,
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    pub gpa: f64,
    pub computed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::academic_years::Entity",
        from = "Column::AcademicYearId",
        to = "super::academic_years::Column::Id"
    )]
    AcademicYear,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::academic_years::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AcademicYear.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_academic_year_result(
        self,
    ) -> crate::models::results::entities::AcademicYearResult {
        crate::models::results::entities::AcademicYearResult {
            id: self.id,
            student_id: self.student_id,
            academic_year_id: self.academic_year_id,
            total_credit_hours: self.total_credit_hours,
            total_grade_points: self.total_grade_points,
            gpa: self.gpa,
            computed_at: super::to_datetime(self.computed_at),
        }
    }
}
