//! 等级标准实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "grade_scales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub grade: String,
    pub min_mark: f64,
    pub max_mark: f64,
    pub score: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_grade_scale(self) -> crate::models::grade_scales::entities::GradeScale {
        crate::models::grade_scales::entities::GradeScale {
            id: self.id,
            grade: self.grade,
            min_mark: self.min_mark,
            max_mark: self.max_mark,
            score: self.score,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }

    pub fn to_band(&self) -> crate::utils::grading::ScaleBand {
        crate::utils::grading::ScaleBand::new(
            self.grade.clone(),
            self.min_mark,
            self.max_mark,
            self.score,
        )
    }
}
