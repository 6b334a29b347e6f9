//! 公开成绩查询

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::enrollments::EnrollmentNames;
use crate::entity::academic_years::{Column as AcademicYearColumn, Entity as AcademicYears};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::results::{Column as ResultColumn, Entity as Results};
use crate::entity::semesters::Column as SemesterColumn;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::public::{PublicGradeRow, PublicResultResponse, PublicSemesterResult};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

impl SeaOrmStorage {
    /// 按学号查询已出结果的学期成绩，学号不存在时返回 None
    pub async fn find_public_results_impl(
        &self,
        student_number: &str,
        semester_id: Option<i64>,
    ) -> Result<Option<PublicResultResponse>> {
        let Some(student) = Students::find()
            .filter(StudentColumn::StudentNumber.eq(student_number.trim()))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut select = Enrollments::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::enrollments::Relation::Semester.def(),
            )
            .filter(EnrollmentColumn::StudentId.eq(student.id));
        if let Some(semester_id) = semester_id {
            select = select.filter(EnrollmentColumn::SemesterId.eq(semester_id));
        }

        let enrollments = select
            .order_by_asc(SemesterColumn::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        let enrollment_ids: Vec<i64> = enrollments.iter().map(|e| e.id).collect();

        let results: HashMap<i64, _> = Results::find()
            .filter(ResultColumn::EnrollmentId.is_in(enrollment_ids.clone()))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|r| (r.enrollment_id, r))
            .collect();

        let mut grades: HashMap<i64, Vec<PublicGradeRow>> = HashMap::new();
        for (grade, subject) in Grades::find()
            .filter(GradeColumn::EnrollmentId.is_in(enrollment_ids))
            .find_also_related(Subjects)
            .order_by_asc(SubjectColumn::Code)
            .all(&self.db)
            .await?
        {
            let Some(subject) = subject else { continue };
            grades
                .entry(grade.enrollment_id)
                .or_default()
                .push(PublicGradeRow {
                    subject_code: subject.code,
                    subject_name: subject.name,
                    credit_hours: subject.credit_hours,
                    final_mark: grade.final_mark,
                    grade: grade.grade,
                    score: grade.score,
                    grade_point: grade.grade_point,
                });
        }

        let names = EnrollmentNames::load(&self.db, &enrollments).await?;
        let year_ids: Vec<i64> = names
            .semesters
            .values()
            .map(|s| s.academic_year_id)
            .collect();
        let years: HashMap<i64, String> = AcademicYears::find()
            .filter(AcademicYearColumn::Id.is_in(year_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|y| (y.id, y.name))
            .collect();

        let semester_results = enrollments
            .into_iter()
            .filter_map(|enrollment| {
                let result = results.get(&enrollment.id)?;
                let semester = names.semesters.get(&enrollment.semester_id)?;
                Some(PublicSemesterResult {
                    semester_id: semester.id,
                    semester_name: semester.name.clone(),
                    academic_year_name: years
                        .get(&semester.academic_year_id)
                        .cloned()
                        .unwrap_or_default(),
                    class_name: names
                        .classes
                        .get(&enrollment.class_id)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    total_credit_hours: result.total_credit_hours,
                    total_grade_points: result.total_grade_points,
                    gpa: result.gpa,
                    grades: grades.remove(&enrollment.id).unwrap_or_default(),
                })
            })
            .collect();

        Ok(Some(PublicResultResponse {
            student_number: student.student_number,
            student_name: student.name,
            results: semester_results,
        }))
    }
}
