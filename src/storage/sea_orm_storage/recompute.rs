//! 成绩计算与结果重算
//!
//! 所有函数接收 `ConnectionTrait`，由调用方在事务内组合使用。

use crate::entity::academic_year_results::{
    ActiveModel as YearResultActiveModel, Column as YearResultColumn,
    Entity as AcademicYearResults, Model as YearResultModel,
};
use crate::entity::enrollments::{Column as EnrollmentColumn, Model as EnrollmentModel};
use crate::entity::grade_scales::{Column as GradeScaleColumn, Entity as GradeScales};
use crate::entity::grades::{
    ActiveModel as GradeActiveModel, Column as GradeColumn, Entity as Grades, Model as GradeModel,
};
use crate::entity::results::{
    ActiveModel as ResultActiveModel, Column as ResultColumn, Entity as Results,
    Model as ResultModel,
};
use crate::entity::semesters::{Column as SemesterColumn, Entity as Semesters};
use crate::entity::subjects::{Entity as Subjects, Model as SubjectModel};
use crate::errors::{GradeSysError, Result};
use crate::utils::grading::{self, GpaSummary, ScaleBand, SubjectOutcome, SubjectWeights};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

/// 读取当前等级标准
pub(super) async fn load_scale_bands<C: ConnectionTrait>(conn: &C) -> Result<Vec<ScaleBand>> {
    let rows = GradeScales::find()
        .order_by_asc(GradeScaleColumn::MinMark)
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询等级标准失败: {e}")))?;

    Ok(rows.iter().map(|m| m.to_band()).collect())
}

/// 按课程当前的学分与权重计算一门成绩
pub(super) fn grade_for_subject(
    subject: &SubjectModel,
    exam_mark: f64,
    assign_mark: f64,
    bands: &[ScaleBand],
) -> Result<SubjectOutcome> {
    let weights = SubjectWeights::new(subject.exam_weight, subject.assign_weight)?;
    Ok(grading::grade_subject(
        exam_mark,
        assign_mark,
        weights,
        subject.credit_hours,
        bands,
    )?)
}

/// 写入（或覆盖）成绩行
pub(super) async fn write_grade<C: ConnectionTrait>(
    conn: &C,
    existing: Option<GradeModel>,
    enrollment_id: i64,
    subject_id: i64,
    exam_mark: f64,
    assign_mark: f64,
    outcome: &SubjectOutcome,
) -> Result<GradeModel> {
    let now = chrono::Utc::now().timestamp();
    let is_new = existing.is_none();

    let mut model = match existing {
        Some(existing) => {
            let mut active: GradeActiveModel = existing.into();
            active.updated_at = Set(now);
            active
        }
        None => GradeActiveModel {
            enrollment_id: Set(enrollment_id),
            subject_id: Set(subject_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        },
    };

    model.exam_mark = Set(exam_mark);
    model.assign_mark = Set(assign_mark);
    model.final_mark = Set(outcome.final_mark);
    model.grade = Set(outcome.grade.clone());
    model.score = Set(outcome.score);
    model.grade_point = Set(outcome.grade_point);

    let saved = if is_new {
        model.insert(conn).await
    } else {
        model.update(conn).await
    };
    saved.map_err(|e| GradeSysError::database_operation(format!("写入成绩失败: {e}")))
}

/// 汇总一组成绩行的 GPA，学分取自课程
fn summarize_grades(grades: Vec<(GradeModel, Option<SubjectModel>)>) -> GpaSummary {
    grading::compute_gpa(grades.into_iter().map(|(grade, subject)| {
        let credits = subject.map(|s| s.credit_hours).unwrap_or(0);
        (grade.grade_point, credits)
    }))
}

/// 重算一个选课记录的学期结果并写入 results 表
pub(super) async fn recompute_enrollment_result<C: ConnectionTrait>(
    conn: &C,
    enrollment_id: i64,
) -> Result<ResultModel> {
    let grades = Grades::find()
        .filter(GradeColumn::EnrollmentId.eq(enrollment_id))
        .find_also_related(Subjects)
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询成绩失败: {e}")))?;

    let summary = summarize_grades(grades);
    let now = chrono::Utc::now().timestamp();

    let existing = Results::find()
        .filter(ResultColumn::EnrollmentId.eq(enrollment_id))
        .one(conn)
        .await?;
    let is_new = existing.is_none();

    let mut model = match existing {
        Some(existing) => existing.into(),
        None => ResultActiveModel {
            enrollment_id: Set(enrollment_id),
            ..Default::default()
        },
    };
    model.total_credit_hours = Set(summary.total_credit_hours);
    model.total_grade_points = Set(summary.total_grade_points);
    model.gpa = Set(summary.gpa);
    model.computed_at = Set(now);

    let saved = if is_new {
        model.insert(conn).await
    } else {
        model.update(conn).await
    };
    saved.map_err(|e| GradeSysError::database_operation(format!("写入学期结果失败: {e}")))
}

/// 重算学生在某学年的结果；该学年内没有任何成绩时删除结果行
pub(super) async fn recompute_academic_year_result<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    academic_year_id: i64,
) -> Result<Option<YearResultModel>> {
    let grades = Grades::find()
        .join(
            JoinType::InnerJoin,
            crate::entity::grades::Relation::Enrollment.def(),
        )
        .join(
            JoinType::InnerJoin,
            crate::entity::enrollments::Relation::Semester.def(),
        )
        .filter(EnrollmentColumn::StudentId.eq(student_id))
        .filter(SemesterColumn::AcademicYearId.eq(academic_year_id))
        .find_also_related(Subjects)
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询学年成绩失败: {e}")))?;

    let existing = AcademicYearResults::find()
        .filter(YearResultColumn::StudentId.eq(student_id))
        .filter(YearResultColumn::AcademicYearId.eq(academic_year_id))
        .one(conn)
        .await?;

    if grades.is_empty() {
        if let Some(existing) = existing {
            AcademicYearResults::delete_by_id(existing.id)
                .exec(conn)
                .await?;
        }
        return Ok(None);
    }

    let summary = summarize_grades(grades);
    let now = chrono::Utc::now().timestamp();
    let is_new = existing.is_none();

    let mut model = match existing {
        Some(existing) => existing.into(),
        None => YearResultActiveModel {
            student_id: Set(student_id),
            academic_year_id: Set(academic_year_id),
            ..Default::default()
        },
    };
    model.total_credit_hours = Set(summary.total_credit_hours);
    model.total_grade_points = Set(summary.total_grade_points);
    model.gpa = Set(summary.gpa);
    model.computed_at = Set(now);

    let saved = if is_new {
        model.insert(conn).await
    } else {
        model.update(conn).await
    };
    let saved =
        saved.map_err(|e| GradeSysError::database_operation(format!("写入学年结果失败: {e}")))?;

    Ok(Some(saved))
}

/// 重算选课记录所在学期与学年的结果
pub(super) async fn recompute_for_enrollment<C: ConnectionTrait>(
    conn: &C,
    enrollment: &EnrollmentModel,
) -> Result<ResultModel> {
    let result = recompute_enrollment_result(conn, enrollment.id).await?;

    let semester = Semesters::find_by_id(enrollment.semester_id)
        .one(conn)
        .await?
        .ok_or_else(|| GradeSysError::not_found(format!("学期 {} 不存在", enrollment.semester_id)))?;

    recompute_academic_year_result(conn, enrollment.student_id, semester.academic_year_id).await?;

    Ok(result)
}
