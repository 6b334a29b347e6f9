//! 学期与学年结果存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use super::enrollments::EnrollmentNames;
use super::recompute;
use crate::entity::academic_year_results::{
    Column as YearResultColumn, Entity as AcademicYearResults, Model as YearResultModel,
};
use crate::entity::academic_years::{Column as AcademicYearColumn, Entity as AcademicYears};
use crate::entity::enrollments::{
    Column as EnrollmentColumn, Entity as Enrollments, Model as EnrollmentModel,
};
use crate::entity::grades::{Column as GradeColumn, Entity as Grades};
use crate::entity::results::{Column, Entity as Results, Model};
use crate::entity::semesters::Entity as Semesters;
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{GradeSysError, Result};
use crate::models::{
    PaginationInfo,
    grades::entities::GradeDetail,
    results::{
        entities::{
            AcademicYearResultDetail, RecomputeFailure, RecomputeReport, SemesterResultDetail,
            SemesterResultWithGrades,
        },
        requests::{AcademicYearResultListQuery, ResultListQuery},
        responses::{AcademicYearResultListResponse, SemesterResultListResponse},
    },
};
use crate::utils::like_contains;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, TransactionTrait,
};
use tracing::{debug, warn};

fn result_detail(
    result: Model,
    enrollment: &EnrollmentModel,
    names: &EnrollmentNames,
) -> SemesterResultDetail {
    let student = names.students.get(&enrollment.student_id);

    SemesterResultDetail {
        student_id: enrollment.student_id,
        student_number: student.map(|s| s.student_number.clone()).unwrap_or_default(),
        student_name: student.map(|s| s.name.clone()).unwrap_or_default(),
        class_id: enrollment.class_id,
        class_name: names
            .classes
            .get(&enrollment.class_id)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        semester_id: enrollment.semester_id,
        semester_name: names
            .semesters
            .get(&enrollment.semester_id)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        result: result.into_result(),
    }
}

/// 为一组结果行补充选课信息
async fn attach_details<C: ConnectionTrait>(
    conn: &C,
    results: Vec<Model>,
) -> Result<Vec<(SemesterResultDetail, i64)>> {
    let enrollment_ids: Vec<i64> = results.iter().map(|r| r.enrollment_id).collect();
    let enrollments: HashMap<i64, EnrollmentModel> = Enrollments::find()
        .filter(EnrollmentColumn::Id.is_in(enrollment_ids))
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询选课记录失败: {e}")))?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let loaded: Vec<EnrollmentModel> = enrollments.values().cloned().collect();
    let names = EnrollmentNames::load(conn, &loaded).await?;

    Ok(results
        .into_iter()
        .filter_map(|result| {
            let enrollment = enrollments.get(&result.enrollment_id)?;
            let id = enrollment.id;
            Some((result_detail(result, enrollment, &names), id))
        })
        .collect())
}

/// 批量读取多个选课记录的成绩，按课程代码排序
async fn grades_by_enrollment<C: ConnectionTrait>(
    conn: &C,
    enrollment_ids: Vec<i64>,
) -> Result<HashMap<i64, Vec<GradeDetail>>> {
    let rows = Grades::find()
        .filter(GradeColumn::EnrollmentId.is_in(enrollment_ids))
        .find_also_related(Subjects)
        .order_by_asc(SubjectColumn::Code)
        .all(conn)
        .await
        .map_err(|e| GradeSysError::database_operation(format!("查询成绩失败: {e}")))?;

    let mut grouped: HashMap<i64, Vec<GradeDetail>> = HashMap::new();
    for (grade, subject) in rows {
        if let Some(subject) = subject {
            grouped
                .entry(grade.enrollment_id)
                .or_default()
                .push(grade.into_grade_detail(&subject));
        }
    }
    Ok(grouped)
}

impl SeaOrmStorage {
    pub async fn list_results_with_pagination_impl(
        &self,
        query: ResultListQuery,
    ) -> Result<SemesterResultListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = Results::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::results::Relation::Enrollment.def(),
            )
            .join(
                JoinType::InnerJoin,
                crate::entity::enrollments::Relation::Student.def(),
            );

        if let Some(semester_id) = query.semester_id {
            select = select.filter(EnrollmentColumn::SemesterId.eq(semester_id));
        }
        if let Some(class_id) = query.class_id {
            select = select.filter(EnrollmentColumn::ClassId.eq(class_id));
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
            Some(sort) => match sort.field.as_str() {
                "gpa" => select.order_by(Column::Gpa, sort.into_order()),
                "student_name" => select.order_by(StudentColumn::Name, sort.into_order()),
                _ => select.order_by(Column::ComputedAt, sort.into_order()),
            },
            None => select.order_by_asc(StudentColumn::StudentNumber),
        };

        let (results, total) = self.fetch_page(select, page, size, "学期结果").await?;
        let items = attach_details(&self.db, results)
            .await?
            .into_iter()
            .map(|(detail, _)| detail)
            .collect();

        Ok(SemesterResultListResponse {
            items,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 学期内全部结果及成绩，按学号排序
    pub async fn list_results_for_semester_impl(
        &self,
        semester_id: i64,
    ) -> Result<Vec<SemesterResultWithGrades>> {
        let results = Results::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::results::Relation::Enrollment.def(),
            )
            .join(
                JoinType::InnerJoin,
                crate::entity::enrollments::Relation::Student.def(),
            )
            .filter(EnrollmentColumn::SemesterId.eq(semester_id))
            .order_by_asc(StudentColumn::StudentNumber)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学期结果失败: {e}")))?;

        let details = attach_details(&self.db, results).await?;
        let mut grades =
            grades_by_enrollment(&self.db, details.iter().map(|(_, id)| *id).collect()).await?;

        Ok(details
            .into_iter()
            .map(|(detail, enrollment_id)| SemesterResultWithGrades {
                detail,
                grades: grades.remove(&enrollment_id).unwrap_or_default(),
            })
            .collect())
    }

    pub async fn get_result_by_enrollment_impl(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<SemesterResultWithGrades>> {
        let Some(result) = Results::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学期结果失败: {e}")))?
        else {
            return Ok(None);
        };

        let Some((detail, _)) = attach_details(&self.db, vec![result]).await?.pop() else {
            return Ok(None);
        };
        let grades = self.list_grades_for_enrollment_impl(enrollment_id).await?;

        Ok(Some(SemesterResultWithGrades { detail, grades }))
    }

    /// 用当前等级标准重算学期内每个选课记录
    ///
    /// 每个选课记录单独一个事务，失败的记录回滚并写入报告，
    /// 不影响其他记录。
    pub async fn recompute_semester_results_impl(
        &self,
        semester_id: i64,
    ) -> Result<Option<RecomputeReport>> {
        if Semesters::find_by_id(semester_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let enrollments = Enrollments::find()
            .filter(EnrollmentColumn::SemesterId.eq(semester_id))
            .order_by_asc(EnrollmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询选课记录失败: {e}")))?;

        let bands = recompute::load_scale_bands(&self.db).await?;
        let mut report = RecomputeReport {
            semester_id,
            total: enrollments.len(),
            recomputed: 0,
            failures: Vec::new(),
        };

        for enrollment in enrollments {
            match self.regrade_enrollment(&enrollment, &bands).await {
                Ok(()) => report.recomputed += 1,
                Err(e) => {
                    warn!("Recompute failed for enrollment {}: {}", enrollment.id, e);
                    report.failures.push(RecomputeFailure {
                        enrollment_id: enrollment.id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            "Semester {} recomputed: {}/{} enrollments",
            semester_id, report.recomputed, report.total
        );
        Ok(Some(report))
    }

    async fn regrade_enrollment(
        &self,
        enrollment: &EnrollmentModel,
        bands: &[crate::utils::grading::ScaleBand],
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let grades = Grades::find()
            .filter(GradeColumn::EnrollmentId.eq(enrollment.id))
            .find_also_related(Subjects)
            .all(&txn)
            .await?;

        for (grade, subject) in grades {
            let Some(subject) = subject else { continue };
            let outcome =
                recompute::grade_for_subject(&subject, grade.exam_mark, grade.assign_mark, bands)?;
            let (exam, assign) = (grade.exam_mark, grade.assign_mark);
            recompute::write_grade(
                &txn,
                Some(grade),
                enrollment.id,
                subject.id,
                exam,
                assign,
                &outcome,
            )
            .await?;
        }

        recompute::recompute_for_enrollment(&txn, enrollment).await?;
        txn.commit().await?;
        Ok(())
    }

    pub async fn list_academic_year_results_with_pagination_impl(
        &self,
        query: AcademicYearResultListQuery,
    ) -> Result<AcademicYearResultListResponse> {
        let (page, size) = (query.page.max(1), query.size.clamp(1, 100));

        let mut select = AcademicYearResults::find().join(
            JoinType::InnerJoin,
            crate::entity::academic_year_results::Relation::Student.def(),
        );

        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(YearResultColumn::AcademicYearId.eq(academic_year_id));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(YearResultColumn::StudentId.eq(student_id));
        }

        select = match query.sort {
            Some(sort) => match sort.field.as_str() {
                "gpa" => select.order_by(YearResultColumn::Gpa, sort.into_order()),
                "student_name" => select.order_by(StudentColumn::Name, sort.into_order()),
                _ => select.order_by(YearResultColumn::ComputedAt, sort.into_order()),
            },
            None => select.order_by_asc(StudentColumn::StudentNumber),
        };

        let (rows, total) = self.fetch_page(select, page, size, "学年结果").await?;

        Ok(AcademicYearResultListResponse {
            items: self.attach_year_details(rows).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    pub async fn get_academic_year_result_impl(
        &self,
        id: i64,
    ) -> Result<Option<AcademicYearResultDetail>> {
        let Some(row) = AcademicYearResults::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| GradeSysError::database_operation(format!("查询学年结果失败: {e}")))?
        else {
            return Ok(None);
        };

        Ok(self.attach_year_details(vec![row]).await?.pop())
    }

    async fn attach_year_details(
        &self,
        rows: Vec<YearResultModel>,
    ) -> Result<Vec<AcademicYearResultDetail>> {
        let student_ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
        let year_ids: Vec<i64> = rows.iter().map(|r| r.academic_year_id).collect();

        let students: HashMap<i64, _> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();
        let years: HashMap<i64, _> = AcademicYears::find()
            .filter(AcademicYearColumn::Id.is_in(year_ids))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|y| (y.id, y.name))
            .collect();

        Ok(rows
            .into_iter()
            .map(|row| {
                let student = students.get(&row.student_id);
                AcademicYearResultDetail {
                    student_number: student.map(|s| s.student_number.clone()).unwrap_or_default(),
                    student_name: student.map(|s| s.name.clone()).unwrap_or_default(),
                    academic_year_name: years
                        .get(&row.academic_year_id)
                        .cloned()
                        .unwrap_or_default(),
                    result: row.into_academic_year_result(),
                }
            })
            .collect())
    }
}
