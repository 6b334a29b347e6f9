//! 成绩计算
//!
//! 计算链路：考试/平时成绩加权 → 匹配等级标准 → 绩点（等级分 × 学分）→ GPA 汇总。
//! 本模块只做纯计算，不访问数据库；存储层在事务中调用这些函数。

use serde::Serialize;
use std::fmt;
use ts_rs::TS;

pub const MARK_MIN: f64 = 0.0;
pub const MARK_MAX: f64 = 100.0;

/// 等级区间的连续精度：相邻区间的间隔不超过该值即视为连续
pub const SCALE_RESOLUTION: f64 = 0.01;
/// 单门课程允许的最大学分
pub const MAX_CREDIT_HOURS: i32 = 60;

const WEIGHT_EPSILON: f64 = 1e-6;
const MARK_EPSILON: f64 = 1e-9;

/// 成绩计算错误
#[derive(Debug, Clone, PartialEq)]
pub enum GradingError {
    /// 分数不在 [0, 100] 内
    MarkOutOfRange(f64),
    /// 考试与平时权重之和不为 1
    InvalidWeights { exam: f64, assign: f64 },
    /// 学分为负
    InvalidCreditHours(i32),
    /// 等级区间无效
    InvalidRange { min: f64, max: f64 },
    /// 总评成绩没有匹配的等级标准
    NoMatchingScale(f64),
}

impl fmt::Display for GradingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingError::MarkOutOfRange(mark) => {
                write!(f, "Mark {mark} is outside the range 0-100")
            }
            GradingError::InvalidWeights { exam, assign } => write!(
                f,
                "Exam weight {exam} and assignment weight {assign} must each be within 0-1 and sum to 1"
            ),
            GradingError::InvalidCreditHours(hours) => {
                write!(f, "Credit hours must not be negative, got {hours}")
            }
            GradingError::InvalidRange { min, max } => write!(
                f,
                "Mark range {min}-{max} is invalid, expected 0 <= min < max <= 100"
            ),
            GradingError::NoMatchingScale(mark) => {
                write!(f, "No grade scale covers final mark {mark}")
            }
        }
    }
}

impl std::error::Error for GradingError {}

/// 科目权重
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectWeights {
    pub exam: f64,
    pub assign: f64,
}

impl SubjectWeights {
    pub fn new(exam: f64, assign: f64) -> Result<Self, GradingError> {
        validate_weights(exam, assign)?;
        Ok(Self { exam, assign })
    }
}

/// 一条等级标准
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleBand {
    pub grade: String,
    pub min_mark: f64,
    pub max_mark: f64,
    pub score: f64,
}

impl ScaleBand {
    pub fn new(grade: impl Into<String>, min_mark: f64, max_mark: f64, score: f64) -> Self {
        Self {
            grade: grade.into(),
            min_mark,
            max_mark,
            score,
        }
    }

    fn contains(&self, mark: f64) -> bool {
        mark >= self.min_mark - MARK_EPSILON && mark <= self.max_mark + MARK_EPSILON
    }
}

/// 单科计算结果
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectOutcome {
    pub final_mark: f64,
    pub grade: String,
    pub score: f64,
    pub grade_point: f64,
    pub credit_hours: i32,
}

/// GPA 汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaSummary {
    pub total_credit_hours: i32,
    pub total_grade_points: f64,
    pub gpa: f64,
}

/// 等级区间之间的空隙
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct MarkGap {
    pub from: f64,
    pub to: f64,
}

/// 互相重叠的两个等级
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct ScaleOverlap {
    pub first: String,
    pub second: String,
}

/// 等级标准覆盖情况
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade_scale.ts")]
pub struct ScaleCoverage {
    pub covers_full_range: bool,
    pub gaps: Vec<MarkGap>,
    pub overlaps: Vec<ScaleOverlap>,
}

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn validate_mark(mark: f64) -> Result<(), GradingError> {
    if !mark.is_finite() || !(MARK_MIN..=MARK_MAX).contains(&mark) {
        return Err(GradingError::MarkOutOfRange(mark));
    }
    Ok(())
}

pub fn validate_weights(exam: f64, assign: f64) -> Result<(), GradingError> {
    let in_unit = |w: f64| w.is_finite() && (0.0..=1.0).contains(&w);
    if !in_unit(exam) || !in_unit(assign) || ((exam + assign) - 1.0).abs() > WEIGHT_EPSILON {
        return Err(GradingError::InvalidWeights { exam, assign });
    }
    Ok(())
}

pub fn validate_range(min_mark: f64, max_mark: f64) -> Result<(), GradingError> {
    let valid = min_mark.is_finite()
        && max_mark.is_finite()
        && min_mark >= MARK_MIN
        && max_mark <= MARK_MAX
        && min_mark < max_mark;
    if !valid {
        return Err(GradingError::InvalidRange {
            min: min_mark,
            max: max_mark,
        });
    }
    Ok(())
}

/// 两个闭区间是否重叠（端点相等也算重叠）
pub fn ranges_overlap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> bool {
    a_min <= b_max + MARK_EPSILON && b_min <= a_max + MARK_EPSILON
}

/// 加权总评，结果保留两位小数并落在 [0, 100]
pub fn final_mark(
    exam_mark: f64,
    assign_mark: f64,
    weights: SubjectWeights,
) -> Result<f64, GradingError> {
    validate_mark(exam_mark)?;
    validate_mark(assign_mark)?;
    validate_weights(weights.exam, weights.assign)?;

    let raw = exam_mark * weights.exam + assign_mark * weights.assign;
    Ok(round2(raw).clamp(MARK_MIN, MARK_MAX))
}

/// 查找覆盖该总评的等级；若区间重叠，取下限最高的一条
pub fn lookup_grade(mark: f64, bands: &[ScaleBand]) -> Result<&ScaleBand, GradingError> {
    bands
        .iter()
        .filter(|band| band.contains(mark))
        .max_by(|a, b| a.min_mark.total_cmp(&b.min_mark))
        .ok_or(GradingError::NoMatchingScale(mark))
}

/// 计算单科成绩
pub fn grade_subject(
    exam_mark: f64,
    assign_mark: f64,
    weights: SubjectWeights,
    credit_hours: i32,
    bands: &[ScaleBand],
) -> Result<SubjectOutcome, GradingError> {
    if credit_hours < 0 {
        return Err(GradingError::InvalidCreditHours(credit_hours));
    }

    let final_mark = final_mark(exam_mark, assign_mark, weights)?;
    let band = lookup_grade(final_mark, bands)?;

    Ok(SubjectOutcome {
        final_mark,
        grade: band.grade.clone(),
        score: band.score,
        grade_point: round2(band.score * f64::from(credit_hours)),
        credit_hours,
    })
}

/// 按学分加权汇总 GPA
///
/// 输入为 (绩点, 学分)。总学分为 0 时 GPA 记为 0。
pub fn compute_gpa<I>(items: I) -> GpaSummary
where
    I: IntoIterator<Item = (f64, i32)>,
{
    let (points, credits) = items
        .into_iter()
        .fold((0.0_f64, 0_i32), |(p, c), (gp, ch)| {
            (p + gp, c.saturating_add(ch))
        });

    let gpa = if credits > 0 {
        round2(points / f64::from(credits))
    } else {
        0.0
    };

    GpaSummary {
        total_credit_hours: credits,
        total_grade_points: round2(points),
        gpa,
    }
}

/// 检查等级标准是否无重叠、无空隙地覆盖 [0, 100]
pub fn check_scale_ranges(bands: &[ScaleBand]) -> ScaleCoverage {
    let mut sorted: Vec<&ScaleBand> = bands.iter().collect();
    sorted.sort_by(|a, b| a.min_mark.total_cmp(&b.min_mark));

    let mut gaps = Vec::new();
    let mut overlaps = Vec::new();

    let mut reach: Option<(f64, &ScaleBand)> = None;
    for band in sorted {
        match reach {
            None => {
                if band.min_mark > MARK_MIN + MARK_EPSILON {
                    gaps.push(MarkGap {
                        from: MARK_MIN,
                        to: band.min_mark,
                    });
                }
            }
            Some((max, prev)) => {
                if band.min_mark <= max + MARK_EPSILON {
                    overlaps.push(ScaleOverlap {
                        first: prev.grade.clone(),
                        second: band.grade.clone(),
                    });
                } else if band.min_mark - max > SCALE_RESOLUTION + MARK_EPSILON {
                    gaps.push(MarkGap {
                        from: max,
                        to: band.min_mark,
                    });
                }
            }
        }

        reach = match reach {
            Some((max, prev)) if max >= band.max_mark => Some((max, prev)),
            _ => Some((band.max_mark, band)),
        };
    }

    match reach {
        None => gaps.push(MarkGap {
            from: MARK_MIN,
            to: MARK_MAX,
        }),
        Some((max, _)) if max < MARK_MAX - MARK_EPSILON => gaps.push(MarkGap {
            from: max,
            to: MARK_MAX,
        }),
        _ => {}
    }

    ScaleCoverage {
        covers_full_range: gaps.is_empty() && overlaps.is_empty(),
        gaps,
        overlaps,
    }
}

/// 默认等级标准（初始化数据）
pub fn default_grade_scale() -> Vec<ScaleBand> {
    vec![
        ScaleBand::new("A", 85.0, 100.0, 4.0),
        ScaleBand::new("A-", 80.0, 84.99, 3.7),
        ScaleBand::new("B+", 75.0, 79.99, 3.3),
        ScaleBand::new("B", 70.0, 74.99, 3.0),
        ScaleBand::new("B-", 65.0, 69.99, 2.7),
        ScaleBand::new("C+", 60.0, 64.99, 2.3),
        ScaleBand::new("C", 55.0, 59.99, 2.0),
        ScaleBand::new("C-", 50.0, 54.99, 1.7),
        ScaleBand::new("D", 45.0, 49.99, 1.0),
        ScaleBand::new("F", 0.0, 44.99, 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weights(exam: f64, assign: f64) -> SubjectWeights {
        SubjectWeights::new(exam, assign).unwrap()
    }

    #[test]
    fn test_weighted_example_gives_b_plus() {
        let scale = default_grade_scale();
        let outcome = grade_subject(80.0, 70.0, weights(0.7, 0.3), 3, &scale).unwrap();

        assert_eq!(outcome.final_mark, 77.0);
        assert_eq!(outcome.grade, "B+");
        assert_eq!(outcome.score, 3.3);
        assert_eq!(outcome.grade_point, 9.9);
        assert_eq!(outcome.credit_hours, 3);
    }

    #[test]
    fn test_final_mark_stays_in_bounds() {
        let marks = [0.0, 0.5, 33.3, 49.99, 50.0, 77.7, 99.99, 100.0];
        let weight_pairs = [(0.0, 1.0), (0.3, 0.7), (0.5, 0.5), (0.6, 0.4), (1.0, 0.0)];

        for &exam in &marks {
            for &assign in &marks {
                for &(we, wa) in &weight_pairs {
                    let mark = final_mark(exam, assign, weights(we, wa)).unwrap();
                    assert!((MARK_MIN..=MARK_MAX).contains(&mark), "{mark} out of range");
                }
            }
        }
    }

    #[test]
    fn test_mark_validation() {
        assert_eq!(
            final_mark(101.0, 50.0, weights(0.5, 0.5)),
            Err(GradingError::MarkOutOfRange(101.0))
        );
        assert!(final_mark(50.0, -1.0, weights(0.5, 0.5)).is_err());
        assert!(validate_mark(f64::NAN).is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        assert!(SubjectWeights::new(0.7, 0.3).is_ok());
        assert!(SubjectWeights::new(0.6, 0.3).is_err());
        assert!(SubjectWeights::new(1.2, -0.2).is_err());
    }

    #[test]
    fn test_default_scale_covers_full_range() {
        let coverage = check_scale_ranges(&default_grade_scale());
        assert!(coverage.covers_full_range);
        assert!(coverage.gaps.is_empty());
        assert!(coverage.overlaps.is_empty());
    }

    #[test]
    fn test_every_two_decimal_mark_has_a_grade() {
        let scale = default_grade_scale();
        for hundredths in 0..=10_000 {
            let mark = f64::from(hundredths) / 100.0;
            assert!(lookup_grade(mark, &scale).is_ok(), "no grade for {mark}");
        }
    }

    #[test]
    fn test_gap_is_reported_and_lookup_fails() {
        let scale = vec![
            ScaleBand::new("P", 50.0, 100.0, 2.0),
            ScaleBand::new("F", 0.0, 49.0, 0.0),
        ];

        let coverage = check_scale_ranges(&scale);
        assert!(!coverage.covers_full_range);
        assert_eq!(
            coverage.gaps,
            vec![MarkGap {
                from: 49.0,
                to: 50.0
            }]
        );

        let err = grade_subject(49.5, 49.5, weights(0.5, 0.5), 3, &scale).unwrap_err();
        assert_eq!(err, GradingError::NoMatchingScale(49.5));
    }

    #[test]
    fn test_overlap_and_open_top_are_reported() {
        let scale = vec![
            ScaleBand::new("F", 0.0, 50.0, 0.0),
            ScaleBand::new("P", 50.0, 90.0, 2.0),
        ];

        let coverage = check_scale_ranges(&scale);
        assert_eq!(coverage.overlaps.len(), 1);
        assert_eq!(coverage.overlaps[0].first, "F");
        assert_eq!(coverage.overlaps[0].second, "P");
        assert_eq!(
            coverage.gaps,
            vec![MarkGap {
                from: 90.0,
                to: 100.0
            }]
        );
    }

    #[test]
    fn test_empty_scale_is_one_big_gap() {
        let coverage = check_scale_ranges(&[]);
        assert_eq!(
            coverage.gaps,
            vec![MarkGap {
                from: 0.0,
                to: 100.0
            }]
        );
    }

    #[test]
    fn test_lookup_prefers_higher_band_on_shared_boundary() {
        let scale = vec![
            ScaleBand::new("F", 0.0, 50.0, 0.0),
            ScaleBand::new("P", 50.0, 100.0, 2.0),
        ];
        assert_eq!(lookup_grade(50.0, &scale).unwrap().grade, "P");
    }

    #[test]
    fn test_gpa_is_credit_weighted() {
        let summary = compute_gpa([(9.9, 3), (16.0, 4)]);
        assert_eq!(summary.total_credit_hours, 7);
        assert_eq!(summary.total_grade_points, 25.9);
        assert_eq!(summary.gpa, 3.7);
    }

    #[test]
    fn test_gpa_with_zero_credits_falls_back_to_zero() {
        let summary = compute_gpa(Vec::<(f64, i32)>::new());
        assert_eq!(summary.total_credit_hours, 0);
        assert_eq!(summary.gpa, 0.0);
    }

    #[test]
    fn test_gpa_credit_total_saturates() {
        let summary = compute_gpa([(4.0, i32::MAX), (4.0, i32::MAX)]);
        assert_eq!(summary.total_credit_hours, i32::MAX);
        assert!(summary.gpa >= 0.0);
    }

    #[test]
    fn test_ranges_overlap() {
        assert!(ranges_overlap(0.0, 50.0, 50.0, 100.0));
        assert!(ranges_overlap(10.0, 20.0, 0.0, 100.0));
        assert!(!ranges_overlap(0.0, 49.99, 50.0, 100.0));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(0.0, 44.99).is_ok());
        assert!(validate_range(50.0, 50.0).is_err());
        assert!(validate_range(-1.0, 10.0).is_err());
        assert!(validate_range(90.0, 100.5).is_err());
    }
}
