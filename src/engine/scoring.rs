// ==========================================
// 院系预算资源规划系统 - 候选评分引擎
// ==========================================
// 职责: 为 (课程, 教师, 场地) 三元组计算成本、质量评分与可行性
// 质量评分规则 (基准 100):
//   +20 教师资质包含课程名称首词
//   +15 座位占用率位于 [0.7, 0.9]
//   -10 座位占用率 < 0.5
//   +10 场地所属部门 = 教师所属部门
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::course::Course;
use crate::domain::plan::{Candidate, FeasibilityVerdict};
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::engine::cost_model::{safe_div, CostModel};

pub const BASE_QUALITY_SCORE: f64 = 100.0;
const QUALIFICATION_MATCH_BONUS: f64 = 20.0;
const SWEET_SPOT_BONUS: f64 = 15.0;
const UNDERFILLED_PENALTY: f64 = 10.0;
const DEPARTMENT_AFFINITY_BONUS: f64 = 10.0;

const SWEET_SPOT_MIN: f64 = 0.7;
const SWEET_SPOT_MAX: f64 = 0.9;
const UNDERFILLED_RATIO: f64 = 0.5;

// ==========================================
// ScoringEngine - 候选评分引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    min_class_size: u32,
    max_class_size: u32,
    default_max_load: u32,
}

impl ScoringEngine {
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            min_class_size: config.allocation.min_class_size,
            max_class_size: config.allocation.max_class_size,
            default_max_load: config.allocation.default_max_instructor_load,
        }
    }

    /// 质量评分
    pub fn quality_score(
        &self,
        course: &Course,
        instructor: &Instructor,
        facility: &Facility,
    ) -> f64 {
        let mut score = BASE_QUALITY_SCORE;

        let name_token = course.name_token();
        if !name_token.is_empty()
            && instructor
                .qualification_tags()
                .any(|tag| tag.contains(&name_token))
        {
            score += QUALIFICATION_MATCH_BONUS;
        }

        let ratio = facility.fill_ratio(course.expected_students);
        if (SWEET_SPOT_MIN..=SWEET_SPOT_MAX).contains(&ratio) {
            score += SWEET_SPOT_BONUS;
        } else if ratio < UNDERFILLED_RATIO {
            score -= UNDERFILLED_PENALTY;
        }

        if facility.department_id.as_deref() == Some(instructor.department_id.as_str()) {
            score += DEPARTMENT_AFFINITY_BONUS;
        }

        score
    }

    /// 可行性判定
    ///
    /// - 硬约束: 场地容量 ≥ 预计学生数
    /// - 软约束: 班级规模位于 [min_class_size, max_class_size]（仅记录）
    pub fn feasibility(&self, course: &Course, facility: &Facility) -> FeasibilityVerdict {
        let mut soft_violations = Vec::new();

        if course.expected_students < self.min_class_size {
            soft_violations.push(format!(
                "CLASS_SIZE_BELOW_MIN: {} < {}",
                course.expected_students, self.min_class_size
            ));
        } else if course.expected_students > self.max_class_size {
            soft_violations.push(format!(
                "CLASS_SIZE_ABOVE_MAX: {} > {}",
                course.expected_students, self.max_class_size
            ));
        }

        FeasibilityVerdict {
            feasible: facility.capacity >= course.expected_students,
            soft_violations,
        }
    }

    /// 教师负载率 (含本次分配), 上限 1
    pub fn instructor_load_ratio(&self, instructor: &Instructor) -> f64 {
        let max_load = instructor.max_load.unwrap_or(self.default_max_load);
        safe_div((instructor.current_load + 1) as f64, max_load as f64).min(1.0)
    }

    /// 生成完整候选
    pub fn score_candidate(
        &self,
        cost_model: &CostModel,
        course: &Course,
        instructor: &Instructor,
        facility: &Facility,
        equipment: &[&Equipment],
    ) -> Candidate {
        Candidate {
            course_id: course.id.clone(),
            instructor_id: instructor.id.clone(),
            facility_id: facility.id.clone(),
            department_id: course.department_id.clone(),
            cost: cost_model.comprehensive_cost(course, instructor, facility, equipment),
            utility_score: self.quality_score(course, instructor, facility),
            capacity_ratio: facility.fill_ratio(course.expected_students),
            instructor_load_ratio: self.instructor_load_ratio(instructor),
            feasibility: self.feasibility(course, facility),
        }
    }
}

// ==========================================
// 课程排序因子
// ==========================================

/// 课程优先级: 随班级规模增长, 必修/高阶课程加权
pub fn course_priority(course: &Course) -> f64 {
    let mut priority = 1.0 + course.expected_students as f64 / 50.0;
    if course.is_required {
        priority += 0.5;
    }
    if course.level.is_advanced() {
        priority += 0.3;
    }
    priority
}

/// 课程复杂度: 实验课/大班/高阶课程更复杂
pub fn course_complexity(course: &Course) -> f64 {
    let mut complexity = 1.0;
    if course.is_lab() {
        complexity += 0.5;
    }
    if course.expected_students > 60 {
        complexity += 0.3;
    }
    if course.level.is_advanced() {
        complexity += 0.4;
    }
    complexity
}
