// ==========================================
// 院系预算资源规划系统 - 贪心分配引擎
// ==========================================
// 红线: 预算约束优先于策略目标
// ==========================================
// 职责: 按策略排序课程, 为每门课程选择剩余最优候选并提交
// 输入: 候选池 + 课程 + 部门预算
// 输出: Assignment 列表 + 未分配课程
// ==========================================
// 提交前约束 (与策略无关):
// 1) 教师未被本次运行占用
// 2) 场地未被本次运行占用 (不建模时段, 场地整轮只承接一门课程)
// 3) 部门支出 + 候选成本 ≤ 预算 × (1 - 缓冲比例)
// 平局规则: 课程稳定排序 + 候选严格优于才替换 => 先生成者胜出
// ==========================================

use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::plan::{Assignment, Candidate, UnassignedCourse};
use crate::domain::types::UnassignedReason;
use crate::engine::candidates::CandidatePool;
use crate::engine::cost_model::safe_div;
use crate::engine::scoring::{course_complexity, course_priority};
use crate::engine::strategy::OptimizationStrategy;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

/// 时段占位（本引擎不求解时段）
pub const UNSCHEDULED_TIME_SLOT: &str = "TBD";

// ==========================================
// AllocationState - 单次运行的可变状态
// ==========================================
// 每次运行新建, 运行结束即丢弃, 不跨运行共享
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationState {
    used_instructors: BTreeSet<String>,
    used_facilities: BTreeMap<String, String>, // facility_id -> course_id
    department_spend: BTreeMap<String, f64>,
}

impl AllocationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_instructor_used(&self, instructor_id: &str) -> bool {
        self.used_instructors.contains(instructor_id)
    }

    pub fn is_facility_used(&self, facility_id: &str) -> bool {
        self.used_facilities.contains_key(facility_id)
    }

    /// 部门已支出金额
    pub fn spend(&self, department_id: &str) -> f64 {
        self.department_spend
            .get(department_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// 预算校验
    ///
    /// 未配置预算的部门不受预算约束
    pub fn within_budget(
        &self,
        candidate: &Candidate,
        budgets: &DepartmentBudgets,
        buffer_fraction: f64,
    ) -> bool {
        match budgets.spending_ceiling(&candidate.department_id, buffer_fraction) {
            Some(ceiling) => {
                self.spend(&candidate.department_id) + candidate.total_cost() <= ceiling
            }
            None => true,
        }
    }

    /// 提交候选: 占用教师/场地, 累加部门支出
    pub fn commit(&mut self, candidate: &Candidate) {
        self.used_instructors.insert(candidate.instructor_id.clone());
        self.used_facilities
            .insert(candidate.facility_id.clone(), candidate.course_id.clone());
        *self
            .department_spend
            .entry(candidate.department_id.clone())
            .or_insert(0.0) += candidate.total_cost();
    }
}

// ==========================================
// 选择策略
// ==========================================
// 每种策略定义课程处理顺序与候选目标值（越大越优）
trait SelectionPolicy {
    /// 稳定排序课程
    fn order_courses(&self, courses: &mut Vec<&Course>);

    /// 候选目标值
    fn objective(&self, candidate: &Candidate) -> f64;
}

/// 成本最小化: 单位学生直接成本升序, 综合成本最低者胜出
struct CostMinimization;

impl SelectionPolicy for CostMinimization {
    fn order_courses(&self, courses: &mut Vec<&Course>) {
        let key = |c: &Course| c.direct_costs() / c.expected_students.max(1) as f64;
        courses.sort_by(|a, b| key(a).total_cmp(&key(b)));
    }

    fn objective(&self, candidate: &Candidate) -> f64 {
        -candidate.total_cost()
    }
}

/// 利用率最大化: 大班优先, 利用率代理指标最高者胜出
struct UtilizationMaximization;

impl SelectionPolicy for UtilizationMaximization {
    fn order_courses(&self, courses: &mut Vec<&Course>) {
        courses.sort_by(|a, b| b.expected_students.cmp(&a.expected_students));
    }

    fn objective(&self, candidate: &Candidate) -> f64 {
        candidate.utilization_proxy()
    }
}

/// 质量优先: 优先级×复杂度降序, 质量评分最高者胜出
struct QualityFocused;

impl SelectionPolicy for QualityFocused {
    fn order_courses(&self, courses: &mut Vec<&Course>) {
        let key = |c: &Course| course_priority(c) * course_complexity(c);
        courses.sort_by(|a, b| key(b).total_cmp(&key(a)));
    }

    fn objective(&self, candidate: &Candidate) -> f64 {
        candidate.utility_score
    }
}

/// 均衡: 优先级×复杂度/(成本/1000) 降序, 0.4质量 + 0.3利用率 + 0.3成本倒数
struct Balanced;

impl Balanced {
    fn course_key(course: &Course) -> f64 {
        let weight = course_priority(course) * course_complexity(course);
        let cost_scale = course.direct_costs() / 1000.0;
        if cost_scale > 0.0 {
            weight / cost_scale
        } else {
            weight
        }
    }
}

impl SelectionPolicy for Balanced {
    fn order_courses(&self, courses: &mut Vec<&Course>) {
        courses.sort_by(|a, b| Self::course_key(b).total_cmp(&Self::course_key(a)));
    }

    fn objective(&self, candidate: &Candidate) -> f64 {
        0.4 * candidate.utility_score
            + 0.3 * candidate.utilization_proxy()
            + 0.3 * safe_div(1.0, candidate.total_cost()) * 10_000.0
    }
}

// ==========================================
// AllocationOutcome - 分配结果
// ==========================================
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<UnassignedCourse>,
}

// ==========================================
// Allocator - 贪心分配引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct Allocator {
    buffer_fraction: f64,
}

impl Allocator {
    /// 构造函数
    ///
    /// # 参数
    /// - `buffer_fraction`: 部门预算缓冲比例
    pub fn new(buffer_fraction: f64) -> Self {
        Self { buffer_fraction }
    }

    /// 执行分配
    ///
    /// 策略在此处分派一次, 贪心循环对四种策略通用
    ///
    /// # 参数
    /// - `strategy`: 优化策略
    /// - `pool`: 已评分候选池
    /// - `courses`: 课程列表
    /// - `budgets`: 部门预算
    /// - `assigned_at`: 分配时间戳（由调用方提供, 保证可复现）
    #[instrument(skip_all, fields(
        strategy = %strategy,
        courses_count = courses.len(),
        candidates_count = pool.candidate_count()
    ))]
    pub fn run(
        &self,
        strategy: OptimizationStrategy,
        pool: &CandidatePool,
        courses: &[Course],
        budgets: &DepartmentBudgets,
        assigned_at: DateTime<Utc>,
    ) -> AllocationOutcome {
        let outcome = match strategy {
            OptimizationStrategy::CostMinimization => {
                self.run_greedy(&CostMinimization, pool, courses, budgets, assigned_at)
            }
            OptimizationStrategy::UtilizationMaximization => {
                self.run_greedy(&UtilizationMaximization, pool, courses, budgets, assigned_at)
            }
            OptimizationStrategy::QualityFocused => {
                self.run_greedy(&QualityFocused, pool, courses, budgets, assigned_at)
            }
            OptimizationStrategy::Balanced => {
                self.run_greedy(&Balanced, pool, courses, budgets, assigned_at)
            }
        };

        info!(
            "分配完成: strategy={}, assigned={}, unassigned={}",
            strategy,
            outcome.assignments.len(),
            outcome.unassigned.len()
        );
        outcome
    }

    fn run_greedy<P: SelectionPolicy>(
        &self,
        policy: &P,
        pool: &CandidatePool,
        courses: &[Course],
        budgets: &DepartmentBudgets,
        assigned_at: DateTime<Utc>,
    ) -> AllocationOutcome {
        let mut state = AllocationState::new();
        let mut assignments = Vec::new();
        let mut unassigned = Vec::new();

        let mut ordered: Vec<&Course> = courses.iter().collect();
        policy.order_courses(&mut ordered);

        for course in ordered {
            if let Some(reason) = pool.infeasible_reason(&course.id) {
                debug!(course_id = %course.id, %reason, "课程无兼容候选");
                unassigned.push(UnassignedCourse {
                    course_id: course.id.clone(),
                    department_id: course.department_id.clone(),
                    reason,
                });
                continue;
            }

            let mut best: Option<(&Candidate, f64)> = None;
            let mut blocked_by_budget = false;

            for candidate in pool.candidates_for(&course.id) {
                if state.is_instructor_used(&candidate.instructor_id)
                    || state.is_facility_used(&candidate.facility_id)
                {
                    continue;
                }
                if !state.within_budget(candidate, budgets, self.buffer_fraction) {
                    blocked_by_budget = true;
                    continue;
                }

                let score = policy.objective(candidate);
                let improves = match best {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if improves {
                    best = Some((candidate, score));
                }
            }

            match best {
                Some((candidate, score)) => {
                    state.commit(candidate);
                    debug!(
                        course_id = %candidate.course_id,
                        instructor_id = %candidate.instructor_id,
                        facility_id = %candidate.facility_id,
                        cost = candidate.total_cost(),
                        score,
                        "提交分配"
                    );
                    assignments.push(Assignment {
                        course_id: candidate.course_id.clone(),
                        instructor_id: candidate.instructor_id.clone(),
                        facility_id: candidate.facility_id.clone(),
                        department_id: candidate.department_id.clone(),
                        cost: candidate.cost,
                        utility_score: candidate.utility_score,
                        soft_violations: candidate.feasibility.soft_violations.clone(),
                        time_slot: UNSCHEDULED_TIME_SLOT.to_string(),
                        assigned_at,
                    });
                }
                None => {
                    let reason = if blocked_by_budget {
                        UnassignedReason::BudgetExceeded
                    } else {
                        UnassignedReason::ResourcesExhausted
                    };
                    debug!(course_id = %course.id, %reason, "课程未分配");
                    unassigned.push(UnassignedCourse {
                        course_id: course.id.clone(),
                        department_id: course.department_id.clone(),
                        reason,
                    });
                }
            }
        }

        AllocationOutcome {
            assignments,
            unassigned,
        }
    }
}
