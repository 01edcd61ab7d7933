// ==========================================
// 院系预算资源规划系统 - 方案汇总器
// ==========================================
// 职责: 将已提交分配汇总为 AllocationPlan
// 输出: 资源利用率 / 成本汇总 / 优化评分 / 警告 / 建议
// ==========================================
// 优化评分 = 0.4 × 利用效率 + 0.3 × 成本档位 + 0.3 × 约束分
//   成本档位: 平均成本 ≤ 80% 基准 -> 100, ≤ 100% -> 80, ≤ 120% -> 60, 否则 40
//   约束分:   100 - 10 × 警告数 (下限 0)
// ==========================================

use crate::config::{AssemblyThresholds, PlanningConfig};
use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::plan::{
    AllocationPlan, ComponentCosts, CostSummary, DepartmentCost, ResourceUtilization,
    UtilizationRatio,
};
use crate::engine::allocator::AllocationOutcome;
use crate::engine::cost_model::safe_div;
use crate::engine::strategy::OptimizationStrategy;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// PlanAssembler - 方案汇总器
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanAssembler {
    thresholds: AssemblyThresholds,
}

impl PlanAssembler {
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            thresholds: config.assembly.clone(),
        }
    }

    /// 汇总方案
    ///
    /// # 参数
    /// - `strategy`: 本次运行策略
    /// - `outcome`: 分配结果
    /// - `courses`: 课程列表（用于识别未配置预算的部门）
    /// - `instructor_total`: 教师总数
    /// - `facility_total`: 场地总数
    /// - `budgets`: 部门预算
    /// - `generated_at`: 方案生成时间
    #[allow(clippy::too_many_arguments)]
    pub fn assemble(
        &self,
        strategy: OptimizationStrategy,
        outcome: AllocationOutcome,
        courses: &[Course],
        instructor_total: usize,
        facility_total: usize,
        budgets: &DepartmentBudgets,
        generated_at: DateTime<Utc>,
    ) -> AllocationPlan {
        let AllocationOutcome {
            assignments,
            unassigned,
        } = outcome;

        // 1. 资源利用率
        let assigned_instructors: BTreeSet<&str> =
            assignments.iter().map(|a| a.instructor_id.as_str()).collect();
        let assigned_facilities: BTreeSet<&str> =
            assignments.iter().map(|a| a.facility_id.as_str()).collect();
        let resource_utilization = Self::utilization(
            assigned_instructors.len(),
            instructor_total,
            assigned_facilities.len(),
            facility_total,
        );

        // 2. 成本汇总
        let mut by_department: BTreeMap<String, DepartmentCost> = budgets
            .iter()
            .map(|(dept, amount)| {
                (
                    dept.clone(),
                    DepartmentCost {
                        total: 0.0,
                        course_count: 0,
                        budget: Some(*amount),
                        remaining: Some(*amount),
                    },
                )
            })
            .collect();
        let mut by_component = ComponentCosts::default();
        let mut total_cost = 0.0;

        for assignment in &assignments {
            let cost = &assignment.cost;
            total_cost += cost.total;
            by_component.instructor += cost.instructor.total;
            by_component.facility += cost.facility.total;
            by_component.equipment += cost.equipment.total;
            by_component.overhead += cost.overhead.total;

            let entry = by_department
                .entry(assignment.department_id.clone())
                .or_default();
            entry.total += cost.total;
            entry.course_count += 1;
            entry.remaining = entry.budget.map(|b| b - entry.total);
        }

        let cost_breakdown = CostSummary {
            total_cost,
            by_department,
            by_component,
            average_cost_per_course: safe_div(total_cost, assignments.len() as f64),
        };

        // 3. 警告
        let t = &self.thresholds;
        let mut warnings = Vec::new();
        if resource_utilization.instructors.percent < t.low_instructor_utilization_pct {
            warnings.push(format!(
                "教师利用率偏低: {:.1}% < {:.0}%",
                resource_utilization.instructors.percent, t.low_instructor_utilization_pct
            ));
        }
        if resource_utilization.facilities.percent < t.low_facility_utilization_pct {
            warnings.push(format!(
                "场地利用率偏低: {:.1}% < {:.0}%",
                resource_utilization.facilities.percent, t.low_facility_utilization_pct
            ));
        }
        if !unassigned.is_empty() {
            let detail: Vec<String> = unassigned
                .iter()
                .map(|u| format!("{}({})", u.course_id, u.reason))
                .collect();
            warnings.push(format!(
                "{} 门课程未能分配: {}",
                unassigned.len(),
                detail.join(", ")
            ));
        }
        let unbudgeted: BTreeSet<&str> = courses
            .iter()
            .map(|c| c.department_id.as_str())
            .filter(|dept| budgets.get(dept).is_none())
            .collect();
        for dept in unbudgeted {
            warnings.push(format!("部门 {} 未配置预算, 未施加预算约束", dept));
        }

        // 4. 优化评分
        let constraint_score = (100.0 - 10.0 * warnings.len() as f64).max(0.0);
        let optimization_score = (0.4 * resource_utilization.overall_efficiency
            + 0.3 * self.cost_efficiency_band(cost_breakdown.average_cost_per_course)
            + 0.3 * constraint_score)
            .clamp(0.0, 100.0);

        if optimization_score < t.low_optimization_score {
            warnings.push(format!(
                "方案优化评分偏低: {:.1} < {:.0}",
                optimization_score, t.low_optimization_score
            ));
        }

        // 5. 建议
        let mut recommendations = Vec::new();
        if resource_utilization.instructors.percent > t.high_instructor_utilization_pct {
            recommendations.push(format!(
                "教师利用率 {:.1}% 超过 {:.0}%, 建议增聘教师",
                resource_utilization.instructors.percent, t.high_instructor_utilization_pct
            ));
        }
        if resource_utilization.facilities.percent > t.high_facility_utilization_pct {
            recommendations.push(format!(
                "场地利用率 {:.1}% 超过 {:.0}%, 建议扩充或优化场地使用",
                resource_utilization.facilities.percent, t.high_facility_utilization_pct
            ));
        }
        if cost_breakdown.average_cost_per_course > t.high_cost_threshold {
            recommendations.push(format!(
                "平均单课成本 {:.2} 高于 {:.2}, 建议复核成本结构",
                cost_breakdown.average_cost_per_course, t.high_cost_threshold
            ));
        }
        if !unassigned.is_empty() {
            recommendations.push(
                "存在未分配课程, 建议补充兼容教师/场地或调整部门预算".to_string(),
            );
        }
        let size_violations = assignments
            .iter()
            .filter(|a| !a.soft_violations.is_empty())
            .count();
        if size_violations > 0 {
            recommendations.push(format!(
                "{} 门课程班级规模超出建议范围, 建议拆分或合并班级",
                size_violations
            ));
        }

        AllocationPlan {
            strategy,
            generated_at,
            assignments,
            unassigned,
            resource_utilization,
            cost_breakdown,
            optimization_score,
            warnings,
            recommendations,
        }
    }

    /// 资源利用率（百分比）
    pub fn utilization(
        assigned_instructors: usize,
        instructor_total: usize,
        assigned_facilities: usize,
        facility_total: usize,
    ) -> ResourceUtilization {
        let instructors = UtilizationRatio {
            assigned: assigned_instructors,
            total: instructor_total,
            percent: safe_div(assigned_instructors as f64, instructor_total as f64) * 100.0,
        };
        let facilities = UtilizationRatio {
            assigned: assigned_facilities,
            total: facility_total,
            percent: safe_div(assigned_facilities as f64, facility_total as f64) * 100.0,
        };
        ResourceUtilization {
            instructors,
            facilities,
            overall_efficiency: (instructors.percent + facilities.percent) / 2.0,
        }
    }

    /// 成本档位
    pub fn cost_efficiency_band(&self, average_cost: f64) -> f64 {
        let benchmark = self.thresholds.cost_benchmark;
        if average_cost <= benchmark * 0.8 {
            100.0
        } else if average_cost <= benchmark {
            80.0
        } else if average_cost <= benchmark * 1.2 {
            60.0
        } else {
            40.0
        }
    }
}
