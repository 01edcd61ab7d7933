// ==========================================
// 院系预算资源规划系统 - 分配方案领域模型
// ==========================================
// 生命周期:
//   Candidate (运行期临时) -> Assignment (已提交) -> AllocationPlan (只读结果)
// ==========================================

use crate::domain::cost::ComprehensiveCost;
use crate::domain::types::UnassignedReason;
use crate::engine::strategy::OptimizationStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// 可行性判定
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeasibilityVerdict {
    pub feasible: bool,               // 硬约束结果
    pub soft_violations: Vec<String>, // 软约束违反（不阻断）
}

// ==========================================
// Candidate - 候选三元组
// ==========================================
// 不落库, 每次运行重新生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub course_id: String,
    pub instructor_id: String,
    pub facility_id: String,
    pub department_id: String,

    pub cost: ComprehensiveCost,
    pub utility_score: f64,     // 质量评分
    pub capacity_ratio: f64,    // expected / capacity
    pub instructor_load_ratio: f64,
    pub feasibility: FeasibilityVerdict,
}

impl Candidate {
    /// 综合成本总额
    pub fn total_cost(&self) -> f64 {
        self.cost.total
    }

    /// 利用率代理指标 = (座位占用率 + 教师负载率) / 2
    pub fn utilization_proxy(&self) -> f64 {
        (self.capacity_ratio + self.instructor_load_ratio) / 2.0
    }
}

// ==========================================
// Assignment - 已提交分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub course_id: String,
    pub instructor_id: String,
    pub facility_id: String,
    pub department_id: String,

    pub cost: ComprehensiveCost,
    pub utility_score: f64,
    pub soft_violations: Vec<String>,

    pub time_slot: String, // 占位, 不参与求解
    pub assigned_at: DateTime<Utc>,
}

impl Assignment {
    pub fn total_cost(&self) -> f64 {
        self.cost.total
    }
}

// ==========================================
// UnassignedCourse - 未分配课程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnassignedCourse {
    pub course_id: String,
    pub department_id: String,
    pub reason: UnassignedReason,
}

// ==========================================
// 资源利用率
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationRatio {
    pub assigned: usize,
    pub total: usize,
    pub percent: f64, // 0 - 100
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub instructors: UtilizationRatio,
    pub facilities: UtilizationRatio,
    pub overall_efficiency: f64, // 两者平均
}

// ==========================================
// 成本汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentCosts {
    pub instructor: f64,
    pub facility: f64,
    pub equipment: f64,
    pub overhead: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCost {
    pub total: f64,
    pub course_count: usize,
    pub budget: Option<f64>,
    pub remaining: Option<f64>, // 预算 - 支出（未扣缓冲）
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_cost: f64,
    pub by_department: BTreeMap<String, DepartmentCost>,
    pub by_component: ComponentCosts,
    pub average_cost_per_course: f64,
}

// ==========================================
// AllocationPlan - 分配方案（运行结果, 构造后只读）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPlan {
    pub strategy: OptimizationStrategy,
    pub generated_at: DateTime<Utc>,

    pub assignments: Vec<Assignment>,
    pub unassigned: Vec<UnassignedCourse>,

    pub resource_utilization: ResourceUtilization,
    pub cost_breakdown: CostSummary,
    pub optimization_score: f64, // 0 - 100

    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AllocationPlan {
    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn unassigned_count(&self) -> usize {
        self.unassigned.len()
    }

    /// 按课程查找分配
    pub fn assignment_for(&self, course_id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.course_id == course_id)
    }
}
