// ==========================================
// 院系预算资源规划系统 - 规划参数
// ==========================================
// 所有字段均带默认值, 配置文件只需覆写关心的部分
// ==========================================

use serde::{Deserialize, Serialize};

/// 规划参数全集
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningConfig {
    #[serde(default)]
    pub allocation: AllocationConstraints,
    #[serde(default)]
    pub cost_rates: CostRates,
    #[serde(default)]
    pub assembly: AssemblyThresholds,
    #[serde(default)]
    pub scenario: ScenarioSettings,
}

// ==========================================
// 分配约束
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConstraints {
    /// 部门预算缓冲比例（0~1）
    pub budget_buffer_fraction: f64,
    /// 班级规模下限（软约束）
    pub min_class_size: u32,
    /// 班级规模上限（软约束）
    pub max_class_size: u32,
    /// 教师最大课程数（教师未配置时使用）
    pub default_max_instructor_load: u32,
    pub weeks_per_semester: f64,
    pub default_hours_per_week: f64,
}

impl Default for AllocationConstraints {
    fn default() -> Self {
        Self {
            budget_buffer_fraction: 0.05,
            min_class_size: 8,
            max_class_size: 35,
            default_max_instructor_load: 4,
            weeks_per_semester: 15.0,
            default_hours_per_week: 3.0,
        }
    }
}

// ==========================================
// 成本费率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostRates {
    // ===== 聘用类型 =====
    pub full_time_benefits_rate: f64,
    pub part_time_salary_factor: f64,
    pub part_time_benefits_rate: f64,
    pub adjunct_benefits_rate: f64,
    pub default_adjunct_hourly_rate: f64,
    pub contract_salary_factor: f64,

    // ===== 学历津贴 =====
    pub doctoral_differential: f64,
    pub masters_differential: f64,

    // ===== 场地 =====
    pub lab_overhead_rate: f64,
    pub auditorium_overhead_rate: f64,
    pub default_facility_overhead_rate: f64,
    pub annual_usage_weeks: f64,
    pub weekly_usage_hours: f64,

    // ===== 间接费用 =====
    pub administrative_rate: f64,
    pub general_rate: f64,

    // ===== 工作量法折旧 =====
    pub estimated_life_hours: f64,
    pub annual_usage_hours: f64,
}

impl Default for CostRates {
    fn default() -> Self {
        Self {
            full_time_benefits_rate: 0.30,
            part_time_salary_factor: 0.8,
            part_time_benefits_rate: 0.15,
            adjunct_benefits_rate: 0.05,
            default_adjunct_hourly_rate: 50.0,
            contract_salary_factor: 1.2,
            doctoral_differential: 0.15,
            masters_differential: 0.08,
            lab_overhead_rate: 0.20,
            auditorium_overhead_rate: 0.15,
            default_facility_overhead_rate: 0.10,
            annual_usage_weeks: 52.0,
            weekly_usage_hours: 40.0,
            administrative_rate: 0.12,
            general_rate: 0.08,
            estimated_life_hours: 10_000.0,
            annual_usage_hours: 1_000.0,
        }
    }
}

// ==========================================
// 方案评估阈值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyThresholds {
    /// 平均单课成本基准
    pub cost_benchmark: f64,
    /// 高成本提示阈值
    pub high_cost_threshold: f64,

    pub low_instructor_utilization_pct: f64,
    pub low_facility_utilization_pct: f64,
    pub low_optimization_score: f64,

    pub high_instructor_utilization_pct: f64,
    pub high_facility_utilization_pct: f64,
}

impl Default for AssemblyThresholds {
    fn default() -> Self {
        Self {
            cost_benchmark: 5_000.0,
            high_cost_threshold: 10_000.0,
            low_instructor_utilization_pct: 70.0,
            low_facility_utilization_pct: 60.0,
            low_optimization_score: 70.0,
            high_instructor_utilization_pct: 90.0,
            high_facility_utilization_pct: 85.0,
        }
    }
}

// ==========================================
// 情景与差异分析
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSettings {
    pub optimistic_factor: f64,
    pub realistic_factor: f64,
    pub pessimistic_factor: f64,
    /// 情景建议触发阈值（相对基准成本）
    pub recommendation_threshold: f64,
    /// 差异显著阈值（百分比）
    pub significant_variance_pct: f64,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            optimistic_factor: -0.10,
            realistic_factor: 0.0,
            pessimistic_factor: 0.15,
            recommendation_threshold: 0.20,
            significant_variance_pct: 10.0,
        }
    }
}

impl PlanningConfig {
    /// 校验参数范围
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(String): 第一个不合法字段的说明
    pub fn validate(&self) -> Result<(), String> {
        let a = &self.allocation;
        if !(0.0..1.0).contains(&a.budget_buffer_fraction) {
            return Err(format!(
                "budget_buffer_fraction 必须位于 [0, 1): {}",
                a.budget_buffer_fraction
            ));
        }
        if a.min_class_size > a.max_class_size {
            return Err(format!(
                "min_class_size({}) 不能大于 max_class_size({})",
                a.min_class_size, a.max_class_size
            ));
        }
        if a.default_max_instructor_load == 0 {
            return Err("default_max_instructor_load 必须大于 0".to_string());
        }
        if a.weeks_per_semester <= 0.0 || a.default_hours_per_week < 0.0 {
            return Err("学期周数必须大于 0, 周学时不能为负".to_string());
        }

        let r = &self.cost_rates;
        let rates = [
            ("full_time_benefits_rate", r.full_time_benefits_rate),
            ("part_time_salary_factor", r.part_time_salary_factor),
            ("part_time_benefits_rate", r.part_time_benefits_rate),
            ("adjunct_benefits_rate", r.adjunct_benefits_rate),
            ("default_adjunct_hourly_rate", r.default_adjunct_hourly_rate),
            ("contract_salary_factor", r.contract_salary_factor),
            ("doctoral_differential", r.doctoral_differential),
            ("masters_differential", r.masters_differential),
            ("lab_overhead_rate", r.lab_overhead_rate),
            ("auditorium_overhead_rate", r.auditorium_overhead_rate),
            ("default_facility_overhead_rate", r.default_facility_overhead_rate),
            ("administrative_rate", r.administrative_rate),
            ("general_rate", r.general_rate),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(format!("{} 不能为负数或非有限值: {}", name, value));
        }
        if r.annual_usage_weeks <= 0.0 || r.weekly_usage_hours <= 0.0 {
            return Err("年度使用周数/周使用小时数必须大于 0".to_string());
        }
        if r.estimated_life_hours <= 0.0 || r.annual_usage_hours < 0.0 {
            return Err("设备预计寿命小时数必须大于 0".to_string());
        }

        if self.scenario.recommendation_threshold < 0.0
            || self.scenario.significant_variance_pct < 0.0
        {
            return Err("情景/差异阈值不能为负数".to_string());
        }

        Ok(())
    }
}
