// ==========================================
// 院系预算资源规划系统 - 成本明细模型
// ==========================================
// 由 CostModel 计算产出, 候选/分配结果引用
// ==========================================

use serde::{Deserialize, Serialize};

/// 教师成本明细
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructorCost {
    pub base_salary: f64,
    pub benefits: f64,
    pub differential: f64, // 学历津贴
    pub total: f64,
}

/// 场地成本明细
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FacilityCost {
    pub base_rental: f64,
    pub utilities: f64,
    pub maintenance: f64,
    pub overhead: f64,
    pub total: f64,
}

/// 设备成本明细（学期口径）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentCost {
    pub depreciation: f64,
    pub maintenance: f64,
    pub per_student_allocation: f64,
    pub total: f64,
}

/// 间接费用明细
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverheadCost {
    pub administrative: f64,
    pub general: f64,
    pub total: f64,
}

/// 课程综合成本
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveCost {
    pub instructor: InstructorCost,
    pub facility: FacilityCost,
    pub equipment: EquipmentCost,
    pub overhead: OverheadCost,
    pub total: f64,
    pub cost_per_student: f64,
    pub cost_per_credit_hour: f64,
}

/// 资产折旧结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DepreciationResult {
    pub annual_depreciation: f64,
    pub accumulated_depreciation: f64,
    pub current_value: f64,
    pub years_owned: f64,
}
