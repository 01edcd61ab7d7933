// ==========================================
// 院系预算资源规划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod budget;
pub mod cost;
pub mod course;
pub mod plan;
pub mod resource;
pub mod types;

// 重导出核心类型
pub use budget::DepartmentBudgets;
pub use cost::{
    ComprehensiveCost, DepreciationResult, EquipmentCost, FacilityCost, InstructorCost,
    OverheadCost,
};
pub use course::Course;
pub use plan::{
    AllocationPlan, Assignment, Candidate, ComponentCosts, CostSummary, DepartmentCost,
    FeasibilityVerdict, ResourceUtilization, UnassignedCourse, UtilizationRatio,
};
pub use resource::{Equipment, Facility, Instructor};
pub use types::{
    CourseLevel, DepreciationMethod, EmploymentType, EquipmentStatus, FacilityStatus,
    FacilityType, InstructorStatus, UnassignedReason,
};
