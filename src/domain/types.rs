// ==========================================
// 院系预算资源规划系统 - 领域类型定义
// ==========================================
// 职责: 资源/课程的枚举类型
// 序列化格式: SCREAMING_SNAKE_CASE (与上游数据一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 聘用类型 (Employment Type)
// ==========================================
// 决定基础薪酬系数与福利比例
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    FullTime,  // 全职
    PartTime,  // 兼职
    Adjunct,   // 外聘 (按课时计酬)
    Contract,  // 合同制
}

impl Default for EmploymentType {
    fn default() -> Self {
        EmploymentType::FullTime
    }
}

impl fmt::Display for EmploymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentType::FullTime => write!(f, "FULL_TIME"),
            EmploymentType::PartTime => write!(f, "PART_TIME"),
            EmploymentType::Adjunct => write!(f, "ADJUNCT"),
            EmploymentType::Contract => write!(f, "CONTRACT"),
        }
    }
}

// ==========================================
// 教师状态 (Instructor Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstructorStatus {
    Active,   // 在岗
    OnLeave,  // 休假
    Inactive, // 离岗
}

impl Default for InstructorStatus {
    fn default() -> Self {
        InstructorStatus::Active
    }
}

impl fmt::Display for InstructorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstructorStatus::Active => write!(f, "ACTIVE"),
            InstructorStatus::OnLeave => write!(f, "ON_LEAVE"),
            InstructorStatus::Inactive => write!(f, "INACTIVE"),
        }
    }
}

// ==========================================
// 场地类型 (Facility Type)
// ==========================================
// CLASSROOM 为通用兜底类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityType {
    Classroom,
    Lab,
    Auditorium,
    Library,
    Gym,
    Office,
}

impl Default for FacilityType {
    fn default() -> Self {
        FacilityType::Classroom
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityType::Classroom => write!(f, "CLASSROOM"),
            FacilityType::Lab => write!(f, "LAB"),
            FacilityType::Auditorium => write!(f, "AUDITORIUM"),
            FacilityType::Library => write!(f, "LIBRARY"),
            FacilityType::Gym => write!(f, "GYM"),
            FacilityType::Office => write!(f, "OFFICE"),
        }
    }
}

// ==========================================
// 场地状态 (Facility Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityStatus {
    Available,   // 可用
    Maintenance, // 维护中
    Unavailable, // 不可用
}

impl Default for FacilityStatus {
    fn default() -> Self {
        FacilityStatus::Available
    }
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FacilityStatus::Available => write!(f, "AVAILABLE"),
            FacilityStatus::Maintenance => write!(f, "MAINTENANCE"),
            FacilityStatus::Unavailable => write!(f, "UNAVAILABLE"),
        }
    }
}

// ==========================================
// 设备状态 (Equipment Status)
// ==========================================
// RETIRED 设备不计入课程成本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Retired,
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Operational
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Operational => write!(f, "OPERATIONAL"),
            EquipmentStatus::Maintenance => write!(f, "MAINTENANCE"),
            EquipmentStatus::Retired => write!(f, "RETIRED"),
        }
    }
}

// ==========================================
// 课程层级 (Course Level)
// ==========================================
// 顺序: Introductory < Intermediate < Advanced < Graduate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseLevel {
    Introductory,
    Intermediate,
    Advanced,
    Graduate,
}

impl CourseLevel {
    /// 高阶课程（影响优先级与复杂度）
    pub fn is_advanced(&self) -> bool {
        matches!(self, CourseLevel::Advanced | CourseLevel::Graduate)
    }
}

impl Default for CourseLevel {
    fn default() -> Self {
        CourseLevel::Introductory
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseLevel::Introductory => write!(f, "INTRODUCTORY"),
            CourseLevel::Intermediate => write!(f, "INTERMEDIATE"),
            CourseLevel::Advanced => write!(f, "ADVANCED"),
            CourseLevel::Graduate => write!(f, "GRADUATE"),
        }
    }
}

// ==========================================
// 折旧方法 (Depreciation Method)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepreciationMethod {
    StraightLine,       // 直线法
    DecliningBalance,   // 双倍余额递减法
    UnitsOfProduction,  // 工作量法
}

impl Default for DepreciationMethod {
    fn default() -> Self {
        DepreciationMethod::StraightLine
    }
}

impl fmt::Display for DepreciationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepreciationMethod::StraightLine => write!(f, "STRAIGHT_LINE"),
            DepreciationMethod::DecliningBalance => write!(f, "DECLINING_BALANCE"),
            DepreciationMethod::UnitsOfProduction => write!(f, "UNITS_OF_PRODUCTION"),
        }
    }
}

impl std::str::FromStr for DepreciationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "straight_line" | "straight-line" => Ok(DepreciationMethod::StraightLine),
            "declining_balance" | "declining-balance" => Ok(DepreciationMethod::DecliningBalance),
            "units_of_production" | "units-of-production" => {
                Ok(DepreciationMethod::UnitsOfProduction)
            }
            other => Err(format!("未知折旧方法: {}", other)),
        }
    }
}

// ==========================================
// 未分配原因 (Unassigned Reason)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnassignedReason {
    NoCompatibleInstructor, // 无兼容教师
    NoCompatibleFacility,   // 无兼容场地
    ResourcesExhausted,     // 兼容资源已被占用
    BudgetExceeded,         // 部门预算不足
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnassignedReason::NoCompatibleInstructor => write!(f, "NO_COMPATIBLE_INSTRUCTOR"),
            UnassignedReason::NoCompatibleFacility => write!(f, "NO_COMPATIBLE_FACILITY"),
            UnassignedReason::ResourcesExhausted => write!(f, "RESOURCES_EXHAUSTED"),
            UnassignedReason::BudgetExceeded => write!(f, "BUDGET_EXCEEDED"),
        }
    }
}
