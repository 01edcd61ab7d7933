// ==========================================
// 院系预算资源规划系统 - 资源领域模型
// ==========================================
// 包含: 教师 / 场地 / 设备
// 红线: 运行期可变计数 (负载/占用) 不写回资源对象,
//       统一由 AllocationState 承载
// ==========================================

use crate::domain::types::{
    DepreciationMethod, EmploymentType, EquipmentStatus, FacilityStatus, FacilityType,
    InstructorStatus,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Instructor - 教师
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub department_id: String,

    #[serde(default)]
    pub employment_type: EmploymentType,
    #[serde(default)]
    pub hourly_rate: Option<f64>, // 外聘教师课时费, 为空时使用配置默认值

    // 资质标签 (如 "PhD", "Mathematics")
    #[serde(default)]
    pub qualifications: Vec<String>,

    // ===== 工作量 =====
    #[serde(default)]
    pub current_load: u32, // 本次规划前已承担课程数
    #[serde(default)]
    pub max_load: Option<u32>, // 为空时使用配置默认值

    #[serde(default)]
    pub status: InstructorStatus,
}

impl Instructor {
    /// 资质标签（小写）
    pub fn qualification_tags(&self) -> impl Iterator<Item = String> + '_ {
        self.qualifications
            .iter()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty())
    }

    /// 是否具备博士学位
    pub fn has_doctorate(&self) -> bool {
        self.qualification_tags()
            .any(|q| q.contains("phd") || q.contains("doctor") || q == "edd")
    }

    /// 是否具备硕士学位
    pub fn has_masters(&self) -> bool {
        self.qualification_tags().any(|q| {
            q.contains("master") || q.contains("mba") || q == "ms" || q == "ma" || q == "msc"
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == InstructorStatus::Active
    }
}

// ==========================================
// Facility - 场地
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department_id: Option<String>, // 公共场地为空

    #[serde(default)]
    pub facility_type: FacilityType,
    #[serde(default)]
    pub capacity: u32,

    // ===== 成本参数 =====
    #[serde(default)]
    pub hourly_cost: f64,
    #[serde(default)]
    pub utilities_cost_annual: f64,
    #[serde(default)]
    pub maintenance_cost_annual: f64,

    #[serde(default)]
    pub status: FacilityStatus,
}

impl Facility {
    pub fn is_available(&self) -> bool {
        self.status == FacilityStatus::Available
    }

    /// 座位占用率 (expected / capacity), 容量为 0 时返回 0
    pub fn fill_ratio(&self, expected_students: u32) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        expected_students as f64 / self.capacity as f64
    }
}

// ==========================================
// Equipment - 设备
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub department_id: Option<String>,
    #[serde(default)]
    pub facility_id: Option<String>, // 所在场地

    pub purchase_cost: f64,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub depreciation_rate: f64, // 0 - 1
    #[serde(default)]
    pub depreciation_method: DepreciationMethod,
    #[serde(default)]
    pub maintenance_cost_annual: f64,

    #[serde(default)]
    pub status: EquipmentStatus,
}

impl Equipment {
    /// 是否计入课程成本
    pub fn is_in_service(&self) -> bool {
        self.status != EquipmentStatus::Retired
    }
}
