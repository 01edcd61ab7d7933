// ==========================================
// 院系预算资源规划系统 - 课程领域模型
// ==========================================
// 红线: 课程在一次规划运行中为只读输入
// ==========================================

use crate::domain::types::{CourseLevel, FacilityType};
use serde::{Deserialize, Serialize};

fn default_credit_hours() -> u32 {
    3
}

// ==========================================
// Course - 待排课程
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    // ===== 主键 =====
    pub id: String,
    pub name: String,
    pub department_id: String,

    // ===== 学科 =====
    // 为空时取课程名称首个词作为学科标记
    #[serde(default)]
    pub subject: Option<String>,

    // ===== 规模 =====
    #[serde(default)]
    pub expected_students: u32,

    // ===== 预算输入 (原始成本, 用于间接费用计算) =====
    #[serde(default)]
    pub instructor_cost: f64,
    #[serde(default)]
    pub classroom_cost: f64,

    // ===== 学时 =====
    #[serde(default = "default_credit_hours")]
    pub credit_hours: u32,
    #[serde(default)]
    pub hours_per_week: Option<f64>, // 为空时使用配置默认值

    // ===== 需求 =====
    #[serde(default)]
    pub facility_type_requirement: FacilityType,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub level: CourseLevel,
}

impl Course {
    /// 学科标记（小写）
    ///
    /// 优先使用显式 subject，否则取课程名称的首个词
    pub fn subject_token(&self) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(subject) if !subject.is_empty() => subject.to_lowercase(),
            _ => self.name_token(),
        }
    }

    /// 课程名称首个词（小写），用于资质匹配评分
    pub fn name_token(&self) -> String {
        self.name
            .split_whitespace()
            .next()
            .map(|t| t.to_lowercase())
            .unwrap_or_default()
    }

    /// 原始直接成本（教师成本 + 教室成本）
    pub fn direct_costs(&self) -> f64 {
        self.instructor_cost + self.classroom_cost
    }

    /// 学期总学时
    pub fn hours_per_semester(&self, weeks_per_semester: f64, default_hours_per_week: f64) -> f64 {
        self.hours_per_week.unwrap_or(default_hours_per_week) * weeks_per_semester
    }

    /// 是否为实验类课程
    pub fn is_lab(&self) -> bool {
        self.facility_type_requirement == FacilityType::Lab
    }
}
