// ==========================================
// 院系预算资源规划系统 - 输入校验器
// ==========================================
// 职责: 在候选生成之前快速失败
// 红线: 校验失败属于调用方错误, 不可重试, 不产生部分结果
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::engine::error::{PlanningError, PlanningResult};
use std::collections::HashSet;

// ==========================================
// InputValidator - 输入校验器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct InputValidator;

impl InputValidator {
    pub fn new() -> Self {
        Self
    }

    /// 校验一次规划运行的全部输入
    ///
    /// # 返回
    /// - Ok(()): 校验通过
    /// - Err(PlanningError): 第一个发现的问题
    pub fn validate_all(
        &self,
        config: &PlanningConfig,
        courses: &[Course],
        instructors: &[Instructor],
        facilities: &[Facility],
        equipment: &[Equipment],
        budgets: &DepartmentBudgets,
    ) -> PlanningResult<()> {
        config.validate().map_err(PlanningError::InvalidConfig)?;
        self.validate_courses(courses)?;
        self.validate_instructors(instructors)?;
        self.validate_facilities(facilities)?;
        self.validate_equipment(equipment)?;
        self.validate_budgets(budgets)?;
        Ok(())
    }

    pub fn validate_courses(&self, courses: &[Course]) -> PlanningResult<()> {
        if courses.is_empty() {
            return Err(PlanningError::EmptyCourseList);
        }
        ensure_unique("课程", courses.iter().map(|c| c.id.as_str()))?;

        for course in courses {
            require_id("course.id", &course.id)?;
            let prefix = format!("course[{}]", course.id);
            require_id(&format!("{}.department_id", prefix), &course.department_id)?;
            require_amount(&format!("{}.instructor_cost", prefix), course.instructor_cost)?;
            require_amount(&format!("{}.classroom_cost", prefix), course.classroom_cost)?;
            if let Some(hours) = course.hours_per_week {
                require_amount(&format!("{}.hours_per_week", prefix), hours)?;
            }
        }
        Ok(())
    }

    pub fn validate_instructors(&self, instructors: &[Instructor]) -> PlanningResult<()> {
        ensure_unique("教师", instructors.iter().map(|i| i.id.as_str()))?;

        for instructor in instructors {
            require_id("instructor.id", &instructor.id)?;
            require_id(
                &format!("instructor[{}].department_id", instructor.id),
                &instructor.department_id,
            )?;
            if let Some(rate) = instructor.hourly_rate {
                require_amount(&format!("instructor[{}].hourly_rate", instructor.id), rate)?;
            }
        }
        Ok(())
    }

    pub fn validate_facilities(&self, facilities: &[Facility]) -> PlanningResult<()> {
        ensure_unique("场地", facilities.iter().map(|f| f.id.as_str()))?;

        for facility in facilities {
            require_id("facility.id", &facility.id)?;
            let prefix = format!("facility[{}]", facility.id);
            if facility.capacity == 0 {
                return Err(PlanningError::validation(
                    format!("{}.capacity", prefix),
                    "容量必须大于 0",
                ));
            }
            require_amount(&format!("{}.hourly_cost", prefix), facility.hourly_cost)?;
            require_amount(
                &format!("{}.utilities_cost_annual", prefix),
                facility.utilities_cost_annual,
            )?;
            require_amount(
                &format!("{}.maintenance_cost_annual", prefix),
                facility.maintenance_cost_annual,
            )?;
        }
        Ok(())
    }

    pub fn validate_equipment(&self, equipment: &[Equipment]) -> PlanningResult<()> {
        ensure_unique("设备", equipment.iter().map(|e| e.id.as_str()))?;

        for item in equipment {
            require_id("equipment.id", &item.id)?;
            let prefix = format!("equipment[{}]", item.id);
            require_amount(&format!("{}.purchase_cost", prefix), item.purchase_cost)?;
            require_amount(
                &format!("{}.maintenance_cost_annual", prefix),
                item.maintenance_cost_annual,
            )?;
            if !(0.0..=1.0).contains(&item.depreciation_rate) {
                return Err(PlanningError::validation(
                    format!("{}.depreciation_rate", prefix),
                    format!("折旧率必须位于 [0, 1]: {}", item.depreciation_rate),
                ));
            }
        }
        Ok(())
    }

    pub fn validate_budgets(&self, budgets: &DepartmentBudgets) -> PlanningResult<()> {
        for (department_id, amount) in budgets.iter() {
            require_id("budget.department_id", department_id)?;
            require_amount(&format!("budget[{}]", department_id), *amount)?;
        }
        Ok(())
    }
}

fn require_id(field: &str, value: &str) -> PlanningResult<()> {
    if value.trim().is_empty() {
        return Err(PlanningError::validation(field, "不能为空"));
    }
    Ok(())
}

fn require_amount(field: &str, value: f64) -> PlanningResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlanningError::validation(
            field,
            format!("必须为非负有限数值: {}", value),
        ));
    }
    Ok(())
}

fn ensure_unique<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> PlanningResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(PlanningError::DuplicateId {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
