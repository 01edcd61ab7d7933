// ==========================================
// 院系预算资源规划系统 - 成本模型
// ==========================================
// 职责: 教师/场地/设备/间接费用成本计算, 资产折旧
// 红线: 纯函数, 无副作用; 所有除法对零分母返回 0
// ==========================================
// 口径:
// - 学期学时 = 周学时 × 学期周数 (默认 3 × 15 = 45)
// - 年度费用按 学期学时 / (52 周 × 40 小时) 折算
// - 设备费用按学期计 (年度 / 2)
// ==========================================

use crate::config::{CostRates, PlanningConfig};
use crate::domain::cost::{
    ComprehensiveCost, DepreciationResult, EquipmentCost, FacilityCost, InstructorCost,
    OverheadCost,
};
use crate::domain::course::Course;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::domain::types::{DepreciationMethod, EmploymentType, FacilityType};
use chrono::NaiveDate;

/// 残值比例（账面价值下限）
pub const RESIDUAL_VALUE_FRACTION: f64 = 0.1;
/// 累计折旧上限比例
pub const MAX_ACCUMULATED_FRACTION: f64 = 0.9;

const DAYS_PER_YEAR: f64 = 365.25;

/// 安全除法：分母为 0（或非有限结果）时返回 0
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// 单位学生成本
pub fn cost_per_student(total: f64, expected_students: u32) -> f64 {
    safe_div(total, expected_students as f64)
}

/// 单位学分学时成本
pub fn cost_per_credit_hour(total: f64, expected_students: u32, credit_hours: u32) -> f64 {
    safe_div(total, expected_students as f64 * credit_hours as f64)
}

// ==========================================
// CostModel - 成本模型
// ==========================================
#[derive(Debug, Clone)]
pub struct CostModel {
    rates: CostRates,
    weeks_per_semester: f64,
    default_hours_per_week: f64,
    as_of: NaiveDate, // 折旧计算基准日
}

impl CostModel {
    /// 构造函数
    ///
    /// # 参数
    /// - `config`: 规划参数
    /// - `as_of`: 折旧计算基准日（由调用方传入, 保证可复现）
    pub fn new(config: &PlanningConfig, as_of: NaiveDate) -> Self {
        Self {
            rates: config.cost_rates.clone(),
            weeks_per_semester: config.allocation.weeks_per_semester,
            default_hours_per_week: config.allocation.default_hours_per_week,
            as_of,
        }
    }

    /// 课程学期学时
    pub fn hours_per_semester(&self, course: &Course) -> f64 {
        course.hours_per_semester(self.weeks_per_semester, self.default_hours_per_week)
    }

    // ==========================================
    // 教师成本
    // ==========================================

    /// 计算教师成本
    ///
    /// 规则:
    /// - FULL_TIME: 基础 = 课程教师成本, 福利 30%
    /// - PART_TIME: 基础 × 0.8, 福利 15%
    /// - ADJUNCT:   基础 = 课时费 × 学期学时, 福利 5%
    /// - CONTRACT:  基础 × 1.2, 无福利
    /// - 学历津贴叠加在基础薪酬上: 博士 +15%, 硕士 +8%
    pub fn instructor_cost(&self, course: &Course, instructor: &Instructor) -> InstructorCost {
        let r = &self.rates;
        let (base_salary, benefits_rate) = match instructor.employment_type {
            EmploymentType::FullTime => (course.instructor_cost, r.full_time_benefits_rate),
            EmploymentType::PartTime => (
                course.instructor_cost * r.part_time_salary_factor,
                r.part_time_benefits_rate,
            ),
            EmploymentType::Adjunct => {
                let hourly_rate = instructor
                    .hourly_rate
                    .unwrap_or(r.default_adjunct_hourly_rate);
                (hourly_rate * self.hours_per_semester(course), r.adjunct_benefits_rate)
            }
            EmploymentType::Contract => (course.instructor_cost * r.contract_salary_factor, 0.0),
        };

        let benefits = base_salary * benefits_rate;
        let differential_rate = if instructor.has_doctorate() {
            r.doctoral_differential
        } else if instructor.has_masters() {
            r.masters_differential
        } else {
            0.0
        };
        let differential = base_salary * differential_rate;

        InstructorCost {
            base_salary,
            benefits,
            differential,
            total: base_salary + benefits + differential,
        }
    }

    // ==========================================
    // 场地成本
    // ==========================================

    /// 场地间接费率（按类型）
    pub fn facility_overhead_rate(&self, facility_type: FacilityType) -> f64 {
        match facility_type {
            FacilityType::Lab => self.rates.lab_overhead_rate,
            FacilityType::Auditorium => self.rates.auditorium_overhead_rate,
            _ => self.rates.default_facility_overhead_rate,
        }
    }

    /// 计算场地成本
    pub fn facility_cost(&self, course: &Course, facility: &Facility) -> FacilityCost {
        let hours = self.hours_per_semester(course);
        let annual_hours = self.rates.annual_usage_weeks * self.rates.weekly_usage_hours;
        let proration = safe_div(hours, annual_hours);

        let base_rental = facility.hourly_cost * hours;
        let utilities = facility.utilities_cost_annual * proration;
        let maintenance = facility.maintenance_cost_annual * proration;
        let overhead = base_rental * self.facility_overhead_rate(facility.facility_type);

        FacilityCost {
            base_rental,
            utilities,
            maintenance,
            overhead,
            total: base_rental + utilities + maintenance + overhead,
        }
    }

    // ==========================================
    // 设备成本
    // ==========================================

    /// 计算设备成本（学期口径）
    ///
    /// # 参数
    /// - `equipment`: 课程使用的设备
    /// - `expected_students`: 预计学生数（为 0 时人均分摊为 0）
    pub fn equipment_cost(
        &self,
        equipment: &[&Equipment],
        expected_students: u32,
    ) -> EquipmentCost {
        let mut depreciation = 0.0;
        let mut maintenance = 0.0;

        for item in equipment {
            let annual = self
                .depreciation(
                    item.purchase_cost,
                    item.purchase_date,
                    item.depreciation_rate,
                    item.depreciation_method,
                )
                .annual_depreciation;
            depreciation += annual / 2.0;
            maintenance += item.maintenance_cost_annual / 2.0;
        }

        let total = depreciation + maintenance;
        EquipmentCost {
            depreciation,
            maintenance,
            per_student_allocation: cost_per_student(total, expected_students),
            total,
        }
    }

    // ==========================================
    // 间接费用
    // ==========================================

    /// 计算间接费用
    ///
    /// 直接成本取课程原始输入 (教师成本 + 教室成本), 不使用计算后的明细
    pub fn overhead_cost(&self, course: &Course) -> OverheadCost {
        let direct_costs = course.direct_costs();
        let administrative = direct_costs * self.rates.administrative_rate;
        let general = direct_costs * self.rates.general_rate;
        OverheadCost {
            administrative,
            general,
            total: administrative + general,
        }
    }

    // ==========================================
    // 综合成本
    // ==========================================

    /// 计算课程综合成本
    pub fn comprehensive_cost(
        &self,
        course: &Course,
        instructor: &Instructor,
        facility: &Facility,
        equipment: &[&Equipment],
    ) -> ComprehensiveCost {
        let instructor_cost = self.instructor_cost(course, instructor);
        let facility_cost = self.facility_cost(course, facility);
        let equipment_cost = self.equipment_cost(equipment, course.expected_students);
        let overhead_cost = self.overhead_cost(course);

        let total = instructor_cost.total
            + facility_cost.total
            + equipment_cost.total
            + overhead_cost.total;

        ComprehensiveCost {
            instructor: instructor_cost,
            facility: facility_cost,
            equipment: equipment_cost,
            overhead: overhead_cost,
            total,
            cost_per_student: cost_per_student(total, course.expected_students),
            cost_per_credit_hour: cost_per_credit_hour(
                total,
                course.expected_students,
                course.credit_hours,
            ),
        }
    }

    // ==========================================
    // 折旧
    // ==========================================

    /// 按购置日期计算折旧（基准日为 as_of）
    pub fn depreciation(
        &self,
        purchase_cost: f64,
        purchase_date: NaiveDate,
        rate: f64,
        method: DepreciationMethod,
    ) -> DepreciationResult {
        let days = (self.as_of - purchase_date).num_days().max(0) as f64;
        self.depreciation_for_years(purchase_cost, days / DAYS_PER_YEAR, rate, method)
    }

    /// 按持有年数计算折旧
    ///
    /// 规则:
    /// - 直线法: 年折旧 = 原值 × 折旧率; 累计 = 年折旧 × 年数
    /// - 双倍余额递减法: 每个完整年度按 折旧率×2 扣减账面余额; 年折旧 = 下一年度预计扣减额
    /// - 工作量法: 年折旧 = 原值 / 预计寿命小时 × 年使用小时
    /// - 累计折旧不超过原值 90%, 账面价值不低于原值 10%
    pub fn depreciation_for_years(
        &self,
        purchase_cost: f64,
        years_owned: f64,
        rate: f64,
        method: DepreciationMethod,
    ) -> DepreciationResult {
        let years_owned = years_owned.max(0.0);
        let max_accumulated = purchase_cost * MAX_ACCUMULATED_FRACTION;
        let residual = purchase_cost * RESIDUAL_VALUE_FRACTION;

        let (annual_depreciation, raw_accumulated) = match method {
            DepreciationMethod::StraightLine => {
                let annual = purchase_cost * rate;
                (annual, annual * years_owned)
            }
            DepreciationMethod::DecliningBalance => {
                let double_rate = (rate * 2.0).clamp(0.0, 1.0);
                let mut book_value = purchase_cost;
                for _ in 0..years_owned.floor() as u64 {
                    book_value -= book_value * double_rate;
                }
                let accumulated = purchase_cost - book_value;
                let remaining = (purchase_cost - accumulated.min(max_accumulated)).max(residual);
                (remaining * double_rate, accumulated)
            }
            DepreciationMethod::UnitsOfProduction => {
                let per_hour = safe_div(purchase_cost, self.rates.estimated_life_hours);
                let annual = per_hour * self.rates.annual_usage_hours;
                let hours_elapsed = self.rates.annual_usage_hours * years_owned;
                (annual, per_hour * hours_elapsed)
            }
        };

        let accumulated_depreciation = raw_accumulated.clamp(0.0, max_accumulated.max(0.0));
        let current_value = (purchase_cost - accumulated_depreciation).max(residual);

        DepreciationResult {
            annual_depreciation,
            accumulated_depreciation,
            current_value,
            years_owned,
        }
    }
}
