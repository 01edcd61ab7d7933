// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use dept_resource_planner::domain::budget::DepartmentBudgets;
use dept_resource_planner::domain::course::Course;
use dept_resource_planner::domain::resource::{Equipment, Facility, Instructor};
use dept_resource_planner::domain::types::{
    CourseLevel, DepreciationMethod, EmploymentType, EquipmentStatus, FacilityStatus,
    FacilityType, InstructorStatus,
};
use dept_resource_planner::engine::RunContext;

// ==========================================
// 固定运行上下文
// ==========================================

pub fn fixed_ctx() -> RunContext {
    RunContext::new(
        NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
        DateTime::parse_from_rfc3339("2026-09-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc),
    )
}

pub fn budgets(entries: &[(&str, f64)]) -> DepartmentBudgets {
    let mut budgets = DepartmentBudgets::new();
    for (dept, amount) in entries {
        budgets.insert(*dept, *amount);
    }
    budgets
}

// ==========================================
// Course 构建器
// ==========================================

pub struct CourseBuilder {
    course: Course,
}

impl CourseBuilder {
    pub fn new(id: &str, department_id: &str) -> Self {
        Self {
            course: Course {
                id: id.to_string(),
                name: format!("Course {}", id),
                department_id: department_id.to_string(),
                subject: None,
                expected_students: 20,
                instructor_cost: 1000.0,
                classroom_cost: 0.0,
                credit_hours: 3,
                hours_per_week: None,
                facility_type_requirement: FacilityType::Classroom,
                is_required: false,
                level: CourseLevel::Introductory,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.course.name = name.to_string();
        self
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.course.subject = Some(subject.to_string());
        self
    }

    pub fn students(mut self, expected: u32) -> Self {
        self.course.expected_students = expected;
        self
    }

    pub fn instructor_cost(mut self, cost: f64) -> Self {
        self.course.instructor_cost = cost;
        self
    }

    pub fn classroom_cost(mut self, cost: f64) -> Self {
        self.course.classroom_cost = cost;
        self
    }

    pub fn requires(mut self, facility_type: FacilityType) -> Self {
        self.course.facility_type_requirement = facility_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.course.is_required = true;
        self
    }

    pub fn level(mut self, level: CourseLevel) -> Self {
        self.course.level = level;
        self
    }

    pub fn build(self) -> Course {
        self.course
    }
}

// ==========================================
// Instructor 构建器
// ==========================================

pub struct InstructorBuilder {
    instructor: Instructor,
}

impl InstructorBuilder {
    pub fn new(id: &str, department_id: &str) -> Self {
        Self {
            instructor: Instructor {
                id: id.to_string(),
                name: format!("Instructor {}", id),
                department_id: department_id.to_string(),
                employment_type: EmploymentType::FullTime,
                hourly_rate: None,
                qualifications: Vec::new(),
                current_load: 0,
                max_load: None,
                status: InstructorStatus::Active,
            },
        }
    }

    pub fn employment(mut self, employment_type: EmploymentType) -> Self {
        self.instructor.employment_type = employment_type;
        self
    }

    pub fn hourly_rate(mut self, rate: f64) -> Self {
        self.instructor.hourly_rate = Some(rate);
        self
    }

    pub fn qualification(mut self, tag: &str) -> Self {
        self.instructor.qualifications.push(tag.to_string());
        self
    }

    pub fn load(mut self, current: u32, max: u32) -> Self {
        self.instructor.current_load = current;
        self.instructor.max_load = Some(max);
        self
    }

    pub fn status(mut self, status: InstructorStatus) -> Self {
        self.instructor.status = status;
        self
    }

    pub fn build(self) -> Instructor {
        self.instructor
    }
}

// ==========================================
// Facility 构建器
// ==========================================

pub struct FacilityBuilder {
    facility: Facility,
}

impl FacilityBuilder {
    pub fn new(id: &str, capacity: u32) -> Self {
        Self {
            facility: Facility {
                id: id.to_string(),
                name: format!("Room {}", id),
                department_id: None,
                facility_type: FacilityType::Classroom,
                capacity,
                hourly_cost: 0.0,
                utilities_cost_annual: 0.0,
                maintenance_cost_annual: 0.0,
                status: FacilityStatus::Available,
            },
        }
    }

    pub fn department(mut self, department_id: &str) -> Self {
        self.facility.department_id = Some(department_id.to_string());
        self
    }

    pub fn kind(mut self, facility_type: FacilityType) -> Self {
        self.facility.facility_type = facility_type;
        self
    }

    pub fn hourly_cost(mut self, cost: f64) -> Self {
        self.facility.hourly_cost = cost;
        self
    }

    pub fn annual_costs(mut self, utilities: f64, maintenance: f64) -> Self {
        self.facility.utilities_cost_annual = utilities;
        self.facility.maintenance_cost_annual = maintenance;
        self
    }

    pub fn status(mut self, status: FacilityStatus) -> Self {
        self.facility.status = status;
        self
    }

    pub fn build(self) -> Facility {
        self.facility
    }
}

// ==========================================
// Equipment 构建器
// ==========================================

pub struct EquipmentBuilder {
    equipment: Equipment,
}

impl EquipmentBuilder {
    pub fn new(id: &str, purchase_cost: f64, purchase_date: NaiveDate) -> Self {
        Self {
            equipment: Equipment {
                id: id.to_string(),
                name: format!("Equipment {}", id),
                department_id: None,
                facility_id: None,
                purchase_cost,
                purchase_date,
                depreciation_rate: 0.1,
                depreciation_method: DepreciationMethod::StraightLine,
                maintenance_cost_annual: 0.0,
                status: EquipmentStatus::Operational,
            },
        }
    }

    pub fn in_facility(mut self, facility_id: &str) -> Self {
        self.equipment.facility_id = Some(facility_id.to_string());
        self
    }

    pub fn rate(mut self, rate: f64) -> Self {
        self.equipment.depreciation_rate = rate;
        self
    }

    pub fn method(mut self, method: DepreciationMethod) -> Self {
        self.equipment.depreciation_method = method;
        self
    }

    pub fn maintenance(mut self, annual: f64) -> Self {
        self.equipment.maintenance_cost_annual = annual;
        self
    }

    pub fn status(mut self, status: EquipmentStatus) -> Self {
        self.equipment.status = status;
        self
    }

    pub fn build(self) -> Equipment {
        self.equipment
    }
}
