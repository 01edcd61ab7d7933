// ==========================================
// 院系预算资源规划系统 - 候选池
// ==========================================
// 职责: 基于兼容性索引枚举并评分全部候选三元组
// 生成顺序: 课程 -> 教师(输入顺序) -> 场地(输入顺序)
// ==========================================

use crate::domain::course::Course;
use crate::domain::plan::Candidate;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::domain::types::UnassignedReason;
use crate::engine::compatibility::CompatibilityIndex;
use crate::engine::cost_model::CostModel;
use crate::engine::scoring::ScoringEngine;
use std::collections::HashMap;

// ==========================================
// CandidatePool - 候选池
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    by_course: HashMap<String, Vec<Candidate>>,
    // 无任何兼容三元组的课程及原因
    infeasible: HashMap<String, UnassignedReason>,
}

impl CandidatePool {
    /// 枚举并评分候选
    ///
    /// 设备按场地归属挂接: 候选成本只计入位于该场地且未报废的设备
    pub fn generate(
        index: &CompatibilityIndex,
        courses: &[Course],
        instructors: &[Instructor],
        facilities: &[Facility],
        equipment: &[Equipment],
        scoring: &ScoringEngine,
        cost_model: &CostModel,
    ) -> Self {
        let instructor_by_id: HashMap<&str, &Instructor> =
            instructors.iter().map(|i| (i.id.as_str(), i)).collect();
        let facility_by_id: HashMap<&str, &Facility> =
            facilities.iter().map(|f| (f.id.as_str(), f)).collect();
        let mut housed_by_facility: HashMap<&str, Vec<&Equipment>> = HashMap::new();
        for item in equipment.iter().filter(|e| e.is_in_service()) {
            if let Some(facility_id) = item.facility_id.as_deref() {
                housed_by_facility.entry(facility_id).or_default().push(item);
            }
        }

        let mut by_course = HashMap::with_capacity(courses.len());
        let mut infeasible = HashMap::new();

        for course in courses {
            let entry = match index.get(&course.id) {
                Some(entry) => entry,
                None => continue,
            };

            if entry.instructor_ids.is_empty() {
                infeasible.insert(course.id.clone(), UnassignedReason::NoCompatibleInstructor);
                continue;
            }
            if entry.facility_ids.is_empty() {
                infeasible.insert(course.id.clone(), UnassignedReason::NoCompatibleFacility);
                continue;
            }

            let mut candidates = Vec::with_capacity(entry.combination_count());
            for instructor_id in &entry.instructor_ids {
                let Some(instructor) = instructor_by_id.get(instructor_id.as_str()) else {
                    continue;
                };
                for facility_id in &entry.facility_ids {
                    let Some(facility) = facility_by_id.get(facility_id.as_str()) else {
                        continue;
                    };
                    let housed = housed_by_facility
                        .get(facility.id.as_str())
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);

                    let candidate =
                        scoring.score_candidate(cost_model, course, instructor, facility, housed);
                    if candidate.feasibility.feasible {
                        candidates.push(candidate);
                    }
                }
            }

            if candidates.is_empty() {
                infeasible.insert(course.id.clone(), UnassignedReason::NoCompatibleFacility);
            } else {
                by_course.insert(course.id.clone(), candidates);
            }
        }

        Self {
            by_course,
            infeasible,
        }
    }

    /// 课程候选（生成顺序）
    pub fn candidates_for(&self, course_id: &str) -> &[Candidate] {
        self.by_course
            .get(course_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 无候选课程的原因
    pub fn infeasible_reason(&self, course_id: &str) -> Option<UnassignedReason> {
        self.infeasible.get(course_id).copied()
    }

    pub fn candidate_count(&self) -> usize {
        self.by_course.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlanningConfig;
    use crate::domain::types::{
        CourseLevel, DepreciationMethod, EmploymentType, EquipmentStatus, FacilityStatus,
        FacilityType, InstructorStatus,
    };
    use chrono::NaiveDate;

    fn course(id: &str, students: u32) -> Course {
        Course {
            id: id.to_string(),
            name: "Biology Lab".to_string(),
            department_id: "BIO".to_string(),
            subject: None,
            expected_students: students,
            instructor_cost: 2000.0,
            classroom_cost: 0.0,
            credit_hours: 3,
            hours_per_week: None,
            facility_type_requirement: FacilityType::Lab,
            is_required: false,
            level: CourseLevel::Introductory,
        }
    }

    fn instructor(id: &str, dept: &str) -> Instructor {
        Instructor {
            id: id.to_string(),
            name: id.to_string(),
            department_id: dept.to_string(),
            employment_type: EmploymentType::FullTime,
            hourly_rate: None,
            qualifications: vec![],
            current_load: 0,
            max_load: None,
            status: InstructorStatus::Active,
        }
    }

    fn lab(id: &str, capacity: u32) -> Facility {
        Facility {
            id: id.to_string(),
            name: id.to_string(),
            department_id: None,
            facility_type: FacilityType::Lab,
            capacity,
            hourly_cost: 0.0,
            utilities_cost_annual: 0.0,
            maintenance_cost_annual: 0.0,
            status: FacilityStatus::Available,
        }
    }

    fn microscope(facility_id: &str, status: EquipmentStatus) -> Equipment {
        Equipment {
            id: format!("EQ-{}", facility_id),
            name: "Microscope".to_string(),
            department_id: Some("BIO".to_string()),
            facility_id: Some(facility_id.to_string()),
            purchase_cost: 2000.0,
            purchase_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            depreciation_rate: 0.1,
            depreciation_method: DepreciationMethod::StraightLine,
            maintenance_cost_annual: 100.0,
            status,
        }
    }

    fn generate(
        courses: &[Course],
        instructors: &[Instructor],
        facilities: &[Facility],
        equipment: &[Equipment],
    ) -> CandidatePool {
        let config = PlanningConfig::default();
        let index = CompatibilityIndex::build(courses, instructors, facilities, 4);
        CandidatePool::generate(
            &index,
            courses,
            instructors,
            facilities,
            equipment,
            &ScoringEngine::new(&config),
            &CostModel::new(&config, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()),
        )
    }

    #[test]
    fn test_generation_order_and_count() {
        let courses = vec![course("C1", 20)];
        let instructors = vec![instructor("I1", "BIO"), instructor("I2", "BIO")];
        let facilities = vec![lab("L1", 30), lab("L2", 25)];

        let pool = generate(&courses, &instructors, &facilities, &[]);
        let ids: Vec<(&str, &str)> = pool
            .candidates_for("C1")
            .iter()
            .map(|c| (c.instructor_id.as_str(), c.facility_id.as_str()))
            .collect();
        assert_eq!(
            ids,
            vec![("I1", "L1"), ("I1", "L2"), ("I2", "L1"), ("I2", "L2")]
        );
        assert_eq!(pool.candidate_count(), 4);
        assert_eq!(pool.infeasible_reason("C1"), None);
    }

    #[test]
    fn test_infeasible_reasons() {
        let courses = vec![course("C1", 20), course("C2", 80)];
        let facilities = vec![lab("L1", 30)];

        let pool = generate(&courses, &[instructor("I1", "CHEM")], &facilities, &[]);
        assert_eq!(
            pool.infeasible_reason("C1"),
            Some(UnassignedReason::NoCompatibleInstructor)
        );

        let pool = generate(&courses, &[instructor("I1", "BIO")], &facilities, &[]);
        assert_eq!(pool.infeasible_reason("C1"), None);
        assert_eq!(
            pool.infeasible_reason("C2"),
            Some(UnassignedReason::NoCompatibleFacility)
        );
        assert!(pool.candidates_for("C2").is_empty());
    }

    #[test]
    fn test_equipment_follows_facility() {
        let courses = vec![course("C1", 20)];
        let instructors = vec![instructor("I1", "BIO")];
        let facilities = vec![lab("L1", 30), lab("L2", 30)];
        let equipment = vec![
            microscope("L1", EquipmentStatus::Operational),
            microscope("L2", EquipmentStatus::Retired),
        ];

        let pool = generate(&courses, &instructors, &facilities, &equipment);
        let candidates = pool.candidates_for("C1");

        // 年折旧 200 + 年维护 100, 学期口径减半
        assert!((candidates[0].cost.equipment.total - 150.0).abs() < 1e-9);
        assert_eq!(candidates[1].cost.equipment.total, 0.0);
    }
}
