// ==========================================
// 院系预算资源规划系统 - 兼容性索引
// ==========================================
// 职责: 硬可行性过滤, 生成每门课程的兼容教师/场地列表
// 规则:
//   教师: 在岗 且 未满负荷 且 (同部门 或 资质标签覆盖课程学科)
//   场地: 可用 且 容量 ≥ 预计学生数 且 (类型匹配 或 CLASSROOM 兜底)
// 红线: 列表顺序保持输入顺序 (决定候选生成顺序与平局规则)
// ==========================================

use crate::domain::course::Course;
use crate::domain::resource::{Facility, Instructor};
use crate::domain::types::FacilityType;
use std::collections::HashMap;

/// 单门课程的兼容资源
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseCandidates {
    pub instructor_ids: Vec<String>,
    pub facility_ids: Vec<String>,
}

impl CourseCandidates {
    /// 兼容三元组数量
    pub fn combination_count(&self) -> usize {
        self.instructor_ids.len() * self.facility_ids.len()
    }
}

// ==========================================
// CompatibilityIndex - 兼容性索引
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct CompatibilityIndex {
    entries: HashMap<String, CourseCandidates>,
}

impl CompatibilityIndex {
    /// 构建兼容性索引
    ///
    /// # 参数
    /// - `courses`: 课程列表
    /// - `instructors`: 教师列表（顺序即候选生成顺序）
    /// - `facilities`: 场地列表（顺序即候选生成顺序）
    /// - `default_max_load`: 教师未配置 max_load 时的负荷上限
    pub fn build(
        courses: &[Course],
        instructors: &[Instructor],
        facilities: &[Facility],
        default_max_load: u32,
    ) -> Self {
        let mut entries = HashMap::with_capacity(courses.len());

        for course in courses {
            let instructor_ids = instructors
                .iter()
                .filter(|i| Self::instructor_compatible(course, i, default_max_load))
                .map(|i| i.id.clone())
                .collect();
            let facility_ids = facilities
                .iter()
                .filter(|f| Self::facility_compatible(course, f))
                .map(|f| f.id.clone())
                .collect();

            entries.insert(
                course.id.clone(),
                CourseCandidates {
                    instructor_ids,
                    facility_ids,
                },
            );
        }

        Self { entries }
    }

    /// 教师兼容判定
    pub fn instructor_compatible(
        course: &Course,
        instructor: &Instructor,
        default_max_load: u32,
    ) -> bool {
        if !instructor.is_active() {
            return false;
        }
        let max_load = instructor.max_load.unwrap_or(default_max_load);
        if instructor.current_load >= max_load {
            return false;
        }
        if instructor.department_id == course.department_id {
            return true;
        }

        let subject = course.subject_token();
        if subject.is_empty() {
            return false;
        }
        instructor
            .qualification_tags()
            .any(|tag| tag == subject || tag.split_whitespace().any(|word| word == subject))
    }

    /// 场地兼容判定
    pub fn facility_compatible(course: &Course, facility: &Facility) -> bool {
        facility.is_available()
            && facility.capacity >= course.expected_students
            && (facility.facility_type == course.facility_type_requirement
                || facility.facility_type == FacilityType::Classroom)
    }

    pub fn get(&self, course_id: &str) -> Option<&CourseCandidates> {
        self.entries.get(course_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全部兼容三元组数量
    pub fn total_combinations(&self) -> usize {
        self.entries.values().map(|c| c.combination_count()).sum()
    }
}
