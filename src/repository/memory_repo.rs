// ==========================================
// 院系预算资源规划系统 - 内存仓储实现
// ==========================================
// 职责: 以内存快照实现数据提供方契约, 供 CLI 与测试使用
// 并发: std Mutex 保护, 锁只在单次读写内持有, 不跨 await
// ==========================================

use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::plan::Assignment;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::engine::orchestrator::PlanningInput;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::resource_repo::{AssignmentRepository, ResourceFilter, ResourceRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

// ==========================================
// InMemoryRepository - 内存仓储
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    snapshot: Arc<Mutex<PlanningInput>>,
    // (记录ID, 分配) 按写入顺序
    persisted: Arc<Mutex<Vec<(String, Assignment)>>>,
}

impl InMemoryRepository {
    /// 从输入快照创建仓储实例
    pub fn new(snapshot: PlanningInput) -> Self {
        Self {
            snapshot: Arc::new(Mutex::new(snapshot)),
            persisted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn get_snapshot(&self) -> RepositoryResult<MutexGuard<'_, PlanningInput>> {
        self.snapshot
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn get_persisted(&self) -> RepositoryResult<MutexGuard<'_, Vec<(String, Assignment)>>> {
        self.persisted
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 替换部门预算
    pub fn set_department_budget(&self, department_id: &str, amount: f64) -> RepositoryResult<()> {
        let mut snapshot = self.get_snapshot()?;
        snapshot.budgets.insert(department_id, amount);
        Ok(())
    }

    /// 已持久化的分配（按写入顺序）
    pub fn persisted_assignments(&self) -> RepositoryResult<Vec<(String, Assignment)>> {
        Ok(self.get_persisted()?.clone())
    }

    /// 按记录 ID 查询已持久化的分配
    pub fn find_persisted(&self, record_id: &str) -> RepositoryResult<Assignment> {
        self.get_persisted()?
            .iter()
            .find(|(id, _)| id == record_id)
            .map(|(_, a)| a.clone())
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Assignment".to_string(),
                id: record_id.to_string(),
            })
    }
}

#[async_trait]
impl ResourceRepository for InMemoryRepository {
    async fn fetch_courses(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Course>> {
        let snapshot = self.get_snapshot()?;
        Ok(snapshot
            .courses
            .iter()
            .filter(|c| filter.matches_department(Some(c.department_id.as_str())))
            .cloned()
            .collect())
    }

    async fn fetch_instructors(
        &self,
        filter: &ResourceFilter,
    ) -> RepositoryResult<Vec<Instructor>> {
        let snapshot = self.get_snapshot()?;
        Ok(snapshot
            .instructors
            .iter()
            .filter(|i| filter.include_inactive || i.is_active())
            .filter(|i| filter.matches_department(Some(i.department_id.as_str())))
            .cloned()
            .collect())
    }

    async fn fetch_facilities(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Facility>> {
        let snapshot = self.get_snapshot()?;
        Ok(snapshot
            .facilities
            .iter()
            .filter(|f| filter.include_inactive || f.is_available())
            .filter(|f| filter.matches_department(f.department_id.as_deref()))
            .cloned()
            .collect())
    }

    async fn fetch_equipment(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Equipment>> {
        let snapshot = self.get_snapshot()?;
        Ok(snapshot
            .equipment
            .iter()
            .filter(|e| filter.include_inactive || e.is_in_service())
            .filter(|e| filter.matches_department(e.department_id.as_deref()))
            .cloned()
            .collect())
    }

    async fn fetch_department_budgets(
        &self,
        filter: &ResourceFilter,
    ) -> RepositoryResult<DepartmentBudgets> {
        let snapshot = self.get_snapshot()?;
        Ok(snapshot
            .budgets
            .iter()
            .filter(|(dept, _)| filter.matches_department(Some(dept.as_str())))
            .map(|(dept, amount)| (dept.clone(), *amount))
            .collect())
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryRepository {
    async fn persist_assignment(&self, assignment: &Assignment) -> RepositoryResult<String> {
        if assignment.course_id.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "assignment.course_id 不能为空".to_string(),
            ));
        }

        let record_id = Uuid::new_v4().to_string();
        self.get_persisted()?
            .push((record_id.clone(), assignment.clone()));
        debug!(record_id = %record_id, course_id = %assignment.course_id, "分配已持久化");
        Ok(record_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cost::ComprehensiveCost;
    use crate::domain::types::{
        EmploymentType, FacilityStatus, FacilityType, InstructorStatus,
    };
    use chrono::Utc;

    fn snapshot() -> PlanningInput {
        let mut budgets = DepartmentBudgets::new();
        budgets.insert("MATH", 1000.0);
        budgets.insert("PHYS", 2000.0);

        let instructor = |id: &str, dept: &str, status: InstructorStatus| Instructor {
            id: id.to_string(),
            name: id.to_string(),
            department_id: dept.to_string(),
            employment_type: EmploymentType::FullTime,
            hourly_rate: None,
            qualifications: vec![],
            current_load: 0,
            max_load: None,
            status,
        };

        PlanningInput {
            instructors: vec![
                instructor("I1", "MATH", InstructorStatus::Active),
                instructor("I2", "MATH", InstructorStatus::OnLeave),
                instructor("I3", "PHYS", InstructorStatus::Active),
            ],
            facilities: vec![Facility {
                id: "F1".to_string(),
                name: "Shared Hall".to_string(),
                department_id: None,
                facility_type: FacilityType::Auditorium,
                capacity: 200,
                hourly_cost: 0.0,
                utilities_cost_annual: 0.0,
                maintenance_cost_annual: 0.0,
                status: FacilityStatus::Available,
            }],
            budgets,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_filter_by_department_and_status() {
        let repo = InMemoryRepository::new(snapshot());
        let filter = ResourceFilter::for_departments(["MATH"]);

        let instructors = repo.fetch_instructors(&filter).await.unwrap();
        assert_eq!(instructors.len(), 1);
        assert_eq!(instructors[0].id, "I1");

        // 公共场地对所有部门可见
        assert_eq!(repo.fetch_facilities(&filter).await.unwrap().len(), 1);

        let budgets = repo.fetch_department_budgets(&filter).await.unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets.get("MATH"), Some(1000.0));

        let all = repo.fetch_instructors(&ResourceFilter::all()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_persist_assignment_returns_ids() {
        let repo = InMemoryRepository::new(snapshot());
        let assignment = Assignment {
            course_id: "C1".to_string(),
            instructor_id: "I1".to_string(),
            facility_id: "F1".to_string(),
            department_id: "MATH".to_string(),
            cost: ComprehensiveCost::default(),
            utility_score: 100.0,
            soft_violations: vec![],
            time_slot: "TBD".to_string(),
            assigned_at: Utc::now(),
        };

        let id = repo.persist_assignment(&assignment).await.unwrap();
        assert_eq!(repo.find_persisted(&id).unwrap(), assignment);
        assert!(matches!(
            repo.find_persisted("missing"),
            Err(RepositoryError::NotFound { .. })
        ));

        let mut invalid = assignment.clone();
        invalid.course_id = String::new();
        assert!(matches!(
            repo.persist_assignment(&invalid).await,
            Err(RepositoryError::ValidationError(_))
        ));
        assert_eq!(repo.persisted_assignments().unwrap().len(), 1);
    }
}
