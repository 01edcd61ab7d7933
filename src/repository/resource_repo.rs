// ==========================================
// 院系预算资源规划系统 - 数据提供方契约
// ==========================================
// 职责: 定义规划运行所需的数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则, 只做数据读取与写入
// ==========================================

use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::plan::Assignment;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ==========================================
// ResourceFilter - 查询过滤条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFilter {
    // 为空时不按部门过滤
    #[serde(default)]
    pub department_ids: Option<Vec<String>>,
    // 是否返回停用/维护中的资源
    #[serde(default)]
    pub include_inactive: bool,
}

impl ResourceFilter {
    pub fn all() -> Self {
        Self {
            department_ids: None,
            include_inactive: true,
        }
    }

    pub fn for_departments<I, S>(department_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            department_ids: Some(department_ids.into_iter().map(Into::into).collect()),
            include_inactive: false,
        }
    }

    /// 部门是否命中过滤条件
    ///
    /// 无部门归属的资源（如公共场地）总是命中
    pub fn matches_department(&self, department_id: Option<&str>) -> bool {
        match (&self.department_ids, department_id) {
            (None, _) | (_, None) => true,
            (Some(ids), Some(dept)) => ids.iter().any(|id| id == dept),
        }
    }
}

// ==========================================
// ResourceRepository Trait
// ==========================================
// 用途: 规划运行前一次性拉取快照
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    async fn fetch_courses(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Course>>;

    async fn fetch_instructors(&self, filter: &ResourceFilter)
        -> RepositoryResult<Vec<Instructor>>;

    async fn fetch_facilities(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Facility>>;

    async fn fetch_equipment(&self, filter: &ResourceFilter) -> RepositoryResult<Vec<Equipment>>;

    async fn fetch_department_budgets(
        &self,
        filter: &ResourceFilter,
    ) -> RepositoryResult<DepartmentBudgets>;
}

// ==========================================
// AssignmentRepository Trait
// ==========================================
// 用途: 持久化已提交分配, 每条分配独立写入
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// 写入单条分配
    ///
    /// # 返回
    /// - Ok(String): 持久化记录 ID
    async fn persist_assignment(&self, assignment: &Assignment) -> RepositoryResult<String>;
}
