// ==========================================
// 院系预算资源规划系统 - 部门预算
// ==========================================
// 红线: 部门支出不得超过 预算 × (1 - 缓冲比例)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DepartmentBudgets - 部门预算表
// ==========================================
// departmentId -> 可用金额
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DepartmentBudgets(BTreeMap<String, f64>);

impl DepartmentBudgets {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, department_id: impl Into<String>, amount: f64) {
        self.0.insert(department_id.into(), amount);
    }

    pub fn get(&self, department_id: &str) -> Option<f64> {
        self.0.get(department_id).copied()
    }

    /// 扣除缓冲后的可支出上限
    ///
    /// # 返回
    /// - Some(ceiling): 已配置预算的部门
    /// - None: 未配置预算（不受预算约束）
    pub fn spending_ceiling(&self, department_id: &str, buffer_fraction: f64) -> Option<f64> {
        self.get(department_id)
            .map(|amount| amount * (1.0 - buffer_fraction))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for DepartmentBudgets {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
