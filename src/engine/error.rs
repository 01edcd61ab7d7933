// ==========================================
// 院系预算资源规划系统 - 引擎层错误类型
// ==========================================
// 红线: 仅输入校验失败会返回错误;
//       无候选/预算不足均不是错误, 由方案汇总体现
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanningError {
    #[error("课程列表为空, 无法生成分配方案")]
    EmptyCourseList,

    #[error("输入校验失败 (field={field}): {message}")]
    Validation { field: String, message: String },

    #[error("重复的{entity}ID: {id}")]
    DuplicateId { entity: String, id: String },

    #[error("规划参数无效: {0}")]
    InvalidConfig(String),
}

impl PlanningError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanningError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

pub type PlanningResult<T> = Result<T, PlanningError>;
