// ==========================================
// 院系预算资源规划系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 将引擎/仓储错误转换为用户友好的错误消息
// ==========================================

use crate::engine::error::PlanningError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("数据验证失败: {0}")]
    ValidationError(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("数据访问失败: {0}")]
    DataAccess(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 PlanningError 转换
// ==========================================
impl From<PlanningError> for ApiError {
    fn from(err: PlanningError) -> Self {
        match err {
            PlanningError::EmptyCourseList => ApiError::InvalidInput(err.to_string()),
            PlanningError::InvalidConfig(_) => ApiError::InvalidInput(err.to_string()),
            PlanningError::Validation { .. } | PlanningError::DuplicateId { .. } => {
                ApiError::ValidationError(err.to_string())
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DataAccess(format!("仓储锁获取失败: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::Persistence(msg) => ApiError::DataAccess(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
