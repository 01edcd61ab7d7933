// ==========================================
// 院系预算资源规划系统 - API 层
// ==========================================
// 职责: 提供规划与分析接口, 供 CLI 或外部传输层调用
// ==========================================

pub mod error;
pub mod planning_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use planning_api::{PlanningApi, PlanningRequest, PlanningResponse, StrategyComparison};
