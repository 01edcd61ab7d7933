// ==========================================
// 院系预算资源规划系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供数据访问接口, 屏蔽存储细节
// ==========================================

pub mod error;
pub mod memory_repo;
pub mod resource_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use memory_repo::InMemoryRepository;
pub use resource_repo::{AssignmentRepository, ResourceFilter, ResourceRepository};
