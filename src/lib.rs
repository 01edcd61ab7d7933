// ==========================================
// 院系预算资源规划系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (启发式分配, 人工最终审定)
// 核心: 成本建模 + 候选评分 + 贪心约束分配 + 方案汇总
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问契约
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 规划参数
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    AllocationPlan, Assignment, ComprehensiveCost, Course, DepartmentBudgets, Equipment,
    Facility, Instructor, UnassignedCourse,
};

// 引擎
pub use engine::{
    Allocator, CostModel, OptimizationStrategy, PlanningError, PlanningInput,
    PlanningOrchestrator, RunContext, VarianceAnalyzer,
};

// 配置
pub use config::{ConfigManager, PlanningConfig};

// API
pub use api::{ApiError, PlanningApi, PlanningRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "院系预算资源规划系统";
