// ==========================================
// 院系预算资源规划系统 - 配置层
// ==========================================
// 职责: 规划参数定义、加载与校验
// 存储: JSON 配置文件 (可选)
// ==========================================

pub mod config_manager;
pub mod planning_config;

// 重导出核心配置
pub use config_manager::{default_config_path, ConfigError, ConfigManager, CONFIG_PATH_ENV};
pub use planning_config::{
    AllocationConstraints, AssemblyThresholds, CostRates, PlanningConfig, ScenarioSettings,
};
