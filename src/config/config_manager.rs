// ==========================================
// 院系预算资源规划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验
// 来源优先级: 显式路径 > 环境变量 > 用户配置目录 > 内置默认值
// ==========================================

use crate::config::planning_config::PlanningConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "DEPT_PLANNER_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置校验失败: {0}")]
    Invalid(String),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PlanningConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认值
    pub fn with_defaults() -> Self {
        Self {
            config: PlanningConfig::default(),
            source: None,
        }
    }

    /// 从已有配置创建（会执行校验）
    pub fn from_config(config: PlanningConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path_str.clone(),
            source,
        })?;
        let config: PlanningConfig =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path_str.clone(),
                source,
            })?;
        config.validate().map_err(ConfigError::Invalid)?;

        tracing::info!("已加载规划配置: {}", path_str);
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按优先级查找并加载配置
    ///
    /// # 规则
    /// 1) explicit 不为空时必须加载成功
    /// 2) 环境变量 DEPT_PLANNER_CONFIG 指向的文件必须加载成功
    /// 3) 用户配置目录下存在 planner.json 时加载
    /// 4) 否则使用默认值
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            if !env_path.trim().is_empty() {
                return Self::from_file(env_path.trim());
            }
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                tracing::debug!("未找到配置文件, 使用默认规划参数");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    pub fn into_config(self) -> PlanningConfig {
        self.config
    }

    /// 配置来源文件（默认值时为空）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 配置快照（JSON），随方案一起记录便于复现
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.config)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// 默认配置文件路径: <config_dir>/dept-resource-planner/planner.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dept-resource-planner").join("planner.json"))
}
