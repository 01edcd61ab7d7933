// ==========================================
// 院系预算资源规划系统 - 优化策略定义
// ==========================================
// 用途：
// - 同一份资源快照可按不同策略试算, 对比方案；
// - 每次运行只分派一次策略, 不在候选粒度上切换。

use serde::{Deserialize, Serialize};

/// 分配优化策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationStrategy {
    CostMinimization,
    UtilizationMaximization,
    QualityFocused,
    Balanced,
}

impl OptimizationStrategy {
    pub const ALL: [OptimizationStrategy; 4] = [
        OptimizationStrategy::CostMinimization,
        OptimizationStrategy::UtilizationMaximization,
        OptimizationStrategy::QualityFocused,
        OptimizationStrategy::Balanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptimizationStrategy::CostMinimization => "cost_minimization",
            OptimizationStrategy::UtilizationMaximization => "utilization_maximization",
            OptimizationStrategy::QualityFocused => "quality_focused",
            OptimizationStrategy::Balanced => "balanced",
        }
    }

    pub fn title_cn(&self) -> &'static str {
        match self {
            OptimizationStrategy::CostMinimization => "成本最小化",
            OptimizationStrategy::UtilizationMaximization => "利用率最大化",
            OptimizationStrategy::QualityFocused => "教学质量优先",
            OptimizationStrategy::Balanced => "均衡方案",
        }
    }
}

impl Default for OptimizationStrategy {
    fn default() -> Self {
        OptimizationStrategy::Balanced
    }
}

impl std::fmt::Display for OptimizationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OptimizationStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cost_minimization" | "cost-minimization" | "cost" => {
                Ok(OptimizationStrategy::CostMinimization)
            }
            "utilization_maximization" | "utilization-maximization" | "utilization" => {
                Ok(OptimizationStrategy::UtilizationMaximization)
            }
            "quality_focused" | "quality-focused" | "quality" => {
                Ok(OptimizationStrategy::QualityFocused)
            }
            "balanced" => Ok(OptimizationStrategy::Balanced),
            other => Err(format!("未知策略类型: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            "cost-minimization".parse::<OptimizationStrategy>().unwrap(),
            OptimizationStrategy::CostMinimization
        );
        assert_eq!(
            " Quality ".parse::<OptimizationStrategy>().unwrap(),
            OptimizationStrategy::QualityFocused
        );
        assert!("genetic".parse::<OptimizationStrategy>().is_err());
    }

    #[test]
    fn test_round_trip_as_str() {
        for strategy in OptimizationStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<OptimizationStrategy>().unwrap(), strategy);
        }
    }
}
