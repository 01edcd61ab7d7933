// ==========================================
// 院系预算资源规划系统 - 差异与情景分析
// ==========================================
// 职责: 预算/实际差异分析 + 情景成本推演
// 独立于分配主流程, 供预测与报表使用
// ==========================================
// 差异 = 实际 - 预算
//   < 0 有利 (少花), > 0 不利 (超支), |差异率| > 阈值 为显著
// 情景 = 基准数据每个数值叶子 × (1 + 变动系数)
// ==========================================

use crate::config::{PlanningConfig, ScenarioSettings};
use crate::engine::cost_model::safe_div;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// 差异分析结果
// ==========================================

/// 差异分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VarianceKind {
    Favorable,
    Unfavorable,
    OnBudget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVariance {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
    pub variance: f64,         // actual - budgeted
    pub variance_percent: f64, // 预算为 0 时为 0
    pub kind: VarianceKind,
    pub significant: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceReport {
    pub period: String,
    pub total_budgeted: f64,
    pub total_actual: f64,
    pub total_variance: f64,
    pub total_variance_percent: f64,
    pub per_category: Vec<CategoryVariance>,
    // 分类后的类目名
    pub favorable: Vec<String>,
    pub unfavorable: Vec<String>,
    pub significant: Vec<String>,
}

// ==========================================
// 情景分析结果
// ==========================================

/// 情景变动系数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVariation {
    pub optimistic: f64,
    pub realistic: f64,
    pub pessimistic: f64,
}

impl From<&ScenarioSettings> for ScenarioVariation {
    fn from(settings: &ScenarioSettings) -> Self {
        Self {
            optimistic: settings.optimistic_factor,
            realistic: settings.realistic_factor,
            pessimistic: settings.pessimistic_factor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub factor: f64,
    pub data: Value,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario: String,
    pub total_cost: f64,
    pub difference: f64,         // 情景 - 基准
    pub difference_percent: f64, // 基准为 0 时为 0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    pub base_cost: f64,
    pub scenarios: Vec<Scenario>,
    pub comparisons: Vec<ScenarioComparison>,
    pub recommendations: Vec<String>,
}

impl ScenarioAnalysis {
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }
}

// ==========================================
// VarianceAnalyzer - 差异与情景分析器
// ==========================================
#[derive(Debug, Clone)]
pub struct VarianceAnalyzer {
    settings: ScenarioSettings,
}

impl VarianceAnalyzer {
    pub fn new(config: &PlanningConfig) -> Self {
        Self {
            settings: config.scenario.clone(),
        }
    }

    /// 默认情景系数
    pub fn default_variation(&self) -> ScenarioVariation {
        ScenarioVariation::from(&self.settings)
    }

    /// 预算/实际差异分析
    ///
    /// # 参数
    /// - `budgeted`: 类目 -> 预算金额
    /// - `actual`: 类目 -> 实际金额
    /// - `period`: 期间标识（原样回显）
    ///
    /// # 返回
    /// 类目取两侧并集, 缺失一侧按 0 计
    pub fn variance(
        &self,
        budgeted: &BTreeMap<String, f64>,
        actual: &BTreeMap<String, f64>,
        period: &str,
    ) -> VarianceReport {
        let categories: BTreeSet<&String> = budgeted.keys().chain(actual.keys()).collect();
        let threshold = self.settings.significant_variance_pct;

        let mut per_category = Vec::with_capacity(categories.len());
        let mut favorable = Vec::new();
        let mut unfavorable = Vec::new();
        let mut significant = Vec::new();

        for category in categories {
            let b = budgeted.get(category).copied().unwrap_or(0.0);
            let a = actual.get(category).copied().unwrap_or(0.0);
            let variance = a - b;
            let variance_percent = safe_div(variance, b) * 100.0;

            let kind = if variance < 0.0 {
                favorable.push(category.clone());
                VarianceKind::Favorable
            } else if variance > 0.0 {
                unfavorable.push(category.clone());
                VarianceKind::Unfavorable
            } else {
                VarianceKind::OnBudget
            };
            let is_significant = variance_percent.abs() > threshold;
            if is_significant {
                significant.push(category.clone());
            }

            per_category.push(CategoryVariance {
                category: category.clone(),
                budgeted: b,
                actual: a,
                variance,
                variance_percent,
                kind,
                significant: is_significant,
            });
        }

        let total_budgeted: f64 = per_category.iter().map(|c| c.budgeted).sum();
        let total_actual: f64 = per_category.iter().map(|c| c.actual).sum();
        let total_variance = total_actual - total_budgeted;

        VarianceReport {
            period: period.to_string(),
            total_budgeted,
            total_actual,
            total_variance,
            total_variance_percent: safe_div(total_variance, total_budgeted) * 100.0,
            per_category,
            favorable,
            unfavorable,
            significant,
        }
    }

    /// 情景分析
    ///
    /// # 参数
    /// - `base`: 基准数据（任意 JSON 结构）
    /// - `variation`: 三种情景的变动系数
    ///
    /// # 返回
    /// 三个情景（optimistic / realistic / pessimistic）、与基准的对比及建议
    pub fn scenario_analysis(
        &self,
        base: &Value,
        variation: ScenarioVariation,
    ) -> ScenarioAnalysis {
        let base_cost = headline_cost(base);
        let variants = [
            ("optimistic", variation.optimistic),
            ("realistic", variation.realistic),
            ("pessimistic", variation.pessimistic),
        ];

        let scenarios: Vec<Scenario> = variants
            .iter()
            .map(|(name, factor)| {
                let data = scale_numeric(base, *factor);
                Scenario {
                    name: name.to_string(),
                    factor: *factor,
                    total_cost: headline_cost(&data),
                    data,
                }
            })
            .collect();

        let comparisons: Vec<ScenarioComparison> = scenarios
            .iter()
            .map(|s| {
                let difference = s.total_cost - base_cost;
                ScenarioComparison {
                    scenario: s.name.clone(),
                    total_cost: s.total_cost,
                    difference,
                    difference_percent: safe_div(difference, base_cost) * 100.0,
                }
            })
            .collect();

        let threshold = self.settings.recommendation_threshold;
        let mut recommendations = Vec::new();
        for comparison in &comparisons {
            let ratio = safe_div(comparison.difference, base_cost);
            match comparison.scenario.as_str() {
                "optimistic" if -ratio > threshold => recommendations.push(format!(
                    "乐观情景可节约 {:.1}%, 建议评估节约措施的可行性",
                    -ratio * 100.0
                )),
                "pessimistic" if ratio > threshold => recommendations.push(format!(
                    "悲观情景成本上升 {:.1}%, 建议预留应急预算",
                    ratio * 100.0
                )),
                _ => {}
            }
        }

        ScenarioAnalysis {
            base_cost,
            scenarios,
            comparisons,
            recommendations,
        }
    }
}

/// 深拷贝并按 (1 + factor) 缩放所有数值叶子
///
/// 系数为 0 时原样返回, 否则数值按浮点表示
/// 缩放结果溢出为非有限值时该叶子保留原值, 调用方应先用 `scales_finitely` 校验
pub fn scale_numeric(value: &Value, factor: f64) -> Value {
    if factor == 0.0 {
        return value.clone();
    }
    match value {
        Value::Number(n) => match n.as_f64().and_then(|x| Number::from_f64(x * (1.0 + factor))) {
            Some(scaled) => Value::Number(scaled),
            None => value.clone(),
        },
        Value::Array(items) => {
            Value::Array(items.iter().map(|v| scale_numeric(v, factor)).collect())
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), scale_numeric(v, factor)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// 按 (1 + factor) 缩放后所有数值叶子是否仍为有限值
pub fn scales_finitely(value: &Value, factor: f64) -> bool {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map_or(true, |x| (x * (1.0 + factor)).is_finite()),
        Value::Array(items) => items.iter().all(|v| scales_finitely(v, factor)),
        Value::Object(map) => map.values().all(|v| scales_finitely(v, factor)),
        _ => true,
    }
}

/// 情景总成本: 顶层 `total` 字段优先, 否则为全部数值叶子之和
pub fn headline_cost(value: &Value) -> f64 {
    if let Some(total) = value.get("total").and_then(Value::as_f64) {
        return total;
    }
    sum_numeric(value)
}

fn sum_numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Array(items) => items.iter().map(sum_numeric).sum(),
        Value::Object(map) => map.values().map(sum_numeric).sum(),
        _ => 0.0,
    }
}
