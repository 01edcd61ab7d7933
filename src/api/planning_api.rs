// ==========================================
// 院系预算资源规划系统 - 规划 API
// ==========================================
// 职责: 拉取资源快照 -> 调用引擎 -> 逐条持久化分配
//       以及差异/情景分析入口
// 并发: 五类数据并发拉取; 多次规划可并发执行,
//       每次运行独立持有分配状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::plan::AllocationPlan;
use crate::engine::orchestrator::{PlanningInput, PlanningOrchestrator, RunContext};
use crate::engine::strategy::OptimizationStrategy;
use crate::engine::variance::{
    scales_finitely, ScenarioAnalysis, ScenarioVariation, VarianceAnalyzer, VarianceReport,
};
use crate::repository::{AssignmentRepository, ResourceFilter, ResourceRepository};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// 请求 / 响应
// ==========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningRequest {
    #[serde(default)]
    pub strategy: OptimizationStrategy,
    #[serde(default)]
    pub filter: ResourceFilter,
    // 是否持久化已提交分配
    #[serde(default)]
    pub persist: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningResponse {
    pub plan: AllocationPlan,
    // 与 plan.assignments 一一对应（未持久化时为空）
    pub persisted_ids: Vec<String>,
}

/// 策略对比条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub strategy: OptimizationStrategy,
    pub assigned: usize,
    pub unassigned: usize,
    pub total_cost: f64,
    pub optimization_score: f64,
}

// ==========================================
// PlanningApi - 规划 API
// ==========================================

/// 规划API
///
/// 职责：
/// 1. 拉取资源快照并生成分配方案
/// 2. 逐条持久化已提交分配
/// 3. 四种策略对比
/// 4. 预算差异分析与情景推演
pub struct PlanningApi {
    resources: Arc<dyn ResourceRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    orchestrator: PlanningOrchestrator,
    analyzer: VarianceAnalyzer,
}

impl PlanningApi {
    /// 创建新的PlanningApi实例
    pub fn new(
        resources: Arc<dyn ResourceRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        orchestrator: PlanningOrchestrator,
    ) -> Self {
        let analyzer = VarianceAnalyzer::new(orchestrator.config());
        Self {
            resources,
            assignments,
            orchestrator,
            analyzer,
        }
    }

    /// 解析策略名称
    pub fn parse_strategy(value: &str) -> ApiResult<OptimizationStrategy> {
        OptimizationStrategy::from_str(value).map_err(ApiError::InvalidInput)
    }

    /// 并发拉取规划快照
    pub async fn load_snapshot(&self, filter: &ResourceFilter) -> ApiResult<PlanningInput> {
        let (courses, instructors, facilities, equipment, budgets) = futures::try_join!(
            self.resources.fetch_courses(filter),
            self.resources.fetch_instructors(filter),
            self.resources.fetch_facilities(filter),
            self.resources.fetch_equipment(filter),
            self.resources.fetch_department_budgets(filter),
        )?;

        Ok(PlanningInput {
            courses,
            instructors,
            facilities,
            equipment,
            budgets,
        })
    }

    // ==========================================
    // 规划接口
    // ==========================================

    /// 生成分配方案
    ///
    /// # 参数
    /// - request: 策略 / 过滤条件 / 是否持久化
    /// - ctx: 运行上下文
    ///
    /// # 返回
    /// - Ok(PlanningResponse): 方案及持久化记录 ID
    /// - Err(ApiError): 输入校验失败或数据访问失败
    #[instrument(skip_all, fields(strategy = %request.strategy, persist = request.persist))]
    pub async fn generate_plan(
        &self,
        request: &PlanningRequest,
        ctx: RunContext,
    ) -> ApiResult<PlanningResponse> {
        let snapshot = self.load_snapshot(&request.filter).await?;
        let plan = self.orchestrator.run(request.strategy, &snapshot, ctx)?;

        let persisted_ids = if request.persist {
            self.persist_plan(&plan).await?
        } else {
            Vec::new()
        };

        Ok(PlanningResponse {
            plan,
            persisted_ids,
        })
    }

    /// 逐条持久化分配
    ///
    /// 每条分配独立写入; 失败时已写入的记录保留, 返回首个错误
    pub async fn persist_plan(&self, plan: &AllocationPlan) -> ApiResult<Vec<String>> {
        let mut ids = Vec::with_capacity(plan.assignments.len());
        for assignment in &plan.assignments {
            match self.assignments.persist_assignment(assignment).await {
                Ok(id) => ids.push(id),
                Err(e) => {
                    warn!(
                        course_id = %assignment.course_id,
                        persisted = ids.len(),
                        error = %e,
                        "分配持久化失败"
                    );
                    return Err(e.into());
                }
            }
        }
        info!(persisted = ids.len(), "分配持久化完成");
        Ok(ids)
    }

    /// 四种策略对比（同一快照, 不持久化）
    pub async fn compare_strategies(
        &self,
        filter: &ResourceFilter,
        ctx: RunContext,
    ) -> ApiResult<Vec<StrategyComparison>> {
        let snapshot = self.load_snapshot(filter).await?;

        OptimizationStrategy::ALL
            .iter()
            .map(|strategy| {
                let plan = self.orchestrator.run(*strategy, &snapshot, ctx)?;
                Ok(StrategyComparison {
                    strategy: *strategy,
                    assigned: plan.assigned_count(),
                    unassigned: plan.unassigned_count(),
                    total_cost: plan.cost_breakdown.total_cost,
                    optimization_score: plan.optimization_score,
                })
            })
            .collect()
    }

    // ==========================================
    // 分析接口
    // ==========================================

    /// 预算差异分析
    pub fn analyze_variance(
        &self,
        budgeted: &BTreeMap<String, f64>,
        actual: &BTreeMap<String, f64>,
        period: &str,
    ) -> ApiResult<VarianceReport> {
        if period.trim().is_empty() {
            return Err(ApiError::InvalidInput("期间不能为空".to_string()));
        }
        if let Some((category, value)) = budgeted
            .iter()
            .chain(actual.iter())
            .find(|(_, v)| !v.is_finite())
        {
            return Err(ApiError::ValidationError(format!(
                "类目 {} 金额不是有限数值: {}",
                category, value
            )));
        }
        Ok(self.analyzer.variance(budgeted, actual, period))
    }

    /// 情景分析
    ///
    /// # 参数
    /// - base: 基准数据
    /// - variation: 变动系数, 为空时使用配置默认值
    pub fn analyze_scenarios(
        &self,
        base: &Value,
        variation: Option<ScenarioVariation>,
    ) -> ApiResult<ScenarioAnalysis> {
        let variation = variation.unwrap_or_else(|| self.analyzer.default_variation());
        for factor in [variation.optimistic, variation.realistic, variation.pessimistic] {
            if !factor.is_finite() || factor <= -1.0 {
                return Err(ApiError::InvalidInput(format!(
                    "情景变动系数必须为大于 -1 的有限数值: {}",
                    factor
                )));
            }
            if !scales_finitely(base, factor) {
                return Err(ApiError::ValidationError(format!(
                    "情景变动系数 {} 导致数值溢出",
                    factor
                )));
            }
        }
        Ok(self.analyzer.scenario_analysis(base, variation))
    }
}
