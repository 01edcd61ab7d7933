// ==========================================
// 院系预算资源规划系统 - 引擎层
// ==========================================
// 职责: 成本计算、候选评分、贪心分配、方案汇总、差异分析
// 红线: 引擎不做 I/O, 所有运行期可变状态限定在单次运行内
// ==========================================

pub mod allocator;
pub mod candidates;
pub mod compatibility;
pub mod cost_model;
pub mod error;
pub mod orchestrator;
pub mod plan_assembler;
pub mod scoring;
pub mod strategy;
pub mod validation;
pub mod variance;

// 重导出核心引擎
pub use allocator::{AllocationOutcome, AllocationState, Allocator, UNSCHEDULED_TIME_SLOT};
pub use candidates::CandidatePool;
pub use compatibility::{CompatibilityIndex, CourseCandidates};
pub use cost_model::{cost_per_credit_hour, cost_per_student, safe_div, CostModel};
pub use error::{PlanningError, PlanningResult};
pub use orchestrator::{PlanningInput, PlanningOrchestrator, RunContext};
pub use plan_assembler::PlanAssembler;
pub use scoring::{course_complexity, course_priority, ScoringEngine};
pub use strategy::OptimizationStrategy;
pub use validation::InputValidator;
pub use variance::{
    headline_cost, scale_numeric, scales_finitely, CategoryVariance, Scenario, ScenarioAnalysis,
    ScenarioComparison, ScenarioVariation, VarianceAnalyzer, VarianceKind, VarianceReport,
};
