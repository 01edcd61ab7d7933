// ==========================================
// 院系预算资源规划系统 - 引擎编排器
// ==========================================
// 用途: 协调各引擎的执行顺序
// 流程: 输入校验 -> 兼容性索引 -> 候选评分 -> 贪心分配 -> 方案汇总
// ==========================================
// 红线: 引擎不做 I/O, 不持有跨运行状态;
//       同一输入 + 同一运行上下文 => 完全相同的方案
// ==========================================

use crate::config::PlanningConfig;
use crate::domain::budget::DepartmentBudgets;
use crate::domain::course::Course;
use crate::domain::plan::AllocationPlan;
use crate::domain::resource::{Equipment, Facility, Instructor};
use crate::engine::allocator::Allocator;
use crate::engine::candidates::CandidatePool;
use crate::engine::compatibility::CompatibilityIndex;
use crate::engine::cost_model::CostModel;
use crate::engine::error::PlanningResult;
use crate::engine::plan_assembler::PlanAssembler;
use crate::engine::scoring::ScoringEngine;
use crate::engine::strategy::OptimizationStrategy;
use crate::engine::validation::InputValidator;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

// ==========================================
// PlanningInput - 规划输入快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanningInput {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub instructors: Vec<Instructor>,
    #[serde(default)]
    pub facilities: Vec<Facility>,
    #[serde(default)]
    pub equipment: Vec<Equipment>,
    #[serde(default)]
    pub budgets: DepartmentBudgets,
}

// ==========================================
// RunContext - 运行上下文
// ==========================================
// 折旧评估日与方案时间戳均由调用方提供
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub as_of: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

impl RunContext {
    pub fn new(as_of: NaiveDate, generated_at: DateTime<Utc>) -> Self {
        Self {
            as_of,
            generated_at,
        }
    }

    /// 以当前时间构造
    pub fn now() -> Self {
        let generated_at = Utc::now();
        Self {
            as_of: generated_at.date_naive(),
            generated_at,
        }
    }
}

// ==========================================
// PlanningOrchestrator - 引擎编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct PlanningOrchestrator {
    config: PlanningConfig,
    validator: InputValidator,
    scoring: ScoringEngine,
    allocator: Allocator,
    assembler: PlanAssembler,
}

impl PlanningOrchestrator {
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 规划参数
    pub fn new(config: PlanningConfig) -> Self {
        Self {
            validator: InputValidator::new(),
            scoring: ScoringEngine::new(&config),
            allocator: Allocator::new(config.allocation.budget_buffer_fraction),
            assembler: PlanAssembler::new(&config),
            config,
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 执行一次完整规划
    ///
    /// # 参数
    /// - strategy: 优化策略
    /// - input: 课程/资源/预算快照
    /// - ctx: 运行上下文
    ///
    /// # 返回
    /// - Ok(AllocationPlan): 分配方案（无候选/预算不足的课程体现在 unassigned 中）
    /// - Err(PlanningError): 输入校验失败
    #[instrument(skip_all, fields(strategy = %strategy, as_of = %ctx.as_of))]
    pub fn run(
        &self,
        strategy: OptimizationStrategy,
        input: &PlanningInput,
        ctx: RunContext,
    ) -> PlanningResult<AllocationPlan> {
        info!(
            courses_count = input.courses.len(),
            instructors_count = input.instructors.len(),
            facilities_count = input.facilities.len(),
            equipment_count = input.equipment.len(),
            "开始执行规划流程"
        );

        // ==========================================
        // 步骤1: 输入校验
        // ==========================================
        self.validator.validate_all(
            &self.config,
            &input.courses,
            &input.instructors,
            &input.facilities,
            &input.equipment,
            &input.budgets,
        )?;

        // ==========================================
        // 步骤2: 兼容性索引
        // ==========================================
        let index = CompatibilityIndex::build(
            &input.courses,
            &input.instructors,
            &input.facilities,
            self.config.allocation.default_max_instructor_load,
        );
        debug!(total_combinations = index.total_combinations(), "步骤2: 兼容性索引完成");

        // ==========================================
        // 步骤3: 候选评分
        // ==========================================
        let cost_model = CostModel::new(&self.config, ctx.as_of);
        let pool = CandidatePool::generate(
            &index,
            &input.courses,
            &input.instructors,
            &input.facilities,
            &input.equipment,
            &self.scoring,
            &cost_model,
        );
        debug!(candidates_count = pool.candidate_count(), "步骤3: 候选评分完成");

        // ==========================================
        // 步骤4: 贪心分配
        // ==========================================
        let outcome = self.allocator.run(
            strategy,
            &pool,
            &input.courses,
            &input.budgets,
            ctx.generated_at,
        );
        for skipped in &outcome.unassigned {
            warn!(
                course_id = %skipped.course_id,
                department_id = %skipped.department_id,
                reason = %skipped.reason,
                "课程未能分配"
            );
        }

        // ==========================================
        // 步骤5: 方案汇总
        // ==========================================
        let plan = self.assembler.assemble(
            strategy,
            outcome,
            &input.courses,
            input.instructors.len(),
            input.facilities.len(),
            &input.budgets,
            ctx.generated_at,
        );

        info!(
            assigned = plan.assigned_count(),
            unassigned = plan.unassigned_count(),
            total_cost = plan.cost_breakdown.total_cost,
            optimization_score = plan.optimization_score,
            warnings = plan.warnings.len(),
            "规划流程完成"
        );
        Ok(plan)
    }
}
