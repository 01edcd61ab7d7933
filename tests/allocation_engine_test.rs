// ==========================================
// 分配引擎集成测试
// ==========================================
// 测试目标: 验证编排器完整流程 (校验 -> 候选 -> 分配 -> 汇总)
// 覆盖范围: 唯一性、预算缓冲、可复现性、单调性、端到端场景
// ==========================================

mod helpers;

use chrono::NaiveDate;
use dept_resource_planner::config::PlanningConfig;
use dept_resource_planner::domain::types::{
    CourseLevel, EmploymentType, FacilityStatus, FacilityType, InstructorStatus, UnassignedReason,
};
use dept_resource_planner::engine::{
    OptimizationStrategy, PlanningError, PlanningInput, PlanningOrchestrator,
};
use dept_resource_planner::logging;
use helpers::test_data_builder::{
    budgets, fixed_ctx, CourseBuilder, EquipmentBuilder, FacilityBuilder, InstructorBuilder,
};
use std::collections::{BTreeMap, HashSet};

// ==========================================
// 测试辅助函数
// ==========================================

fn orchestrator() -> PlanningOrchestrator {
    logging::init_test();
    PlanningOrchestrator::new(PlanningConfig::default())
}

/// 单门 24 人课程, 大教室免费而小教室收费
fn room_choice_input() -> PlanningInput {
    PlanningInput {
        // 直接成本 100 => 教师 130 + 间接 20 = 150
        courses: vec![CourseBuilder::new("C24", "CS")
            .students(24)
            .instructor_cost(100.0)
            .build()],
        instructors: vec![InstructorBuilder::new("I1", "CS").build()],
        facilities: vec![
            // 占用率 0.24: 质量 90, 综合成本 150
            FacilityBuilder::new("F100", 100).build(),
            // 占用率 0.8: 质量 115, 综合成本 150 + 20 × 45 × 1.1 = 1140
            FacilityBuilder::new("F30", 30).hourly_cost(20.0).build(),
        ],
        equipment: vec![],
        budgets: budgets(&[("CS", 50_000.0)]),
    }
}

fn picked_facility(strategy: OptimizationStrategy, input: &PlanningInput) -> String {
    let plan = orchestrator().run(strategy, input, fixed_ctx()).unwrap();
    assert_eq!(plan.assigned_count(), 1, "{}", strategy);
    plan.assignments[0].facility_id.clone()
}

/// 多部门、资源紧张的输入
fn contested_input() -> PlanningInput {
    let mut courses = Vec::new();
    for (i, students) in [12, 18, 25, 30, 33, 40, 22, 15].iter().enumerate() {
        let dept = if i % 2 == 0 { "MATH" } else { "PHYS" };
        courses.push(
            CourseBuilder::new(&format!("C{}", i + 1), dept)
                .students(*students)
                .instructor_cost(1500.0 + 250.0 * i as f64)
                .classroom_cost(200.0)
                .build(),
        );
    }

    let instructors = vec![
        InstructorBuilder::new("I1", "MATH").qualification("PhD").build(),
        InstructorBuilder::new("I2", "MATH")
            .employment(EmploymentType::PartTime)
            .build(),
        InstructorBuilder::new("I3", "PHYS")
            .employment(EmploymentType::Adjunct)
            .hourly_rate(60.0)
            .build(),
        InstructorBuilder::new("I4", "PHYS")
            .employment(EmploymentType::Contract)
            .qualification("Master of Science")
            .build(),
        InstructorBuilder::new("I5", "PHYS").build(),
    ];

    let facilities = vec![
        FacilityBuilder::new("F1", 20).hourly_cost(10.0).build(),
        FacilityBuilder::new("F2", 35)
            .department("MATH")
            .hourly_cost(20.0)
            .annual_costs(5000.0, 2000.0)
            .build(),
        FacilityBuilder::new("F3", 45).hourly_cost(30.0).build(),
        FacilityBuilder::new("F4", 30)
            .kind(FacilityType::Lab)
            .hourly_cost(25.0)
            .build(),
    ];

    let equipment = vec![EquipmentBuilder::new(
        "E1",
        8000.0,
        NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
    )
    .in_facility("F3")
    .maintenance(400.0)
    .build()];

    PlanningInput {
        courses,
        instructors,
        facilities,
        equipment,
        budgets: budgets(&[("MATH", 9000.0), ("PHYS", 7000.0)]),
    }
}

/// 端到端场景: 学生数 [25, 20, 40], 场地容量 [30, 45], 预算 10000
fn end_to_end_input() -> PlanningInput {
    PlanningInput {
        courses: vec![
            // 直接成本/学生: 40
            CourseBuilder::new("C25", "CS")
                .students(25)
                .instructor_cost(1000.0)
                .build(),
            // 直接成本/学生: 130
            CourseBuilder::new("C20", "CS")
                .students(20)
                .instructor_cost(2600.0)
                .build(),
            // 直接成本/学生: 125
            CourseBuilder::new("C40", "CS")
                .students(40)
                .instructor_cost(5000.0)
                .build(),
        ],
        instructors: vec![
            InstructorBuilder::new("I1", "CS").build(),
            InstructorBuilder::new("I2", "CS").build(),
            InstructorBuilder::new("I3", "CS").build(),
        ],
        facilities: vec![
            FacilityBuilder::new("F30", 30).build(),
            FacilityBuilder::new("F45", 45).hourly_cost(50.0).build(),
        ],
        equipment: vec![],
        budgets: budgets(&[("CS", 10_000.0)]),
    }
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_end_to_end_cost_minimization_budget() {
    let plan = orchestrator()
        .run(
            OptimizationStrategy::CostMinimization,
            &end_to_end_input(),
            fixed_ctx(),
        )
        .unwrap();

    // C25 -> F30 (1500); C40 只能使用 F45 (9975), 超出 9500 上限; C20 -> F45 (6375)
    assert_eq!(plan.assigned_count(), 2);
    assert_eq!(plan.unassigned_count(), 1);

    let c25 = plan.assignment_for("C25").unwrap();
    assert_eq!(c25.facility_id, "F30");
    assert_eq!(c25.instructor_id, "I1");
    assert!((c25.cost.total - 1500.0).abs() < 1e-6);

    let c20 = plan.assignment_for("C20").unwrap();
    assert_eq!(c20.facility_id, "F45");
    assert_eq!(c20.instructor_id, "I2");
    assert!((c20.cost.total - 6375.0).abs() < 1e-6);

    assert!(plan.assignment_for("C40").is_none());
    assert_eq!(plan.unassigned[0].course_id, "C40");
    assert_eq!(plan.unassigned[0].reason, UnassignedReason::BudgetExceeded);
    assert!(plan
        .warnings
        .iter()
        .any(|w| w.contains("1 门课程未能分配") && w.contains("C40")));

    let cs = &plan.cost_breakdown.by_department["CS"];
    assert!(cs.total <= 10_000.0 * 0.95);
    assert!((cs.total - 7875.0).abs() < 1e-6);
    assert_eq!(cs.course_count, 2);
}

#[test]
fn test_no_resource_or_course_appears_twice() {
    let input = contested_input();
    for strategy in OptimizationStrategy::ALL {
        let plan = orchestrator().run(strategy, &input, fixed_ctx()).unwrap();

        let mut courses = HashSet::new();
        let mut instructors = HashSet::new();
        let mut facilities = HashSet::new();
        for a in &plan.assignments {
            assert!(courses.insert(a.course_id.clone()), "{}: 课程重复", strategy);
            assert!(instructors.insert(a.instructor_id.clone()), "{}: 教师重复", strategy);
            assert!(facilities.insert(a.facility_id.clone()), "{}: 场地重复", strategy);
        }

        // 每门课程要么已分配, 要么在未分配列表中
        assert_eq!(
            plan.assigned_count() + plan.unassigned_count(),
            input.courses.len(),
            "{}",
            strategy
        );
    }
}

#[test]
fn test_department_spend_respects_buffer() {
    let input = contested_input();
    for strategy in OptimizationStrategy::ALL {
        let plan = orchestrator().run(strategy, &input, fixed_ctx()).unwrap();

        let mut spend: BTreeMap<&str, f64> = BTreeMap::new();
        for a in &plan.assignments {
            *spend.entry(a.department_id.as_str()).or_default() += a.cost.total;
        }
        for (dept, total) in spend {
            let budget = input.budgets.get(dept).unwrap();
            assert!(
                total <= budget * 0.95 + 1e-9,
                "{}: 部门 {} 支出 {} 超过 {}",
                strategy,
                dept,
                total,
                budget * 0.95
            );
        }
    }
}

#[test]
fn test_runs_are_reproducible() {
    let input = contested_input();
    for strategy in OptimizationStrategy::ALL {
        let first = orchestrator().run(strategy, &input, fixed_ctx()).unwrap();
        let second = orchestrator().run(strategy, &input, fixed_ctx()).unwrap();
        assert_eq!(first, second, "{}", strategy);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_oversized_course_becomes_unassignable() {
    let mut input = contested_input();
    let baseline = orchestrator()
        .run(OptimizationStrategy::Balanced, &input, fixed_ctx())
        .unwrap();

    input.courses[0].expected_students = 500;
    let plan = orchestrator()
        .run(OptimizationStrategy::Balanced, &input, fixed_ctx())
        .unwrap();

    assert!(plan.assignment_for("C1").is_none());
    let skipped = plan
        .unassigned
        .iter()
        .find(|u| u.course_id == "C1")
        .unwrap();
    assert_eq!(skipped.reason, UnassignedReason::NoCompatibleFacility);
    assert!(plan.unassigned_count() >= 1);
    assert!(baseline.assigned_count() + baseline.unassigned_count() == input.courses.len());
}

#[test]
fn test_missing_budget_is_unconstrained_with_warning() {
    let mut input = end_to_end_input();
    input.budgets = budgets(&[]);

    let plan = orchestrator()
        .run(OptimizationStrategy::CostMinimization, &input, fixed_ctx())
        .unwrap();

    // 无预算约束时 C40 可使用 F45, C20 因场地耗尽未分配
    assert!(plan.assignment_for("C40").is_some());
    assert_eq!(plan.unassigned[0].course_id, "C20");
    assert_eq!(plan.unassigned[0].reason, UnassignedReason::ResourcesExhausted);
    assert!(plan.warnings.iter().any(|w| w.contains("部门 CS 未配置预算")));
    assert_eq!(plan.cost_breakdown.by_department["CS"].budget, None);
}

#[test]
fn test_inactive_resources_are_ignored() {
    let mut input = end_to_end_input();
    input.instructors[0].status = InstructorStatus::OnLeave;
    input.facilities[0].status = FacilityStatus::Maintenance;

    let plan = orchestrator()
        .run(OptimizationStrategy::CostMinimization, &input, fixed_ctx())
        .unwrap();

    assert!(plan
        .assignments
        .iter()
        .all(|a| a.instructor_id != "I1" && a.facility_id != "F30"));
}

#[test]
fn test_instructor_at_max_load_is_not_compatible() {
    let mut input = end_to_end_input();
    input.instructors = vec![InstructorBuilder::new("I1", "CS").load(2, 2).build()];

    let plan = orchestrator()
        .run(OptimizationStrategy::QualityFocused, &input, fixed_ctx())
        .unwrap();

    assert_eq!(plan.assigned_count(), 0);
    assert!(plan
        .unassigned
        .iter()
        .all(|u| u.reason == UnassignedReason::NoCompatibleInstructor));
}

#[test]
fn test_equipment_cost_attached_to_housing_facility() {
    let input = contested_input();
    let plan = orchestrator()
        .run(OptimizationStrategy::UtilizationMaximization, &input, fixed_ctx())
        .unwrap();

    for a in &plan.assignments {
        if a.facility_id == "F3" {
            // 年折旧 800 + 年维护 400, 学期口径减半
            assert!((a.cost.equipment.total - 600.0).abs() < 1e-6);
        } else {
            assert_eq!(a.cost.equipment.total, 0.0);
        }
    }
}

#[test]
fn test_validation_failure_stops_run() {
    let mut input = end_to_end_input();
    input.instructors.push(InstructorBuilder::new("I1", "CS").build());

    let err = orchestrator()
        .run(OptimizationStrategy::Balanced, &input, fixed_ctx())
        .unwrap_err();
    assert!(matches!(err, PlanningError::DuplicateId { .. }));
}

#[test]
fn test_equal_candidates_first_seen_wins() {
    let input = PlanningInput {
        courses: vec![CourseBuilder::new("C1", "CS").students(20).build()],
        instructors: vec![
            InstructorBuilder::new("IA", "CS").build(),
            InstructorBuilder::new("IB", "CS").build(),
        ],
        facilities: vec![
            FacilityBuilder::new("FA", 25).hourly_cost(10.0).build(),
            FacilityBuilder::new("FB", 25).hourly_cost(10.0).build(),
        ],
        equipment: vec![],
        budgets: budgets(&[("CS", 50_000.0)]),
    };

    for strategy in OptimizationStrategy::ALL {
        let plan = orchestrator().run(strategy, &input, fixed_ctx()).unwrap();
        assert_eq!(plan.assigned_count(), 1, "{}", strategy);
        assert_eq!(plan.assignments[0].instructor_id, "IA", "{}", strategy);
        assert_eq!(plan.assignments[0].facility_id, "FA", "{}", strategy);
    }
}

#[test]
fn test_strategy_specific_room_choice() {
    let input = room_choice_input();

    // 质量优先: 占用率位于最佳区间的小教室
    assert_eq!(picked_facility(OptimizationStrategy::QualityFocused, &input), "F30");
    // 利用率: (0.8 + 0.25) / 2 > (0.24 + 0.25) / 2
    assert_eq!(
        picked_facility(OptimizationStrategy::UtilizationMaximization, &input),
        "F30"
    );
    // 成本最小化: 免费大教室
    assert_eq!(picked_facility(OptimizationStrategy::CostMinimization, &input), "F100");
}

#[test]
fn test_balanced_differs_from_quality_choice() {
    let input = room_choice_input();

    // 均衡: F100 = 0.4×90 + 0.3×0.245 + 0.3×10000/150 ≈ 56.07
    //       F30  = 0.4×115 + 0.3×0.525 + 0.3×10000/1140 ≈ 48.79
    let balanced = picked_facility(OptimizationStrategy::Balanced, &input);
    let quality = picked_facility(OptimizationStrategy::QualityFocused, &input);
    assert_eq!(balanced, "F100");
    assert_ne!(balanced, quality);
}

#[test]
fn test_quality_orders_courses_by_priority_and_complexity() {
    // 两门课程争夺唯一的教师与场地, 先处理者胜出
    let input = PlanningInput {
        courses: vec![
            // 优先级 1.48 × 复杂度 1.0 = 1.48
            CourseBuilder::new("BIG", "CS").students(24).build(),
            // 优先级 (1 + 0.24 + 0.5 + 0.3) × 复杂度 1.4 = 2.856
            CourseBuilder::new("CORE", "CS")
                .students(12)
                .required()
                .level(CourseLevel::Advanced)
                .build(),
        ],
        instructors: vec![InstructorBuilder::new("I1", "CS").build()],
        facilities: vec![FacilityBuilder::new("F25", 25).build()],
        equipment: vec![],
        budgets: budgets(&[("CS", 50_000.0)]),
    };

    let quality = orchestrator()
        .run(OptimizationStrategy::QualityFocused, &input, fixed_ctx())
        .unwrap();
    assert_eq!(quality.assignments[0].course_id, "CORE");
    assert_eq!(quality.unassigned[0].course_id, "BIG");
    assert_eq!(quality.unassigned[0].reason, UnassignedReason::ResourcesExhausted);

    // 利用率策略按学生数降序, 结果相反
    let utilization = orchestrator()
        .run(OptimizationStrategy::UtilizationMaximization, &input, fixed_ctx())
        .unwrap();
    assert_eq!(utilization.assignments[0].course_id, "BIG");
    assert_eq!(utilization.unassigned[0].course_id, "CORE");
}
