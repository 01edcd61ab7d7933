// ==========================================
// 院系预算资源规划系统 - 命令行入口
// ==========================================
// 用法:
//   dept-resource-planner <snapshot.json> [strategy] [--config <path>] [--compare]
// 输入: 课程/教师/场地/设备/预算 JSON 快照
// 输出: 分配方案 JSON (stdout), 日志 (stderr)
// ==========================================

use anyhow::{bail, Context, Result};
use dept_resource_planner::api::{PlanningApi, PlanningRequest};
use dept_resource_planner::config::ConfigManager;
use dept_resource_planner::engine::{PlanningInput, PlanningOrchestrator, RunContext};
use dept_resource_planner::repository::{InMemoryRepository, ResourceFilter};
use dept_resource_planner::{logging, APP_NAME, VERSION};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

struct CliArgs {
    snapshot: PathBuf,
    strategy: String,
    config: Option<PathBuf>,
    compare: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut snapshot = None;
    let mut strategy = None;
    let mut config = None;
    let mut compare = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config 需要文件路径")?;
                config = Some(PathBuf::from(path));
            }
            "--compare" => compare = true,
            _ if snapshot.is_none() => snapshot = Some(PathBuf::from(arg)),
            _ if strategy.is_none() => strategy = Some(arg),
            _ => bail!("无法识别的参数: {}", arg),
        }
    }

    let snapshot = match snapshot {
        Some(path) => path,
        None => bail!(
            "用法: dept-resource-planner <snapshot.json> [strategy] [--config <path>] [--compare]"
        ),
    };

    Ok(CliArgs {
        snapshot,
        strategy: strategy.unwrap_or_else(|| "balanced".to_string()),
        config,
        compare,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 系统版本: {}", APP_NAME, VERSION);
    tracing::info!("==================================================");

    let args = parse_args()?;

    let manager = ConfigManager::load(args.config.as_deref())?;
    match manager.source() {
        Some(path) => tracing::info!(path = %path.display(), "规划参数已加载"),
        None => tracing::info!("未找到配置文件, 使用默认规划参数"),
    }
    tracing::debug!(config = %manager.snapshot_json()?, "规划参数快照");

    let raw = fs::read_to_string(&args.snapshot)
        .with_context(|| format!("读取快照失败: {}", args.snapshot.display()))?;
    let snapshot: PlanningInput = serde_json::from_str(&raw)
        .with_context(|| format!("解析快照失败: {}", args.snapshot.display()))?;

    let repo = Arc::new(InMemoryRepository::new(snapshot));
    let api = PlanningApi::new(
        repo.clone(),
        repo,
        PlanningOrchestrator::new(manager.into_config()),
    );
    let ctx = RunContext::now();

    if args.compare {
        let comparisons = api.compare_strategies(&ResourceFilter::all(), ctx).await?;
        println!("{}", serde_json::to_string_pretty(&comparisons)?);
        return Ok(());
    }

    let request = PlanningRequest {
        strategy: PlanningApi::parse_strategy(&args.strategy)?,
        filter: ResourceFilter::all(),
        persist: false,
    };
    let response = api.generate_plan(&request, ctx).await?;
    println!("{}", serde_json::to_string_pretty(&response.plan)?);

    Ok(())
}
