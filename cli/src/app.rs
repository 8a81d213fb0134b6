//! CLI application assembly: merge config overrides and run the subcommand.
use taskpage_core::api as core_api;
use taskpage_core::error::{CliError, EnhanceError};

use crate::commands::cli::{Args, Commands, RunArgs, ToggleArgs};

pub async fn dispatch(args: Args, mut cfg: core_api::AppConfig) -> Result<i32, CliError> {
    if let Some(url) = &args.server_url {
        cfg.server.base_url = url.clone();
    }

    match args.command {
        Commands::Toggle(toggle_args) => toggle(toggle_args, &cfg).await,
        Commands::Run(run_args) => run(run_args, &cfg).await,
    }
}

async fn toggle(args: ToggleArgs, cfg: &core_api::AppConfig) -> Result<i32, CliError> {
    let client = core_api::ToggleClient::new(&cfg.server.base_url, cfg.server.timeout_ms)?;
    let resp = client
        .toggle(&args.task_id, args.csrf_token.as_deref())
        .await
        .map_err(|err| CliError::Command(err.to_string()))?;
    println!(
        "{}",
        serde_json::json!({ "status": resp.status, "completed": resp.completed })
    );
    Ok(0)
}

async fn run(args: RunArgs, cfg: &core_api::AppConfig) -> Result<i32, CliError> {
    let json = std::fs::read_to_string(&args.page)?;
    let page = core_api::load_snapshot(&json)?;

    let diag = core_api::start_diag(&cfg.diag_out)
        .map_err(|e| CliError::Enhance(EnhanceError::Spawn(e)))?;
    let mut enhancer = core_api::PageEnhancer::attach(&page, cfg, diag)?;

    for task_id in &args.activate {
        if !enhancer.activate(task_id) {
            tracing::warn!(target: "taskpage.cli", task_id = %task_id, "no toggle control for task");
        }
    }
    enhancer.wait_idle().await;

    let report = core_api::PageReport::from_page(&page);
    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|e| CliError::Command(e.to_string()))?
    );
    Ok(0)
}
