use datachore_core::api::{CliError, TaskAgent};

use super::cli::RunArgs;

/// Execute one instruction in-process, without the HTTP server.
pub async fn handle_run(args: RunArgs, agent: &TaskAgent) -> Result<i32, CliError> {
    let instruction = args.instruction();
    let report = agent.run_task(&instruction).await?;

    match &report.output {
        Some(path) => println!("{}: {}", report.task, path.display()),
        None => println!("{}", report.task),
    }
    Ok(0)
}
