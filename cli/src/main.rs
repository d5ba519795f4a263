use std::path::{Path, PathBuf};

use clap::Parser;
use datachore_cli::commands::{cli, run};
use datachore_cli::http::{handle_serve, ServerConfig};
use datachore_cli::utils::load_env_file;
use datachore_core::api::{
    env_file_candidates, load_default, load_from_path, AppConfig, CliError, LoggingConfig,
    ServicesFactory, TaskAgent, TaskError,
};
use datachore_plugins::PluginServicesFactory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, CliError> {
    let mut args = cli::Args::parse();

    load_env_files(args.config.as_deref().map(Path::new))?;
    let mut cfg = match args.config.as_deref() {
        Some(path) => load_from_path(Path::new(path)),
        None => load_default(),
    }
    .map_err(|e| CliError::Config(format!("{e:#}")))?;

    if let Some(root) = args.data_root.take() {
        cfg.data.root = root;
    }
    let command = args
        .command
        .take()
        .unwrap_or_else(|| cli::Commands::Serve(cli::ServeArgs::default()));
    if let cli::Commands::Serve(serve) = &command {
        apply_serve_overrides(&mut cfg, serve);
    }

    init_tracing(&cfg.logging).map_err(CliError::Config)?;

    let services = PluginServicesFactory.build_services(&cfg).await?;
    let agent = TaskAgent::new(&cfg, services);

    match command {
        cli::Commands::Serve(_) => {
            let server = ServerConfig {
                host: cfg.server.host.clone(),
                port: cfg.server.port,
            };
            handle_serve(server, agent).await?;
            Ok(0)
        }
        cli::Commands::Run(run_args) => run::handle_run(run_args, &agent).await,
    }
}

/// Earlier files win because already-set variables are never replaced.
fn load_env_files(config: Option<&Path>) -> Result<(), CliError> {
    for path in env_file_candidates(config) {
        load_env_file(&path)?;
    }
    Ok(())
}

fn apply_serve_overrides(cfg: &mut AppConfig, serve: &cli::ServeArgs) {
    if let Some(host) = &serve.host {
        cfg.server.host = host.clone();
    }
    if let Some(port) = serve.port {
        cfg.server.port = port;
    }
}

fn exit_code_for_error(e: &CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: server / IO error
    // 30: instruction not recognized
    // 40: task failed
    // 50: internal/uncategorized
    match e {
        CliError::Config(_) => 11,
        CliError::Server(_) => 20,
        CliError::Io(_) => 20,
        CliError::Task(TaskError::NotRecognized) => 30,
        CliError::Task(_) => 40,
        CliError::Anyhow(_) => 50,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => PathBuf::from(shellexpand::tilde(d).as_ref()),
            None => std::env::temp_dir().join("datachore"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender = tracing_appender::rolling::daily(dir, "datachore.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}
