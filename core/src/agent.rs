//! Request façade: classify an instruction, run its handler, report one verdict.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Weekday;

use crate::config::{AppConfig, CommandsConfig, TaskPaths};
use crate::context::Services;
use crate::dispatch::{Task, TaskKind, TaskRegistry};
use crate::error::TaskError;
use crate::handlers;

/// Outcome of a successfully executed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub task: TaskKind,
    /// The file the handler replaced, when it writes one itself.
    pub output: Option<PathBuf>,
}

#[derive(Clone)]
pub struct TaskAgent {
    registry: Arc<TaskRegistry>,
    paths: Arc<TaskPaths>,
    commands: Arc<CommandsConfig>,
    services: Services,
}

impl TaskAgent {
    pub fn new(cfg: &AppConfig, services: Services) -> Self {
        Self::with_parts(
            TaskRegistry::default(),
            cfg.data.resolve(),
            cfg.commands.clone(),
            services,
        )
    }

    pub fn with_parts(
        registry: TaskRegistry,
        paths: TaskPaths,
        commands: CommandsConfig,
        services: Services,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            paths: Arc::new(paths),
            commands: Arc::new(commands),
            services,
        }
    }

    pub fn paths(&self) -> &TaskPaths {
        &self.paths
    }

    /// Classify `instruction` and execute the selected chore.
    pub async fn run_task(&self, instruction: &str) -> Result<TaskReport, TaskError> {
        let task = self.registry.classify(instruction).inspect_err(|_| {
            tracing::info!(instruction, "task not recognized");
        })?;
        self.execute(task).await
    }

    pub async fn execute(&self, task: Task) -> Result<TaskReport, TaskError> {
        let kind = task.kind();
        let start = Instant::now();
        tracing::info!(task = %kind, "task started");

        let result = self.execute_inner(task).await;
        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(report) => tracing::info!(
                task = %kind,
                output = ?report.output,
                duration_ms,
                "task finished"
            ),
            Err(err) => tracing::warn!(
                task = %kind,
                error = %err,
                code = err.code(),
                duration_ms,
                "task failed"
            ),
        }
        result
    }

    async fn execute_inner(&self, task: Task) -> Result<TaskReport, TaskError> {
        let kind = task.kind();
        let paths = Arc::clone(&self.paths);
        let report = |output: Option<&PathBuf>| TaskReport {
            task: kind,
            output: output.cloned(),
        };

        match task {
            Task::GenerateData { email } => {
                handlers::generate_data(&self.commands.generate_data, &email).await?;
                Ok(report(None))
            }
            Task::FormatFile => {
                handlers::format_file(&self.commands.format, &paths.format_file).await?;
                Ok(report(Some(&paths.format_file)))
            }
            Task::CountWeekdayOccurrences => {
                let p = Arc::clone(&paths);
                blocking(move || {
                    handlers::count_weekday_occurrences(&p.dates, &p.dates_output, Weekday::Wed)
                })
                .await?;
                Ok(report(Some(&paths.dates_output)))
            }
            Task::SortContacts => {
                let p = Arc::clone(&paths);
                blocking(move || handlers::sort_contacts(&p.contacts, &p.contacts_output)).await?;
                Ok(report(Some(&paths.contacts_output)))
            }
            Task::RecentLogHeadlines => {
                let p = Arc::clone(&paths);
                blocking(move || {
                    handlers::recent_log_headlines(
                        &p.logs_dir,
                        &p.logs_output,
                        handlers::RECENT_LOG_LIMIT,
                    )
                })
                .await?;
                Ok(report(Some(&paths.logs_output)))
            }
            Task::BuildDocIndex => {
                let p = Arc::clone(&paths);
                blocking(move || handlers::build_doc_index(&p.docs_dir, &p.docs_index)).await?;
                Ok(report(Some(&paths.docs_index)))
            }
            Task::ExtractSenderEmail => {
                handlers::extract_sender_email(
                    &paths.email,
                    &paths.email_output,
                    self.services.completion.as_ref(),
                )
                .await?;
                Ok(report(Some(&paths.email_output)))
            }
            Task::ExtractCreditCardNumber => {
                handlers::extract_credit_card_number(
                    &paths.credit_card_output,
                    self.services.completion.as_ref(),
                )
                .await?;
                Ok(report(Some(&paths.credit_card_output)))
            }
            Task::MostSimilarCommentPair => {
                handlers::most_similar_comment_pair(
                    &paths.comments,
                    &paths.comments_output,
                    self.services.embedding.as_ref(),
                )
                .await?;
                Ok(report(Some(&paths.comments_output)))
            }
            Task::GoldTicketSales => {
                let p = Arc::clone(&paths);
                blocking(move || handlers::gold_ticket_sales(&p.ticket_db, &p.ticket_output))
                    .await?;
                Ok(report(Some(&paths.ticket_output)))
            }
        }
    }

    /// Raw contents of any readable path. Every read failure is reported as
    /// not found; there is no confinement to the data root.
    pub async fn read_file(&self, path: &str) -> Result<String, TaskError> {
        tokio::fs::read_to_string(path).await.map_err(|err| {
            tracing::debug!(path, error = %err, "read failed");
            TaskError::NotFound(path.to_string())
        })
    }
}

/// Run synchronous file/database work on the blocking pool.
async fn blocking<T, F>(f: F) -> Result<T, TaskError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| TaskError::handler(format!("handler panicked: {e}")))?
        .map_err(TaskError::from)
}
