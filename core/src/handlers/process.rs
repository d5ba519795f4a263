use std::path::Path;

use anyhow::{anyhow, bail, Context};
use tokio::process::Command;

const STDERR_PREVIEW_LIMIT: usize = 512;

fn split_argv(argv: &[String]) -> anyhow::Result<(&str, &[String])> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("command is not configured"))?;
    Ok((program.as_str(), args))
}

fn stderr_preview(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let trimmed = text.trim();
    if trimmed.chars().count() <= STDERR_PREVIEW_LIMIT {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(STDERR_PREVIEW_LIMIT).collect();
    out.push_str("...");
    out
}

/// Run the data generator with `email` appended. The generator's outcome is
/// logged but never turned into an error.
pub async fn generate_data(argv: &[String], email: &str) -> anyhow::Result<()> {
    let (program, args) = split_argv(argv).context("generate_data")?;
    tracing::info!(program, email, "running data generator");

    match Command::new(program).args(args).arg(email).output().await {
        Ok(out) if out.status.success() => {
            tracing::info!(program, "data generator finished");
        }
        Ok(out) => {
            tracing::warn!(
                program,
                status = %out.status,
                stderr = %stderr_preview(&out.stderr),
                "data generator exited unsuccessfully"
            );
        }
        Err(err) => {
            tracing::warn!(program, error = %err, "data generator could not be started");
        }
    }
    Ok(())
}

/// Format `file` in place with the configured formatter. A formatter that
/// cannot start or exits non-zero fails the task.
pub async fn format_file(argv: &[String], file: &Path) -> anyhow::Result<()> {
    let (program, args) = split_argv(argv).context("format")?;
    tracing::info!(program, file = %file.display(), "running formatter");

    let out = Command::new(program)
        .args(args)
        .arg(file)
        .output()
        .await
        .with_context(|| format!("failed to start formatter `{program}`"))?;

    if !out.status.success() {
        bail!(
            "formatter `{program}` exited with {}: {}",
            out.status,
            stderr_preview(&out.stderr)
        );
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn generator_passes_email_as_last_argument() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("seen.txt");
        let script = format!("printf '%s' \"$0\" > {}", marker.display());

        generate_data(&argv(&["sh", "-c", &script]), "user@example.com")
            .await
            .unwrap();
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "user@example.com");
    }

    #[tokio::test]
    async fn generator_failures_are_not_inspected() {
        generate_data(&argv(&["sh", "-c", "exit 3"]), "x@y.z").await.unwrap();
        generate_data(&argv(&["definitely-not-a-real-binary-4242"]), "x@y.z")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unconfigured_generator_is_an_error() {
        assert!(generate_data(&[], "x@y.z").await.is_err());
    }

    #[tokio::test]
    async fn formatter_rewrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("format.md");
        std::fs::write(&file, "#   Title\n").unwrap();

        // `$0` is the file appended after the script.
        let script = "printf '# Title\\n' > \"$0\"";
        format_file(&argv(&["sh", "-c", script]), &file).await.unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "# Title\n");
    }

    #[tokio::test]
    async fn formatter_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("format.md");
        let err = format_file(&argv(&["sh", "-c", "echo boom >&2; exit 2"]), &file)
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exited with"));
        assert!(msg.contains("boom"));

        let err = format_file(&argv(&["definitely-not-a-real-binary-4242"]), &file)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to start formatter"));
    }
}
