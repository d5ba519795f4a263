//! Query validation ahead of dispatch.

use super::models::HttpServerError;

pub const MAX_TASK_CHARS: usize = 10_000;

/// Reject empty or oversized instructions before they reach the classifier.
pub fn validate_task(task: &str) -> Result<(), HttpServerError> {
    let trimmed = task.trim();
    if trimmed.is_empty() {
        return Err(HttpServerError::InvalidRequest(
            "Task cannot be empty".to_string(),
        ));
    }
    let len = trimmed.chars().count();
    if len > MAX_TASK_CHARS {
        return Err(HttpServerError::InvalidRequest(format!(
            "Task too long ({len} chars, max {MAX_TASK_CHARS})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_task() {
        assert!(validate_task("count the number of wednesdays").is_ok());
        assert!(validate_task("").is_err());
        assert!(validate_task("   \n").is_err());
        assert!(validate_task(&"a".repeat(MAX_TASK_CHARS + 1)).is_err());
    }
}
