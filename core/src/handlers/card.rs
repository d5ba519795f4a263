use std::path::Path;

use crate::capability::CompletionCapability;
use crate::error::TaskError;
use crate::util::write_atomic_async;

pub const CARD_PROMPT: &str = "Extract the credit card number from the provided image.";
pub const FAILED_TO_EXTRACT: &str = "FAILED_TO_EXTRACT";

/// Ask the completion capability for the card number. Any capability failure
/// is recorded as [`FAILED_TO_EXTRACT`] rather than raised.
pub async fn extract_credit_card_number(
    output: &Path,
    completion: &dyn CompletionCapability,
) -> Result<String, TaskError> {
    let number = match completion.complete(CARD_PROMPT).await {
        Ok(text) => text.chars().filter(|c| !c.is_whitespace()).collect(),
        Err(err) => {
            tracing::warn!(error = %err, "card extraction failed, writing sentinel");
            FAILED_TO_EXTRACT.to_string()
        }
    };

    write_atomic_async(output, number.as_str()).await?;
    Ok(number)
}
