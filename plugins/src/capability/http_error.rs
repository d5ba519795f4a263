use datachore_core::api::{CapabilityError, CapabilityErrorKind};

const BODY_PREVIEW_LIMIT: usize = 512;

pub(crate) fn from_reqwest(err: reqwest::Error, url: &str) -> CapabilityError {
    let kind = if err.is_timeout() {
        CapabilityErrorKind::Timeout
    } else if err.is_connect() {
        CapabilityErrorKind::Connect
    } else if err.is_request() || err.is_body() {
        CapabilityErrorKind::Request
    } else if err.is_decode() {
        CapabilityErrorKind::Decode
    } else {
        CapabilityErrorKind::Unknown
    };
    let status = err.status().map(|s| s.as_u16());
    let mut out = CapabilityError::new(kind, err.to_string())
        .with_url(url)
        .with_source(err);
    if let Some(status) = status {
        out = out.with_status(status);
    }
    out
}

pub(crate) fn decode_error(
    status: u16,
    url: &str,
    err: serde_json::Error,
    preview: String,
) -> CapabilityError {
    CapabilityError::new(
        CapabilityErrorKind::Decode,
        format!("failed to decode response body: {} | body={}", err, preview),
    )
    .with_status(status)
    .with_url(url)
    .with_source(err)
}

pub(crate) fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }

    if truncated {
        out.push_str("...");
    }

    out
}

/// Read the body and decode it as JSON, turning non-2xx statuses into
/// [`CapabilityErrorKind::Status`] errors carrying a body preview.
pub(crate) async fn parse_json_response(
    resp: reqwest::Response,
) -> Result<serde_json::Value, CapabilityError> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp.text().await.map_err(|err| from_reqwest(err, &url))?;

    if !status.is_success() {
        return Err(CapabilityError::status_error(
            status.as_u16(),
            url,
            preview_body(&body),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|err| decode_error(status.as_u16(), &url, err, preview_body(&body)))
}
