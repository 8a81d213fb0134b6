use serde::Deserialize;
use std::{error::Error as StdError, fmt};

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Body,
    Decode,
    Unknown,
}

impl ToggleHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ToggleHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ToggleHttpError {
    kind: ToggleHttpErrorKind,
    status: Option<u16>,
    url: Option<String>,
    message: String,
    source: Option<anyhow::Error>,
}

impl ToggleHttpError {
    pub fn kind(&self) -> ToggleHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            ToggleHttpErrorKind::Timeout
        } else if err.is_connect() {
            ToggleHttpErrorKind::Connect
        } else if err.is_request() {
            ToggleHttpErrorKind::Request
        } else if err.is_body() {
            ToggleHttpErrorKind::Body
        } else {
            ToggleHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        ToggleHttpError {
            kind,
            status,
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {} | body={}", err, preview);
        ToggleHttpError {
            kind: ToggleHttpErrorKind::Decode,
            status: Some(status),
            url: Some(url),
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for ToggleHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toggle http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={}", status)?;
        }
        if let Some(url) = &self.url {
            write!(f, " url={}", url)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl StdError for ToggleHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

fn preview_body(body: &str) -> String {
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

/// What the toggle endpoint answers: `{"status": "success", "completed": bool}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleResponse {
    pub status: String,
    pub completed: bool,
}

impl ToggleResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Clone)]
pub struct ToggleClient {
    http: reqwest::Client,
    base: String,
}

impl ToggleClient {
    pub fn new(base_url: &str, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn toggle_url(&self, task_id: &str) -> String {
        format!("{}/task/{}/toggle/", self.base, task_id)
    }

    fn csrf(&self, req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(t) if !t.trim().is_empty() => req.header("X-CSRFToken", t),
            _ => req,
        }
    }

    /// One toggle request: empty JSON-typed POST body, response body parsed
    /// as JSON irrespective of the HTTP status code.
    pub async fn toggle(
        &self,
        task_id: &str,
        csrf_token: Option<&str>,
    ) -> Result<ToggleResponse, ToggleHttpError> {
        let url = self.toggle_url(task_id);
        tracing::debug!(
            target: "taskpage.toggle",
            stage = "toggle.http.in",
            url = %url,
            task_id = %task_id,
            has_csrf = csrf_token.map(|t| !t.trim().is_empty()).unwrap_or(false)
        );
        let req = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let resp = self
            .csrf(req, csrf_token)
            .send()
            .await
            .map_err(|err| ToggleHttpError::from_reqwest(err, url.clone()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| ToggleHttpError::from_reqwest(err, url.clone()))?;

        let parsed = serde_json::from_str::<ToggleResponse>(&body).map_err(|err| {
            let preview = preview_body(&body);
            ToggleHttpError::decode_error(status.as_u16(), url.clone(), err, preview)
        })?;
        tracing::debug!(
            target: "taskpage.toggle",
            stage = "toggle.http.out",
            status = %status,
            result = %parsed.status,
            completed = parsed.completed
        );
        Ok(parsed)
    }
}
