//! Image generation against an OpenAI-style gateway.
//!
//! `POST {base}/v1/images/generations` answers in one of three shapes, and
//! every one of them ends as `<out_dir>/<name>.png`:
//!
//! | Reply                                   | Handling                          |
//! |-----------------------------------------|-----------------------------------|
//! | `{data: {task_id}}` / `{data: [{id}]}`  | poll `GET {base}/v1/tasks/{id}`   |
//! | `{data: [{url}]}`                       | download the URL                  |
//! | `{data: [{b64_json}]}`                  | decode in place                   |
//!
//! Items are generated one after another. The first failure stops the run;
//! files already written stay, so a rerun without `--overwrite` resumes.

use super::plan::{ImagePlan, PlanItem};
use crate::config::ImageGenConfig;
use crate::convert::write_atomic;
use crate::error::ExportError;
use crate::output::ImagePackOutput;
use base64::Engine;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What the generation endpoint handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Task(String),
    Url(String),
    Inline(String),
}

/// Where a polled task stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Done { url: String },
    Failed,
    /// Reported success but carried no usable image URL.
    Malformed(&'static str),
}

/// Recognise a generation reply, or `None` for an unknown shape.
pub fn classify_reply(body: &Value) -> Option<Reply> {
    match body.get("data")? {
        Value::Object(data) => task_id(data).map(Reply::Task),
        Value::Array(items) => {
            let item = items.first()?.as_object()?;
            if let Some(id) = task_id(item) {
                return Some(Reply::Task(id));
            }
            if let Some(url) = non_empty_str(item.get("url")) {
                return Some(Reply::Url(url));
            }
            non_empty_str(item.get("b64_json")).map(Reply::Inline)
        }
        _ => None,
    }
}

/// Read the status of a task poll reply.
pub fn task_state(body: &Value) -> TaskState {
    let data = body.get("data");
    let status = data
        .and_then(|d| d.get("status"))
        .and_then(Value::as_str)
        .unwrap_or_default();
    match status {
        "success" | "succeeded" | "completed" => {
            let Some(first) = data.and_then(|d| d.pointer("/result/images/0")) else {
                return TaskState::Malformed("result.images is missing");
            };
            let url = match first.get("url").or_else(|| first.get("urls")) {
                Some(Value::Array(urls)) => non_empty_str(urls.first()),
                other => non_empty_str(other),
            };
            match url {
                Some(url) => TaskState::Done { url },
                None => TaskState::Malformed("image url is missing"),
            }
        }
        "failed" | "error" | "canceled" | "cancelled" => TaskState::Failed,
        _ => TaskState::Pending,
    }
}

fn task_id(obj: &Map<String, Value>) -> Option<String> {
    ["task_id", "id"].iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
    v.and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

// ── HTTP client ──────────────────────────────────────────────────────────

/// One gateway session: a configured client plus the run settings.
pub struct ImageGenerator<'a> {
    client: Client,
    config: &'a ImageGenConfig,
}

impl<'a> ImageGenerator<'a> {
    pub fn new(config: &'a ImageGenConfig) -> Result<Self, ExportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ExportError::Internal(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        let key = &self.config.api_key;
        req.bearer_auth(key)
            .header("X-Api-Key", key)
            .header("X-Goog-Api-Key", key)
    }

    async fn send_json(&self, url: &str, req: RequestBuilder) -> Result<Value, ExportError> {
        let fail = |reason: String| ExportError::ImageApiFailed {
            url: url.to_string(),
            reason,
        };
        let response = req.send().await.map_err(|e| fail(request_reason(&e)))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fail(format!("HTTP {status}: {}", snippet(&body))));
        }
        response.json().await.map_err(|e| fail(request_reason(&e)))
    }

    /// Generate one item into `out_path`.
    pub async fn generate_one(&self, item: &PlanItem, out_path: &Path) -> Result<(), ExportError> {
        let url = format!("{}/v1/images/generations", self.config.base_url);
        let payload = json!({
            "model": self.config.model,
            "prompt": item.prompt,
            "n": 1,
            "size": item.size,
            "resolution": item.resolution,
        });
        let body = self
            .send_json(&url, self.authed(self.client.post(&url).json(&payload)))
            .await?;

        match classify_reply(&body) {
            Some(Reply::Task(id)) => {
                let image_url = self.poll_task(&id).await?;
                self.download(&image_url, out_path).await
            }
            Some(Reply::Url(image_url)) => self.download(&image_url, out_path).await,
            Some(Reply::Inline(b64)) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(b64.trim())
                    .map_err(|e| ExportError::ImageApiFailed {
                        url,
                        reason: format!("invalid b64_json: {e}"),
                    })?;
                write_atomic(out_path, &bytes).await
            }
            None => Err(ExportError::ImageApiFailed {
                url,
                reason: format!("unrecognised response shape: {}", snippet(&body.to_string())),
            }),
        }
    }

    /// Poll a task until it finishes; returns the image URL.
    async fn poll_task(&self, id: &str) -> Result<String, ExportError> {
        let url = format!("{}/v1/tasks/{id}", self.config.base_url);
        let started = Instant::now();
        let timeout = Duration::from_secs(self.config.task_timeout_secs);
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        loop {
            if started.elapsed() > timeout {
                return Err(ExportError::ImageTaskTimeout {
                    task: id.to_string(),
                    secs: self.config.task_timeout_secs,
                });
            }

            let req = self.client.get(&url).query(&[("language", "en")]);
            let body = self.send_json(&url, self.authed(req)).await?;
            match task_state(&body) {
                TaskState::Done { url: image_url } => return Ok(image_url),
                TaskState::Pending => {
                    debug!("Task {id} pending");
                    tokio::time::sleep(interval).await;
                }
                TaskState::Failed => {
                    return Err(ExportError::ImageApiFailed {
                        url,
                        reason: format!("task {id} failed: {}", snippet(&body.to_string())),
                    })
                }
                TaskState::Malformed(what) => {
                    return Err(ExportError::ImageApiFailed {
                        url,
                        reason: format!("task {id} succeeded but {what}"),
                    })
                }
            }
        }
    }

    /// Fetch a finished image. Result URLs are usually pre-signed, so no
    /// credentials are sent.
    async fn download(&self, url: &str, out_path: &Path) -> Result<(), ExportError> {
        let fail = |reason: String| ExportError::ImageApiFailed {
            url: url.to_string(),
            reason,
        };
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fail(request_reason(&e)))?;
        if !response.status().is_success() {
            return Err(fail(format!("HTTP {}", response.status())));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| fail(request_reason(&e)))?;
        write_atomic(out_path, &bytes).await
    }
}

fn request_reason(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    }
}

fn snippet(text: &str) -> String {
    const MAX: usize = 300;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{cut}…")
    }
}

/// Generate every image of `plan` into `out_dir`.
///
/// The whole plan is checked before the first request. Existing files are
/// skipped unless `config.overwrite` is set.
pub async fn generate_images(
    plan: &ImagePlan,
    out_dir: &Path,
    config: &ImageGenConfig,
) -> Result<ImagePackOutput, ExportError> {
    if plan.images.is_empty() {
        return Err(ExportError::PlanInvalid("plan has no images".into()));
    }
    if let Some((i, item)) = plan
        .images
        .iter()
        .enumerate()
        .find(|(_, item)| item.prompt.trim().is_empty())
    {
        return Err(ExportError::PlanInvalid(format!(
            "item '{}' has no prompt",
            item.file_stem(i)
        )));
    }

    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| ExportError::OutputWriteFailed {
            path: out_dir.to_path_buf(),
            source,
        })?;

    let generator = ImageGenerator::new(config)?;
    let total = plan.images.len();
    let mut out = ImagePackOutput::default();

    for (i, item) in plan.images.iter().enumerate() {
        let stem = item.file_stem(i);
        let out_path: PathBuf = out_dir.join(format!("{stem}.png"));
        if out_path.exists() && !config.overwrite {
            info!("[skip] {} exists", out_path.display());
            out.skipped.push(out_path);
            continue;
        }

        info!("[{}/{}] {} (slide {})", i + 1, total, stem, item.slide_number);
        generator.generate_one(item, &out_path).await?;
        info!("  -> {}", out_path.display());
        out.written.push(out_path);
    }

    Ok(out)
}
