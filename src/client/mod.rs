//! HTTP boundary: multipart submission to the generation service and
//! decoding of its response body.

mod error;

use std::path::{Path, PathBuf};

use reqwest::multipart;
use serde::Deserialize;

use crate::config::Config;
use crate::model::{Difficulty, Mcq, parse_mcqs};

pub use error::ClientError;

/// File extensions the generation service accepts as document uploads.
pub static DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// Returns whether the path carries one of the accepted document extensions.
pub fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_lowercase();
            DOCUMENT_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Where the document text for one generation request comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePayload {
    File(PathBuf),
    Text(String),
}

/// A snapshot of the form taken at the moment of submission.
///
/// The snapshot is detached from live form state so later edits cannot leak
/// into a request that is already on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub source: SourcePayload,
    pub topic: String,
    pub quantity: u32,
    pub difficulty: Difficulty,
    /// Whether the source changed since the previous submission. Sent as the
    /// `status` field so the service can skip re-ingesting an unchanged
    /// document.
    pub source_changed: bool,
}

impl GenerationRequest {
    /// Scalar multipart fields, in wire order.
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("topic", self.topic.clone()),
            ("quantity", self.quantity.to_string()),
            ("difficulty", self.difficulty.wire_str().to_string()),
            ("status", self.source_changed.to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct McqResponse {
    mcqs: Vec<String>,
}

/// HTTP client for the question generation service.
#[derive(Debug, Clone)]
pub struct GeneratorClient {
    http: reqwest::Client,
    base_url: String,
}

impl GeneratorClient {
    pub fn new(config: &Config) -> GeneratorClient {
        GeneratorClient {
            http: reqwest::Client::new(),
            base_url: config.base_url().to_string(),
        }
    }

    /// Posts one generation request and parses the response into records.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Mcq>, ClientError> {
        let form = build_form(request).await?;
        let url = format!("{}/mcq", self.base_url);
        log::debug!("posting generation request to {url}");
        let response = self.http.post(&url).multipart(form).send().await?;
        let response = check_status(response)?;
        let body: McqResponse = response.json().await?;
        Ok(parse_mcqs(&body.mcqs)?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(ClientError::Status {
            status: response.status(),
        })
    }
}

/// Assembles the multipart form: scalar fields plus exactly one source part,
/// `file` or `inputText` depending on the payload.
async fn build_form(request: &GenerationRequest) -> Result<multipart::Form, ClientError> {
    let mut form = multipart::Form::new();
    for (name, value) in request.text_fields() {
        form = form.text(name, value);
    }
    match &request.source {
        SourcePayload::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|source| ClientError::FileRead {
                    path: path.clone(),
                    source,
                })?;
            let file_name = path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string();
            let part = multipart::Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime_for_document(path))?;
            form = form.part("file", part);
        }
        SourcePayload::Text(text) => {
            form = form.text("inputText", text.clone());
        }
    }
    Ok(form)
}

/// Infers the MIME type for the document kinds the service accepts.
fn mime_for_document(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
