use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use url::Url;
use urlencoding::encode;

use crate::error::{PreloviumError, Result};
use crate::types::{ProcessResponse, Role};
use crate::upload::UploadForm;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

const PROCESS_PATH: &str = "/process";

/// Backend operations the controller depends on.
#[async_trait]
pub trait ProcessApi: Send + Sync {
    /// `POST /process` with `{"example": <example>}`.
    async fn process_example(&self, example: &str) -> Result<ProcessResponse>;

    /// `POST /process` with the form as multipart body.
    async fn process_upload(&self, form: &UploadForm) -> Result<ProcessResponse>;

    /// Image source for an example's original photo.
    fn example_image_src(&self, example: &str, role: Role) -> String {
        example_image_path(example, role)
    }
}

/// `/examples/<example>/<role>`, with the identifier encoded as one path segment.
pub fn example_image_path(example: &str, role: Role) -> String {
    format!("/examples/{}/{}", encode(example), role.as_str())
}

#[derive(Debug, Serialize)]
struct ExampleRequest<'a> {
    example: &'a str,
}

/// reqwest-backed [`ProcessApi`].
#[derive(Debug, Clone)]
pub struct HttpProcessClient {
    http: Client,
    base_url: Url,
}

impl HttpProcessClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout` of `None` waits for the server indefinitely.
    pub fn with_timeout(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(PreloviumError::config(format!(
                "server URL must use http or https, got '{}'",
                base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(PreloviumError::Network)?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn send_process(&self, request: RequestBuilder) -> Result<ProcessResponse> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PreloviumError::status(status, text.trim()));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ProcessApi for HttpProcessClient {
    async fn process_example(&self, example: &str) -> Result<ProcessResponse> {
        let url = self.endpoint(PROCESS_PATH)?;
        tracing::debug!(%url, example, "requesting example processing");
        let request = self.http.post(url).json(&ExampleRequest { example });
        self.send_process(request).await
    }

    async fn process_upload(&self, form: &UploadForm) -> Result<ProcessResponse> {
        let url = self.endpoint(PROCESS_PATH)?;
        let mut multipart = Form::new();
        for file in form.files() {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.mime)?;
            multipart = multipart.part(file.field.clone(), part);
        }
        tracing::debug!(%url, files = form.files().len(), "uploading images for processing");
        let request = self.http.post(url).multipart(multipart);
        self.send_process(request).await
    }

    fn example_image_src(&self, example: &str, role: Role) -> String {
        let path = example_image_path(example, role);
        self.base_url
            .join(&path)
            .map(String::from)
            .unwrap_or(path)
    }
}
