use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

use engine_logging::{engine_info, engine_warn};

use crate::{AskQuery, BackendError, BackendSettings, FailureKind, UploadOutcome, UploadPart};

/// The three calls the client makes against the assistant service.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<String>, BackendError>;

    async fn upload(
        &self,
        roster: &UploadPart,
        policy: &UploadPart,
    ) -> Result<UploadOutcome, BackendError>;

    async fn ask(&self, query: &AskQuery) -> Result<Option<String>, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| BackendError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, BackendError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    async fn read_json(&self, response: reqwest::Response) -> Result<Value, BackendError> {
        let bytes = self.read_body(response).await?;
        serde_json::from_slice(&bytes)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn list_employees(&self) -> Result<Vec<String>, BackendError> {
        let url = self.settings.endpoint("employees")?;
        engine_info!("GET {url}");
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body = self.read_json(response).await?;
        serde_json::from_value(body)
            .map_err(|err| BackendError::new(FailureKind::Decode, err.to_string()))
    }

    async fn upload(
        &self,
        roster: &UploadPart,
        policy: &UploadPart,
    ) -> Result<UploadOutcome, BackendError> {
        let url = self.settings.endpoint("upload")?;
        let form = Form::new()
            .part(roster.field.clone(), file_part(roster).await?)
            .part(policy.field.clone(), file_part(policy).await?);

        engine_info!(
            "POST {url} {}={} {}={}",
            roster.field,
            roster.file_name,
            policy.field,
            policy.file_name
        );
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // The status code is not consulted; only the body shape decides.
        let status = response.status();
        let body = self.read_json(response).await?;
        engine_info!("upload response status={status} body={body}");
        // null, "" and false count as a missing message.
        match body.get("message") {
            Some(Value::String(message)) if !message.is_empty() => Ok(UploadOutcome::Accepted {
                message: message.clone(),
            }),
            Some(Value::String(_)) | Some(Value::Null) | Some(Value::Bool(false)) | None => {
                Ok(UploadOutcome::Rejected {
                    body: body.to_string(),
                })
            }
            Some(other) => Ok(UploadOutcome::Accepted {
                message: other.to_string(),
            }),
        }
    }

    async fn ask(&self, query: &AskQuery) -> Result<Option<String>, BackendError> {
        let url = self.settings.endpoint("ask")?;
        engine_info!("POST {url} employee={:?}", query.employee_name);
        let response = self
            .client
            .post(url)
            .json(query)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            engine_warn!("ask returned status {status}; reading answer anyway");
        }
        let body = self.read_json(response).await?;
        let answer = match body.get("answer") {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            Some(Value::String(_)) | Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        Ok(answer)
    }
}

async fn file_part(file: &UploadPart) -> Result<Part, BackendError> {
    let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
        BackendError::new(
            FailureKind::FileRead,
            format!("{}: {err}", file.path.display()),
        )
    })?;
    let mime = mime_guess::from_path(&file.path).first_or_octet_stream();
    Part::bytes(bytes)
        .file_name(file.file_name.clone())
        .mime_str(mime.essence_str())
        .map_err(map_reqwest_error)
}

fn too_large(max_bytes: u64, actual: u64) -> BackendError {
    BackendError::new(
        FailureKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        return BackendError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return BackendError::new(FailureKind::Decode, err.to_string());
    }
    BackendError::new(FailureKind::Network, err.to_string())
}
