use crate::core::validator::split_tech_stack;
use crate::domain::model::{DeveloperRecord, NewDeveloper, RecordId, Role};
use crate::domain::ports::{ConfigProvider, DirectoryStore};
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("devdir/", env!("CARGO_PKG_VERSION"));
const DEVELOPERS_PATH: &str = "developers";
const REJECTED_FALLBACK: &str = "Failed to add developer";

/// Store client speaking the `{ success, data }` JSON envelope over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDirectoryStore {
    client: Client,
    developers_url: String,
}

impl HttpDirectoryStore {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::with_timeout(config.base_url(), config.request_timeout())
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            developers_url: format!("{}/{}", base_url.trim_end_matches('/'), DEVELOPERS_PATH),
        })
    }

    pub fn developers_url(&self) -> &str {
        &self.developers_url
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTechStack {
    List(Vec<String>),
    Text(String),
}

// 伺服器可能回傳 `id` 或 MongoDB 的 `_id`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDeveloper {
    id: Option<WireId>,
    #[serde(rename = "_id")]
    object_id: Option<WireId>,
    name: String,
    role: String,
    tech_stack: WireTechStack,
    experience: f64,
}

impl WireDeveloper {
    fn into_record(self) -> std::result::Result<DeveloperRecord, String> {
        let id = match self.id.or(self.object_id) {
            Some(WireId::Text(text)) => RecordId::new(text),
            Some(WireId::Number(number)) => RecordId::new(number.to_string()),
            None => return Err("record has no id".to_string()),
        };
        let role = self.role.parse::<Role>().map_err(|e| e.to_string())?;
        let tech_stack = match self.tech_stack {
            WireTechStack::List(tokens) => tokens
                .into_iter()
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
                .collect(),
            WireTechStack::Text(raw) => split_tech_stack(&raw),
        };

        Ok(DeveloperRecord {
            id,
            name: self.name,
            role,
            tech_stack,
            experience: self.experience,
        })
    }
}

fn decode_developer(value: serde_json::Value) -> std::result::Result<DeveloperRecord, String> {
    serde_json::from_value::<WireDeveloper>(value)
        .map_err(|e| e.to_string())
        .and_then(WireDeveloper::into_record)
}

/// 逐筆解析，不合法的記錄跳過而不讓整批失敗
fn decode_listing(items: Vec<serde_json::Value>) -> Vec<DeveloperRecord> {
    let total = items.len();
    let records: Vec<DeveloperRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match decode_developer(item) {
            Ok(record) => Some(record),
            Err(reason) => {
                tracing::warn!("Skipping developer #{}: {}", index, reason);
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!("Decoded {} of {} developers", records.len(), total);
    }
    records
}

fn decode_created(data: serde_json::Value) -> Option<DeveloperRecord> {
    match decode_developer(data) {
        Ok(record) => Some(record),
        Err(reason) => {
            tracing::warn!("Created developer could not be decoded: {}", reason);
            None
        }
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unexpected status")
        .to_string()
}

#[async_trait]
impl DirectoryStore for HttpDirectoryStore {
    async fn list_all(&self) -> Result<Vec<DeveloperRecord>> {
        tracing::debug!("GET {}", self.developers_url);
        let response = self.client.get(&self.developers_url).send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Server {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| status_text(status)),
            });
        }

        let envelope: Envelope<Vec<serde_json::Value>> = serde_json::from_str(&body)?;
        match envelope {
            Envelope {
                success: true,
                data: Some(items),
                ..
            } => Ok(decode_listing(items)),
            Envelope { message, .. } => Err(DirectoryError::Server {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| "store reported failure".to_string()),
            }),
        }
    }

    async fn create(&self, developer: &NewDeveloper) -> Result<Option<DeveloperRecord>> {
        tracing::debug!("POST {} ({})", self.developers_url, developer.name);
        let response = self
            .client
            .post(&self.developers_url)
            .json(developer)
            .send()
            .await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(DirectoryError::Rejected {
                message: error_message(&body)
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            });
        }

        let envelope: Envelope<serde_json::Value> = serde_json::from_str(&body)?;
        match envelope {
            // success 為 true 即代表已寫入，回傳內容無法解析也不能視為失敗
            Envelope {
                success: true,
                data,
                ..
            } => Ok(data.and_then(decode_created)),
            Envelope { message, .. } => Err(DirectoryError::Rejected {
                message: message
                    .unwrap_or_else(|| REJECTED_FALLBACK.to_string()),
            }),
        }
    }
}
