use std::{
    path::PathBuf,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use quotecard::{QuoteRecord, RenderRequest, Theme};
use serde::{Deserialize, Serialize};

use super::{AppState, client::ClientKey, error::ApiError};
use crate::{housekeeping::cleanup_old_files, quota::QuotaStore};

const CUSTOM_QUOTE_AUTHOR: &str = "Custom Quote";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub custom_quote: Option<String>,
    /// Premium-only; ignored.
    #[serde(default)]
    pub remove_watermark: bool,
}

impl GenerateBody {
    fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(bytes).map_err(|err| ApiError::bad_request(err.to_string()))
    }

    fn theme(&self) -> Theme {
        self.theme
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(Theme::parse)
            .unwrap_or_default()
    }

    fn custom_quote(&self) -> Option<&str> {
        self.custom_quote
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaBody {
    pub remaining: u32,
    pub limit: u32,
    pub is_premium: bool,
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn quota(State(state): State<AppState>, client: ClientKey) -> Json<QuotaBody> {
    Json(QuotaBody {
        remaining: state.quota.remaining(client.as_str()),
        limit: state.quota.limit(),
        is_premium: false,
    })
}

fn output_file_name() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("quote_{secs}_{}.png", uuid::Uuid::new_v4().simple())
}

/// A quota slot held while a card is generated. Dropped without [`Self::commit`], the slot is
/// given back, so failed or abandoned requests do not count.
struct QuotaReservation {
    quota: Arc<dyn QuotaStore>,
    key: String,
    committed: bool,
}

impl QuotaReservation {
    fn acquire(quota: &Arc<dyn QuotaStore>, key: &str) -> Option<Self> {
        quota.try_acquire(key).then(|| Self {
            quota: quota.clone(),
            key: key.to_string(),
            committed: false,
        })
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for QuotaReservation {
    fn drop(&mut self) {
        if !self.committed {
            self.quota.release(&self.key);
        }
    }
}

#[tracing::instrument(skip_all, fields(client = %client.as_str()))]
pub async fn generate(
    State(state): State<AppState>,
    client: ClientKey,
    body: Bytes,
) -> Result<Response, ApiError> {
    let reservation = QuotaReservation::acquire(&state.quota, client.as_str())
        .ok_or_else(ApiError::quota_exceeded)?;
    let body = GenerateBody::parse(&body)?;
    if body.remove_watermark {
        tracing::debug!("watermark removal requested without premium; ignoring");
    }
    let theme = body.theme();

    let record = match body.custom_quote() {
        Some(text) => QuoteRecord::new(text, CUSTOM_QUOTE_AUTHOR),
        None => state.quotes.quote(&theme).await,
    };

    let path: PathBuf = state.output.directory.join(output_file_name());
    let request = RenderRequest::new(record)
        .with_theme(theme)
        .with_output(path)
        .with_watermark(true);

    let compositor = state.compositor.clone();
    let output = state.output.clone();
    let png = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, String> {
        let path = compositor
            .render_to_path(&request)
            .map_err(|err| err.to_string())?;
        let bytes = std::fs::read(&path).map_err(|err| err.to_string())?;
        let report = cleanup_old_files(&output.directory, output.max_age, output.max_files);
        if report.removed > 0 {
            tracing::debug!(removed = report.removed, "cleaned generated images");
        }
        Ok(bytes)
    })
    .await
    .map_err(|err| ApiError::render_failed(err.to_string()))?
    .map_err(ApiError::render_failed)?;

    reservation.commit();
    tracing::info!(bytes = png.len(), "served quote card");

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
