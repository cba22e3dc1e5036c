// src/error.rs
//! HTTP-facing errors. Everything except an unknown engine is a 500; nothing is retried.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics::counter;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

pub const MSG_NO_DATA: &str = "데이터가 없습니다.";
pub const MSG_QUERY_FAILED: &str = "데이터 조회 실패";
pub const MSG_RSS_EMPTY: &str = "구글 뉴스 RSS 데이터 없음";
pub const MSG_COLLECT_FAILED: &str = "트렌드 데이터 수집 실패";
pub const MSG_DUMMY_FAILED: &str = "더미 데이터 생성 실패";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Required credential or setting is missing.
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{}", MSG_RSS_EMPTY)]
    FeedEmpty,

    #[error("지원하지 않는 엔진입니다: {0}")]
    UnknownEngine(String),

    /// Read path failed.
    #[error("{}", MSG_QUERY_FAILED)]
    Query(#[source] StoreError),

    /// Write path failed in a plain `{error}` endpoint.
    #[error("{0}")]
    Store(#[from] StoreError),

    /// Write path failed in a `{success, message, error}` endpoint.
    #[error("{message}: {source}")]
    Operation {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownEngine(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        if matches!(
            self,
            ApiError::Query(_) | ApiError::Store(_) | ApiError::Operation { .. }
        ) {
            counter!("store_errors_total").increment(1);
        }
        let body = match &self {
            ApiError::Operation { message, source } => json!({
                "success": false,
                "message": message,
                "error": source.to_string(),
            }),
            other => json!({ "error": other.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
