//! HTTP REST 설정 클라이언트.
//!
//! `SettingsApi` 포트 구현. 인증 헤더와 User-Agent를 주입하고
//! 상태 코드/서버 에러 코드를 `CoreError`로 매핑한다.
//! 재시도는 하지 않는다: 변경 요청은 호출당 정확히 한 번 전송된다.

use async_trait::async_trait;
use meapi_core::error::{ApiErrorCode, CoreError};
use meapi_core::ports::settings_api::{RawSettings, SettingsApi};
use reqwest::header::{RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::TokenManager;
use crate::user_agent::random_user_agent;

/// 설정 조회/변경 엔드포인트
const SETTINGS_PATH: &str = "/main/settings/";

/// Retry-After 헤더가 없을 때 사용하는 대기 시간 (초)
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// REST 설정 클라이언트 — `SettingsApi` 포트 구현
pub struct HttpSettingsClient {
    client: reqwest::Client,
    base_url: String,
    token_manager: Arc<TokenManager>,
    user_agent: String,
}

impl HttpSettingsClient {
    /// 새 HTTP 클라이언트 생성 (User-Agent는 목록에서 무작위 선택)
    pub fn new(
        base_url: &str,
        token_manager: Arc<TokenManager>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_manager,
            user_agent: random_user_agent().to_string(),
        })
    }

    /// User-Agent 고정
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// 현재 사용 중인 User-Agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Authorization/User-Agent 헤더가 포함된 요청 빌더 반환
    async fn authorized_request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, CoreError> {
        let token = self.token_manager.get_token().await?;
        let url = format!("{}{}", self.base_url, path);
        Ok(self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .header(USER_AGENT, &self.user_agent))
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();

        if status.is_success() {
            return Ok(resp);
        }

        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });

        Err(map_error(status, retry_after, &text))
    }

    /// 응답 본문을 평평한 JSON 객체로 파싱
    async fn read_settings(resp: reqwest::Response) -> Result<RawSettings, CoreError> {
        let value: Value = resp
            .json()
            .await
            .map_err(|e| CoreError::Internal(format!("설정 응답 파싱 실패: {e}")))?;

        match value {
            Value::Object(map) => Ok(map),
            other => Err(CoreError::Internal(format!(
                "설정 응답이 객체가 아님: {other}"
            ))),
        }
    }
}

/// 에러 응답을 `CoreError`로 변환.
///
/// 본문에 알려진 서버 에러 코드가 있으면 상태 코드보다 우선한다.
fn map_error(status: StatusCode, retry_after: Option<u64>, text: &str) -> CoreError {
    let body: Option<Value> = serde_json::from_str(text).ok();
    let msg = body.as_ref().and_then(|b| {
        ["detail", "code", "msg", "message"]
            .iter()
            .find_map(|key| b.get(*key).and_then(Value::as_str))
            .map(str::to_string)
    });
    let reason = body
        .as_ref()
        .and_then(|b| b.get("reason"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let code = msg
        .as_deref()
        .map(ApiErrorCode::from_msg)
        .unwrap_or(ApiErrorCode::Unknown);

    if code != ApiErrorCode::Unknown {
        return CoreError::Api {
            http_status: status.as_u16(),
            code,
            reason: reason.unwrap_or_else(|| code.default_reason().to_string()),
        };
    }

    let detail = msg.unwrap_or_else(|| text.to_string());
    match status {
        StatusCode::UNAUTHORIZED => CoreError::Auth(format!("인증 실패: {detail}")),
        StatusCode::FORBIDDEN => CoreError::Forbidden(detail),
        StatusCode::TOO_MANY_REQUESTS => CoreError::RateLimit {
            retry_after_secs: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        StatusCode::SERVICE_UNAVAILABLE => CoreError::ServiceUnavailable(detail),
        _ => CoreError::Api {
            http_status: status.as_u16(),
            code: ApiErrorCode::Unknown,
            reason: reason.unwrap_or(detail),
        },
    }
}

#[async_trait]
impl SettingsApi for HttpSettingsClient {
    async fn get_settings_raw(&self) -> Result<RawSettings, CoreError> {
        debug!("설정 조회 요청");

        let req = self
            .authorized_request(reqwest::Method::GET, SETTINGS_PATH)
            .await?;

        let resp = req
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("설정 조회 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let settings = Self::read_settings(resp).await?;

        debug!("설정 조회 성공: {} 필드", settings.len());
        Ok(settings)
    }

    async fn change_settings_raw(&self, changes: &RawSettings) -> Result<RawSettings, CoreError> {
        debug!("설정 변경 요청: {} 필드", changes.len());

        let req = self
            .authorized_request(reqwest::Method::PATCH, SETTINGS_PATH)
            .await?;

        let resp = req
            .json(changes)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("설정 변경 요청 실패: {e}")))?;

        let resp = self.check_response(resp).await?;
        let settings = Self::read_settings(resp).await?;

        debug!("설정 변경 응답 수신: {} 필드", settings.len());
        Ok(settings)
    }
}
