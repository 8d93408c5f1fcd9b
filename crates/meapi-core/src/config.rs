//! 애플리케이션 설정 구조체.
//!
//! 서버 URL, 요청 타임아웃, User-Agent, 액세스 토큰 등 런타임 설정을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드한다.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 서버 연결 설정
    pub server: ServerConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

/// 서버 연결 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// API 서버 기본 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 요청 타임아웃 (밀리초)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    /// 고정 User-Agent. 없으면 매 클라이언트 생성 시 무작위로 고른다.
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// 인증 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 이미 발급받은 액세스 토큰
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                base_url: default_base_url(),
                request_timeout_ms: default_request_timeout_ms(),
                user_agent: None,
            },
            auth: AuthConfig::default(),
        }
    }

    /// 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.server.request_timeout_ms)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = self.server.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(CoreError::Config(format!(
                "base_url은 http(s)로 시작해야 합니다: {url}"
            )));
        }
        if self.server.request_timeout_ms == 0 {
            return Err(CoreError::Config(
                "request_timeout_ms는 0보다 커야 합니다".to_string(),
            ));
        }
        if let Some(ua) = &self.server.user_agent {
            if ua.trim().is_empty() {
                return Err(CoreError::Config("user_agent가 비어 있습니다".to_string()));
            }
        }
        Ok(())
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_base_url() -> String {
    "https://app.mobile.me.app".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.auth.access_token.is_none());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"server":{"base_url":"http://localhost:9000"}}"#).unwrap();
        assert_eq!(config.server.base_url, "http://localhost:9000");
        assert_eq!(config.server.request_timeout_ms, 30_000);
        assert!(config.server.user_agent.is_none());
    }

    #[test]
    fn invalid_url_rejected() {
        let mut config = AppConfig::default_config();
        config.server.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn zero_timeout_rejected() {
        let mut config = AppConfig::default_config();
        config.server.request_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn token_not_serialized_when_absent() {
        let json = serde_json::to_string(&AppConfig::default_config()).unwrap();
        assert!(!json.contains("access_token"));
    }
}
