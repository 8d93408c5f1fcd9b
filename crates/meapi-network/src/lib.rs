//! # meapi-network
//!
//! Me 설정 API 네트워크 어댑터.
//! `SettingsApi` 포트를 reqwest로 구현하며, 액세스 토큰 보관과
//! 브라우저 User-Agent 선택을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use meapi_network::auth::TokenManager;
//! use meapi_network::http_client::HttpSettingsClient;
//!
//! let tm = Arc::new(TokenManager::with_token(&token)?);
//! let client = HttpSettingsClient::new(&base_url, tm, Duration::from_secs(30))?;
//! ```

pub mod auth;
pub mod http_client;
pub mod user_agent;
