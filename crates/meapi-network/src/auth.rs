//! 액세스 토큰 관리.
//!
//! 전화번호 인증 흐름은 다루지 않는다. 이미 발급된 JWT 액세스 토큰을 보관하고
//! 요청마다 꺼내 준다.

use meapi_core::error::CoreError;
use std::sync::Arc;
use tokio::sync::RwLock;

/// 토큰 매니저 — 요청마다 토큰을 꺼내 준다
#[derive(Clone, Default)]
pub struct TokenManager {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenManager {
    /// 토큰 없이 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 토큰과 함께 생성
    pub fn with_token(token: &str) -> Result<Self, CoreError> {
        validate_token(token)?;
        Ok(Self {
            token: Arc::new(RwLock::new(Some(token.trim().to_string()))),
        })
    }

    /// 현재 액세스 토큰 반환
    pub async fn get_token(&self) -> Result<String, CoreError> {
        let state = self.token.read().await;
        state
            .clone()
            .ok_or_else(|| CoreError::Auth("인증되지 않음".to_string()))
    }

    /// 현재 인증 상태 확인
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

/// JWT 형태(`.`으로 구분된 세 부분)인지 확인
fn validate_token(token: &str) -> Result<(), CoreError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(CoreError::Auth(
            "액세스 토큰 형식 오류 ('.'으로 구분된 세 부분이어야 함)".to_string(),
        ));
    }
    Ok(())
}
