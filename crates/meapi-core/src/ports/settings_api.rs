//! 설정 API 포트.
//!
//! 구현: `meapi-network` crate (reqwest)
//!
//! 인증, 헤더, 세션 관리는 구현체 책임이다. 포트는 평평한 JSON 맵만 주고받는다.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::CoreError;

/// 서버가 주고받는 평평한 필드명 → 값 맵
pub type RawSettings = Map<String, Value>;

/// Me 설정 엔드포인트 클라이언트
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// 현재 설정 전체 조회
    async fn get_settings_raw(&self) -> Result<RawSettings, CoreError>;

    /// 부분 설정 변경
    ///
    /// `changes`에는 바꾸려는 필드만 들어 있다.
    /// 서버는 변경 후 전체 설정을 돌려준다.
    async fn change_settings_raw(&self, changes: &RawSettings) -> Result<RawSettings, CoreError>;
}
