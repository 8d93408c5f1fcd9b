//! # meapi-settings
//!
//! 설정 변경 파이프라인.
//! 호출자가 채운 부분 변경을 사전 검증한 뒤 서버에 한 번 전송하고,
//! 서버가 돌려준 전체 설정을 요청 값과 대조해 반영 여부를 알려준다.
//!
//! ```rust,ignore
//! let service = SettingsService::new(api);
//! let (applied, settings) = service
//!     .change_settings(SettingsPatch::new().language("en"))
//!     .await?;
//! ```

pub mod reconcile;
pub mod service;

pub use service::SettingsService;
