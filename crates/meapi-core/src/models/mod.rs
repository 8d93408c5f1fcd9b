//! meapi 도메인 모델.
//!
//! 서버 설정 스냅샷과 부분 변경 요청을 정의한다.
//! 서버 응답을 받는 모델은 `serde` Deserialize를 구현한다.

pub mod change_request;
pub mod settings;
