//! meapi 핵심 에러 타입.
//!
//! 모든 크레이트가 이 에러 타입을 그대로 전파한다.
//! 사전 검증 에러(`EmptyChangeRequest`, `TypeMismatch`, `UnknownSetting`)는
//! 네트워크 호출 전에만 발생한다.

use std::fmt;
use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 변경 요청에 설정이 하나도 없음
    #[error("최소 하나의 설정을 변경해야 합니다")]
    EmptyChangeRequest,

    /// 선언된 타입과 다른 값이 들어온 필드
    #[error("설정 타입 불일치: {}", fields.join(", "))]
    TypeMismatch {
        /// 검증 실패한 필드명 목록
        fields: Vec<String>,
    },

    /// 알 수 없는 설정 이름
    #[error("알 수 없는 설정: {0}")]
    UnknownSetting(String),

    /// 인증 실패 (토큰 누락, 만료)
    #[error("인증 에러: {0}")]
    Auth(String),

    /// 접근 거부 (403)
    #[error("접근 거부: {0}")]
    Forbidden(String),

    /// 네트워크 에러 (연결 실패, 타임아웃)
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// Rate Limit 초과 (429)
    #[error("요청 한도 초과, {retry_after_secs}초 후 재시도")]
    RateLimit {
        /// 재시도 대기 시간 (초)
        retry_after_secs: u64,
    },

    /// 서비스 일시 불가 (503)
    #[error("서비스 일시 불가: {0}")]
    ServiceUnavailable(String),

    /// 서버가 에러 코드와 함께 요청을 거부함
    #[error("API 에러 ({http_status}, {code}): {reason}")]
    Api {
        /// HTTP 상태 코드 (400 이상)
        http_status: u16,
        /// 서버 에러 코드
        code: ApiErrorCode,
        /// 사람이 읽을 수 있는 사유
        reason: String,
    },

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// 네트워크 호출 전에 발생하는 호출자 입력 에러인지 여부
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            CoreError::EmptyChangeRequest
                | CoreError::TypeMismatch { .. }
                | CoreError::UnknownSetting(_)
        )
    }
}

/// Me 서버 에러 코드.
///
/// 서버는 `api_user_blocked` 형태의 문자열을 내려준다.
/// `api_` 접두사를 떼고 매핑하며, 모르는 코드는 `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    IncorrectPwdToken,
    UnfinishedRegistration,
    PhoneNumberDoesntExists,
    IncorrectActivationCode,
    BlockedMaxVerifyReached,
    MaxValidateReached,
    ActivationCodeExpired,
    SearchPassedLimit,
    ProfileViewPassedLimit,
    UserCommentsDisabled,
    CommentPostingIsNotAllowed,
    CommentAlreadyApproved,
    CommentAlreadyIgnored,
    UserBlocked,
    Unknown,
}

impl ApiErrorCode {
    /// 서버 메시지 문자열에서 에러 코드 추출
    pub fn from_msg(msg: &str) -> Self {
        let code = msg.trim();
        let code = code.strip_prefix("api_").unwrap_or(code);
        match code.to_ascii_lowercase().as_str() {
            "incorrect_pwd_token" => Self::IncorrectPwdToken,
            "unfinished_registration" => Self::UnfinishedRegistration,
            "phone_number_doesnt_exists" => Self::PhoneNumberDoesntExists,
            "incorrect_activation_code" => Self::IncorrectActivationCode,
            "blocked_max_verify_reached" => Self::BlockedMaxVerifyReached,
            "max_validate_reached" => Self::MaxValidateReached,
            "activation_code_expired" => Self::ActivationCodeExpired,
            "search_passed_limit" => Self::SearchPassedLimit,
            "profile_view_passed_limit" => Self::ProfileViewPassedLimit,
            "user_comments_disabled" => Self::UserCommentsDisabled,
            "comment_posting_is_not_allowed" => Self::CommentPostingIsNotAllowed,
            "comment_already_approved" => Self::CommentAlreadyApproved,
            "comment_already_ignored" => Self::CommentAlreadyIgnored,
            "user_blocked" => Self::UserBlocked,
            _ => Self::Unknown,
        }
    }

    /// 서버가 사유를 주지 않았을 때 사용하는 기본 사유
    pub fn default_reason(&self) -> &'static str {
        match self {
            Self::IncorrectPwdToken => "pwd_token이 유효하지 않습니다 (다른 기기에서 계정을 활성화했을 수 있음)",
            Self::UnfinishedRegistration => "가입 절차가 완료되지 않은 계정입니다",
            Self::PhoneNumberDoesntExists => "인증 코드를 아직 요청하지 않은 번호입니다",
            Self::IncorrectActivationCode => "인증 코드가 올바르지 않습니다",
            Self::BlockedMaxVerifyReached => "SMS/전화 인증 시도 한도에 도달했습니다",
            Self::MaxValidateReached => "번호 검증 시도 한도에 도달했습니다",
            Self::ActivationCodeExpired => "인증 코드가 만료되었습니다",
            Self::SearchPassedLimit => "일일 번호 검색 한도를 초과했습니다",
            Self::ProfileViewPassedLimit => "일일 프로필 조회 한도를 초과했습니다",
            Self::UserCommentsDisabled => "상대방이 댓글을 비활성화했습니다",
            Self::CommentPostingIsNotAllowed => "상대방이 댓글 작성을 차단했습니다",
            Self::CommentAlreadyApproved => "이미 승인된 댓글입니다",
            Self::CommentAlreadyIgnored => "이미 무시된 댓글입니다",
            Self::UserBlocked => "차단된 계정입니다",
            Self::Unknown => "알 수 없는 서버 에러",
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
