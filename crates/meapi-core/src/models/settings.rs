//! 계정 설정 모델.
//!
//! 서버가 확정한 설정 스냅샷(`Settings`), 변경 가능한 필드 목록(`SettingField`),
//! 필드 값(`SettingValue`), 호출자가 채우는 부분 변경(`SettingsPatch`)을 정의한다.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::models::change_request::ChangeRequest;

/// 필드에 선언된 값 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    /// 불리언 플래그
    Bool,
    /// 문자열 (현재는 `language`만 해당)
    Str,
}

impl SettingType {
    /// 사람이 읽을 수 있는 타입 이름
    pub fn name(&self) -> &'static str {
        match self {
            SettingType::Bool => "bool",
            SettingType::Str => "str",
        }
    }

    /// JSON 값의 런타임 타입이 선언 타입과 일치하는지 확인
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            SettingType::Bool => value.is_boolean(),
            SettingType::Str => value.is_string(),
        }
    }
}

impl fmt::Display for SettingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 변경 가능한 설정 필드
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    MutualContactsAvailable,
    WhoWatchedEnabled,
    WhoDeletedEnabled,
    CommentsEnabled,
    LocationEnabled,
    Language,
    NotificationsEnabled,
    WhoDeletedNotificationEnabled,
    WhoWatchedNotificationEnabled,
    DistanceNotificationEnabled,
    SystemNotificationEnabled,
    BirthdayNotificationEnabled,
    CommentsNotificationEnabled,
    NamesNotificationEnabled,
}

impl SettingField {
    /// 전체 필드 (서버 응답 순서와 무관)
    pub const ALL: [SettingField; 14] = [
        SettingField::MutualContactsAvailable,
        SettingField::WhoWatchedEnabled,
        SettingField::WhoDeletedEnabled,
        SettingField::CommentsEnabled,
        SettingField::LocationEnabled,
        SettingField::Language,
        SettingField::NotificationsEnabled,
        SettingField::WhoDeletedNotificationEnabled,
        SettingField::WhoWatchedNotificationEnabled,
        SettingField::DistanceNotificationEnabled,
        SettingField::SystemNotificationEnabled,
        SettingField::BirthdayNotificationEnabled,
        SettingField::CommentsNotificationEnabled,
        SettingField::NamesNotificationEnabled,
    ];

    /// 서버 와이어 포맷의 필드명
    pub fn wire_name(&self) -> &'static str {
        match self {
            SettingField::MutualContactsAvailable => "mutual_contacts_available",
            SettingField::WhoWatchedEnabled => "who_watched_enabled",
            SettingField::WhoDeletedEnabled => "who_deleted_enabled",
            SettingField::CommentsEnabled => "comments_enabled",
            SettingField::LocationEnabled => "location_enabled",
            SettingField::Language => "language",
            SettingField::NotificationsEnabled => "notifications_enabled",
            SettingField::WhoDeletedNotificationEnabled => "who_deleted_notification_enabled",
            SettingField::WhoWatchedNotificationEnabled => "who_watched_notification_enabled",
            SettingField::DistanceNotificationEnabled => "distance_notification_enabled",
            SettingField::SystemNotificationEnabled => "system_notification_enabled",
            SettingField::BirthdayNotificationEnabled => "birthday_notification_enabled",
            SettingField::CommentsNotificationEnabled => "comments_notification_enabled",
            SettingField::NamesNotificationEnabled => "names_notification_enabled",
        }
    }

    /// 필드별 선언 타입 (`language`만 문자열)
    pub fn expected_type(&self) -> SettingType {
        match self {
            SettingField::Language => SettingType::Str,
            _ => SettingType::Bool,
        }
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for SettingField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingField::ALL
            .iter()
            .copied()
            .find(|field| field.wire_name() == s)
            .ok_or_else(|| CoreError::UnknownSetting(s.to_string()))
    }
}

/// 설정 필드 값
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Str(String),
}

impl SettingValue {
    /// 값의 런타임 타입
    pub fn value_type(&self) -> SettingType {
        match self {
            SettingValue::Bool(_) => SettingType::Bool,
            SettingValue::Str(_) => SettingType::Str,
        }
    }

    /// JSON 값으로 변환
    pub fn to_json(&self) -> Value {
        match self {
            SettingValue::Bool(b) => Value::Bool(*b),
            SettingValue::Str(s) => Value::String(s.clone()),
        }
    }

    /// JSON 값에서 변환. 불리언/문자열이 아니면 `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(SettingValue::Bool(*b)),
            Value::String(s) => Some(SettingValue::Str(s.clone())),
            _ => None,
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Str(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Str(value)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{b}"),
            SettingValue::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// 서버가 확정한 설정 스냅샷.
///
/// `get_settings`/`change_settings` 호출마다 서버 응답으로 새로 만든다.
/// 로컬에서 수정하거나 이전 스냅샷과 병합하지 않는다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mutual_contacts_available: Option<bool>,
    pub who_watched_enabled: Option<bool>,
    pub who_deleted_enabled: Option<bool>,
    pub comments_enabled: Option<bool>,
    pub location_enabled: Option<bool>,
    /// 알림 언어 (두 글자 로케일 코드)
    pub language: Option<String>,
    /// 알림 마스터 스위치
    pub notifications_enabled: Option<bool>,
    pub who_deleted_notification_enabled: Option<bool>,
    pub who_watched_notification_enabled: Option<bool>,
    pub distance_notification_enabled: Option<bool>,
    pub system_notification_enabled: Option<bool>,
    pub birthday_notification_enabled: Option<bool>,
    pub comments_notification_enabled: Option<bool>,
    pub names_notification_enabled: Option<bool>,
    /// 계정 일시정지 여부 (읽기 전용)
    pub contact_suspended: Option<bool>,
    /// 마지막 연락처 백업 시각 (읽기 전용)
    #[serde(deserialize_with = "lenient_datetime")]
    pub last_backup_at: Option<DateTime<Utc>>,
    /// 마지막 연락처 복원 시각 (읽기 전용)
    #[serde(deserialize_with = "lenient_datetime")]
    pub last_restore_at: Option<DateTime<Utc>>,
}

impl Settings {
    /// 서버 응답 맵에서 스냅샷 생성.
    ///
    /// 필드 단위로 읽는다. 모르는 키는 무시하고, 선언과 다른 타입의 값은
    /// `None`으로 둔다. 응답 하나가 어긋났다고 스냅샷 전체를 버리지 않는다.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let flag = |field: SettingField| raw.get(field.wire_name()).and_then(Value::as_bool);
        let datetime = |name: &str| raw.get(name).and_then(Value::as_str).and_then(parse_datetime);

        Self {
            mutual_contacts_available: flag(SettingField::MutualContactsAvailable),
            who_watched_enabled: flag(SettingField::WhoWatchedEnabled),
            who_deleted_enabled: flag(SettingField::WhoDeletedEnabled),
            comments_enabled: flag(SettingField::CommentsEnabled),
            location_enabled: flag(SettingField::LocationEnabled),
            language: raw
                .get(SettingField::Language.wire_name())
                .and_then(Value::as_str)
                .map(str::to_string),
            notifications_enabled: flag(SettingField::NotificationsEnabled),
            who_deleted_notification_enabled: flag(SettingField::WhoDeletedNotificationEnabled),
            who_watched_notification_enabled: flag(SettingField::WhoWatchedNotificationEnabled),
            distance_notification_enabled: flag(SettingField::DistanceNotificationEnabled),
            system_notification_enabled: flag(SettingField::SystemNotificationEnabled),
            birthday_notification_enabled: flag(SettingField::BirthdayNotificationEnabled),
            comments_notification_enabled: flag(SettingField::CommentsNotificationEnabled),
            names_notification_enabled: flag(SettingField::NamesNotificationEnabled),
            contact_suspended: raw.get("contact_suspended").and_then(Value::as_bool),
            last_backup_at: datetime("last_backup_at"),
            last_restore_at: datetime("last_restore_at"),
        }
    }

    /// 필드 하나의 현재 값
    pub fn value_of(&self, field: SettingField) -> Option<SettingValue> {
        let flag = match field {
            SettingField::Language => return self.language.clone().map(SettingValue::Str),
            SettingField::MutualContactsAvailable => self.mutual_contacts_available,
            SettingField::WhoWatchedEnabled => self.who_watched_enabled,
            SettingField::WhoDeletedEnabled => self.who_deleted_enabled,
            SettingField::CommentsEnabled => self.comments_enabled,
            SettingField::LocationEnabled => self.location_enabled,
            SettingField::NotificationsEnabled => self.notifications_enabled,
            SettingField::WhoDeletedNotificationEnabled => self.who_deleted_notification_enabled,
            SettingField::WhoWatchedNotificationEnabled => self.who_watched_notification_enabled,
            SettingField::DistanceNotificationEnabled => self.distance_notification_enabled,
            SettingField::SystemNotificationEnabled => self.system_notification_enabled,
            SettingField::BirthdayNotificationEnabled => self.birthday_notification_enabled,
            SettingField::CommentsNotificationEnabled => self.comments_notification_enabled,
            SettingField::NamesNotificationEnabled => self.names_notification_enabled,
        };
        flag.map(SettingValue::Bool)
    }
}

/// RFC 3339 또는 타임존 없는 ISO 문자열을 받는다. 해석 불가하면 `None`.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Value> = Option::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(parse_datetime))
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// 부분 설정 변경 빌더.
///
/// 호출자가 바꾸려는 필드만 `Some`으로 채운다. 타입이 구조체에 고정되어 있어
/// 이 경로로는 타입 불일치가 생길 수 없다.
///
/// ```
/// use meapi_core::models::settings::SettingsPatch;
///
/// let patch = SettingsPatch::new()
///     .language("en")
///     .mutual_contacts_available(false);
/// assert_eq!(patch.into_change_request().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutual_contacts_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_watched_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_deleted_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_deleted_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub who_watched_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_notification_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_notification_enabled: Option<bool>,
}

impl SettingsPatch {
    /// 빈 패치 생성
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mutual_contacts_available(mut self, value: bool) -> Self {
        self.mutual_contacts_available = Some(value);
        self
    }

    pub fn who_watched_enabled(mut self, value: bool) -> Self {
        self.who_watched_enabled = Some(value);
        self
    }

    pub fn who_deleted_enabled(mut self, value: bool) -> Self {
        self.who_deleted_enabled = Some(value);
        self
    }

    pub fn comments_enabled(mut self, value: bool) -> Self {
        self.comments_enabled = Some(value);
        self
    }

    pub fn location_enabled(mut self, value: bool) -> Self {
        self.location_enabled = Some(value);
        self
    }

    pub fn language(mut self, value: impl Into<String>) -> Self {
        self.language = Some(value.into());
        self
    }

    pub fn notifications_enabled(mut self, value: bool) -> Self {
        self.notifications_enabled = Some(value);
        self
    }

    pub fn who_deleted_notification_enabled(mut self, value: bool) -> Self {
        self.who_deleted_notification_enabled = Some(value);
        self
    }

    pub fn who_watched_notification_enabled(mut self, value: bool) -> Self {
        self.who_watched_notification_enabled = Some(value);
        self
    }

    pub fn distance_notification_enabled(mut self, value: bool) -> Self {
        self.distance_notification_enabled = Some(value);
        self
    }

    pub fn system_notification_enabled(mut self, value: bool) -> Self {
        self.system_notification_enabled = Some(value);
        self
    }

    pub fn birthday_notification_enabled(mut self, value: bool) -> Self {
        self.birthday_notification_enabled = Some(value);
        self
    }

    pub fn comments_notification_enabled(mut self, value: bool) -> Self {
        self.comments_notification_enabled = Some(value);
        self
    }

    pub fn names_notification_enabled(mut self, value: bool) -> Self {
        self.names_notification_enabled = Some(value);
        self
    }

    /// 설정된 필드가 하나도 없는지
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// `Some` 필드만 모아 변경 요청으로 변환
    pub fn into_change_request(self) -> ChangeRequest {
        let flags = [
            (SettingField::MutualContactsAvailable, self.mutual_contacts_available),
            (SettingField::WhoWatchedEnabled, self.who_watched_enabled),
            (SettingField::WhoDeletedEnabled, self.who_deleted_enabled),
            (SettingField::CommentsEnabled, self.comments_enabled),
            (SettingField::LocationEnabled, self.location_enabled),
            (SettingField::NotificationsEnabled, self.notifications_enabled),
            (
                SettingField::WhoDeletedNotificationEnabled,
                self.who_deleted_notification_enabled,
            ),
            (
                SettingField::WhoWatchedNotificationEnabled,
                self.who_watched_notification_enabled,
            ),
            (
                SettingField::DistanceNotificationEnabled,
                self.distance_notification_enabled,
            ),
            (
                SettingField::SystemNotificationEnabled,
                self.system_notification_enabled,
            ),
            (
                SettingField::BirthdayNotificationEnabled,
                self.birthday_notification_enabled,
            ),
            (
                SettingField::CommentsNotificationEnabled,
                self.comments_notification_enabled,
            ),
            (
                SettingField::NamesNotificationEnabled,
                self.names_notification_enabled,
            ),
        ];

        let mut request = ChangeRequest::new();
        for (field, value) in flags {
            if let Some(value) = value {
                request.insert(field, SettingValue::Bool(value));
            }
        }
        if let Some(language) = self.language {
            request.insert(SettingField::Language, SettingValue::Str(language));
        }
        request
    }
}
