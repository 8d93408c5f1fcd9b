//! 변경 요청 (Change Request).
//!
//! `change_settings` 호출 하나 안에서만 존재하는 필드 → 값 맵.
//! 저장되지 않으며, 호출이 끝나면 버려진다.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::models::settings::{SettingField, SettingValue};

/// 호출자가 바꾸려는 필드 부분집합
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequest {
    changes: BTreeMap<SettingField, SettingValue>,
}

impl ChangeRequest {
    /// 빈 요청 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 값 추가 (같은 필드는 덮어쓴다)
    pub fn insert(&mut self, field: SettingField, value: impl Into<SettingValue>) {
        self.changes.insert(field, value.into());
    }

    /// 체이닝용 추가
    pub fn with(mut self, field: SettingField, value: impl Into<SettingValue>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: SettingField) -> Option<&SettingValue> {
        self.changes.get(&field)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingField, &SettingValue)> {
        self.changes.iter().map(|(field, value)| (*field, value))
    }

    /// 요청된 필드 목록
    pub fn fields(&self) -> impl Iterator<Item = SettingField> + '_ {
        self.changes.keys().copied()
    }

    /// 서버로 보낼 PATCH 본문 (변경된 필드만)
    pub fn to_body(&self) -> Map<String, Value> {
        self.changes
            .iter()
            .map(|(field, value)| (field.wire_name().to_string(), value.to_json()))
            .collect()
    }
}

impl FromIterator<(SettingField, SettingValue)> for ChangeRequest {
    fn from_iter<I: IntoIterator<Item = (SettingField, SettingValue)>>(iter: I) -> Self {
        Self {
            changes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn body_contains_only_requested_fields() {
        let request = ChangeRequest::new()
            .with(SettingField::Language, "en")
            .with(SettingField::WhoWatchedEnabled, true);

        let body = request.to_body();
        assert_eq!(body.len(), 2);
        assert_eq!(body.get("language"), Some(&json!("en")));
        assert_eq!(body.get("who_watched_enabled"), Some(&json!(true)));
    }

    #[test]
    fn later_insert_overwrites() {
        let mut request = ChangeRequest::new();
        request.insert(SettingField::CommentsEnabled, true);
        request.insert(SettingField::CommentsEnabled, false);
        assert_eq!(request.len(), 1);
        assert_eq!(
            request.get(SettingField::CommentsEnabled),
            Some(&SettingValue::Bool(false))
        );
    }
}
