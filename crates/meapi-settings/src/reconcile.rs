//! 요청 값과 서버 응답 대조.

use meapi_core::models::change_request::ChangeRequest;
use meapi_core::models::settings::{SettingField, SettingValue};
use meapi_core::ports::settings_api::RawSettings;

/// 서버가 요청대로 반영하지 않은 필드 목록.
///
/// 요청에 있는 필드만 본다. 응답에서 키가 빠졌거나 `null`이거나
/// 타입이 다르면 반영되지 않은 것으로 간주한다.
pub fn unapplied_fields(request: &ChangeRequest, response: &RawSettings) -> Vec<SettingField> {
    request
        .iter()
        .filter(|(field, requested)| {
            let returned = response
                .get(field.wire_name())
                .and_then(SettingValue::from_json);
            returned.as_ref() != Some(*requested)
        })
        .map(|(field, _)| field)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn response(value: Value) -> RawSettings {
        match value {
            Value::Object(map) => map,
            other => panic!("객체가 아님: {other}"),
        }
    }

    #[test]
    fn echo_is_fully_applied() {
        let request = ChangeRequest::new()
            .with(SettingField::WhoWatchedEnabled, true)
            .with(SettingField::WhoDeletedEnabled, false);
        let resp = response(json!({
            "who_watched_enabled": true,
            "who_deleted_enabled": false,
            "language": "iw"
        }));
        assert!(unapplied_fields(&request, &resp).is_empty());
    }

    #[test]
    fn single_mismatch_reported() {
        let request = ChangeRequest::new()
            .with(SettingField::WhoWatchedEnabled, true)
            .with(SettingField::WhoDeletedEnabled, false);
        let resp = response(json!({
            "who_watched_enabled": true,
            "who_deleted_enabled": true
        }));
        assert_eq!(
            unapplied_fields(&request, &resp),
            vec![SettingField::WhoDeletedEnabled]
        );
    }

    #[test]
    fn missing_key_is_mismatch() {
        let request = ChangeRequest::new().with(SettingField::Language, "en");
        let resp = response(json!({ "comments_enabled": true }));
        assert_eq!(
            unapplied_fields(&request, &resp),
            vec![SettingField::Language]
        );
    }

    #[test]
    fn null_or_wrong_type_is_mismatch() {
        let request = ChangeRequest::new()
            .with(SettingField::Language, "en")
            .with(SettingField::CommentsEnabled, true);
        let resp = response(json!({ "language": null, "comments_enabled": "true" }));
        assert_eq!(unapplied_fields(&request, &resp).len(), 2);
    }

    #[test]
    fn unrequested_differences_ignored() {
        let request = ChangeRequest::new().with(SettingField::Language, "en");
        let resp = response(json!({
            "language": "en",
            "comments_enabled": false,
            "location_enabled": true
        }));
        assert!(unapplied_fields(&request, &resp).is_empty());
    }
}
