//! 설정 스키마 검증.
//!
//! 필드별 선언 타입 표(`SettingField::expected_type`)에 맞춰 변경 요청을 검사한다.
//! 네트워크 호출 전에 실행되며, 실패하면 요청은 서버에 도달하지 않는다.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::models::change_request::ChangeRequest;
use crate::models::settings::{SettingField, SettingValue};

/// 변경 요청의 모든 값이 선언 타입과 일치하는지 확인.
///
/// 불일치 필드는 전부 모아서 한 번에 보고한다.
pub fn validate(request: &ChangeRequest) -> Result<(), CoreError> {
    let mismatched: Vec<String> = request
        .iter()
        .filter(|(field, value)| value.value_type() != field.expected_type())
        .map(|(field, value)| {
            warn!(
                "설정 타입 불일치: {field} ({} 필요, {} 수신)",
                field.expected_type(),
                value.value_type()
            );
            field.wire_name().to_string()
        })
        .collect();

    if mismatched.is_empty() {
        debug!("스키마 검증 통과: {} 필드", request.len());
        Ok(())
    } else {
        Err(CoreError::TypeMismatch { fields: mismatched })
    }
}

/// 타입 정보가 없는 JSON 맵을 검증하고 변경 요청으로 변환.
///
/// - 모르는 필드명 → `UnknownSetting`
/// - `null` 값 → 변경하지 않는 필드로 간주하고 건너뜀
/// - 선언 타입과 다른 값 → `TypeMismatch` (불일치 필드 전부)
pub fn parse_raw(raw: &Map<String, Value>) -> Result<ChangeRequest, CoreError> {
    let mut request = ChangeRequest::new();
    let mut mismatched = Vec::new();

    for (name, value) in raw {
        let field: SettingField = name.parse()?;
        if value.is_null() {
            continue;
        }

        let expected = field.expected_type();
        match SettingValue::from_json(value) {
            Some(parsed) if expected.matches(value) => request.insert(field, parsed),
            _ => {
                warn!("설정 타입 불일치: {field} ({expected} 필요, 값: {value})");
                mismatched.push(field.wire_name().to_string());
            }
        }
    }

    if !mismatched.is_empty() {
        return Err(CoreError::TypeMismatch { fields: mismatched });
    }

    Ok(request)
}
