//! 설정 조회/변경 서비스.
//!
//! 변경 흐름: 수집 → 빈 요청 차단 → 스키마 검증 → PATCH 1회 → 응답 대조.
//! 검증 단계까지는 네트워크를 건드리지 않는다.

use meapi_core::error::CoreError;
use meapi_core::models::change_request::ChangeRequest;
use meapi_core::models::settings::{SettingField, SettingValue, Settings, SettingsPatch};
use meapi_core::ports::settings_api::{RawSettings, SettingsApi};
use meapi_core::schema;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::reconcile::unapplied_fields;

/// 설정 서비스 — `SettingsApi` 포트 위의 조회/변경/대조
pub struct SettingsService {
    api: Arc<dyn SettingsApi>,
}

impl SettingsService {
    /// 새 서비스 생성
    pub fn new(api: Arc<dyn SettingsApi>) -> Self {
        Self { api }
    }

    /// 현재 설정 조회. 검증이나 변경은 하지 않는다.
    pub async fn get_settings(&self) -> Result<Settings, CoreError> {
        let raw = self.api.get_settings_raw().await?;
        Ok(Settings::from_raw(&raw))
    }

    /// 부분 설정 변경.
    ///
    /// 반환값의 `bool`은 요청한 필드가 전부 서버에 반영되었는지 여부이고,
    /// `Settings`는 서버가 돌려준 전체 스냅샷이다.
    ///
    /// # Errors
    /// - `EmptyChangeRequest`: 설정된 필드가 없음 (네트워크 호출 없음)
    /// - 그 외 전송 계층 에러는 그대로 전파
    pub async fn change_settings(&self, patch: SettingsPatch) -> Result<(bool, Settings), CoreError> {
        self.apply(patch.into_change_request()).await
    }

    /// 타입 정보가 없는 맵으로 부분 설정 변경.
    ///
    /// `null` 값은 변경하지 않는 필드로 본다. 모르는 필드나 타입 불일치는
    /// `UnknownSetting`/`TypeMismatch`로 네트워크 호출 전에 실패한다.
    /// 필드명 검사는 `null` 여부보다 먼저 한다.
    pub async fn change_settings_raw(
        &self,
        raw: &RawSettings,
    ) -> Result<(bool, Settings), CoreError> {
        let request = schema::parse_raw(raw)?;
        self.apply(request).await
    }

    /// 변경 요청 적용 및 대조
    pub async fn apply(&self, request: ChangeRequest) -> Result<(bool, Settings), CoreError> {
        if request.is_empty() {
            return Err(CoreError::EmptyChangeRequest);
        }
        schema::validate(&request)?;

        debug!("설정 변경 전송: {:?}", request.to_body());
        let response = self.api.change_settings_raw(&request.to_body()).await?;

        let unapplied = unapplied_fields(&request, &response);
        let settings = Settings::from_raw(&response);

        if unapplied.is_empty() {
            info!("설정 변경 완료: {} 필드", request.len());
        } else {
            for field in &unapplied {
                warn!(
                    "서버가 설정을 반영하지 않음: {field} (요청 {:?}, 응답 {:?})",
                    request.get(*field),
                    response.get(field.wire_name())
                );
            }
        }

        Ok((unapplied.is_empty(), settings))
    }

    /// 설정 하나를 잠시 바꾼 상태로 작업을 실행하고 원래 값으로 되돌린다.
    ///
    /// 예: `who_watched_enabled`를 켠 채로 조회하고 다시 끈다.
    /// 현재 값이 이미 `value`와 같으면 변경 없이 작업만 실행한다.
    /// 작업이 실패해도 복원은 시도한다. 작업은 성공했는데 복원이 실패하면
    /// 복원 에러를 반환한다.
    pub async fn with_setting<F, Fut, T>(
        &self,
        field: SettingField,
        value: impl Into<SettingValue>,
        task: F,
    ) -> Result<T, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        let value = value.into();
        let previous = self.get_settings().await?.value_of(field);

        if previous.as_ref() == Some(&value) {
            debug!("{field} 이미 {value}, 변경 생략");
            return task().await;
        }

        let (applied, _) = self
            .apply(ChangeRequest::new().with(field, value.clone()))
            .await?;
        if !applied {
            warn!("{field}={value} 반영 실패, 작업은 계속 진행");
        }

        let result = task().await;

        let Some(previous) = previous else {
            warn!("{field} 이전 값을 알 수 없어 복원 생략");
            return result;
        };

        let restored = self.apply(ChangeRequest::new().with(field, previous)).await;
        match (result, restored) {
            (Ok(output), Ok((true, _))) => Ok(output),
            (Ok(output), Ok((false, _))) => {
                warn!("{field} 복원 값이 반영되지 않음");
                Ok(output)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), restored) => {
                if let Err(restore_err) = restored {
                    warn!("{field} 복원 실패: {restore_err}");
                }
                Err(e)
            }
        }
    }
}
