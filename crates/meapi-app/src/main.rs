//! # meapi-app
//!
//! meapi CLI 진입점.
//! 설정 로드, 어댑터 와이어링, 명령 실행을 담당한다.

mod cli;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use meapi_core::config::AppConfig;
use meapi_core::config_manager::ConfigManager;
use meapi_core::models::settings::{Settings, SettingsPatch};
use meapi_core::ports::settings_api::RawSettings;
use meapi_network::auth::TokenManager;
use meapi_network::http_client::HttpSettingsClient;
use meapi_network::user_agent::random_user_agent;
use meapi_settings::SettingsService;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, GlobalArgs};

/// 토큰 환경 변수 이름
const TOKEN_ENV: &str = "MEAPI_ACCESS_TOKEN";

/// 서버가 요청한 설정을 모두 반영하지 않았을 때 종료 코드
const EXIT_NOT_APPLIED: u8 = 2;

/// `--config` 경로 또는 플랫폼 기본 경로의 설정 관리자
fn open_config(global: &GlobalArgs) -> Result<ConfigManager> {
    let manager = match &global.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?;
    debug!("설정 파일: {}", manager.config_path().display());
    Ok(manager)
}

/// 설정 파일 값을 CLI 인자/환경 변수로 오버라이드
fn resolve_config(global: &GlobalArgs) -> Result<AppConfig> {
    let mut config = open_config(global)?.get();
    if let Some(server) = &global.server {
        config.server.base_url = server.clone();
    }

    let env_token = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty());
    if let Some(token) = global.token.clone().or(env_token) {
        config.auth.access_token = Some(token);
    }

    config.validate()?;
    Ok(config)
}

/// 형식 확인 후 토큰을 설정 파일에 저장
fn save_token(manager: &ConfigManager, token: &str) -> Result<()> {
    TokenManager::with_token(token)?;
    let token = token.trim().to_string();
    manager.update_with(|c| c.auth.access_token = Some(token))?;
    info!("액세스 토큰 저장: {}", manager.config_path().display());
    Ok(())
}

/// 설정으로 서비스 와이어링
fn build_service(config: &AppConfig) -> Result<SettingsService> {
    let token = config
        .auth
        .access_token
        .as_deref()
        .ok_or_else(|| anyhow!("액세스 토큰이 없습니다 (--token 또는 {TOKEN_ENV})"))?;
    let token_manager = Arc::new(TokenManager::with_token(token)?);

    let mut client = HttpSettingsClient::new(
        &config.server.base_url,
        token_manager,
        config.request_timeout(),
    )?;
    if let Some(ua) = &config.server.user_agent {
        client = client.with_user_agent(ua.clone());
    }
    debug!("User-Agent: {}", client.user_agent());

    Ok(SettingsService::new(Arc::new(client)))
}

/// 설정 로드부터 서비스 생성까지
fn connect(global: &GlobalArgs) -> Result<SettingsService> {
    let config = resolve_config(global)?;
    info!("서버: {}", config.server.base_url);
    build_service(&config)
}

/// 설정 스냅샷 출력
fn print_settings(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}

/// 변경 결과 출력 및 종료 코드 결정
fn report_change(applied: bool, settings: &Settings) -> Result<ExitCode> {
    println!("applied: {applied}");
    print_settings(settings)?;
    if applied {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!("요청한 설정 중 일부가 서버에 반영되지 않았습니다");
        Ok(ExitCode::from(EXIT_NOT_APPLIED))
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let Args { global, command } = Args::parse();

    let log_filter = format!(
        "meapi={0},meapi_app={0},meapi_core={0},meapi_network={0},meapi_settings={0}",
        global.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match command {
        Command::UserAgent => {
            println!("{}", random_user_agent());
            Ok(ExitCode::SUCCESS)
        }
        Command::SaveToken { value } => {
            save_token(&open_config(&global)?, &value)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Get => {
            let settings = connect(&global)?.get_settings().await?;
            print_settings(&settings)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Set(set) => {
            let (applied, settings) = connect(&global)?
                .change_settings(SettingsPatch::from(set))
                .await?;
            report_change(applied, &settings)
        }
        Command::SetRaw { json } => {
            let raw: RawSettings =
                serde_json::from_str(&json).context("JSON 객체 파싱 실패")?;
            let (applied, settings) = connect(&global)?.change_settings_raw(&raw).await?;
            report_change(applied, &settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_in(dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn save_token_persists_trimmed() {
        let dir = TempDir::new().unwrap();
        save_token(&manager_in(&dir), " aaa.bbb.ccc\n").unwrap();

        let reopened = manager_in(&dir).get();
        assert_eq!(reopened.auth.access_token.as_deref(), Some("aaa.bbb.ccc"));
    }

    #[test]
    fn malformed_token_not_saved() {
        let dir = TempDir::new().unwrap();
        let manager = manager_in(&dir);
        assert!(save_token(&manager, "not-a-jwt").is_err());
        assert!(manager_in(&dir).get().auth.access_token.is_none());
    }

    #[test]
    fn missing_token_fails_wiring() {
        let err = build_service(&AppConfig::default_config()).err().unwrap();
        assert!(err.to_string().contains(TOKEN_ENV));
    }
}
