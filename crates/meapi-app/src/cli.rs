//! CLI 인자 정의.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use meapi_core::models::settings::SettingsPatch;
use std::path::PathBuf;

/// Me 계정 설정 클라이언트
#[derive(Parser, Debug)]
#[command(name = "meapi")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// 모든 명령에 공통인 옵션
#[derive(ClapArgs, Debug)]
pub struct GlobalArgs {
    /// 서버 URL 지정 (기본: 설정 파일 값)
    #[arg(long, short = 's', global = true)]
    pub server: Option<String>,

    /// 액세스 토큰 (없으면 MEAPI_ACCESS_TOKEN 환경 변수, 그다음 설정 파일)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// 설정 파일 경로 (기본: 플랫폼별 설정 디렉토리)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 현재 설정 조회
    Get,
    /// 설정 변경 (지정한 항목만 전송)
    Set(SetArgs),
    /// JSON 객체로 설정 변경 (예: '{"language":"en"}')
    SetRaw {
        /// 필드명 → 값 JSON 객체
        json: String,
    },
    /// 액세스 토큰을 설정 파일에 저장
    SaveToken {
        /// JWT 액세스 토큰
        #[arg(value_name = "TOKEN")]
        value: String,
    },
    /// 무작위 브라우저 User-Agent 출력
    UserAgent,
}

/// 변경할 설정 항목. 지정하지 않은 항목은 건드리지 않는다.
#[derive(ClapArgs, Debug, Default)]
pub struct SetArgs {
    #[arg(long, action = ArgAction::Set)]
    pub mutual_contacts_available: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub who_watched_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub who_deleted_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub comments_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub location_enabled: Option<bool>,
    /// 알림 언어 (두 글자 코드, 예: en, iw)
    #[arg(long)]
    pub language: Option<String>,
    #[arg(long, action = ArgAction::Set)]
    pub notifications_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub who_deleted_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub who_watched_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub distance_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub system_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub birthday_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub comments_notification_enabled: Option<bool>,
    #[arg(long, action = ArgAction::Set)]
    pub names_notification_enabled: Option<bool>,
}

impl From<SetArgs> for SettingsPatch {
    fn from(args: SetArgs) -> Self {
        SettingsPatch {
            mutual_contacts_available: args.mutual_contacts_available,
            who_watched_enabled: args.who_watched_enabled,
            who_deleted_enabled: args.who_deleted_enabled,
            comments_enabled: args.comments_enabled,
            location_enabled: args.location_enabled,
            language: args.language,
            notifications_enabled: args.notifications_enabled,
            who_deleted_notification_enabled: args.who_deleted_notification_enabled,
            who_watched_notification_enabled: args.who_watched_notification_enabled,
            distance_notification_enabled: args.distance_notification_enabled,
            system_notification_enabled: args.system_notification_enabled,
            birthday_notification_enabled: args.birthday_notification_enabled,
            comments_notification_enabled: args.comments_notification_enabled,
            names_notification_enabled: args.names_notification_enabled,
        }
    }
}
