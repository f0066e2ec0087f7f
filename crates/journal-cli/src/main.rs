//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 이번 달 손익 캘린더
//! journal calendar
//!
//! # 2025년 1월 캘린더 (JSON)
//! journal --format json calendar --year 2025 --month 1
//!
//! # 하루 집계와 일일 손실 한도
//! journal day --date 2025-01-07
//!
//! # 포지션 사이징 (진입 100, 손절 95, 목표 110)
//! journal size --entry 100 --stop 95 --target 110
//!
//! # 내보낸 파일 재생
//! journal replay --file export.json --events live.json
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use journal_cli::commands::{
    calendar::run_calendar,
    day::run_day,
    parse_date,
    render::OutputFormat,
    replay::{run_replay, ReplayConfig},
    resolve_month,
    size::{parse_price, run_size},
};
use journal_client::RestTradeSource;
use journal_core::{init_logging, JournalConfig, LogConfig};
use journal_risk::RiskPolicy;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Trading journal CLI - 월간 손익 캘린더와 리스크 도구", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (없으면 기본값 + 환경 변수)
    #[arg(short, long, global = true, default_value = "config/journal.toml")]
    config: PathBuf,

    /// 출력 형식 (table, json)
    #[arg(short, long, global = true, default_value = "table")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 월간 손익 캘린더 조회
    Calendar {
        /// 연도 (기본: 올해)
        #[arg(short, long)]
        year: Option<i32>,

        /// 월 1-12 (기본: 이번 달)
        #[arg(short, long)]
        month: Option<u32>,
    },

    /// 하루 집계와 일일 손실 한도 점검
    Day {
        /// 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,
    },

    /// 리스크 정책 기반 포지션 사이징
    Size {
        /// 진입가
        #[arg(short, long)]
        entry: String,

        /// 손절가
        #[arg(short, long)]
        stop: String,

        /// 목표가 (R-multiple 계산용)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// 내보낸 거래 파일로 캘린더 재생 (오프라인)
    Replay {
        /// 거래 내보내기 JSON 파일
        #[arg(long)]
        file: PathBuf,

        /// 실시간 이벤트 JSON 배열 파일
        #[arg(long)]
        events: Option<PathBuf>,

        /// 연도 (기본: 마지막 거래의 연도)
        #[arg(short, long)]
        year: Option<i32>,

        /// 월 1-12 (기본: 마지막 거래의 월)
        #[arg(short, long)]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = JournalConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config: {}", cli.config.display()))?;

    init_logging(LogConfig::from(&config.logging)).context("Failed to initialize logging")?;

    let format = OutputFormat::parse(&cli.format)?;
    let zone = config.calendar.zone()?;
    info!(zone = %zone, base_url = %config.api.base_url, "Journal CLI started");

    let output = match cli.command {
        Commands::Calendar { year, month } => {
            let month = resolve_month(year, month, &zone)?;
            let source = RestTradeSource::from_config(&config.api)?;
            run_calendar(source, zone, month, format).await
        }

        Commands::Day { date } => {
            let date = parse_date(&date)?;
            let policy = RiskPolicy::from_config(&config.risk)?;
            let source = RestTradeSource::from_config(&config.api)?;
            run_day(source, zone, date, &policy, format).await
        }

        Commands::Size {
            entry,
            stop,
            target,
        } => {
            let policy = RiskPolicy::from_config(&config.risk)?;
            let entry = parse_price("entry", &entry)?;
            let stop = parse_price("stop", &stop)?;
            let target = target.as_deref().map(|t| parse_price("target", t)).transpose()?;
            run_size(policy, entry, stop, target, format)
        }

        Commands::Replay {
            file,
            events,
            year,
            month,
        } => {
            let month = match (year, month) {
                (None, None) => None,
                (year, month) => Some(resolve_month(year, month, &zone)?),
            };
            run_replay(ReplayConfig {
                trades_path: &file,
                events_path: events.as_deref(),
                month,
                zone,
                format,
            })
            .await
        }
    };

    match output {
        Ok(text) => {
            println!("{}", text.trim_end());
            Ok(())
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            Err(e)
        }
    }
}
