//! DEX 페어 수집기 CLI.

use clap::Parser;
use pairs_collector::config::ConfigOverrides;
use pairs_collector::{modules, CollectorConfig};
use pairs_core::{init_logging, LogConfig, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pairs-collector")]
#[command(about = "Resumable DEX factory pair collector", long_about = None)]
#[command(version)]
struct Cli {
    /// 이전 실행 결과 파일 (없으면 처음부터 수집)
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// 결과 저장 파일
    #[arg(long)]
    output_file: Option<PathBuf>,

    /// 동시 워커 수
    #[arg(long)]
    cores: Option<usize>,

    /// DEX 계열 (uniswap, pancakeswap)
    #[arg(long)]
    dex_exchange: Option<String>,

    /// 체인 ID
    #[arg(long)]
    chain_id: Option<u64>,

    /// 팩토리 버전
    #[arg(long)]
    dex_version: Option<u32>,

    /// 작업당 인덱스 수
    #[arg(long)]
    chunk_size: Option<u64>,

    /// 완료 순서대로 결과 반영 (인덱스 순서 보장 안 함)
    #[arg(long)]
    unordered: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact). 없으면 LOG_FORMAT 사용
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_file: self.input_file.clone(),
            output_file: self.output_file.clone(),
            cores: self.cores,
            dex_exchange: self.dex_exchange.clone(),
            chain_id: self.chain_id,
            dex_version: self.dex_version,
            chunk_size: self.chunk_size,
            unordered: self.unordered,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    // 로깅 초기화
    let format = LogFormat::resolve(cli.log_format.as_deref())?;
    init_logging(LogConfig::new(cli.log_level.clone()).with_format(format))
        .map_err(|e| e.to_string())?;

    tracing::info!("DEX Pair Collector 시작");

    // 설정 로드 (.env → 환경변수 → CLI 플래그)
    let config = match CollectorConfig::from_env()
        .and_then(|config| config.with_overrides(cli.overrides()))
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "설정 로드 실패");
            return Err(e.into());
        }
    };
    tracing::debug!(
        input = %config.input_file.display(),
        output = %config.output_file.display(),
        dex = %config.registry.dex,
        chain_id = config.registry.chain_id,
        version = config.registry.version,
        "설정 로드 완료"
    );

    match modules::collect_pairs(&config).await {
        Ok(stats) => stats.log_summary("페어 수집"),
        Err(e) => {
            tracing::error!(error = %e, "페어 수집 실패");
            return Err(e.into());
        }
    }

    tracing::info!("DEX Pair Collector 종료");
    Ok(())
}
