//! 리소스 프로바이더 실행 바이너리
//!
//! 설정 파일로 로거, MongoDB, Redis 프로바이더를 초기화하고 연결 상태를 확인한 뒤,
//! 종료 신호(Ctrl+C)를 받으면 모든 리소스를 역순으로 정리합니다.

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use resource_provider::bootstrap::Resources;
use resource_provider::config::{Environment, ProviderConfig};
use resource_provider::core::{Provider, Shutdown};
use resource_provider::utils::display_terminal::{
    print_boxed_title, print_final_summary, print_provider_summary, print_step_start,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    info!("🚀 리소스 프로바이더 시작중...");

    let config = ProviderConfig::from_env().inspect_err(|e| error!("❌ 설정 로드 실패: {}", e))?;

    print_boxed_title("INITIALIZING PROVIDERS");
    let resources =
        Resources::from_config(&config).inspect_err(|e| error!("❌ 프로바이더 초기화 실패: {}", e))?;

    let summaries = resources.summary();
    print_provider_summary(&summaries);
    print_final_summary(summaries.len(), resources.total_instances());

    print_step_start(1, "checking default connections");
    check_connections(&resources).await;

    info!("✅ 모든 프로바이더가 준비되었습니다. Ctrl+C 로 종료합니다");
    tokio::signal::ctrl_c().await?;

    info!("🛑 종료 신호 수신, 리소스 정리중...");
    resources.shutdown().await?;
    info!("👋 종료 완료");

    Ok(())
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 실행 환경(`ENVIRONMENT`)에 맞는 기본 필터를 사용합니다.
///
/// ```bash
/// RUST_LOG=resource_provider=debug cargo run
/// ```
fn init_logging() {
    let filter = Environment::current().default_log_filter();
    env_logger::init_from_env(Env::default().default_filter_or(filter));
}

/// 기본 데이터베이스와 기본 캐시에 한 번씩 ping을 보냅니다.
///
/// 실패해도 종료하지 않고 경고만 남깁니다.
async fn check_connections(resources: &Resources) {
    if let Some(database) = resources.databases.get_default() {
        match database.ping().await {
            Ok(()) => info!("✅ MongoDB 연결 성공: {}", database.database_name()),
            Err(e) => warn!("⚠️ MongoDB ping 실패 ({}): {}", database.database_name(), e),
        }
    }

    if let Some(cache) = resources.caches.get_default() {
        match cache.ping().await {
            Ok(()) => info!("✅ Redis 연결 성공: {}", cache.url()),
            Err(e) => warn!("⚠️ Redis ping 실패 ({}): {}", cache.url(), e),
        }
    }
}
