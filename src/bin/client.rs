//! FSP 클라이언트
//!
//! 네임서버로 서버 주소를 찾은 뒤 파일 하나, 또는 `prefix*` 로 여러 파일을 받음
//!
//! 사용법:
//!   cargo run --release --bin fsp-client -- <NAMESERVER> <fsp://SERVER/PATH> [OPTIONS]
//!
//! 예시:
//!   # 파일 하나
//!   cargo run --release --bin fsp-client -- 127.0.0.1:5353 fsp://docs/readme.txt
//!
//!   # img/ 로 시작하는 모든 파일을 ./out 아래로
//!   cargo run --release --bin fsp-client -- 127.0.0.1:5353 'fsp://gallery/img/*' -o out

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fsp::{parse_nameserver, Config, Locator};

/// 명령줄 옵션
struct ClientArgs {
    nameserver: String,
    locator: String,
    verbose: bool,
    config: Config,
}

fn print_help() {
    println!(
        r#"FSP Client - File Service Protocol 클라이언트

사용법:
  fsp-client <NAMESERVER IP:PORT> <fsp://SERVER/PATH> [OPTIONS]

PATH 끝이 `*` 이면 서버의 `index` 에서 접두어가 맞는 파일을 모두 받음

옵션:
  -o, --output <DIR>     저장 디렉터리 (기본: .)
  -t, --timeout <SECS>   소켓 타임아웃 초 (기본: 3)
  -a, --agent <ID>       Agent 헤더 값
  -v, --verbose          debug 로그 출력
  -h, --help             이 도움말 출력
"#
    );
}

fn parse_args() -> Result<ClientArgs, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut positional = Vec::new();
    let mut verbose = false;
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                let dir = args.get(i + 1).ok_or("--output 에 디렉터리 필요")?;
                config = config.with_output_dir(PathBuf::from(dir));
                i += 1;
            }
            "--timeout" | "-t" => {
                let secs: f64 = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .filter(|s: &f64| s.is_finite() && *s > 0.0)
                    .ok_or("--timeout 에 양수 필요")?;
                config = config.with_timeout(Duration::from_secs_f64(secs));
                i += 1;
            }
            "--agent" | "-a" => {
                let agent = args.get(i + 1).ok_or("--agent 에 값 필요")?;
                config = config.with_agent(agent.clone());
                i += 1;
            }
            "--verbose" | "-v" => verbose = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => positional.push(other.to_string()),
        }
        i += 1;
    }

    if positional.len() != 2 {
        print_help();
        return Err("NAMESERVER 와 fsp:// 로케이터가 필요함".to_string());
    }
    let locator = positional.pop().unwrap_or_default();
    let nameserver = positional.pop().unwrap_or_default();

    Ok(ClientArgs {
        nameserver,
        locator,
        verbose,
        config,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;

    // 로깅 설정 (RUST_LOG 우선)
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let nameserver = parse_nameserver(&args.nameserver)?;
    let locator = Locator::parse(&args.locator)?;

    info!("FSP Client starting...");
    info!("Nameserver: {}", nameserver);
    info!("Server: {}, path: {}", locator.server, locator.path);
    if locator.is_wildcard() {
        info!("Wildcard request, expanding via index");
    }

    let stats = fsp::session::run(&args.config, nameserver, &locator).await?;

    info!("Transfer complete!");
    info!("  {}", stats.summary());

    Ok(())
}
