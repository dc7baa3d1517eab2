//! 클라이언트 설정

use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::{DEFAULT_RECV_CHUNK_SIZE, DEFAULT_TIMEOUT_SECS, MAX_REPLY_SIZE};

/// FSP 클라이언트 설정
#[derive(Debug, Clone)]
pub struct Config {
    /// 소켓 작업 하나당 타임아웃 (connect, send, recv 공통)
    pub timeout: Duration,

    /// 본문 수신 청크 크기 (바이트)
    pub recv_chunk_size: usize,

    /// 네임서버 응답 버퍼 크기 (바이트)
    pub max_reply_size: usize,

    /// `Agent:` 헤더 값
    pub agent: String,

    /// `Hostname:` 헤더 값
    pub hostname: String,

    /// 로컬 파일을 기록할 루트 디렉터리
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS), // 3초
            recv_chunk_size: DEFAULT_RECV_CHUNK_SIZE,           // 2KB
            max_reply_size: MAX_REPLY_SIZE,                     // 1KB
            agent: default_agent(),
            hostname: local_hostname(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 망 안의 서버용 설정
    pub fn lan() -> Self {
        Self {
            timeout: Duration::from_millis(500),
            ..Self::default()
        }
    }

    /// 느린 회선용 설정
    pub fn slow_link() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            recv_chunk_size: 8192,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

fn default_agent() -> String {
    concat!("fsp-client/", env!("CARGO_PKG_VERSION")).to_string()
}

/// 로컬 호스트 이름 (읽을 수 없으면 `localhost`)
fn local_hostname() -> String {
    match hostname::get() {
        Ok(name) => name.to_string_lossy().into_owned(),
        Err(e) => {
            debug!("hostname lookup failed, using localhost: {}", e);
            "localhost".to_string()
        }
    }
}
