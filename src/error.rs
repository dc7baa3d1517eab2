//! 에러 타입 정의

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 에러가 발생한 단계
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// 네임서버 질의
    Resolve,
    /// 스트림 연결
    Connect,
    /// 요청 전송
    SendRequest,
    /// 상태 줄 수신
    StatusLine,
    /// Length 헤더 수신
    LengthHeader,
    /// 본문 수신
    Body,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Resolve => "resolve",
            Phase::Connect => "connect",
            Phase::SendRequest => "send-request",
            Phase::StatusLine => "status-line",
            Phase::LengthHeader => "length-header",
            Phase::Body => "body",
        };
        f.write_str(name)
    }
}

/// FSP 클라이언트 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("[{phase}] 전송 에러: {source}")]
    Transport {
        phase: Phase,
        #[source]
        source: std::io::Error,
    },

    #[error("[{phase}] 타임아웃: {timeout:?} 동안 응답 없음")]
    Timeout { phase: Phase, timeout: Duration },

    #[error("[resolve] 잘못된 네임서버 응답: {0:?}")]
    MalformedReply(String),

    #[error("[resolve] 네임서버 거부: status={status}, reason={reason}")]
    ResolveRejected { status: String, reason: String },

    #[error("[resolve] 유효하지 않은 IP 주소: {0:?}")]
    InvalidIp(String),

    #[error("[resolve] 유효하지 않은 포트: {0:?}")]
    InvalidPort(String),

    #[error("[resolve] 서버 주소 없음: {server}")]
    NoAddress { server: String },

    #[error("[send-request] 0 바이트 전송됨")]
    ZeroWrite,

    #[error("[{phase}] 연결 종료")]
    ConnectionClosed { phase: Phase },

    #[error("[body] 본문 부족: expected {expected} bytes, got {received}")]
    BodyTruncated { expected: u64, received: u64 },

    #[error("[status-line] 잘못된 상태 줄: {0:?}")]
    MalformedStatusLine(String),

    #[error("[status-line] 유효하지 않은 프로토콜 버전: expected {expected}, got {got}")]
    UnexpectedVersion { expected: &'static str, got: String },

    #[error("[status-line] 요청 실패: {status}")]
    RequestFailed { status: String },

    #[error("[length-header] 잘못된 Length 헤더: {0:?}")]
    InvalidLength(String),

    #[error("[wildcard] 매니페스트가 UTF-8 텍스트가 아님: {0}")]
    InvalidManifest(#[from] std::str::Utf8Error),

    #[error("[writer] 허용되지 않는 로컬 경로: {0:?}")]
    UnsafePath(String),

    #[error("[writer] 디렉터리 생성 실패 {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[writer] 파일 기록 실패 {path:?}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("유효하지 않은 로케이터: {0:?}")]
    InvalidLocator(String),

    #[error("유효하지 않은 네임서버 주소: {0:?}")]
    InvalidNameserver(String),
}

impl Error {
    pub(crate) fn transport(phase: Phase) -> impl FnOnce(std::io::Error) -> Self {
        move |source| Error::Transport { phase, source }
    }
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
