//! # FSP (File Service Protocol) 클라이언트
//!
//! 네임서버에 서버 이름을 질의한 뒤 스트림 연결로 파일을 받아오는 클라이언트
//!
//! ## 구성
//! - **resolver**: UDP 한 번 왕복으로 `WHEREIS <name>` 질의
//! - **engine**: `GET <path> FSP/1.0` 요청, 헤더 파싱, `Length` 만큼 본문 수신
//! - **wildcard**: `prefix*` 요청을 `index` 매니페스트로 펼쳐 순차 다운로드
//! - **writer**: 받은 바이트를 로컬 경로에 기록 (상위 디렉터리 자동 생성)
//!
//! 모든 에러는 치명적이며 재시도하지 않음. 파일은 한 번에 하나씩 순서대로 받음.

pub mod config;
pub mod engine;
pub mod error;
pub mod header;
pub mod locator;
pub mod resolver;
pub mod session;
pub mod stats;
pub mod wildcard;
pub mod writer;

pub use config::Config;
pub use engine::{Fetch, FspClient};
pub use error::{Error, Phase, Result};
pub use header::ResponseHeader;
pub use locator::{parse_nameserver, Locator};
pub use resolver::resolve;
pub use stats::TransferStats;
pub use wildcard::download;
pub use writer::FileWriter;

/// 프로토콜 버전 토큰
pub const PROTOCOL_VERSION: &str = "FSP/1.0";

/// 성공 상태 토큰
pub const SUCCESS_STATUS: &str = "Success";

/// 네임서버 성공 상태 토큰
pub const RESOLVE_OK: &str = "OK";

/// 와일드카드 표시 (경로 끝)
pub const WILDCARD_MARKER: char = '*';

/// 와일드카드 확장에 쓰는 매니페스트 파일 이름
pub const INDEX_PATH: &str = "index";

/// 기본 소켓 타임아웃 (초)
pub const DEFAULT_TIMEOUT_SECS: u64 = 3;

/// 기본 본문 수신 청크 크기 (바이트)
pub const DEFAULT_RECV_CHUNK_SIZE: usize = 2048;

/// 네임서버 응답 최대 크기 (바이트)
pub const MAX_REPLY_SIZE: usize = 1024;
