//! 파일 전송 엔진 (TCP)
//!
//! 연결 → 요청 전송 → 상태 줄 → Length 헤더 → 본문 → 종료 순서로 진행.
//! 각 소켓 작업에 같은 타임아웃을 적용함.

use std::net::SocketAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::header::read_header;
use crate::{Config, Error, Phase, Result, PROTOCOL_VERSION};

/// 본문 버퍼 초기 용량 상한
const MAX_PREALLOC: u64 = 1024 * 1024;

/// 원격 경로 하나를 받아오는 동작
///
/// 와일드카드 확장은 이 트레이트만 사용하므로 테스트에서 대체 가능
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&mut self, path: &str) -> Result<Bytes>;
}

/// FSP 서버 하나에 대한 클라이언트
///
/// `fetch` 호출마다 새 연결을 열고, 응답을 다 받으면 닫음
#[derive(Debug, Clone)]
pub struct FspClient {
    config: Config,
    server: SocketAddr,
}

impl FspClient {
    pub fn new(config: Config, server: SocketAddr) -> Self {
        Self { config, server }
    }

    async fn connect(&self) -> Result<TcpStream> {
        timeout(self.config.timeout, TcpStream::connect(self.server))
            .await
            .map_err(|_| Error::Timeout {
                phase: Phase::Connect,
                timeout: self.config.timeout,
            })?
            .map_err(Error::transport(Phase::Connect))
    }
}

impl Fetch for FspClient {
    async fn fetch(&mut self, path: &str) -> Result<Bytes> {
        info!("Fetching {} from {}", path, self.server);

        let mut stream = self.connect().await?;
        debug!("Connected to {}", self.server);

        let request = format_request(path, &self.config.hostname, &self.config.agent);
        send_request(&mut stream, request.as_bytes(), self.config.timeout).await?;

        let body = read_response(
            &mut BufReader::new(&mut stream),
            self.config.recv_chunk_size,
            self.config.timeout,
        )
        .await?;

        // 닫기 실패는 이미 받은 본문에 영향 없음
        if let Err(e) = stream.shutdown().await {
            debug!("Shutdown of {} failed: {}", self.server, e);
        }

        info!("Fetched {} ({} bytes)", path, body.len());
        Ok(body)
    }
}

/// 요청 블록 생성
pub fn format_request(path: &str, hostname: &str, agent: &str) -> String {
    format!(
        "GET {} {}\r\nHostname: {}\r\nAgent: {}\r\n\r\n",
        path, PROTOCOL_VERSION, hostname, agent
    )
}

/// 요청 전체를 보낼 때까지 반복 기록
///
/// 0 바이트 기록은 상대가 닫은 것으로 보고 에러
pub async fn send_request<W>(writer: &mut W, request: &[u8], deadline: Duration) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut sent = 0;
    while sent < request.len() {
        let n = timeout(deadline, writer.write(&request[sent..]))
            .await
            .map_err(|_| Error::Timeout {
                phase: Phase::SendRequest,
                timeout: deadline,
            })?
            .map_err(Error::transport(Phase::SendRequest))?;

        if n == 0 {
            return Err(Error::ZeroWrite);
        }
        sent += n;
    }

    timeout(deadline, writer.flush())
        .await
        .map_err(|_| Error::Timeout {
            phase: Phase::SendRequest,
            timeout: deadline,
        })?
        .map_err(Error::transport(Phase::SendRequest))?;

    debug!("Request sent ({} bytes)", sent);
    Ok(())
}

/// 헤더를 읽고 Length 만큼 본문 수신
pub async fn read_response<R>(reader: &mut R, chunk_size: usize, deadline: Duration) -> Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let header = read_header(reader, deadline).await?;
    debug!("Response header: Success, Length={}", header.length);

    read_body(reader, header.length, chunk_size, deadline).await
}

/// 정확히 `length` 바이트를 청크 단위로 수신
pub async fn read_body<R>(
    reader: &mut R,
    length: u64,
    chunk_size: usize,
    deadline: Duration,
) -> Result<Bytes>
where
    R: AsyncRead + Unpin,
{
    let mut body = BytesMut::with_capacity(length.min(MAX_PREALLOC) as usize);
    let mut chunk = vec![0u8; chunk_size.max(1)];
    let mut received: u64 = 0;

    while received < length {
        let want = (length - received).min(chunk.len() as u64) as usize;
        let n = timeout(deadline, reader.read(&mut chunk[..want]))
            .await
            .map_err(|_| Error::Timeout {
                phase: Phase::Body,
                timeout: deadline,
            })?
            .map_err(Error::transport(Phase::Body))?;

        if n == 0 {
            return Err(Error::BodyTruncated {
                expected: length,
                received,
            });
        }
        body.extend_from_slice(&chunk[..n]);
        received += n as u64;
    }

    Ok(body.freeze())
}
