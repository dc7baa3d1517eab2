//! 응답 헤더 읽기
//!
//! 본문만 길이가 정해져 있으므로 헤더는 `\r\n`을 찾을 때까지 한 바이트씩 읽음.
//! `\r`을 만나면 다음 바이트 하나를 버리고 줄을 반환함 (`\n` 여부는 확인하지 않음).

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::time::timeout;

use crate::{Error, Phase, Result, PROTOCOL_VERSION, SUCCESS_STATUS};

/// 파싱된 응답 헤더
///
/// 상태가 `Success`인 응답만 만들어지므로 상태는 따로 두지 않음
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHeader {
    /// 본문 길이 (바이트)
    pub length: u64,
}

/// 바이트 하나 읽기
async fn read_byte<R>(reader: &mut R, deadline: Duration, phase: Phase) -> Result<u8>
where
    R: AsyncRead + Unpin,
{
    let mut byte = [0u8; 1];
    let n = timeout(deadline, reader.read(&mut byte))
        .await
        .map_err(|_| Error::Timeout {
            phase,
            timeout: deadline,
        })?
        .map_err(Error::transport(phase))?;

    if n == 0 {
        return Err(Error::ConnectionClosed { phase });
    }
    Ok(byte[0])
}

/// 헤더 한 줄 읽기 (`\r` 뒤의 한 바이트는 버림)
pub async fn read_line<R>(reader: &mut R, deadline: Duration, phase: Phase) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut line = Vec::new();
    loop {
        let byte = read_byte(reader, deadline, phase).await?;
        if byte == b'\r' {
            read_byte(reader, deadline, phase).await?;
            break;
        }
        line.push(byte);
    }
    Ok(String::from_utf8_lossy(&line).into_owned())
}

/// `<version> <status>` 상태 줄 검사
pub fn parse_status_line(line: &str) -> Result<()> {
    let (version, status) = line
        .split_once(' ')
        .ok_or_else(|| Error::MalformedStatusLine(line.to_string()))?;

    if version != PROTOCOL_VERSION {
        return Err(Error::UnexpectedVersion {
            expected: PROTOCOL_VERSION,
            got: version.to_string(),
        });
    }
    if status != SUCCESS_STATUS {
        return Err(Error::RequestFailed {
            status: status.to_string(),
        });
    }
    Ok(())
}

/// `Length: <integer>` 헤더 파싱
pub fn parse_length_line(line: &str) -> Result<u64> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| Error::InvalidLength(line.to_string()))?;

    if name.trim() != "Length" {
        return Err(Error::InvalidLength(line.to_string()));
    }
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidLength(line.to_string()))
}

/// 상태 줄, Length 줄, 빈 줄까지 읽음
pub async fn read_header<R>(reader: &mut R, deadline: Duration) -> Result<ResponseHeader>
where
    R: AsyncRead + Unpin,
{
    let status_line = read_line(reader, deadline, Phase::StatusLine).await?;
    parse_status_line(&status_line)?;

    let length_line = read_line(reader, deadline, Phase::LengthHeader).await?;
    let length = parse_length_line(&length_line)?;

    // 헤더 끝의 빈 줄
    read_line(reader, deadline, Phase::LengthHeader).await?;

    Ok(ResponseHeader { length })
}
