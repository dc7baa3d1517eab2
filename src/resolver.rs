//! 이름 해석 (UDP)
//!
//! 요청 `WHEREIS <name>` 한 개를 보내고 응답 `OK <ip>:<port>` 한 개를 받음.
//! 재시도 없음.

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::{Config, Error, Phase, Result, RESOLVE_OK};

/// 서버 이름을 네임서버에 질의
///
/// 응답 페이로드에 `:`가 없으면 `Ok(None)` (주소 없음)
pub async fn resolve(
    config: &Config,
    server_name: &str,
    nameserver: SocketAddr,
) -> Result<Option<SocketAddr>> {
    let bind_addr: SocketAddr = if nameserver.is_ipv4() {
        SocketAddr::from(([0u8; 4], 0))
    } else {
        SocketAddr::from(([0u16; 8], 0))
    };

    let socket = UdpSocket::bind(bind_addr)
        .await
        .map_err(Error::transport(Phase::Resolve))?;
    socket
        .connect(nameserver)
        .await
        .map_err(Error::transport(Phase::Resolve))?;

    let request = format!("WHEREIS {}", server_name);
    debug!("-> {}: {}", nameserver, request);

    timeout(config.timeout, socket.send(request.as_bytes()))
        .await
        .map_err(|_| Error::Timeout {
            phase: Phase::Resolve,
            timeout: config.timeout,
        })?
        .map_err(Error::transport(Phase::Resolve))?;

    let mut buf = vec![0u8; config.max_reply_size];
    let len = timeout(config.timeout, socket.recv(&mut buf))
        .await
        .map_err(|_| Error::Timeout {
            phase: Phase::Resolve,
            timeout: config.timeout,
        })?
        .map_err(Error::transport(Phase::Resolve))?;

    let reply = String::from_utf8_lossy(&buf[..len]);
    debug!("<- {}: {}", nameserver, reply.trim_end());

    let resolved = parse_reply(&reply)?;
    match resolved {
        Some(addr) => info!("Resolved {} -> {}", server_name, addr),
        None => info!("Nameserver has no address for {}", server_name),
    }
    Ok(resolved)
}

/// `<status> <payload>` 응답 파싱
pub fn parse_reply(reply: &str) -> Result<Option<SocketAddr>> {
    let reply = reply.trim_end();
    let (status, payload) = reply
        .split_once(' ')
        .ok_or_else(|| Error::MalformedReply(reply.to_string()))?;

    if status != RESOLVE_OK {
        return Err(Error::ResolveRejected {
            status: status.to_string(),
            reason: payload.to_string(),
        });
    }

    let Some((ip, port)) = payload.split_once(':') else {
        return Ok(None);
    };

    let ip: IpAddr = ip.parse().map_err(|_| Error::InvalidIp(ip.to_string()))?;
    let port: u16 = port
        .parse()
        .map_err(|_| Error::InvalidPort(port.to_string()))?;

    Ok(Some(SocketAddr::new(ip, port)))
}
