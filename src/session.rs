//! 한 번의 실행: 이름 해석 후 다운로드

use std::net::SocketAddr;

use tracing::info;

use crate::{
    download, resolve, Config, Error, FileWriter, FspClient, Locator, Result, TransferStats,
};

/// `locator`의 서버를 `nameserver`로 찾아 경로(또는 와일드카드 집합)를 받음
pub async fn run(config: &Config, nameserver: SocketAddr, locator: &Locator) -> Result<TransferStats> {
    let mut stats = TransferStats::new();

    let server = resolve(config, &locator.server, nameserver)
        .await?
        .ok_or_else(|| Error::NoAddress {
            server: locator.server.clone(),
        })?;

    let writer = FileWriter::new(config.output_dir.clone());
    let mut client = FspClient::new(config.clone(), server);

    let written = download(&mut client, &writer, &locator.path, &mut stats).await?;
    info!(
        "Downloaded {} file(s) from {} ({})",
        written.len(),
        locator.server,
        server
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, UdpSocket};

    /// `WHEREIS` 질의 하나에 `reply`로 응답
    async fn spawn_nameserver(reply: String) -> SocketAddr {
        let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = socket.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; 1024];
            let (_, peer) = socket.recv_from(&mut buf).await.unwrap();
            socket.send_to(reply.as_bytes(), peer).await.unwrap();
        });
        addr
    }

    /// 연결마다 요청 하나를 받아 파일 맵에서 응답
    async fn spawn_file_server(files: HashMap<String, Vec<u8>>) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let files = Arc::new(files);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let mut request = Vec::new();
                let mut buf = [0u8; 512];
                while !request.ends_with(b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request).into_owned();
                let path = request.split(' ').nth(1).unwrap_or_default();
                let response = match files.get(path) {
                    Some(data) => {
                        let mut out = format!("FSP/1.0 Success\r\nLength: {}\r\n\r\n", data.len())
                            .into_bytes();
                        out.extend_from_slice(data);
                        out
                    }
                    None => b"FSP/1.0 Not Found\r\n".to_vec(),
                };
                let _ = socket.write_all(&response).await;
            }
        });
        addr
    }

    #[tokio::test]
    async fn test_wildcard_session_end_to_end() {
        let big: Vec<u8> = (0..10_000u32).map(|i| (i * 7) as u8).collect();
        let files = HashMap::from([
            ("index".to_string(), b"img/a.png img/sub/b.png notes.txt".to_vec()),
            ("img/a.png".to_string(), big.clone()),
            ("img/sub/b.png".to_string(), b"bbb".to_vec()),
            ("notes.txt".to_string(), b"skip me".to_vec()),
        ]);
        let server = spawn_file_server(files).await;
        let nameserver = spawn_nameserver(format!("OK {}", server)).await;

        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_output_dir(dir.path());
        let locator = Locator::parse("fsp://gallery/img/*").unwrap();

        let stats = run(&config, nameserver, &locator).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.png")).unwrap(), big);
        assert_eq!(std::fs::read(dir.path().join("sub/b.png")).unwrap(), b"bbb");
        assert!(!dir.path().join("notes.txt").exists());
        assert_eq!(stats.written_files, 2);
        assert_eq!(stats.fetched_files, 3);
    }

    #[tokio::test]
    async fn test_single_file_session() {
        let files = HashMap::from([("docs/readme.txt".to_string(), b"hello".to_vec())]);
        let server = spawn_file_server(files).await;
        let nameserver = spawn_nameserver(format!("OK {}", server)).await;

        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_output_dir(dir.path());
        let locator = Locator::parse("fsp://docs-host/docs/readme.txt").unwrap();

        run(&config, nameserver, &locator).await.unwrap();
        assert_eq!(
            std::fs::read(dir.path().join("docs/readme.txt")).unwrap(),
            b"hello"
        );
    }

    #[tokio::test]
    async fn test_remote_failure_is_fatal() {
        let server = spawn_file_server(HashMap::new()).await;
        let nameserver = spawn_nameserver(format!("OK {}", server)).await;

        let dir = tempfile::tempdir().unwrap();
        let config = Config::default().with_output_dir(dir.path());
        let locator = Locator::parse("fsp://srv/missing.txt").unwrap();

        match run(&config, nameserver, &locator).await {
            Err(Error::RequestFailed { status }) => assert_eq!(status, "Not Found"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(!dir.path().join("missing.txt").exists());
    }

    #[tokio::test]
    async fn test_no_address() {
        let nameserver = spawn_nameserver("OK unknown".to_string()).await;
        let locator = Locator::parse("fsp://ghost/a.txt").unwrap();

        match run(&Config::default(), nameserver, &locator).await {
            Err(Error::NoAddress { server }) => assert_eq!(server, "ghost"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nameserver_rejects() {
        let nameserver = spawn_nameserver("ERR unknown server".to_string()).await;
        let locator = Locator::parse("fsp://ghost/a.txt").unwrap();

        let result = run(&Config::default(), nameserver, &locator).await;
        assert!(matches!(result, Err(Error::ResolveRejected { .. })));
    }
}
