//! 주소 표기 파싱
//!
//! - 네임서버: `IP:PORT`
//! - 파일: `fsp://SERVER/PATH` (PATH 끝의 `*`는 와일드카드)

use std::net::SocketAddr;

use crate::{Error, Result, WILDCARD_MARKER};

const SCHEME: &str = "fsp://";

/// `fsp://SERVER/PATH` 로케이터
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    /// 네임서버에 질의할 서버 이름
    pub server: String,

    /// 서버상의 경로 (앞의 `/` 제외)
    pub path: String,
}

impl Locator {
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix(SCHEME)
            .ok_or_else(|| Error::InvalidLocator(input.to_string()))?;

        let (server, path) = rest
            .split_once('/')
            .ok_or_else(|| Error::InvalidLocator(input.to_string()))?;

        if server.is_empty() || path.is_empty() {
            return Err(Error::InvalidLocator(input.to_string()));
        }

        Ok(Self {
            server: server.to_string(),
            path: path.to_string(),
        })
    }

    pub fn is_wildcard(&self) -> bool {
        self.path.ends_with(WILDCARD_MARKER)
    }
}

/// 네임서버 주소 파싱
pub fn parse_nameserver(input: &str) -> Result<SocketAddr> {
    input
        .parse()
        .map_err(|_| Error::InvalidNameserver(input.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locator() {
        let locator = Locator::parse("fsp://files.example/docs/readme.txt").unwrap();
        assert_eq!(locator.server, "files.example");
        assert_eq!(locator.path, "docs/readme.txt");
        assert!(!locator.is_wildcard());

        let wildcard = Locator::parse("fsp://srv/img-*").unwrap();
        assert_eq!(wildcard.path, "img-*");
        assert!(wildcard.is_wildcard());
    }

    #[test]
    fn test_reject_bad_locators() {
        for input in ["http://srv/a", "fsp://srv", "fsp:///a", "fsp://srv/", "srv/a"] {
            assert!(
                matches!(Locator::parse(input), Err(Error::InvalidLocator(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_nameserver() {
        let addr = parse_nameserver("127.0.0.1:5353").unwrap();
        assert_eq!(addr.port(), 5353);
        assert!(matches!(
            parse_nameserver("localhost:53"),
            Err(Error::InvalidNameserver(_))
        ));
    }
}
