//! 와일드카드 확장
//!
//! `prefix*` 요청은 `index` 매니페스트를 받아 공백으로 나눈 항목 중
//! `prefix`로 시작하는 것만 매니페스트 순서대로 받음.
//! 로컬 경로는 항목에서 `prefix`를 뗀 나머지.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::engine::Fetch;
use crate::{FileWriter, Result, TransferStats, INDEX_PATH, WILDCARD_MARKER};

/// 경로가 와일드카드면 접두어 반환
pub fn wildcard_prefix(path: &str) -> Option<&str> {
    path.strip_suffix(WILDCARD_MARKER)
}

/// 매니페스트 본문을 항목 목록으로 분리
///
/// UTF-8이 아니면 에러 (손실 변환한 이름을 로컬 경로로 쓰지 않음)
pub fn parse_manifest(body: &[u8]) -> Result<Vec<&str>> {
    let text = std::str::from_utf8(body)?;
    Ok(text.split_whitespace().collect())
}

/// 요청 경로 하나를 받아 기록하고, 기록한 로컬 경로 목록 반환
///
/// 첫 에러에서 중단하며 남은 항목은 받지 않음
pub async fn download<F: Fetch>(
    fetcher: &mut F,
    writer: &FileWriter,
    requested_path: &str,
    stats: &mut TransferStats,
) -> Result<Vec<PathBuf>> {
    let Some(prefix) = wildcard_prefix(requested_path) else {
        let body = fetcher.fetch(requested_path).await?;
        stats.record_fetch(body.len());
        let path = writer.write(requested_path, &body).await?;
        stats.record_write();
        return Ok(vec![path]);
    };

    let manifest = fetcher.fetch(INDEX_PATH).await?;
    stats.record_fetch(manifest.len());
    let entries = parse_manifest(&manifest)?;

    let matching: Vec<&str> = entries
        .iter()
        .copied()
        .filter(|entry| entry.starts_with(prefix))
        .collect();
    info!(
        "Manifest lists {} entries, {} match prefix {:?}",
        entries.len(),
        matching.len(),
        prefix
    );

    let mut written = Vec::with_capacity(matching.len());
    for entry in matching {
        let local = &entry[prefix.len()..];
        if local.is_empty() {
            warn!("Skipping manifest entry {:?}: nothing left after prefix", entry);
            stats.record_skip();
            continue;
        }

        let body = fetcher.fetch(entry).await?;
        stats.record_fetch(body.len());
        written.push(writer.write(local, &body).await?);
        stats.record_write();
    }

    Ok(written)
}
