//! 전송 통계

use std::time::{Duration, Instant};

/// 한 번의 실행 동안 받은 파일 통계
#[derive(Debug, Clone)]
pub struct TransferStats {
    /// 받은 파일 수 (매니페스트 포함)
    pub fetched_files: u64,

    /// 기록한 파일 수
    pub written_files: u64,

    /// 받은 본문 총 바이트
    pub total_bytes: u64,

    /// 건너뛴 매니페스트 항목 수
    pub skipped_entries: u64,

    /// 시작 시간
    start_time: Instant,
}

impl TransferStats {
    pub fn new() -> Self {
        Self {
            fetched_files: 0,
            written_files: 0,
            total_bytes: 0,
            skipped_entries: 0,
            start_time: Instant::now(),
        }
    }

    /// 본문 수신 기록
    pub fn record_fetch(&mut self, bytes: usize) {
        self.fetched_files += 1;
        self.total_bytes += bytes as u64;
    }

    pub fn record_write(&mut self) {
        self.written_files += 1;
    }

    pub fn record_skip(&mut self) {
        self.skipped_entries += 1;
    }

    /// 경과 시간
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 처리율 (bytes/sec)
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.total_bytes as f64 / secs
        } else {
            0.0
        }
    }

    /// 요약 문자열
    pub fn summary(&self) -> String {
        format!(
            "files: {} fetched / {} written, skipped: {}, bytes: {}, elapsed: {:.2}s, throughput: {:.2} KB/s",
            self.fetched_files,
            self.written_files,
            self.skipped_entries,
            self.total_bytes,
            self.elapsed().as_secs_f64(),
            self.throughput() / 1024.0
        )
    }
}

impl Default for TransferStats {
    fn default() -> Self {
        Self::new()
    }
}
