//! 로컬 파일 기록

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::{Error, Result};

/// 받은 파일을 `root` 아래에 기록
#[derive(Debug, Clone)]
pub struct FileWriter {
    root: PathBuf,
}

impl FileWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `local_path`에 `content` 기록 (없는 상위 디렉터리 생성, 기존 파일은 덮어씀)
    ///
    /// 경로는 매니페스트에서 오므로 절대 경로와 `..`는 거부
    pub async fn write(&self, local_path: &str, content: &[u8]) -> Result<PathBuf> {
        let target = self.resolve(local_path)?;

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|source| Error::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
            }
        }

        let write_err = |source| Error::WriteFile {
            path: target.clone(),
            source,
        };
        let mut file = fs::File::create(&target).await.map_err(write_err)?;
        file.write_all(content).await.map_err(write_err)?;
        file.flush().await.map_err(write_err)?;

        debug!("Wrote {} bytes to {:?}", content.len(), target);
        info!("Saved {}", target.display());
        Ok(target)
    }

    fn resolve(&self, local_path: &str) -> Result<PathBuf> {
        let relative = Path::new(local_path);
        let mut has_name = false;
        for component in relative.components() {
            match component {
                Component::Normal(_) => has_name = true,
                Component::CurDir => {}
                _ => return Err(Error::UnsafePath(local_path.to_string())),
            }
        }
        if !has_name {
            return Err(Error::UnsafePath(local_path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}
