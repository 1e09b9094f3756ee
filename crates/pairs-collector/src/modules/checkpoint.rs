//! 데이터셋 파일(체크포인트) 읽기/쓰기.
//!
//! 이전 실행이 저장한 데이터셋이 곧 재개 지점입니다. 레코드 수가
//! 다음 실행의 시작 인덱스가 됩니다.
//!
//! # 사용 예
//!
//! ```rust,ignore
//! let mut dataset = load_dataset(&config.input_file).await?;
//! // ... 수집 ...
//! save_dataset(&config.output_file, &dataset).await?;
//! ```

use pairs_core::PairDataset;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::error::CollectorError;
use crate::Result;

/// 데이터셋을 읽습니다. 파일이 없으면 빈 데이터셋을 반환합니다.
pub async fn load_dataset(path: &Path) -> Result<PairDataset> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "체크포인트 없음, 처음부터 수집");
            return Ok(PairDataset::new());
        }
        Err(source) => {
            return Err(CollectorError::CheckpointIo {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let dataset: PairDataset =
        serde_json::from_slice(&bytes).map_err(|source| CollectorError::CheckpointFormat {
            path: path.display().to_string(),
            source,
        })?;

    info!(
        path = %path.display(),
        records = dataset.len(),
        version = %dataset.version,
        "체크포인트 로드"
    );
    Ok(dataset)
}

/// 데이터셋을 저장합니다.
///
/// 같은 디렉터리의 임시 파일에 쓴 뒤 rename 하므로 중간에 실패해도
/// 기존 파일은 온전히 남습니다.
pub async fn save_dataset(path: &Path, dataset: &PairDataset) -> Result<()> {
    let io_err = |source: std::io::Error| CollectorError::CheckpointIo {
        path: path.display().to_string(),
        source,
    };

    let json =
        serde_json::to_vec_pretty(dataset).map_err(|source| CollectorError::CheckpointFormat {
            path: path.display().to_string(),
            source,
        })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_err)?;
    }

    let tmp_path = temp_path(path);
    let mut file = fs::File::create(&tmp_path).await.map_err(io_err)?;
    file.write_all(&json).await.map_err(io_err)?;
    file.write_all(b"\n").await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    drop(file);

    if let Err(e) = fs::rename(&tmp_path, path).await {
        let _ = fs::remove_file(&tmp_path).await;
        return Err(io_err(e));
    }

    debug!(path = %path.display(), records = dataset.len(), "체크포인트 저장");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
