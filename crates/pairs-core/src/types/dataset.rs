//! 페어 데이터셋 문서.
//!
//! 디스크에 저장되는 단일 JSON 문서입니다. 레코드는 추가만 되며,
//! 기존 레코드는 실행 간에 변경되거나 삭제되지 않습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::PairRecord;

/// 새 데이터셋의 기본 이름.
pub const DEFAULT_DATASET_NAME: &str = "DEX Pairs";

/// 데이터셋 버전 (major.minor.patch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Default for DatasetVersion {
    fn default() -> Self {
        Self {
            major: 1,
            minor: 0,
            patch: 0,
        }
    }
}

impl fmt::Display for DatasetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// 이름, 버전, 타임스탬프, 키워드와 페어 레코드 목록으로 구성된 데이터셋.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairDataset {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub version: DatasetVersion,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    /// 레지스트리 인덱스 `[0, len)` 순서로 쌓인 레코드
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tokens: Vec<PairRecord>,
}

impl Default for PairDataset {
    fn default() -> Self {
        Self {
            name: DEFAULT_DATASET_NAME.to_string(),
            timestamp: Utc::now(),
            version: DatasetVersion::default(),
            keywords: Vec::new(),
            tokens: Vec::new(),
        }
    }
}

impl PairDataset {
    /// 빈 데이터셋을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 다음 실행이 가져올 첫 레지스트리 인덱스.
    pub fn resume_offset(&self) -> u64 {
        self.tokens.len() as u64
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 배치를 레코드 목록 끝에 추가합니다.
    pub fn append(&mut self, batch: Vec<PairRecord>) {
        self.tokens.extend(batch);
    }

    /// 레코드가 추가된 실행의 저장 직전에 호출합니다.
    ///
    /// 추가는 minor 버전을 올리고 patch를 0으로 되돌립니다.
    pub fn mark_revised(&mut self, at: DateTime<Utc>) {
        self.version.minor += 1;
        self.version.patch = 0;
        self.timestamp = at;
    }
}

/// `null`로 저장된 목록을 빈 목록으로 읽습니다.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
