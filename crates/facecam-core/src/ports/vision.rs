//! 이미지 수집/샘플링 포트.
//!
//! 구현: `facecam-network` (HTTP 이미지 소스), `facecam-vision` (그리드 샘플러)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::grid::ImageGrid;

/// 원격 이미지 원시 바이트 공급자
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// `url`의 바이트를 그대로 가져온다.
    ///
    /// 연결 실패, 타임아웃, 2xx 이외 응답은 `CoreError::Fetch`. 재시도하지 않는다.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, CoreError>;
}

/// 이미지 → 고정 크기 밝기 그리드 샘플러
#[async_trait]
pub trait GridSampler: Send + Sync {
    /// 이미지를 받아 `width`×`height` 그리드로 정규화하고 콘텐츠 해시를 계산한다.
    async fn sample(&self, url: &str, width: u32, height: u32) -> Result<ImageGrid, CoreError>;
}
