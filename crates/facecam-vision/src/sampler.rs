//! 이미지 샘플러.
//!
//! `GridSampler` 포트 구현. 다운로드 → 디코딩 → 리사이즈 → 콘텐츠 해시 → 밝기 그리드.
//!
//! 웹캠 서버는 대부분의 폴링에서 같은 바이트를 돌려준다. 원시 바이트 다이제스트를 키로
//! 리사이즈 결과를 LRU 캐시에 두어, 같은 응답이면 디코딩과 리사이즈를 건너뛴다.
//! 캐시는 샘플러 인스턴스 소유이며 세션 간에 공유되지 않는다.

use async_trait::async_trait;
use facecam_core::config::ResizeStrategy;
use facecam_core::error::CoreError;
use facecam_core::models::grid::{ImageGrid, HASH_LEN};
use facecam_core::ports::vision::{GridSampler, ImageSource};
use image::RgbaImage;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::debug;

use crate::brightness;
use crate::decoder;
use crate::digest;
use crate::thumbnail;

/// 캐시 키: (원시 바이트 다이제스트, 목표 너비, 목표 높이, 리사이즈 알고리즘)
type CacheKey = ([u8; HASH_LEN], u32, u32, ResizeStrategy);

type ResizeCache = Arc<Mutex<LruCache<CacheKey, Arc<RgbaImage>>>>;

/// 그리드 크기 사전 검증 (다운로드 전에 실패시키기 위함)
fn check_dimensions(width: u32, height: u32) -> Result<(), CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::validation(
            "grid",
            format!("그리드 크기는 0보다 커야 함: {width}x{height}"),
        ));
    }
    Ok(())
}

/// 리사이즈된 RGBA 이미지 → 밝기 그리드
pub fn grid_from_rgba(image: &RgbaImage) -> Result<ImageGrid, CoreError> {
    let hash = digest::content_hash(image);
    let values = brightness::brightness_values(image);
    ImageGrid::new(image.width(), image.height(), values, hash)
}

/// CPU 작업 담당: `spawn_blocking`으로 넘기기 위해 `Clone + 'static`
#[derive(Clone)]
struct SampleWorker {
    strategy: ResizeStrategy,
    cache: Option<ResizeCache>,
}

impl SampleWorker {
    fn process(&self, bytes: &[u8], width: u32, height: u32) -> Result<ImageGrid, CoreError> {
        check_dimensions(width, height)?;

        let Some(cache) = &self.cache else {
            let decoded = decoder::decode(bytes)?;
            let resized = thumbnail::resize_exact(&decoded, width, height, self.strategy)?;
            return grid_from_rgba(&resized);
        };

        let key = (digest::source_digest(bytes), width, height, self.strategy);

        let cached = cache.lock().get(&key).cloned();
        let resized = match cached {
            Some(hit) => {
                debug!("리사이즈 캐시 히트: {width}x{height} ({} bytes)", bytes.len());
                hit
            }
            None => {
                debug!("리사이즈 캐시 미스: {width}x{height} ({} bytes)", bytes.len());
                let decoded = decoder::decode(bytes)?;
                let resized = Arc::new(thumbnail::resize_exact(
                    &decoded,
                    width,
                    height,
                    self.strategy,
                )?);
                cache.lock().put(key, resized.clone());
                resized
            }
        };

        grid_from_rgba(&resized)
    }
}

/// 이미지 샘플러: `GridSampler` 포트 구현
pub struct ImageSampler {
    source: Arc<dyn ImageSource>,
    worker: SampleWorker,
}

impl ImageSampler {
    /// 새 샘플러 생성 (`cache_capacity` 0이면 캐시 비활성)
    pub fn new(source: Arc<dyn ImageSource>, strategy: ResizeStrategy, cache_capacity: usize) -> Self {
        let cache = NonZeroUsize::new(cache_capacity)
            .map(|cap| Arc::new(Mutex::new(LruCache::new(cap))));
        Self {
            source,
            worker: SampleWorker { strategy, cache },
        }
    }

    pub fn strategy(&self) -> ResizeStrategy {
        self.worker.strategy
    }

    /// 이미 받아둔 바이트를 동기로 처리 (디코딩 → 리사이즈 → 해시 → 밝기)
    pub fn sample_bytes(&self, bytes: &[u8], width: u32, height: u32) -> Result<ImageGrid, CoreError> {
        self.worker.process(bytes, width, height)
    }

    /// 현재 캐시 항목 수
    pub fn cache_len(&self) -> usize {
        self.worker
            .cache
            .as_ref()
            .map(|c| c.lock().len())
            .unwrap_or(0)
    }
}

#[async_trait]
impl GridSampler for ImageSampler {
    async fn sample(&self, url: &str, width: u32, height: u32) -> Result<ImageGrid, CoreError> {
        check_dimensions(width, height)?;

        let bytes = self.source.fetch(url).await?;

        let worker = self.worker.clone();
        let grid = tokio::task::spawn_blocking(move || worker.process(&bytes, width, height))
            .await
            .map_err(|e| CoreError::Internal(format!("샘플링 작업 조인 실패: {e}")))??;

        debug!(
            "샘플링 완료: {}x{} hash={}",
            grid.width(),
            grid.height(),
            grid.hash().short()
        );
        Ok(grid)
    }
}
