//! 샘플링 세션.
//!
//! 면 하나에 대한 폴링 상태. 직전 콘텐츠 해시와 현재 그리드를 들고 있으며,
//! 폴링 태스크가 단독 소유한다. 면이 여러 개면 세션도 여러 개이고 서로 독립이다.

use chrono::Utc;
use facecam_core::config::FacecamConfig;
use facecam_core::error::CoreError;
use facecam_core::models::grid::{ContentHash, ImageGrid};
use facecam_core::models::update::GridUpdate;
use facecam_core::ports::vision::GridSampler;
use facecam_vision::change;
use std::sync::Arc;
use tracing::{debug, info};

/// 폴링 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    /// 전체 폴링 횟수
    pub polls: u64,
    /// 변경 감지 횟수
    pub changes: u64,
    /// 실패 횟수 (누적)
    pub failures: u64,
    /// 연속 실패 횟수: 성공하면 0으로 초기화
    pub consecutive_failures: u32,
}

/// 한 번의 폴링 결과
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// 새 이미지: 호스트에 넘길 업데이트
    Changed(GridUpdate),
    /// 직전과 같은 이미지
    Unchanged,
}

/// 샘플링 세션
#[derive(Debug)]
pub struct SamplingSession {
    id: String,
    image_url: String,
    width: u32,
    height: u32,
    last_hash: Option<ContentHash>,
    current: Option<Arc<ImageGrid>>,
    sequence: u64,
    stats: PollStats,
}

impl SamplingSession {
    /// 새 세션: 그리드 크기는 세션 동안 고정
    pub fn new(
        id: impl Into<String>,
        image_url: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::validation(
                "grid",
                format!("그리드 크기는 0보다 커야 함: {width}x{height}"),
            ));
        }

        Ok(Self {
            id: id.into(),
            image_url: image_url.into(),
            width,
            height,
            last_hash: None,
            current: None,
            sequence: 0,
            stats: PollStats::default(),
        })
    }

    /// 설정의 URL/그리드 크기로 세션 생성
    pub fn from_config(id: impl Into<String>, config: &FacecamConfig) -> Result<Self, CoreError> {
        Self::new(
            id,
            config.source.image_url.clone(),
            config.grid.width,
            config.grid.height,
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn last_hash(&self) -> Option<&ContentHash> {
        self.last_hash.as_ref()
    }

    /// 마지막으로 변경이 감지된 그리드
    pub fn current_grid(&self) -> Option<Arc<ImageGrid>> {
        self.current.clone()
    }

    /// 지금까지 발행한 변경 순번
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn stats(&self) -> PollStats {
        self.stats
    }

    /// 샘플링 → 변경 감지 한 번
    ///
    /// 실패하면 직전 해시와 그리드는 그대로 두고 에러만 돌려준다.
    pub async fn poll_once(&mut self, sampler: &dyn GridSampler) -> Result<PollOutcome, CoreError> {
        self.stats.polls += 1;

        let grid = match sampler.sample(&self.image_url, self.width, self.height).await {
            Ok(grid) => grid,
            Err(e) => {
                self.stats.failures += 1;
                self.stats.consecutive_failures = self.stats.consecutive_failures.saturating_add(1);
                return Err(e);
            }
        };
        self.stats.consecutive_failures = 0;

        if !change::hash_changed(self.last_hash.as_ref(), grid.hash()) {
            debug!("[{}] 변경 없음: hash={}", self.id, grid.hash().short());
            return Ok(PollOutcome::Unchanged);
        }

        self.sequence += 1;
        self.stats.changes += 1;
        self.last_hash = Some(*grid.hash());
        let grid = Arc::new(grid);
        self.current = Some(grid.clone());

        info!(
            "[{}] 이미지 변경 감지 #{}: hash={}",
            self.id,
            self.sequence,
            grid.hash().short()
        );

        Ok(PollOutcome::Changed(GridUpdate {
            session_id: self.id.clone(),
            sequence: self.sequence,
            captured_at: Utc::now(),
            grid,
        }))
    }
}
