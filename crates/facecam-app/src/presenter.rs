//! 호스트 표시.
//!
//! 호스트 스레드에서만 쓰는 동기 객체. 선택된 면에 공간 필드 프리미티브를 붙이고,
//! 새 그리드가 오면 면의 현재 UV 바운딩 박스로 리샘플링해 프리미티브를 갱신한다.

use facecam_core::config::DisplayConfig;
use facecam_core::error::CoreError;
use facecam_core::models::domain::FieldSample;
use facecam_core::models::grid::ImageGrid;
use facecam_core::models::host::{DisplayStyle, PrimitiveId, ResultSchema, SchemaHandle};
use facecam_core::ports::host::{AnalysisTarget, SpatialFieldHost};
use facecam_vision::resampler;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::update_signal::UpdateReceiver;

/// 면 하나의 분석 표시 관리자
pub struct FieldPresenter<H: SpatialFieldHost, T: AnalysisTarget> {
    host: H,
    target: T,
    style: DisplayStyle,
    schema: ResultSchema,
    domain_inset: f64,
    schema_handle: Option<SchemaHandle>,
    primitive: Option<PrimitiveId>,
    /// 아직 표시하지 못한 최신 그리드
    pending: Option<Arc<ImageGrid>>,
    /// 업데이트마다 재사용하는 샘플 버퍼
    samples: Vec<FieldSample>,
}

impl<H: SpatialFieldHost, T: AnalysisTarget> FieldPresenter<H, T> {
    pub fn new(host: H, target: T, config: &DisplayConfig) -> Self {
        Self {
            host,
            target,
            style: config.style(),
            schema: config.schema(),
            domain_inset: config.domain_inset,
            schema_handle: None,
            primitive: None,
            pending: None,
            samples: Vec::new(),
        }
    }

    /// 표시 스타일 적용 + 새 프리미티브 생성 (이전 프리미티브는 제거)
    pub fn attach(&mut self) -> Result<PrimitiveId, CoreError> {
        self.host.apply_display_style(&self.style)?;

        // 제거에 실패하면 이전 id를 그대로 들고 있는다
        if let Some(old) = self.primitive {
            debug!("이전 프리미티브 제거: {old:?}");
            self.host.remove_primitive(old)?;
            self.primitive = None;
        }

        let id = self.host.add_primitive()?;
        self.primitive = Some(id);
        info!("프리미티브 연결: {id:?} (스타일: {})", self.style.name);
        Ok(id)
    }

    /// 그리드를 면 위에 표시
    pub fn present(&mut self, grid: &ImageGrid) -> Result<(), CoreError> {
        let id = self
            .primitive
            .ok_or_else(|| CoreError::Host("프리미티브가 연결되지 않음 (attach 먼저 호출)".to_string()))?;
        let schema = self.ensure_schema()?;

        let mut domain = self.target.bounding_box()?;
        if self.domain_inset > 0.0 {
            domain = domain.inset(self.domain_inset)?;
        }

        resampler::resample_into(grid, &domain, &mut self.samples)?;
        self.host.update_primitive(id, &self.samples, schema)?;

        debug!(
            "필드 갱신: {} samples, hash={}",
            self.samples.len(),
            grid.hash().short()
        );
        Ok(())
    }

    /// 처리하지 않은 최신 업데이트가 있으면 표시. 표시했으면 `true`.
    ///
    /// 호스트의 idle/외부 이벤트 콜백에서 호출한다. `attach` 전에는 업데이트를
    /// 꺼내지 않는다. 표시에 실패한 그리드는 보관했다가 다음 호출에서 다시
    /// 시도하며, 그 사이 더 새로운 업데이트가 오면 그것으로 교체한다.
    pub fn pump(&mut self, updates: &mut UpdateReceiver) -> Result<bool, CoreError> {
        if self.primitive.is_none() {
            return Ok(false);
        }
        if let Some(update) = updates.take_latest() {
            self.pending = Some(update.grid);
        }

        let Some(grid) = self.pending.take() else {
            return Ok(false);
        };
        if let Err(e) = self.present(&grid) {
            warn!("필드 표시 실패, 다음 호출에서 재시도: {e}");
            self.pending = Some(grid);
            return Err(e);
        }
        Ok(true)
    }

    /// 프리미티브 제거
    pub fn detach(&mut self) -> Result<(), CoreError> {
        if let Some(id) = self.primitive.take() {
            self.host.remove_primitive(id)?;
            info!("프리미티브 해제: {id:?}");
        }
        Ok(())
    }

    pub fn primitive(&self) -> Option<PrimitiveId> {
        self.primitive
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// 결과 스키마: 이미 등록된 것이 있으면 첫 번째를 재사용, 없으면 한 번만 등록
    fn ensure_schema(&mut self) -> Result<SchemaHandle, CoreError> {
        if let Some(handle) = self.schema_handle {
            return Ok(handle);
        }

        let handle = match self.host.registered_schemas().first() {
            Some(&existing) => existing,
            None => {
                let handle = self.host.register_schema(&self.schema)?;
                info!("결과 스키마 등록: {} → {handle:?}", self.schema.name);
                handle
            }
        };
        self.schema_handle = Some(handle);
        Ok(handle)
    }
}
