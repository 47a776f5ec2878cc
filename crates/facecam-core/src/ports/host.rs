//! 호스트 렌더링 포트.
//!
//! 호스트 애플리케이션의 면 선택 결과와 공간 필드 관리자를 추상화한다.
//! 모든 메서드는 호스트가 지정한 스레드에서만 호출된다.

use crate::error::CoreError;
use crate::models::domain::{FieldSample, ParameterDomain};
use crate::models::host::{DisplayStyle, PrimitiveId, ResultSchema, SchemaHandle};

/// 사용자가 고른 면: 파라미터 바운딩 박스만 노출
pub trait AnalysisTarget {
    /// 면의 현재 UV 바운딩 박스
    fn bounding_box(&self) -> Result<ParameterDomain, CoreError>;
}

/// 호스트의 공간 필드 관리자
pub trait SpatialFieldHost {
    /// 분석 표시 스타일 적용 (같은 이름이 있으면 재사용)
    fn apply_display_style(&mut self, style: &DisplayStyle) -> Result<(), CoreError>;

    /// 이미 등록된 결과 스키마 목록
    fn registered_schemas(&self) -> Vec<SchemaHandle>;

    /// 결과 스키마 등록
    fn register_schema(&mut self, schema: &ResultSchema) -> Result<SchemaHandle, CoreError>;

    /// 대상 면에 새 프리미티브 추가
    fn add_primitive(&mut self) -> Result<PrimitiveId, CoreError>;

    /// 프리미티브 제거
    fn remove_primitive(&mut self, id: PrimitiveId) -> Result<(), CoreError>;

    /// 프리미티브의 점/값 갱신
    fn update_primitive(
        &mut self,
        id: PrimitiveId,
        samples: &[FieldSample],
        schema: SchemaHandle,
    ) -> Result<(), CoreError>;
}
