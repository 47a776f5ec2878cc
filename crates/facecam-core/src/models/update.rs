//! 폴링 루프 → 호스트 스레드 업데이트 이벤트.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::grid::ImageGrid;

/// 렌더링에 영향을 주는 새 그리드가 준비되었음을 알리는 이벤트
#[derive(Debug, Clone)]
pub struct GridUpdate {
    /// 발행한 세션 ID
    pub session_id: String,
    /// 세션 내 변경 순번 (1부터 증가)
    pub sequence: u64,
    /// 이미지를 받아온 시각
    pub captured_at: DateTime<Utc>,
    /// 새 밝기 그리드
    pub grid: Arc<ImageGrid>,
}
