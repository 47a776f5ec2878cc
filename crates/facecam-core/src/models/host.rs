//! 호스트 시각화 객체 모델.
//!
//! 호스트(BIM 애플리케이션)의 분석 결과 표시 기능을 추상화한 핸들과 설정값.

use serde::{Deserialize, Serialize};

/// 호스트에 등록된 결과 스키마 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaHandle(pub i32);

/// 호스트의 면별 공간 필드 프리미티브 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrimitiveId(pub i32);

/// 결과 스키마 (이름 + 설명), 세션당 한 번 등록 후 재사용
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSchema {
    pub name: String,
    pub description: String,
}

/// 분석 표시 스타일: 그리드 라인 끄기, 흑백 컬러 범위, 범례
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayStyle {
    /// 호스트 문서에서 스타일을 찾을 때 쓰는 이름
    pub name: String,
    pub show_grid_lines: bool,
    /// 값 0.0의 색 (RGB)
    pub min_color: [u8; 3],
    /// 값 1.0의 색 (RGB)
    pub max_color: [u8; 3],
    pub legend_steps: u32,
    pub legend_rounding: f64,
    pub show_legend: bool,
}
