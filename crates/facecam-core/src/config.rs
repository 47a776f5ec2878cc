//! 애플리케이션 설정 구조체.
//!
//! 이미지 URL, 그리드 크기, 폴링 주기, 표시 스타일 등 런타임 설정을 정의한다.
//! `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;
use crate::models::host::{DisplayStyle, ResultSchema};

/// 기본 이미지 URL (체르마트에서 본 마터호른 웹캠)
pub const DEFAULT_IMAGE_URL: &str = "http://www.ggb.ch/webcam.php?e_1__getimage=1";

/// 최상위 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacecamConfig {
    /// 이미지 소스 설정
    pub source: SourceConfig,
    /// 그리드 설정
    pub grid: GridConfig,
    /// 폴링 설정
    pub poll: PollConfig,
    /// 비전(이미지 처리) 설정
    #[serde(default)]
    pub vision: VisionConfig,
    /// 호스트 표시 설정
    #[serde(default)]
    pub display: DisplayConfig,
}

// ============================================================
// 이미지 소스 설정
// ============================================================

/// 이미지 소스 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// 이미지 URL (http/https)
    pub image_url: String,
    /// 요청 타임아웃 (밀리초): 다운로드 정지 시간의 상한
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User-Agent 헤더
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// 중간 캐시 우회용 `_ts=` 쿼리 파라미터 추가
    #[serde(default)]
    pub cache_bust: bool,
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    format!("facecam/{}", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// 그리드 설정
// ============================================================

/// 리사이즈 알고리즘: 같은 설정이면 같은 입력에 항상 같은 출력
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeStrategy {
    /// 최근접 이웃
    #[default]
    Nearest,
    /// 쌍선형 보간
    Bilinear,
    /// Lanczos3 컨볼루션
    Lanczos3,
}

/// 그리드 설정: 세션 동안 고정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// 그리드 너비 (셀)
    #[serde(default = "default_grid_size")]
    pub width: u32,
    /// 그리드 높이 (셀)
    #[serde(default = "default_grid_size")]
    pub height: u32,
    /// 리사이즈 알고리즘
    #[serde(default)]
    pub resize: ResizeStrategy,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            resize: ResizeStrategy::default(),
        }
    }
}

fn default_grid_size() -> u32 {
    200
}

// ============================================================
// 폴링 설정
// ============================================================

/// 폴링 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    /// 폴링 간격 (밀리초)
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// 연속 실패 시 최대 대기 (밀리초)
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

fn default_interval_ms() -> u64 {
    200
}

fn default_max_backoff_ms() -> u64 {
    5_000
}

// ============================================================
// 비전 설정
// ============================================================

/// 비전 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// 소스 바이트 → 리사이즈 결과 LRU 캐시 크기 (0 = 비활성)
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    8
}

// ============================================================
// 표시 설정
// ============================================================

/// 호스트 표시 설정: 분석 표시 스타일 + 결과 스키마 + 도메인 여백
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_style_name")]
    pub style_name: String,
    #[serde(default)]
    pub show_grid_lines: bool,
    #[serde(default = "default_min_color")]
    pub min_color: [u8; 3],
    #[serde(default = "default_max_color")]
    pub max_color: [u8; 3],
    #[serde(default = "default_legend_steps")]
    pub legend_steps: u32,
    #[serde(default = "default_legend_rounding")]
    pub legend_rounding: f64,
    #[serde(default = "default_true")]
    pub show_legend: bool,
    /// 면 경계에서 안쪽으로 줄일 비율 `[0, 0.5)`
    #[serde(default)]
    pub domain_inset: f64,
    #[serde(default = "default_schema_name")]
    pub schema_name: String,
    #[serde(default = "default_schema_description")]
    pub schema_description: String,
}

impl DisplayConfig {
    /// 호스트에 넘길 표시 스타일
    pub fn style(&self) -> DisplayStyle {
        DisplayStyle {
            name: self.style_name.clone(),
            show_grid_lines: self.show_grid_lines,
            min_color: self.min_color,
            max_color: self.max_color,
            legend_steps: self.legend_steps,
            legend_rounding: self.legend_rounding,
            show_legend: self.show_legend,
        }
    }

    /// 호스트에 등록할 결과 스키마
    pub fn schema(&self) -> ResultSchema {
        ResultSchema {
            name: self.schema_name.clone(),
            description: self.schema_description.clone(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            style_name: default_style_name(),
            show_grid_lines: false,
            min_color: default_min_color(),
            max_color: default_max_color(),
            legend_steps: default_legend_steps(),
            legend_rounding: default_legend_rounding(),
            show_legend: true,
            domain_inset: 0.0,
            schema_name: default_schema_name(),
            schema_description: default_schema_description(),
        }
    }
}

fn default_style_name() -> String {
    "Facecam Display Style".to_string()
}

fn default_min_color() -> [u8; 3] {
    [0, 0, 0]
}

fn default_max_color() -> [u8; 3] {
    [255, 255, 255]
}

fn default_legend_steps() -> u32 {
    10
}

fn default_legend_rounding() -> f64 {
    0.05
}

fn default_schema_name() -> String {
    "Schema 1".to_string()
}

fn default_schema_description() -> String {
    "Schema 1 Description".to_string()
}

fn default_true() -> bool {
    true
}

impl FacecamConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self {
            source: SourceConfig {
                image_url: DEFAULT_IMAGE_URL.to_string(),
                timeout_ms: default_timeout_ms(),
                user_agent: default_user_agent(),
                cache_bust: false,
            },
            grid: GridConfig::default(),
            poll: PollConfig::default(),
            vision: VisionConfig::default(),
            display: DisplayConfig::default(),
        }
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = url::Url::parse(&self.source.image_url).map_err(|e| {
            CoreError::Config(format!(
                "이미지 URL 파싱 실패: {}: {e}",
                self.source.image_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "지원하지 않는 URL 스킴: {}",
                url.scheme()
            )));
        }
        if self.source.timeout_ms == 0 {
            return Err(CoreError::Config("timeout_ms는 0보다 커야 함".to_string()));
        }
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(CoreError::Config(format!(
                "그리드 크기는 0보다 커야 함: {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.poll.interval_ms == 0 {
            return Err(CoreError::Config("interval_ms는 0보다 커야 함".to_string()));
        }
        if self.poll.max_backoff_ms < self.poll.interval_ms {
            return Err(CoreError::Config(format!(
                "max_backoff_ms({})가 interval_ms({})보다 작음",
                self.poll.max_backoff_ms, self.poll.interval_ms
            )));
        }
        if !(0.0..0.5).contains(&self.display.domain_inset) {
            return Err(CoreError::Config(format!(
                "domain_inset은 [0, 0.5) 범위여야 함: {}",
                self.display.domain_inset
            )));
        }
        Ok(())
    }
}
