//! 밝기 그리드와 콘텐츠 해시.
//!
//! `ImageGrid`는 폴링 한 번마다 새로 만들어지고 이후 변경되지 않는다.
//! 다음 폴링 결과가 나오면 통째로 교체된다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 콘텐츠 해시 길이 (SHA-256)
pub const HASH_LEN: usize = 32;

/// 리사이즈된 픽셀 버퍼의 SHA-256 다이제스트. 동등 비교 전용.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; HASH_LEN]);

impl ContentHash {
    pub fn from_bytes(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// 로그용 앞 8자리 hex
    pub fn short(&self) -> String {
        self.0[..4].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

/// 고정 크기 W×H 밝기 그리드
///
/// 값은 행 우선(row-major)으로 저장되며 행 0은 이미지의 맨 위 행이다.
/// 세로 뒤집기는 리샘플러가 담당한다.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGrid {
    width: u32,
    height: u32,
    brightness: Vec<f64>,
    hash: ContentHash,
}

impl ImageGrid {
    /// 그리드 생성: 전부 유효하거나 에러 (부분 그리드 없음)
    pub fn new(
        width: u32,
        height: u32,
        brightness: Vec<f64>,
        hash: ContentHash,
    ) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::validation(
                "grid",
                format!("그리드 크기는 0보다 커야 함: {width}x{height}"),
            ));
        }

        let expected = width as usize * height as usize;
        if brightness.len() != expected {
            return Err(CoreError::validation(
                "brightness",
                format!("값 개수 불일치: expected={expected}, actual={}", brightness.len()),
            ));
        }

        if let Some(idx) = brightness
            .iter()
            .position(|v| !v.is_finite() || !(0.0..=1.0).contains(v))
        {
            return Err(CoreError::validation(
                "brightness",
                format!("[0, 1] 범위 밖의 값: index={idx}, value={}", brightness[idx]),
            ));
        }

        Ok(Self {
            width,
            height,
            brightness,
            hash,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 셀 개수 (W×H)
    pub fn len(&self) -> usize {
        self.brightness.len()
    }

    /// 생성자가 빈 그리드를 거부하므로 항상 false
    pub fn is_empty(&self) -> bool {
        self.brightness.is_empty()
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    /// (x, y) 셀의 밝기. y=0이 이미지 맨 위 행.
    pub fn brightness_at(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.brightness
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// 행 우선 원시 값
    pub fn values(&self) -> &[f64] {
        &self.brightness
    }
}
