//! 픽셀 밝기.
//!
//! HSV의 V 채널(`max(r, g, b) / 255`)을 쓴다. RGB 평균이 아니다. 알파는 무시.

use image::{Rgba, RgbaImage};

/// HSV value, `[0, 1]`
#[inline]
pub fn hsv_value(pixel: &Rgba<u8>) -> f64 {
    let [r, g, b, _] = pixel.0;
    f64::from(r.max(g).max(b)) / 255.0
}

/// 행 우선(위 → 아래) 밝기 값
pub fn brightness_values(image: &RgbaImage) -> Vec<f64> {
    image.pixels().map(hsv_value).collect()
}
