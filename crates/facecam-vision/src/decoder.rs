//! 이미지 디코딩.
//!
//! 컨테이너 포맷은 바이트 내용으로 추정한다 (JPEG/PNG/GIF/BMP 등 `image` 기본 포맷).

use facecam_core::error::CoreError;
use image::DynamicImage;
use tracing::debug;

/// 바이트 → 디코딩된 이미지
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::Decode("빈 응답 본문".to_string()));
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| CoreError::Decode(format!("{e} ({} bytes)", bytes.len())))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(CoreError::Decode(format!(
            "이미지 크기 0: {}x{}",
            image.width(),
            image.height()
        )));
    }

    debug!(
        "이미지 디코딩 완료: {}x{} ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(image)
}
