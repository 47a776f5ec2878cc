//! 썸네일 생성.
//!
//! fast_image_resize 기반 고정 크기 리사이즈. 종횡비는 유지하지 않는다.
//! 같은 `ResizeStrategy`면 같은 입력에 항상 같은 바이트가 나오므로
//! 리사이즈 결과의 해시를 변경 감지에 그대로 쓸 수 있다.

use facecam_core::config::ResizeStrategy;
use facecam_core::error::CoreError;
use fast_image_resize::{images::Image as FirImage, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, RgbaImage};
use tracing::debug;

fn resize_alg(strategy: ResizeStrategy) -> ResizeAlg {
    match strategy {
        ResizeStrategy::Nearest => ResizeAlg::Nearest,
        ResizeStrategy::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        ResizeStrategy::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// `width`×`height` RGBA8로 리사이즈
pub fn resize_exact(
    image: &DynamicImage,
    width: u32,
    height: u32,
    strategy: ResizeStrategy,
) -> Result<RgbaImage, CoreError> {
    let (src_w, src_h) = (image.width(), image.height());

    if src_w == 0 || src_h == 0 {
        return Err(CoreError::Decode("소스 이미지 크기 0".to_string()));
    }
    if width == 0 || height == 0 {
        return Err(CoreError::validation(
            "grid",
            format!("목표 이미지 크기 0: {width}x{height}"),
        ));
    }

    let src_rgba = image.to_rgba8();

    // 동일 크기면 변환만
    if src_w == width && src_h == height {
        return Ok(src_rgba);
    }

    let src_image = FirImage::from_vec_u8(src_w, src_h, src_rgba.into_raw(), PixelType::U8x4)
        .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, PixelType::U8x4);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(resize_alg(strategy));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    let result = RgbaImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("결과 이미지 생성 실패".to_string()))?;

    debug!(
        "썸네일 생성: {}x{} → {}x{} ({:?})",
        src_w, src_h, width, height, strategy
    );

    Ok(result)
}
