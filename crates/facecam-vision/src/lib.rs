//! # facecam-vision
//!
//! 이미지 샘플링 크레이트.
//! 원격 이미지를 고정 크기 흑백 밝기 그리드로 정규화하고(디코딩 → 리사이즈 → 해시 → 밝기),
//! 콘텐츠 해시로 변경 여부를 판단하며, 그리드를 임의의 파라미터 도메인에 리샘플링한다.

pub mod brightness;
pub mod change;
pub mod decoder;
pub mod digest;
pub mod resampler;
pub mod sampler;
pub mod thumbnail;
