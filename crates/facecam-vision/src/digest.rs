//! SHA-256 다이제스트.
//!
//! 콘텐츠 해시는 리사이즈된 RGBA8 버퍼(위→아래 행 순서)에만 계산한다.
//! 컨테이너 메타데이터(EXIF, 압축 파라미터)가 바뀌어도 픽셀이 같으면 해시도 같다.

use facecam_core::models::grid::{ContentHash, HASH_LEN};
use image::RgbaImage;
use sha2::{Digest, Sha256};

fn sha256(bytes: &[u8]) -> [u8; HASH_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// 리사이즈된 픽셀 버퍼의 콘텐츠 해시
pub fn content_hash(image: &RgbaImage) -> ContentHash {
    ContentHash::from_bytes(sha256(image.as_raw()))
}

/// 다운로드한 원시 바이트의 다이제스트 (리사이즈 캐시 키)
pub fn source_digest(bytes: &[u8]) -> [u8; HASH_LEN] {
    sha256(bytes)
}
