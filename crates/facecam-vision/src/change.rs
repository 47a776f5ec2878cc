//! 변경 감지.
//!
//! 직전 폴링의 콘텐츠 해시와 현재 해시를 바이트 단위로 비교한다.
//! 그리드 전체 대신 32바이트 해시만 비교하므로 매 폴링마다 부담이 없다.

use facecam_core::models::grid::ContentHash;
use std::cmp::Ordering;

/// 두 바이트 배열의 순서 비교: 길이 먼저, 같으면 첫 번째로 다른 바이트
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| {
        a.iter()
            .zip(b)
            .map(|(x, y)| x.cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// 이미지가 바뀌었는지 판단
///
/// 직전 해시가 없으면(첫 폴링) 항상 `true`.
pub fn has_changed(previous: Option<&[u8]>, current: &[u8]) -> bool {
    match previous {
        None => true,
        Some(prev) => compare_bytes(prev, current).is_ne(),
    }
}

/// `ContentHash` 버전
pub fn hash_changed(previous: Option<&ContentHash>, current: &ContentHash) -> bool {
    has_changed(previous.map(ContentHash::as_bytes), current.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_poll_always_changed() {
        assert!(has_changed(None, &[]));
        assert!(has_changed(None, &[0u8; 32]));
        assert!(hash_changed(None, &ContentHash::from_bytes([5u8; 32])));
    }

    #[test]
    fn identical_hash_unchanged() {
        let h = [42u8; 32];
        assert!(!has_changed(Some(&h[..]), &h));

        let ch = ContentHash::from_bytes(h);
        assert!(!hash_changed(Some(&ch), &ch));
    }

    #[test]
    fn any_byte_difference_is_change() {
        let a = [0u8; 32];
        for i in 0..32 {
            let mut b = a;
            b[i] = 1;
            assert!(has_changed(Some(&a[..]), &b), "byte {i}");
        }
    }

    #[test]
    fn length_difference_is_change() {
        assert!(has_changed(Some(&[1u8, 2, 3][..]), &[1, 2]));
        assert!(has_changed(Some(&[1u8, 2][..]), &[1, 2, 3]));
    }

    #[test]
    fn compare_orders_length_first() {
        assert_eq!(compare_bytes(&[9], &[0, 0]), Ordering::Less);
        assert_eq!(compare_bytes(&[0, 0], &[9]), Ordering::Greater);
    }

    #[test]
    fn compare_first_differing_byte() {
        assert_eq!(compare_bytes(&[1, 2, 3], &[1, 2, 3]), Ordering::Equal);
        assert_eq!(compare_bytes(&[1, 5, 0], &[1, 2, 9]), Ordering::Greater);
        assert_eq!(compare_bytes(&[1, 2, 0], &[1, 2, 9]), Ordering::Less);
        assert_eq!(compare_bytes(&[], &[]), Ordering::Equal);
    }
}
