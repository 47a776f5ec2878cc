//! # facecam-app
//!
//! 드라이버 크레이트.
//! 샘플링 세션을 백그라운드 폴링 태스크에서 돌리고, 변경된 그리드만 호스트 스레드로 넘긴다.
//!
//! ## 구조
//!
//! - [`session`]: 세션 상태 (직전 해시, 현재 그리드, 통계)와 한 번의 폴링
//! - [`poller`]: 취소 가능한 폴링 루프 + 실패 백오프
//! - [`update_signal`]: 최신 업데이트만 남기는 폴링 → 호스트 신호
//! - [`presenter`]: 호스트 스레드에서 그리드를 면 위에 표시
//! - [`wiring`]: 설정으로부터 어댑터 조립

pub mod poller;
pub mod presenter;
pub mod session;
pub mod update_signal;
pub mod wiring;

#[cfg(test)]
mod test_support;
