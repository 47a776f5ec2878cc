//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate가 이 trait들을 구현하며, `facecam-app`에서 `Arc<dyn T>`로 와이어링한다.
//!
//! 네트워크/샘플링 포트는 `async_trait`으로 object safety를 보장한다.
//! 호스트 포트는 호스트 스레드 전용이라 동기 trait이며 `Send`를 요구하지 않는다.

pub mod host;
pub mod vision;
