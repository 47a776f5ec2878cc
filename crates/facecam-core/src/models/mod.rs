//! facecam 도메인 모델.
//!
//! 샘플링 파이프라인과 호스트 사이를 오가는 데이터 구조체를 정의한다.

pub mod domain;
pub mod grid;
pub mod host;
pub mod update;
