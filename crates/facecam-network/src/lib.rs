//! # facecam-network
//!
//! 네트워크 어댑터.
//! 웹캠 이미지 URL에서 원시 바이트를 받아오는 `ImageSource` 포트 구현을 담당한다.
//!
//! ## 사용 예시
//!
//! ```rust,ignore
//! use facecam_network::http_source::HttpImageSource;
//!
//! let source = HttpImageSource::new(&config.source)?;
//! let bytes = source.fetch(&config.source.image_url).await?;
//! ```

pub mod http_source;
