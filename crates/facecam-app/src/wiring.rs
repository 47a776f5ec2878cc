//! 어댑터 조립.
//!
//! 설정 하나로 HTTP 소스 → 샘플러 → 세션 → 폴링 태스크를 묶는다.
//! 호스트 쪽 `FieldPresenter`는 호스트 스레드에서 따로 만든다.

use facecam_core::config::FacecamConfig;
use facecam_core::error::CoreError;
use facecam_core::ports::vision::GridSampler;
use facecam_network::http_source::HttpImageSource;
use facecam_vision::sampler::ImageSampler;
use std::sync::Arc;
use tracing::info;

use crate::poller::{Poller, PollerHandle};
use crate::session::SamplingSession;
use crate::update_signal::{self, UpdateReceiver};

/// 설정으로 HTTP 기반 샘플러 생성
pub fn build_sampler(config: &FacecamConfig) -> Result<Arc<ImageSampler>, CoreError> {
    let source = Arc::new(HttpImageSource::new(&config.source)?);
    Ok(Arc::new(ImageSampler::new(
        source,
        config.grid.resize,
        config.vision.cache_capacity,
    )))
}

/// 면 하나에 대한 폴링 태스크 시작 (tokio 런타임 안에서 호출)
pub fn start_session(
    id: impl Into<String>,
    config: &FacecamConfig,
) -> Result<(PollerHandle, UpdateReceiver), CoreError> {
    config.validate()?;
    let sampler = build_sampler(config)?;
    start_session_with(id, config, sampler)
}

/// 샘플러를 직접 주입해 폴링 태스크 시작
pub fn start_session_with(
    id: impl Into<String>,
    config: &FacecamConfig,
    sampler: Arc<dyn GridSampler>,
) -> Result<(PollerHandle, UpdateReceiver), CoreError> {
    let session = SamplingSession::from_config(id, config)?;
    info!(
        "세션 시작: {} ({}x{}, {:?})",
        session.id(),
        config.grid.width,
        config.grid.height,
        config.grid.resize
    );

    let (tx, rx) = update_signal::channel();
    let handle = Poller::new(session, sampler, tx, &config.poll).spawn();
    Ok((handle, rx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grid_with_seed, ScriptedSampler};
    use std::time::Duration;

    #[tokio::test]
    async fn invalid_config_rejected_before_spawn() {
        let mut config = FacecamConfig::default_config();
        config.source.image_url = "ftp://cam/a.jpg".to_string();
        assert!(matches!(
            start_session("s", &config),
            Err(CoreError::Config(_))
        ));
    }

    #[tokio::test]
    async fn injected_sampler_drives_updates() {
        let mut config = FacecamConfig::default_config();
        config.grid.width = 2;
        config.grid.height = 2;
        config.poll.interval_ms = 5;

        let sampler = Arc::new(ScriptedSampler::new(vec![Ok(grid_with_seed(4))]));
        let (handle, mut rx) = start_session_with("face-9", &config, sampler.clone()).unwrap();

        let update = tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(update.session_id, "face-9");

        handle.shutdown().await.unwrap();
        assert_eq!(sampler.calls()[0], (config.source.image_url.clone(), 2, 2));
    }

    #[test]
    fn build_sampler_uses_config_strategy() {
        let mut config = FacecamConfig::default_config();
        config.grid.resize = facecam_core::config::ResizeStrategy::Lanczos3;
        config.vision.cache_capacity = 0;
        let sampler = build_sampler(&config).unwrap();
        assert_eq!(sampler.strategy(), facecam_core::config::ResizeStrategy::Lanczos3);
        assert_eq!(sampler.cache_len(), 0);
    }
}
