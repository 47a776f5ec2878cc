//! 폴링 루프.
//!
//! 세션을 소유한 채 `interval_ms`마다 샘플링하고, 변경이 있을 때만 업데이트를 발행한다.
//! 반복은 순차적이라 요청이 겹치지 않는다. 종료 신호는 매 반복 시작과 대기 중에 확인한다.
//! 진행 중인 요청은 중단하지 않으며 HTTP 타임아웃이 그 상한이다.

use facecam_core::config::PollConfig;
use facecam_core::error::CoreError;
use facecam_core::ports::vision::GridSampler;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::session::{PollOutcome, SamplingSession};
use crate::update_signal::UpdateSender;

/// 다음 폴링까지 대기 시간
///
/// 실패가 없으면 `interval`, 연속 실패 n회면 `interval × 2^n` (최대 `max_backoff`).
pub fn backoff_delay(interval: Duration, max_backoff: Duration, consecutive_failures: u32) -> Duration {
    if consecutive_failures == 0 {
        return interval;
    }
    let factor = 1u32 << consecutive_failures.min(16);
    interval.saturating_mul(factor).min(max_backoff.max(interval))
}

/// 폴링 루프
pub struct Poller {
    session: SamplingSession,
    sampler: Arc<dyn GridSampler>,
    updates: UpdateSender,
    interval: Duration,
    max_backoff: Duration,
}

impl Poller {
    pub fn new(
        session: SamplingSession,
        sampler: Arc<dyn GridSampler>,
        updates: UpdateSender,
        config: &PollConfig,
    ) -> Self {
        Self {
            session,
            sampler,
            updates,
            interval: config.interval(),
            max_backoff: config.max_backoff(),
        }
    }

    /// 종료 신호가 올 때까지 폴링. 끝나면 세션을 돌려준다.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> SamplingSession {
        info!(
            "[{}] 폴링 시작: url={}, grid={:?}, interval={}ms",
            self.session.id(),
            self.session.image_url(),
            self.session.dimensions(),
            self.interval.as_millis()
        );

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            match self.session.poll_once(self.sampler.as_ref()).await {
                Ok(PollOutcome::Changed(update)) => self.updates.publish(update),
                Ok(PollOutcome::Unchanged) => {}
                Err(e) => self.report_failure(&e),
            }

            let delay = backoff_delay(
                self.interval,
                self.max_backoff,
                self.session.stats().consecutive_failures,
            );

            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                res = shutdown_rx.changed() => {
                    if res.is_err() {
                        debug!("[{}] 종료 송신기 해제됨", self.session.id());
                        break;
                    }
                }
            }
        }

        let stats = self.session.stats();
        info!(
            "[{}] 폴링 종료: polls={}, changes={}, failures={}",
            self.session.id(),
            stats.polls,
            stats.changes,
            stats.failures
        );
        self.session
    }

    fn report_failure(&self, e: &CoreError) {
        let failures = self.session.stats().consecutive_failures;
        if e.is_transient() {
            warn!(
                "[{}] 폴링 실패 (연속 {failures}회): {e}",
                self.session.id()
            );
        } else {
            error!(
                "[{}] 폴링 실패 (연속 {failures}회): {e}",
                self.session.id()
            );
        }
    }

    /// tokio 태스크로 실행
    pub fn spawn(self) -> PollerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let join = tokio::spawn(self.run(shutdown_rx));
        PollerHandle { shutdown_tx, join }
    }
}

/// 실행 중인 폴링 태스크 핸들
pub struct PollerHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<SamplingSession>,
}

impl PollerHandle {
    /// 종료 신호 발송 (협조적 취소)
    pub fn stop(&self) {
        info!("폴링 종료 신호 발송");
        let _ = self.shutdown_tx.send(true);
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// 종료 신호 발송 후 태스크가 끝날 때까지 대기
    pub async fn shutdown(self) -> Result<SamplingSession, CoreError> {
        self.stop();
        self.join
            .await
            .map_err(|e| CoreError::Internal(format!("폴링 태스크 조인 실패: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{grid_with_seed, ScriptedSampler};
    use crate::update_signal;

    fn poll_config(interval_ms: u64, max_backoff_ms: u64) -> PollConfig {
        PollConfig {
            interval_ms,
            max_backoff_ms,
        }
    }

    fn session() -> SamplingSession {
        SamplingSession::new("face-1", "http://cam/a.jpg", 2, 2).unwrap()
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let interval = Duration::from_millis(200);
        let max = Duration::from_millis(5000);
        assert_eq!(backoff_delay(interval, max, 0), Duration::from_millis(200));
        assert_eq!(backoff_delay(interval, max, 1), Duration::from_millis(400));
        assert_eq!(backoff_delay(interval, max, 2), Duration::from_millis(800));
        assert_eq!(backoff_delay(interval, max, 4), Duration::from_millis(3200));
        assert_eq!(backoff_delay(interval, max, 5), max);
        assert_eq!(backoff_delay(interval, max, u32::MAX), max);
    }

    #[test]
    fn backoff_never_below_interval() {
        let interval = Duration::from_millis(500);
        let max = Duration::from_millis(100);
        assert_eq!(backoff_delay(interval, max, 3), interval);
    }

    #[tokio::test]
    async fn publishes_once_per_distinct_image() {
        let sampler = Arc::new(ScriptedSampler::new(vec![
            Ok(grid_with_seed(1)),
            Ok(grid_with_seed(1)),
            Ok(grid_with_seed(2)),
            Ok(grid_with_seed(2)),
        ]));
        let (tx, mut rx) = update_signal::channel();
        let handle = Poller::new(session(), sampler.clone(), tx, &poll_config(5, 50)).spawn();

        // 두 번째 이미지가 도착할 때까지 대기
        let last = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match rx.changed().await {
                    Some(update) if update.sequence == 2 => break update,
                    Some(_) => continue,
                    None => panic!("송신기가 먼저 닫힘"),
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(last.grid.hash(), grid_with_seed(2).hash());

        // 같은 이미지를 한 번 더 폴링할 때까지 대기
        tokio::time::timeout(Duration::from_secs(5), async {
            while sampler.calls().len() < 4 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
        assert!(rx.take_latest().is_none());

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.sequence(), 2);
        assert_eq!(session.stats().changes, 2);
        assert!(session.stats().polls >= 4);
        assert!(sampler.calls().len() as u64 == session.stats().polls);
    }

    #[tokio::test]
    async fn stop_interrupts_long_sleep() {
        let sampler = Arc::new(ScriptedSampler::new(vec![Ok(grid_with_seed(1))]));
        let (tx, _rx) = update_signal::channel();
        let handle = Poller::new(session(), sampler, tx, &poll_config(60_000, 60_000)).spawn();

        tokio::time::sleep(Duration::from_millis(50)).await;
        let session = tokio::time::timeout(Duration::from_secs(5), handle.shutdown())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.stats().polls, 1);
    }

    #[tokio::test]
    async fn stops_when_shutdown_sender_dropped() {
        let sampler = Arc::new(ScriptedSampler::new(vec![Ok(grid_with_seed(1))]));
        let (tx, _rx) = update_signal::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(
            Poller::new(session(), sampler, tx, &poll_config(60_000, 60_000)).run(shutdown_rx),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(shutdown_tx);

        let session = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.stats().polls, 1);
    }

    #[tokio::test]
    async fn stopped_before_start_never_polls() {
        let sampler = Arc::new(ScriptedSampler::new(vec![Ok(grid_with_seed(1))]));
        let (tx, mut rx) = update_signal::channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        shutdown_tx.send(true).unwrap();

        let session = Poller::new(session(), sampler.clone(), tx, &poll_config(5, 50))
            .run(shutdown_rx)
            .await;
        assert_eq!(session.stats().polls, 0);
        assert!(sampler.calls().is_empty());
        assert!(rx.take_latest().is_none());
    }

    #[tokio::test]
    async fn failures_publish_nothing_and_count() {
        let sampler = Arc::new(ScriptedSampler::new(Vec::new()));
        let (tx, mut rx) = update_signal::channel();
        let handle = Poller::new(session(), sampler, tx, &poll_config(5, 20)).spawn();

        tokio::time::sleep(Duration::from_millis(100)).await;
        let session = handle.shutdown().await.unwrap();

        let stats = session.stats();
        assert!(stats.failures >= 1);
        assert_eq!(stats.failures, stats.polls);
        assert_eq!(u64::from(stats.consecutive_failures), stats.failures);
        assert!(session.last_hash().is_none());
        assert!(rx.take_latest().is_none());
    }

    #[tokio::test]
    async fn recovers_after_transient_failure() {
        let sampler = Arc::new(ScriptedSampler::new(vec![
            Err(CoreError::Fetch {
                url: "http://cam/a.jpg".to_string(),
                message: "HTTP 503".to_string(),
            }),
            Ok(grid_with_seed(9)),
        ]));
        let (tx, mut rx) = update_signal::channel();
        let handle = Poller::new(session(), sampler, tx, &poll_config(5, 40)).spawn();

        let update = tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(update.sequence, 1);

        let session = handle.shutdown().await.unwrap();
        assert_eq!(session.stats().failures, 1);
        assert_eq!(session.stats().consecutive_failures, 0);
    }
}
