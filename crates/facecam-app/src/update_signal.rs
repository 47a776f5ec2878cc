//! 폴링 태스크 → 호스트 스레드 업데이트 신호.
//!
//! `tokio::watch` 기반. 값은 하나만 보관되므로 호스트가 아직 처리하지 않은 중간 업데이트는
//! 새 업데이트로 덮어써진다. 호스트는 항상 최신 그리드만 본다.

use facecam_core::models::update::GridUpdate;
use tokio::sync::watch;
use tracing::debug;

/// 업데이트 신호 채널 생성
pub fn channel() -> (UpdateSender, UpdateReceiver) {
    let (tx, rx) = watch::channel(None);
    (UpdateSender { tx }, UpdateReceiver { rx })
}

/// 폴링 태스크 쪽 송신기
#[derive(Debug)]
pub struct UpdateSender {
    tx: watch::Sender<Option<GridUpdate>>,
}

impl UpdateSender {
    /// 최신 업데이트 발행 (이전 미처리 업데이트는 버려진다)
    pub fn publish(&self, update: GridUpdate) {
        debug!("업데이트 발행: #{}", update.sequence);
        self.tx.send_replace(Some(update));
    }

    /// 수신기 추가 생성
    pub fn subscribe(&self) -> UpdateReceiver {
        UpdateReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// 살아있는 수신기가 하나도 없는지
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// 호스트 쪽 수신기
#[derive(Debug, Clone)]
pub struct UpdateReceiver {
    rx: watch::Receiver<Option<GridUpdate>>,
}

impl UpdateReceiver {
    /// 아직 보지 않은 최신 업데이트를 꺼낸다 (논블로킹)
    ///
    /// 호스트의 idle/외부 이벤트 콜백에서 호출한다.
    pub fn take_latest(&mut self) -> Option<GridUpdate> {
        let current = self.rx.borrow_and_update();
        if current.has_changed() {
            current.clone()
        } else {
            None
        }
    }

    /// 새 업데이트를 기다린다. 송신기가 사라지면 `None`.
    pub async fn changed(&mut self) -> Option<GridUpdate> {
        self.rx.changed().await.ok()?;
        self.rx.borrow_and_update().clone()
    }
}
