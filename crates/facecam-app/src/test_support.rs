//! 단위 테스트 공용 가짜 어댑터.

use async_trait::async_trait;
use facecam_core::error::CoreError;
use facecam_core::models::grid::{ContentHash, ImageGrid};
use facecam_core::ports::vision::GridSampler;
use std::collections::VecDeque;
use std::sync::Mutex;

/// 2×2 그리드, 해시는 `[seed; 32]`
pub fn grid_with_seed(seed: u8) -> ImageGrid {
    let v = f64::from(seed) / 255.0;
    ImageGrid::new(
        2,
        2,
        vec![v, v / 2.0, v / 3.0, v / 4.0],
        ContentHash::from_bytes([seed; 32]),
    )
    .unwrap()
}

/// 정해진 순서대로 결과를 돌려주는 샘플러.
/// 스크립트가 끝나면 마지막 성공 그리드를 반복한다.
pub struct ScriptedSampler {
    script: Mutex<VecDeque<Result<ImageGrid, CoreError>>>,
    last_ok: Mutex<Option<ImageGrid>>,
    calls: Mutex<Vec<(String, u32, u32)>>,
}

impl ScriptedSampler {
    pub fn new(script: Vec<Result<ImageGrid, CoreError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last_ok: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, u32, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GridSampler for ScriptedSampler {
    async fn sample(&self, url: &str, width: u32, height: u32) -> Result<ImageGrid, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), width, height));

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(grid)) => {
                *self.last_ok.lock().unwrap() = Some(grid.clone());
                Ok(grid)
            }
            Some(Err(e)) => Err(e),
            None => self.last_ok.lock().unwrap().clone().ok_or_else(|| {
                CoreError::Fetch {
                    url: url.to_string(),
                    message: "스크립트 없음".to_string(),
                }
            }),
        }
    }
}
