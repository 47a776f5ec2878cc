//! 파라미터 도메인과 필드 샘플.
//!
//! 호스트가 선택된 면(face)의 UV 바운딩 박스를 `ParameterDomain`으로 넘기면,
//! 리샘플러가 그 안에 `FieldSample`을 채워 돌려준다.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// 2D 파라미터 공간의 직사각형 영역 `[u_min, u_max] × [v_min, v_max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterDomain {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl ParameterDomain {
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// 퇴화/역전/비유한 경계 검사
    pub fn validate(&self) -> Result<(), CoreError> {
        let finite = [self.u_min, self.u_max, self.v_min, self.v_max]
            .iter()
            .all(|b| b.is_finite());

        if !finite || self.u_min >= self.u_max || self.v_min >= self.v_max {
            return Err(CoreError::InvalidDomain {
                u_min: self.u_min,
                u_max: self.u_max,
                v_min: self.v_min,
                v_max: self.v_max,
            });
        }
        Ok(())
    }

    pub fn u_extent(&self) -> f64 {
        self.u_max - self.u_min
    }

    pub fn v_extent(&self) -> f64 {
        self.v_max - self.v_min
    }

    /// 각 변을 폭의 `margin` 비율만큼 안쪽으로 줄인 도메인
    ///
    /// 면 경계에 딱 붙은 샘플이 호스트에서 버려지는 경우에 대비한 여백.
    /// `margin`은 `[0, 0.5)` 범위여야 한다.
    pub fn inset(&self, margin: f64) -> Result<Self, CoreError> {
        self.validate()?;
        if !(0.0..0.5).contains(&margin) {
            return Err(CoreError::validation(
                "margin",
                format!("여백 비율은 [0, 0.5) 범위여야 함: {margin}"),
            ));
        }

        let du = self.u_extent() * margin;
        let dv = self.v_extent() * margin;
        let inset = Self::new(
            self.u_min + du,
            self.u_max - du,
            self.v_min + dv,
            self.v_max - dv,
        );
        inset.validate()?;
        Ok(inset)
    }
}

/// 파라미터 공간의 점
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvPoint {
    pub u: f64,
    pub v: f64,
}

/// (점, 스칼라 값) 한 쌍: 호스트 시각화 필드의 입력 단위
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub point: UvPoint,
    pub value: f64,
}
