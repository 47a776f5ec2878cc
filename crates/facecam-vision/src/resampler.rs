//! 필드 리샘플링.
//!
//! W×H 밝기 그리드를 `[u_min, u_max) × [v_min, v_max)`에 균일 간격으로 펼친다.
//! 출력은 행 우선(y 바깥, x 안쪽)이고, 출력 행 `y`는 그리드 행 `H-1-y`를 읽는다.
//! 이미지 좌표는 아래로 증가하고 파라미터 `v`는 위로 증가하기 때문이다.
//!
//! 모든 점은 도메인 안쪽에 있다. 최대 경계 위에는 절대 놓이지 않는다.

use facecam_core::error::CoreError;
use facecam_core::models::domain::{FieldSample, ParameterDomain, UvPoint};
use facecam_core::models::grid::ImageGrid;

/// `bound`보다 엄격히 작은 가장 큰 f64
fn next_below(bound: f64) -> f64 {
    if bound > 0.0 {
        f64::from_bits(bound.to_bits() - 1)
    } else if bound < 0.0 {
        f64::from_bits(bound.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

/// 부동소수 누적 오차로 최대 경계에 닿으면 바로 아래 값으로 당긴다.
#[inline]
fn clamp_below(value: f64, bound: f64) -> f64 {
    if value < bound {
        value
    } else {
        next_below(bound)
    }
}

/// 검증된 도메인의 (u 간격, v 간격)
fn steps(width: u32, height: u32, domain: &ParameterDomain) -> Result<(f64, f64), CoreError> {
    domain.validate()?;

    let ustep = domain.u_extent() / f64::from(width);
    let vstep = domain.v_extent() / f64::from(height);

    // 경계는 유한해도 폭이 f64 범위를 넘을 수 있다.
    if !ustep.is_finite() || !vstep.is_finite() {
        return Err(CoreError::InvalidDomain {
            u_min: domain.u_min,
            u_max: domain.u_max,
            v_min: domain.v_min,
            v_max: domain.v_max,
        });
    }
    Ok((ustep, vstep))
}

/// 그리드 → 필드 샘플 (정확히 W×H개)
pub fn resample(grid: &ImageGrid, domain: &ParameterDomain) -> Result<Vec<FieldSample>, CoreError> {
    let mut out = Vec::with_capacity(grid.len());
    resample_into(grid, domain, &mut out)?;
    Ok(out)
}

/// [`resample`]과 같지만 호출자 버퍼를 재사용한다. 실패 시 버퍼는 비워진 상태.
pub fn resample_into(
    grid: &ImageGrid,
    domain: &ParameterDomain,
    out: &mut Vec<FieldSample>,
) -> Result<(), CoreError> {
    out.clear();
    let (w, h) = (grid.width(), grid.height());
    let (ustep, vstep) = steps(w, h, domain)?;

    out.reserve(grid.len());
    let values = grid.values();
    let row_len = w as usize;

    for y in 0..h {
        let v = clamp_below(domain.v_min + f64::from(y) * vstep, domain.v_max);
        let row = &values[(h - 1 - y) as usize * row_len..][..row_len];

        for (x, &value) in row.iter().enumerate() {
            let u = clamp_below(domain.u_min + x as f64 * ustep, domain.u_max);
            out.push(FieldSample {
                point: UvPoint { u, v },
                value,
            });
        }
    }

    debug_assert_eq!(out.len(), grid.len());
    Ok(())
}
