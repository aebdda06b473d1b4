//! 태양광 설비 재무 모델 계산 모듈 모음.

pub mod calibration;
pub mod engine;
pub mod generation;
pub mod payback;
pub mod sizing;

pub use calibration::*;
pub use engine::*;
pub use generation::*;
pub use payback::*;
pub use sizing::*;

/// 소수 둘째 자리로 반올림한다.
///
/// 이진 값의 정확한 십진 전개를 기준으로 하며, 정확히 반 센트인 값은
/// 짝수 쪽으로 반올림한다. `(value * 100.0).round()`는 곱셈에서 한 번 더
/// 반올림되고 0.5를 0에서 먼 쪽으로 올리므로 1센트 어긋날 수 있다.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}
