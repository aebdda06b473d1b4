use super::calibration::Calibration;
use super::round2;

/// 월 소비량으로 필요한 패널 수량을 계산한다.
///
/// 기준 발전량으로 나눈 몫을 0 방향으로 절사한다(반올림/올림 아님).
/// 소비량이 기준값보다 작으면 0장이 된다. 음수나 NaN은 경계 검증에서 걸러지며,
/// 여기서는 0으로 포화된다.
pub fn panel_count(consumption_kwh: f64, calibration: &Calibration) -> u32 {
    let quotient = consumption_kwh / calibration.panel_reference_yield_kwh;
    // f64 -> u32 캐스팅은 0 방향 절사 + 범위 포화
    quotient.trunc() as u32
}

/// 패널 수량으로 설치 용량 [kWp]을 계산한다(소수 둘째 자리 반올림).
pub fn installed_power(panel_count: u32, calibration: &Calibration) -> f64 {
    round2(f64::from(panel_count) * calibration.panel_rated_power_kw)
}
