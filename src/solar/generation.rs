use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::round2;
use crate::i18n::{self, Language};

/// 한 달의 예상 발전량.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyYieldPoint {
    /// 월 (1~12)
    pub month: u8,
    /// 표시용 월 이름
    pub month_name: String,
    /// 발전량 [kWh]
    pub generation_kwh: f64,
}

/// 패널 수량으로 1~12월의 월별 발전량을 계산한다.
///
/// 월별 발전량 = 패널 수 × 해당 월 패널당 발전량 (소수 둘째 자리 반올림).
/// 입력이 같으면 항상 같은 결과를 돌려준다.
pub fn monthly_generation(
    panel_count: u32,
    calibration: &Calibration,
    lang: Language,
) -> Vec<MonthlyYieldPoint> {
    let panels = f64::from(panel_count);
    (1..=12u8)
        .zip(calibration.monthly_yield_per_panel_kwh.iter())
        .map(|(month, per_panel)| MonthlyYieldPoint {
            month,
            month_name: i18n::month_name(lang, month).to_string(),
            generation_kwh: round2(panels * per_panel),
        })
        .collect()
}

/// 월별 발전량을 합산해 연간 발전량 [kWh]을 구한다. 추가 반올림은 하지 않는다.
pub fn annual_generation(monthly: &[MonthlyYieldPoint]) -> f64 {
    monthly.iter().map(|p| p.generation_kwh).sum()
}
