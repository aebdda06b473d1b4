use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::generation::{annual_generation, monthly_generation, MonthlyYieldPoint};
use super::payback::{simulate_payback, YearlyPaybackPoint};
use super::sizing::{installed_power, panel_count};
use crate::i18n::Language;

/// 한 번의 계산 결과를 모두 담는 값 객체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub panel_count: u32,
    /// 설치 용량 [kWp]
    pub installed_power_kwp: f64,
    /// 1~12월 발전량
    pub monthly_generation: Vec<MonthlyYieldPoint>,
    /// 연간 발전량 [kWh]
    pub annual_generation_kwh: f64,
    pub total_investment: f64,
    /// 1..N년차 회수 일정
    pub payback: Vec<YearlyPaybackPoint>,
    pub breakeven_year: Option<u32>,
    /// 분석 기간 마지막 해의 누적 잔액
    pub savings_25_years: f64,
}

/// 소비량과 투자비로 전체 재무 모델을 계산한다.
///
/// 입력 검증은 하지 않는다. 소비량/투자비는 양수, 기간은 1 이상이라고 가정한다.
pub fn calculate(
    consumption_kwh: f64,
    investment: f64,
    horizon_years: u32,
    calibration: &Calibration,
    lang: Language,
) -> CalculationResult {
    let panels = panel_count(consumption_kwh, calibration);
    let power = installed_power(panels, calibration);
    let monthly = monthly_generation(panels, calibration, lang);
    let annual = annual_generation(&monthly);
    tracing::debug!(
        panel_count = panels,
        installed_power_kwp = power,
        annual_generation_kwh = annual,
        "generation profile computed"
    );

    let schedule = simulate_payback(annual, investment, horizon_years, calibration);

    CalculationResult {
        panel_count: panels,
        installed_power_kwp: power,
        monthly_generation: monthly,
        annual_generation_kwh: annual,
        total_investment: investment,
        payback: schedule.points,
        breakeven_year: schedule.breakeven_year,
        savings_25_years: schedule.savings_25_years,
    }
}
