use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use super::round2;

/// 기본 분석 기간 [년]
pub const DEFAULT_HORIZON_YEARS: u32 = 25;

/// 한 해의 회수 현황.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyPaybackPoint {
    /// 연차 (1부터)
    pub year: u32,
    /// 해당 연도 말 누적 잔액. 투자비를 회수하기 전까지는 음수.
    pub balance: f64,
    /// 해당 연도 월 평균 절감액
    pub monthly_savings: f64,
    /// 해당 연도 총 절감액
    pub annual_savings: f64,
}

/// 회수 시뮬레이션 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaybackSchedule {
    pub points: Vec<YearlyPaybackPoint>,
    /// 누적 잔액이 처음으로 0을 넘은 연차. 기간 내 도달하지 못하면 None.
    pub breakeven_year: Option<u32>,
    /// 마지막 연차의 누적 잔액. 기간이 0이면 0.0.
    pub savings_25_years: f64,
}

/// y년차(1부터) 전력 단가. 매년 복리로 인상된다.
pub fn tariff_for_year(year: u32, calibration: &Calibration) -> f64 {
    calibration.initial_tariff * (1.0 + calibration.tariff_escalation).powi(exponent(year))
}

/// y년차 발전량. 매년 복리로 효율이 저하된다.
///
/// 저하율이 100% 이상이면 감쇠 계수를 [0, 1]로 잘라 발전량이 음수가 되지 않게 한다.
pub fn generation_for_year(year: u32, annual_generation_kwh: f64, calibration: &Calibration) -> f64 {
    let retention = (1.0 - calibration.efficiency_loss).clamp(0.0, 1.0);
    annual_generation_kwh * retention.powi(exponent(year))
}

fn exponent(year: u32) -> i32 {
    i32::try_from(year.saturating_sub(1)).unwrap_or(i32::MAX)
}

/// 연간 발전량과 투자비로 회수 일정을 계산한다.
///
/// 누적 잔액은 `-투자비`에서 출발하여 매년 절감액을 더한다. 누적 계산은
/// 반올림 전 값으로 진행하고, 각 연도 항목에 기록할 때만 소수 둘째 자리로
/// 반올림한다. 회수 연차는 처음 0을 넘은 해 하나만 기록한다.
///
/// 기간 밖으로 외삽하지 않는다. 효율 저하가 기하급수적이므로 수십 년 단위를
/// 넘는 기간에서는 결과가 현실적이지 않다.
pub fn simulate_payback(
    annual_generation_kwh: f64,
    investment: f64,
    horizon_years: u32,
    calibration: &Calibration,
) -> PaybackSchedule {
    let mut points = Vec::with_capacity(horizon_years as usize);
    let mut balance = -investment;
    let mut breakeven_year = None;

    for year in 1..=horizon_years {
        let tariff = tariff_for_year(year, calibration);
        let generation = generation_for_year(year, annual_generation_kwh, calibration);

        let annual_savings = generation * tariff;
        let monthly_savings = annual_savings / 12.0;

        balance += annual_savings;

        if breakeven_year.is_none() && balance > 0.0 {
            breakeven_year = Some(year);
        }

        points.push(YearlyPaybackPoint {
            year,
            balance: round2(balance),
            monthly_savings: round2(monthly_savings),
            annual_savings: round2(annual_savings),
        });
    }

    let savings_25_years = points.last().map_or(0.0, |p| p.balance);
    tracing::debug!(
        horizon_years,
        ?breakeven_year,
        savings_25_years,
        "payback simulated"
    );

    PaybackSchedule {
        points,
        breakeven_year,
        savings_25_years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_horizon_is_empty() {
        let schedule = simulate_payback(60_000.0, 76_028.29, 0, &Calibration::default());
        assert!(schedule.points.is_empty());
        assert_eq!(schedule.breakeven_year, None);
        assert_eq!(schedule.savings_25_years, 0.0);
    }

    #[test]
    fn immediate_breakeven_in_first_year() {
        let schedule = simulate_payback(60_000.0, 1_000.0, 25, &Calibration::default());
        assert_eq!(schedule.breakeven_year, Some(1));
    }

    #[test]
    fn total_efficiency_loss_bottoms_out_at_zero() {
        let cal = Calibration {
            efficiency_loss: 1.5,
            ..Calibration::default()
        };
        assert_eq!(generation_for_year(1, 1000.0, &cal), 1000.0);
        assert_eq!(generation_for_year(2, 1000.0, &cal), 0.0);
        assert_eq!(generation_for_year(3, 1000.0, &cal), 0.0);
    }

    #[test]
    fn tariff_compounds_upward() {
        let cal = Calibration::default();
        assert_eq!(tariff_for_year(1, &cal), cal.initial_tariff);
        let y3 = tariff_for_year(3, &cal);
        assert!((y3 - 1.1465 * 1.04 * 1.04).abs() < 1e-12);
    }

    proptest! {
        /// 회수 연차가 있으면 그 전 해까지는 잔액이 0 이하이고, 없으면 모든 해가 0 이하다.
        #[test]
        fn breakeven_is_first_crossing(
            annual in 0.0f64..200_000.0,
            investment in 1.0f64..2_000_000.0,
            horizon in 1u32..60,
        ) {
            let schedule = simulate_payback(annual, investment, horizon, &Calibration::default());
            prop_assert_eq!(schedule.points.len(), horizon as usize);
            match schedule.breakeven_year {
                Some(year) => {
                    let idx = (year - 1) as usize;
                    prop_assert!(schedule.points[idx].balance >= 0.0);
                    for p in &schedule.points[..idx] {
                        prop_assert!(p.balance <= 0.0);
                    }
                }
                None => {
                    for p in &schedule.points {
                        prop_assert!(p.balance <= 0.0);
                    }
                }
            }
        }

        /// 누적 잔액은 전년도 잔액 + 당해 절감액이다(반올림 오차 이내).
        #[test]
        fn balance_accumulates_savings(
            annual in 0.0f64..200_000.0,
            investment in 1.0f64..2_000_000.0,
        ) {
            let schedule = simulate_payback(annual, investment, 25, &Calibration::default());
            let first = &schedule.points[0];
            prop_assert!((first.balance - (first.annual_savings - investment)).abs() <= 0.02);
            for pair in schedule.points.windows(2) {
                let expected = pair[0].balance + pair[1].annual_savings;
                prop_assert!((pair[1].balance - expected).abs() <= 0.02);
                prop_assert_eq!(pair[1].year, pair[0].year + 1);
            }
            prop_assert_eq!(schedule.savings_25_years, schedule.points[24].balance);
        }
    }
}
