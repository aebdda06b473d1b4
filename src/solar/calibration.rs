use serde::{Deserialize, Serialize};

/// 최초 전력 단가 [R$/kWh]
pub const INITIAL_TARIFF: f64 = 1.1465;
/// 연간 전력 단가 인상률(4%)
pub const ANNUAL_TARIFF_ESCALATION: f64 = 0.04;
/// 연간 모듈 효율 저하율(0.7%)
pub const ANNUAL_EFFICIENCY_LOSS: f64 = 0.007;
/// 패널 수량 산정용 패널 1장당 월 기준 발전량 [kWh]
pub const PANEL_REFERENCE_YIELD_KWH: f64 = 70.0;
/// 패널 1장당 정격 출력 [kW]
pub const PANEL_RATED_POWER_KW: f64 = 0.62;

/// 월별 패널 1장당 발전량 [kWh]. 인덱스 0 = 1월.
///
/// 남반구 일사량 곡선을 반영하므로 여름(1월, 12월)이 가장 높고 7월이 가장 낮다.
pub const MONTHLY_YIELD_PER_PANEL_KWH: [f64; 12] = [
    88.0, // 1월
    83.0, // 2월
    81.0, // 3월
    79.0, // 4월
    74.0, // 5월
    72.0, // 6월
    70.0, // 7월
    74.0, // 8월
    77.0, // 9월
    80.0, // 10월
    85.0, // 11월
    87.0, // 12월
];

/// 계산 엔진이 사용하는 보정 상수 묶음.
///
/// 기본값은 현장 보정 상수 그대로이며, 설정 파일에서 덮어써 다른 시나리오를
/// 검토할 수 있다. 생성 후에는 변경하지 않고 참조로만 넘긴다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// 1년차 전력 단가 [통화/kWh]
    pub initial_tariff: f64,
    /// 연간 단가 인상률(소수)
    pub tariff_escalation: f64,
    /// 연간 효율 저하율(소수)
    pub efficiency_loss: f64,
    /// 패널 1장당 월 기준 발전량 [kWh]
    pub panel_reference_yield_kwh: f64,
    /// 패널 1장당 정격 출력 [kW]
    pub panel_rated_power_kw: f64,
    /// 월별 패널 1장당 발전량 [kWh]
    pub monthly_yield_per_panel_kwh: [f64; 12],
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            initial_tariff: INITIAL_TARIFF,
            tariff_escalation: ANNUAL_TARIFF_ESCALATION,
            efficiency_loss: ANNUAL_EFFICIENCY_LOSS,
            panel_reference_yield_kwh: PANEL_REFERENCE_YIELD_KWH,
            panel_rated_power_kw: PANEL_RATED_POWER_KW,
            monthly_yield_per_panel_kwh: MONTHLY_YIELD_PER_PANEL_KWH,
        }
    }
}

/// 보정 상수가 계산에 쓸 수 없는 값일 때의 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid calibration: {field} = {value}")]
pub struct CalibrationError {
    pub field: &'static str,
    pub value: String,
}

fn check(field: &'static str, value: f64, ok: bool) -> Result<(), CalibrationError> {
    if value.is_finite() && ok {
        Ok(())
    } else {
        Err(CalibrationError {
            field,
            value: value.to_string(),
        })
    }
}

impl Calibration {
    /// 설정 파일에서 읽은 값이 유한하고 엔진이 가정하는 범위 안에 있는지 확인한다.
    ///
    /// 단가/기준 발전량/정격 출력은 양수, 단가 인상률은 -100% 초과,
    /// 월별 발전량은 0 이상이어야 한다. 효율 저하율은 유한하기만 하면 된다
    /// (100% 이상은 엔진이 0으로 자른다).
    pub fn validate(&self) -> Result<(), CalibrationError> {
        check("initial_tariff", self.initial_tariff, self.initial_tariff > 0.0)?;
        check(
            "tariff_escalation",
            self.tariff_escalation,
            self.tariff_escalation > -1.0,
        )?;
        check("efficiency_loss", self.efficiency_loss, true)?;
        check(
            "panel_reference_yield_kwh",
            self.panel_reference_yield_kwh,
            self.panel_reference_yield_kwh > 0.0,
        )?;
        check(
            "panel_rated_power_kw",
            self.panel_rated_power_kw,
            self.panel_rated_power_kw > 0.0,
        )?;
        for v in &self.monthly_yield_per_panel_kwh {
            check("monthly_yield_per_panel_kwh", *v, *v >= 0.0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(Calibration::default().validate(), Ok(()));
    }

    #[test]
    fn zero_reference_yield_is_rejected() {
        let cal = Calibration {
            panel_reference_yield_kwh: 0.0,
            ..Calibration::default()
        };
        let err = cal.validate().unwrap_err();
        assert_eq!(err.field, "panel_reference_yield_kwh");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let nan_tariff = Calibration {
            initial_tariff: f64::NAN,
            ..Calibration::default()
        };
        assert_eq!(nan_tariff.validate().unwrap_err().field, "initial_tariff");

        let inf_loss = Calibration {
            efficiency_loss: f64::INFINITY,
            ..Calibration::default()
        };
        assert_eq!(inf_loss.validate().unwrap_err().field, "efficiency_loss");

        let mut table = MONTHLY_YIELD_PER_PANEL_KWH;
        table[5] = -1.0;
        let negative_month = Calibration {
            monthly_yield_per_panel_kwh: table,
            ..Calibration::default()
        };
        assert!(negative_month.validate().is_err());
    }

    #[test]
    fn total_efficiency_loss_is_allowed() {
        let cal = Calibration {
            efficiency_loss: 1.5,
            ..Calibration::default()
        };
        assert!(cal.validate().is_ok());
    }
}
