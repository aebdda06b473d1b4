//! 제안서 요청 검증과 계산 엔진 호출을 담당하는 경계 계층.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;
use crate::i18n::Language;
use crate::solar::{self, CalculationResult, CalibrationError};

/// 허용하는 최대 분석 기간 [년]. 효율 저하가 기하급수적이라 그 이상은 의미가 없다.
pub const MAX_HORIZON_YEARS: u32 = 100;

/// 제안서 요청 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalInput {
    /// 고객명
    pub customer: String,
    /// 월 소비량 [kWh]
    pub consumption_kwh: f64,
    /// 모듈(키트) 비용
    pub modules_cost: f64,
    /// 시공 비용
    pub labor_cost: f64,
    /// 인버터 사양 설명
    #[serde(default)]
    pub inverter_description: String,
    /// 분석 기간. 없으면 설정값을 사용한다.
    #[serde(default)]
    pub horizon_years: Option<u32>,
}

/// 요청 검증 오류.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProposalError {
    /// 양수여야 하는 값이 0 이하이거나 유한하지 않음
    #[error("invalid input: {field} = {value}")]
    InvalidInput { field: &'static str, value: String },
    /// 고객명이 비어 있음
    #[error("customer name must not be empty")]
    EmptyCustomer,
    /// 설정의 보정 상수가 계산에 쓸 수 없음
    #[error(transparent)]
    InvalidCalibration(#[from] CalibrationError),
}

/// 양수이며 유한한 값인지 확인한다.
pub fn require_positive(field: &'static str, value: f64) -> Result<f64, ProposalError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ProposalError::InvalidInput {
            field,
            value: value.to_string(),
        })
    }
}

/// 분석 기간이 1..=MAX_HORIZON_YEARS 범위인지 확인한다.
pub fn require_horizon(years: u32) -> Result<u32, ProposalError> {
    if (1..=MAX_HORIZON_YEARS).contains(&years) {
        Ok(years)
    } else {
        Err(ProposalError::InvalidInput {
            field: "horizon_years",
            value: years.to_string(),
        })
    }
}

impl ProposalInput {
    /// 총 투자비 = 모듈 비용 + 시공 비용.
    pub fn total_investment(&self) -> f64 {
        self.modules_cost + self.labor_cost
    }

    /// 엔진에 넘기기 전에 입력을 검증한다.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if self.customer.trim().is_empty() {
            return Err(ProposalError::EmptyCustomer);
        }
        require_positive("consumption_kwh", self.consumption_kwh)?;
        require_positive("modules_cost", self.modules_cost)?;
        require_positive("labor_cost", self.labor_cost)?;
        require_positive("total_investment", self.total_investment())?;
        if let Some(years) = self.horizon_years {
            require_horizon(years)?;
        }
        Ok(())
    }
}

/// 완성된 제안서 데이터. 차트/문서 생성기는 이 값을 그대로 소비한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub customer: String,
    pub inverter_description: String,
    /// 생성 시각 (UNIX 초)
    pub generated_at_unix: u64,
    pub calculation: CalculationResult,
}

/// 고객명 없이 소비량/투자비만으로 계산한다.
pub fn calculate_checked(
    consumption_kwh: f64,
    investment: f64,
    horizon_years: u32,
    config: &Config,
    lang: Language,
) -> Result<CalculationResult, ProposalError> {
    let consumption_kwh = require_positive("consumption_kwh", consumption_kwh)?;
    let investment = require_positive("investment", investment)?;
    let horizon_years = require_horizon(horizon_years)?;
    config.calibration.validate()?;
    Ok(solar::calculate(
        consumption_kwh,
        investment,
        horizon_years,
        &config.calibration,
        lang,
    ))
}

/// 입력을 검증하고 계산 엔진을 실행해 제안서를 만든다.
pub fn build_proposal(
    input: &ProposalInput,
    config: &Config,
    lang: Language,
) -> Result<Proposal, ProposalError> {
    input.validate()?;
    let horizon_years = input.horizon_years.unwrap_or(config.horizon_years);
    let calculation = calculate_checked(
        input.consumption_kwh,
        input.total_investment(),
        horizon_years,
        config,
        lang,
    )?;
    tracing::info!(
        customer = %input.customer,
        panel_count = calculation.panel_count,
        breakeven_year = ?calculation.breakeven_year,
        "proposal built"
    );
    if calculation.panel_count == 0 {
        tracing::warn!(
            consumption_kwh = input.consumption_kwh,
            "consumption below a single panel's reference yield"
        );
    }

    let generated_at_unix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    Ok(Proposal {
        customer: input.customer.trim().to_string(),
        inverter_description: input.inverter_description.trim().to_string(),
        generated_at_unix,
        calculation,
    })
}
