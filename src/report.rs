//! 계산 결과를 텍스트 표/JSON으로 출력한다.

use std::fmt::Write as _;

use crate::i18n::{keys, Translator};
use crate::proposal::Proposal;
use crate::solar::CalculationResult;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 제안서 헤더(고객/인버터)와 계산 결과를 텍스트로 렌더링한다.
pub fn render_proposal(proposal: &Proposal, tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::REPORT_TITLE));
    let _ = writeln!(out, "{} {}", tr.t(keys::REPORT_CUSTOMER), proposal.customer);
    if !proposal.inverter_description.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            tr.t(keys::REPORT_INVERTER),
            proposal.inverter_description
        );
    }
    out.push_str(&render_calculation(&proposal.calculation, tr));
    out
}

/// 계산 결과를 텍스트로 렌더링한다.
pub fn render_calculation(result: &CalculationResult, tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", tr.t(keys::REPORT_PANEL_COUNT), result.panel_count);
    let _ = writeln!(
        out,
        "{} {:.2} kWp",
        tr.t(keys::REPORT_INSTALLED_POWER),
        result.installed_power_kwp
    );
    let _ = writeln!(
        out,
        "{} {:.2} kWh",
        tr.t(keys::REPORT_ANNUAL_GENERATION),
        result.annual_generation_kwh
    );
    let _ = writeln!(
        out,
        "{} {:.2}",
        tr.t(keys::REPORT_INVESTMENT),
        result.total_investment
    );
    if result.panel_count == 0 {
        let _ = writeln!(out, "{}", tr.t(keys::REPORT_ZERO_PANELS));
    }

    let _ = writeln!(out, "\n{}", tr.t(keys::REPORT_MONTHLY_HEADING));
    let _ = writeln!(
        out,
        "{:<12} {:>16}",
        tr.t(keys::REPORT_COL_MONTH),
        tr.t(keys::REPORT_COL_GENERATION)
    );
    for point in &result.monthly_generation {
        let _ = writeln!(out, "{:<12} {:>16.2}", point.month_name, point.generation_kwh);
    }

    let _ = writeln!(out, "\n{}", tr.t(keys::REPORT_PAYBACK_HEADING));
    let _ = writeln!(
        out,
        "{:>4} {:>16} {:>16} {:>16}",
        tr.t(keys::REPORT_COL_YEAR),
        tr.t(keys::REPORT_COL_BALANCE),
        tr.t(keys::REPORT_COL_MONTHLY_SAVINGS),
        tr.t(keys::REPORT_COL_ANNUAL_SAVINGS)
    );
    for point in &result.payback {
        let _ = writeln!(
            out,
            "{:>4} {:>16.2} {:>16.2} {:>16.2}",
            point.year, point.balance, point.monthly_savings, point.annual_savings
        );
    }

    out.push('\n');
    match result.breakeven_year {
        Some(year) => {
            let _ = writeln!(out, "{} {year}", tr.t(keys::REPORT_BREAKEVEN));
        }
        None => {
            let _ = writeln!(
                out,
                "{} {}",
                tr.t(keys::REPORT_BREAKEVEN_NONE),
                result.payback.len()
            );
        }
    }
    let _ = writeln!(
        out,
        "{} {:.2}",
        tr.t(keys::REPORT_TOTAL_SAVINGS),
        result.savings_25_years
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::solar::{calculate, Calibration};

    #[test]
    fn text_report_lists_every_month_and_year() {
        let result = calculate(4560.0, 76_028.29, 25, &Calibration::default(), Language::En);
        let text = render_calculation(&result, &Translator::new("en"));
        assert!(text.contains("January"));
        assert!(text.contains("December"));
        assert!(text.contains("40.30 kWp"));
        assert!(text.contains("Payback reached in year:"));
    }

    #[test]
    fn unreached_payback_is_reported() {
        let result = calculate(100.0, 1_000_000.0, 5, &Calibration::default(), Language::Pt);
        let text = render_calculation(&result, &Translator::new("pt"));
        assert!(text.contains("Retorno não alcançado no período de anos: 5"));
    }
}
