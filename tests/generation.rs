//! 패널 수량/설치 용량/월별 발전량 회귀 테스트.
use solar_proposal_toolbox::i18n::Language;
use solar_proposal_toolbox::solar::{
    annual_generation, installed_power, monthly_generation, panel_count, round2, Calibration,
};

#[test]
fn sizing_reference_consumption() {
    let cal = Calibration::default();
    // 4560 / 70 = 65.14 -> 65장
    let panels = panel_count(4560.0, &cal);
    assert_eq!(panels, 65);
    assert_eq!(installed_power(panels, &cal), 40.3);
}

#[test]
fn installed_power_matches_rated_power_rounding() {
    let cal = Calibration::default();
    for p in [0u32, 1, 3, 7, 65, 101, 999, 12_345] {
        assert_eq!(installed_power(p, &cal), round2(f64::from(p) * 0.62), "p={p}");
    }
}

#[test]
fn january_generation_for_65_panels() {
    let profile = monthly_generation(65, &Calibration::default(), Language::Pt);
    assert_eq!(profile[0].month, 1);
    assert_eq!(profile[0].month_name, "Janeiro");
    assert_eq!(profile[0].generation_kwh, 5720.0);
}

#[test]
fn profile_has_twelve_ordered_months() {
    let profile = monthly_generation(42, &Calibration::default(), Language::En);
    let months: Vec<u8> = profile.iter().map(|p| p.month).collect();
    assert_eq!(months, (1..=12).collect::<Vec<u8>>());
    assert!(profile.iter().all(|p| p.generation_kwh >= 0.0));
    assert_eq!(profile[11].month_name, "December");
}

#[test]
fn annual_total_is_sum_of_months() {
    let profile = monthly_generation(65, &Calibration::default(), Language::Pt);
    let expected: f64 = profile.iter().map(|p| p.generation_kwh).sum();
    let annual = annual_generation(&profile);
    assert!((annual - expected).abs() < 1e-6);
    // 월별 계수 합계 950 kWh/장
    assert!((annual - 61_750.0).abs() < 1e-6);
}

#[test]
fn custom_monthly_table_is_used() {
    let cal = Calibration {
        monthly_yield_per_panel_kwh: [10.0; 12],
        ..Calibration::default()
    };
    let profile = monthly_generation(3, &cal, Language::Ko);
    assert!(profile.iter().all(|p| p.generation_kwh == 30.0));
    assert_eq!(profile[0].month_name, "1월");
}
