use super::types::{GrowthScenario, ScenarioProjection};

pub const SCENARIO_YEARS: u32 = 20;

pub const HIGH_YIELD_SAVINGS: GrowthScenario = GrowthScenario {
    name: "high-yield-savings",
    label: "High-Yield Savings (5% APY)",
    annual_pct: 5.0,
};

pub const INDEX_FUND: GrowthScenario = GrowthScenario {
    name: "index-fund",
    label: "S&P 500 Index Fund (10% avg. APY)",
    annual_pct: 10.0,
};

pub const CANONICAL_SCENARIOS: [GrowthScenario; 2] = [HIGH_YIELD_SAVINGS, INDEX_FUND];

/// Future value of `principal` compounded monthly plus a fixed contribution
/// posted at the end of every month.
pub fn future_value(principal: f64, monthly_contribution: f64, years: u32, annual_pct: f64) -> f64 {
    let rate = annual_pct / 100.0 / 12.0;
    let months = years * 12;
    if rate == 0.0 {
        return principal + monthly_contribution * f64::from(months);
    }

    let factor = (1.0 + rate).powi(months as i32);
    principal * factor + monthly_contribution * (factor - 1.0) / rate
}

pub fn project_scenarios(
    principal: f64,
    monthly_contribution: f64,
    years: u32,
    scenarios: &[GrowthScenario],
) -> Vec<ScenarioProjection> {
    scenarios
        .iter()
        .map(|scenario| ScenarioProjection {
            name: scenario.name,
            label: scenario.label,
            annual_pct: scenario.annual_pct,
            years,
            future_value: future_value(
                principal,
                monthly_contribution,
                years,
                scenario.annual_pct,
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn one_percent_a_month_for_a_year() {
        let value = future_value(1_000.0, 0.0, 1, 12.0);
        assert_approx_tol(value, 1_000.0 * 1.01_f64.powi(12), 1e-9);
        assert_approx_tol(value, 1_126.83, 0.01);
    }

    #[test]
    fn zero_rate_is_linear() {
        assert_eq!(future_value(5_000.0, 100.0, 10, 0.0), 5_000.0 + 100.0 * 120.0);
    }

    #[test]
    fn contributions_follow_ordinary_annuity() {
        // 12 deposits of 100 at 1% per month, each posted at month end
        let expected: f64 = (0..12).map(|k| 100.0 * 1.01_f64.powi(k)).sum();
        assert_approx_tol(future_value(0.0, 100.0, 1, 12.0), expected, 1e-9);
    }

    #[test]
    fn zero_years_returns_principal() {
        assert_eq!(future_value(2_500.0, 300.0, 0, 7.0), 2_500.0);
    }

    #[test]
    fn canonical_scenarios_for_default_savings() {
        let projections = project_scenarios(1_025_000.0, 0.0, SCENARIO_YEARS, &CANONICAL_SCENARIOS);

        assert_eq!(projections.len(), 2);
        assert_eq!(projections[0].name, "high-yield-savings");
        assert_eq!(projections[0].years, 20);
        assert_approx_tol(projections[0].future_value, 2_780_456.29, 0.01);
        assert_eq!(projections[1].name, "index-fund");
        assert_approx_tol(projections[1].future_value, 7_511_275.47, 0.01);
    }

    #[test]
    fn higher_rate_grows_faster() {
        let low = future_value(10_000.0, 200.0, 30, 4.0);
        let high = future_value(10_000.0, 200.0, 30, 8.0);
        assert!(high > low);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_no_rate_no_contribution_keeps_principal(
            principal in 0u32..5_000_000,
            years in 0u32..80
        ) {
            prop_assert_eq!(future_value(principal as f64, 0.0, years, 0.0), principal as f64);
        }

        #[test]
        fn prop_positive_rate_never_loses_money(
            principal in 0u32..1_000_000,
            contribution in 0u32..5_000,
            years in 0u32..50,
            rate_bp in 1u32..2000
        ) {
            let rate = rate_bp as f64 / 100.0;
            let value = future_value(principal as f64, contribution as f64, years, rate);
            let deposited = principal as f64 + contribution as f64 * f64::from(years * 12);
            prop_assert!(value.is_finite());
            prop_assert!(value + 1e-6 >= deposited);
        }
    }
}
