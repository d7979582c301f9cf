use log::{debug, warn};

use super::cashflow::{classify_savings_rate, compute_cash_flow, compute_shares, expense_breakdown};
use super::growth::{CANONICAL_SCENARIOS, SCENARIO_YEARS, project_scenarios};
use super::projection::{
    compute_inflation_adjusted_goal, compute_projected_at_retirement, compute_trajectory_with,
    is_on_track, retirement_within_horizon, years_to_retirement,
};
use super::types::{DashboardReport, Expenses, Profile, ProjectionOptions, RetirementSummary};

pub fn build_retirement_summary(
    profile: &Profile,
    options: &ProjectionOptions,
) -> RetirementSummary {
    let trajectory = compute_trajectory_with(profile, options);
    let projected_at_retirement = compute_projected_at_retirement(&trajectory, profile);
    let inflation_adjusted_goal = compute_inflation_adjusted_goal(profile);
    let within_horizon = retirement_within_horizon(&trajectory, profile);
    if !within_horizon {
        warn!(
            "retirement age {} is outside the projected ages {}..={}; using the final balance",
            profile.retirement_age,
            profile.age,
            options.effective_horizon(profile)
        );
    }

    RetirementSummary {
        trajectory,
        projected_at_retirement,
        inflation_adjusted_goal,
        years_to_retirement: years_to_retirement(profile),
        on_track: is_on_track(projected_at_retirement, inflation_adjusted_goal),
        shortfall: (inflation_adjusted_goal - projected_at_retirement).max(0.0),
        retirement_within_horizon: within_horizon,
    }
}

/// Runs every calculation the dashboard shows against one snapshot of the
/// profile and expenses.
pub fn build_dashboard(
    profile: &Profile,
    expenses: &Expenses,
    options: &ProjectionOptions,
) -> DashboardReport {
    let projection = build_retirement_summary(profile, options);
    let cash_flow = compute_cash_flow(profile, expenses);
    let savings_rating = classify_savings_rate(cash_flow.savings_rate_pct);
    let shares = compute_shares(
        cash_flow.monthly_income,
        cash_flow.total_monthly_expenses,
        cash_flow.contribution,
    );
    let scenarios = project_scenarios(
        profile.total_savings(),
        profile.monthly_contributions,
        SCENARIO_YEARS,
        &CANONICAL_SCENARIOS,
    );

    debug!(
        "dashboard: projected {:.0} vs goal {:.0}, savings rate {:.1}% ({:?})",
        projection.projected_at_retirement,
        projection.inflation_adjusted_goal,
        cash_flow.savings_rate_pct,
        savings_rating
    );

    DashboardReport {
        total_savings: profile.total_savings(),
        projection,
        cash_flow,
        savings_rating,
        advisory: savings_rating.advisory(),
        shares,
        expenses: expense_breakdown(expenses),
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SavingsRating;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn default_session_dashboard() {
        let report = build_dashboard(
            &Profile::default(),
            &Expenses::session_defaults(),
            &ProjectionOptions::default(),
        );

        assert_approx(report.total_savings, 1_025_000.0);
        assert_eq!(report.projection.trajectory.len(), 66);
        assert_eq!(report.projection.years_to_retirement, 35);
        assert!(report.projection.retirement_within_horizon);
        assert!(!report.projection.on_track);
        assert_approx(
            report.projection.shortfall,
            report.projection.inflation_adjusted_goal - report.projection.projected_at_retirement,
        );
        assert_eq!(report.savings_rating, SavingsRating::Good);
        assert_eq!(report.advisory, SavingsRating::Good.advisory());
        assert_eq!(report.expenses.items.len(), 9);
        assert_approx(report.expenses.total_annual, 6_550.0 * 12.0);
        assert_eq!(report.scenarios.len(), 2);
    }

    #[test]
    fn on_track_profile_has_no_shortfall() {
        let profile = Profile {
            retirement_goal: 100_000.0,
            ..Profile::default()
        };
        let summary = build_retirement_summary(&profile, &ProjectionOptions::default());

        assert!(summary.on_track);
        assert_eq!(summary.shortfall, 0.0);
    }

    #[test]
    fn late_retirement_is_flagged_outside_horizon() {
        let profile = Profile {
            retirement_age: 100,
            ..Profile::default()
        };
        let summary = build_retirement_summary(&profile, &ProjectionOptions::default());
        assert!(!summary.retirement_within_horizon);
        assert_eq!(summary.trajectory.last().map(|p| p.age), Some(90));

        let extended = ProjectionOptions {
            extend_horizon_to_retirement: true,
            ..ProjectionOptions::default()
        };
        let summary = build_retirement_summary(&profile, &extended);
        assert!(summary.retirement_within_horizon);
        assert_eq!(summary.trajectory.last().map(|p| p.age), Some(100));
    }

    #[test]
    fn dashboard_serializes_camel_case_fields() {
        let report = build_dashboard(
            &Profile::default(),
            &Expenses::session_defaults(),
            &ProjectionOptions::default(),
        );
        let json = serde_json::to_string(&report).expect("report should serialize");

        assert!(json.contains("\"totalSavings\""));
        assert!(json.contains("\"projectedAtRetirement\""));
        assert!(json.contains("\"inflationAdjustedGoal\""));
        assert!(json.contains("\"savingsRatePct\""));
        assert!(json.contains("\"savingsRating\":\"Good\""));
        assert!(json.contains("\"shareOfTotalPct\""));
        assert!(json.contains("\"futureValue\""));
    }
}
