mod cashflow;
mod growth;
mod projection;
mod report;
mod types;

pub use cashflow::{classify_savings_rate, compute_cash_flow, compute_shares, expense_breakdown};
pub use growth::{
    CANONICAL_SCENARIOS, HIGH_YIELD_SAVINGS, INDEX_FUND, SCENARIO_YEARS, future_value,
    project_scenarios,
};
pub use projection::{
    compute_inflation_adjusted_goal, compute_projected_at_retirement, compute_trajectory,
    compute_trajectory_with, is_on_track, retirement_within_horizon, years_to_retirement,
};
pub use report::{build_dashboard, build_retirement_summary};
pub use types::{
    CashFlow, DEFAULT_HORIZON_AGE, DashboardReport, ExpenseBreakdown, ExpenseItem, ExpenseShare,
    Expenses, GrowthScenario, Profile, ProjectionOptions, RetirementSummary, SavingsRating,
    ScenarioProjection, Shares, Status, TrajectoryPoint,
};
