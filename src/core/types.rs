use serde::{Deserialize, Serialize};

pub const DEFAULT_HORIZON_AGE: u32 = 90;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Working,
    Retired,
}

/// A person's financial state and planning assumptions.
///
/// Percent fields hold whole percentages (5.0 means 5%). `social_security`
/// and `tax_rate_pct` are carried for the edit forms but no calculation reads
/// them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub age: u32,
    pub status: Status,
    pub income: f64,
    pub cash: f64,
    pub investments: f64,
    pub monthly_contributions: f64,
    pub annual_return_pct: f64,
    pub retirement_age: u32,
    pub retirement_goal: f64,
    #[serde(default)]
    pub social_security: Option<f64>,
    #[serde(default)]
    pub tax_rate_pct: Option<f64>,
    pub inflation_pct: f64,
    pub salary_growth_pct: f64,
}

impl Profile {
    pub fn total_savings(&self) -> f64 {
        self.cash + self.investments
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            age: 25,
            status: Status::Working,
            income: 100_000.0,
            cash: 25_000.0,
            investments: 1_000_000.0,
            monthly_contributions: 0.0,
            annual_return_pct: 5.0,
            retirement_age: 60,
            retirement_goal: 3_500_000.0,
            social_security: Some(3_000.0),
            tax_rate_pct: Some(22.0),
            inflation_pct: 2.5,
            salary_growth_pct: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseItem {
    pub category: String,
    pub monthly_amount: f64,
}

/// Monthly expenses by category, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Expenses {
    items: Vec<ExpenseItem>,
}

impl Expenses {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Sets the amount for `category`. An existing category keeps its slot.
    pub fn insert(&mut self, category: impl Into<String>, monthly_amount: f64) {
        let category = category.into();
        match self.items.iter_mut().find(|item| item.category == category) {
            Some(item) => item.monthly_amount = monthly_amount,
            None => self.items.push(ExpenseItem {
                category,
                monthly_amount,
            }),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.items
            .iter()
            .find(|item| item.category == category)
            .map(|item| item.monthly_amount)
    }

    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_monthly(&self) -> f64 {
        self.items.iter().map(|item| item.monthly_amount).sum()
    }

    pub fn session_defaults() -> Self {
        [
            ("Housing", 3_000.0),
            ("Utilities", 200.0),
            ("Food", 1_500.0),
            ("Travel", 500.0),
            ("Insurance", 300.0),
            ("Entertainment", 250.0),
            ("Hobbies", 300.0),
            ("Donations", 100.0),
            ("Emergency Fund", 400.0),
        ]
        .into_iter()
        .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Expenses {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut expenses = Expenses::new();
        for (category, amount) in iter {
            expenses.insert(category, amount);
        }
        expenses
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionOptions {
    /// Last age (inclusive) the trajectory covers.
    pub horizon_age: u32,
    /// Floor each post-retirement balance at zero.
    pub clamp_balance_at_zero: bool,
    /// Stretch the horizon to the retirement age when it lies beyond it.
    pub extend_horizon_to_retirement: bool,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            horizon_age: DEFAULT_HORIZON_AGE,
            clamp_balance_at_zero: false,
            extend_horizon_to_retirement: false,
        }
    }
}

impl ProjectionOptions {
    pub fn effective_horizon(&self, profile: &Profile) -> u32 {
        if self.extend_horizon_to_retirement {
            self.horizon_age.max(profile.retirement_age)
        } else {
            self.horizon_age
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub age: u32,
    pub balance: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    pub monthly_income: f64,
    pub total_monthly_expenses: f64,
    pub contribution: f64,
    pub remaining: f64,
    pub savings_rate_pct: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum SavingsRating {
    Good,
    Fair,
    Poor,
}

impl SavingsRating {
    pub fn advisory(self) -> &'static str {
        match self {
            SavingsRating::Good => "Great job! You're on track with your savings rate.",
            SavingsRating::Fair => "Consider increasing contributions to reach your goals.",
            SavingsRating::Poor => "Critical Action Needed: Reduce expenses or increase income.",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shares {
    pub expense_share_pct: f64,
    pub contribution_share_pct: f64,
    pub savings_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseShare {
    pub category: String,
    pub monthly_amount: f64,
    pub share_of_total_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub items: Vec<ExpenseShare>,
    pub total_monthly: f64,
    pub total_annual: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GrowthScenario {
    pub name: &'static str,
    pub label: &'static str,
    pub annual_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub name: &'static str,
    pub label: &'static str,
    pub annual_pct: f64,
    pub years: u32,
    pub future_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementSummary {
    pub trajectory: Vec<TrajectoryPoint>,
    pub projected_at_retirement: f64,
    pub inflation_adjusted_goal: f64,
    pub years_to_retirement: u32,
    pub on_track: bool,
    pub shortfall: f64,
    pub retirement_within_horizon: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub total_savings: f64,
    pub projection: RetirementSummary,
    pub cash_flow: CashFlow,
    pub savings_rating: SavingsRating,
    pub advisory: &'static str,
    pub shares: Shares,
    pub expenses: ExpenseBreakdown,
    pub scenarios: Vec<ScenarioProjection>,
}
