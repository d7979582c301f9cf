use super::types::{
    CashFlow, ExpenseBreakdown, ExpenseShare, Expenses, Profile, SavingsRating, Shares,
};

const GOOD_SAVINGS_RATE_PCT: f64 = 20.0;
const FAIR_SAVINGS_RATE_PCT: f64 = 10.0;

pub fn compute_cash_flow(profile: &Profile, expenses: &Expenses) -> CashFlow {
    let monthly_income = profile.income / 12.0;
    let total_monthly_expenses = expenses.total_monthly();
    let contribution = profile.monthly_contributions;
    let remaining = monthly_income - total_monthly_expenses - contribution;

    CashFlow {
        monthly_income,
        total_monthly_expenses,
        contribution,
        remaining,
        savings_rate_pct: percent_of(remaining, monthly_income),
    }
}

pub fn classify_savings_rate(savings_rate_pct: f64) -> SavingsRating {
    if savings_rate_pct >= GOOD_SAVINGS_RATE_PCT {
        SavingsRating::Good
    } else if savings_rate_pct >= FAIR_SAVINGS_RATE_PCT {
        SavingsRating::Fair
    } else {
        SavingsRating::Poor
    }
}

/// Split of monthly income into expenses, contributions and what is left.
/// The savings share never drops below zero for an over-budget household.
pub fn compute_shares(
    monthly_income: f64,
    total_monthly_expenses: f64,
    contribution: f64,
) -> Shares {
    if monthly_income <= 0.0 {
        return Shares {
            expense_share_pct: 0.0,
            contribution_share_pct: 0.0,
            savings_share_pct: 0.0,
        };
    }

    let expense_share_pct = percent_of(total_monthly_expenses, monthly_income);
    let contribution_share_pct = percent_of(contribution, monthly_income);
    Shares {
        expense_share_pct,
        contribution_share_pct,
        savings_share_pct: (100.0 - expense_share_pct - contribution_share_pct).max(0.0),
    }
}

pub fn expense_breakdown(expenses: &Expenses) -> ExpenseBreakdown {
    let total_monthly = expenses.total_monthly();
    let items = expenses
        .items()
        .iter()
        .map(|item| ExpenseShare {
            category: item.category.clone(),
            monthly_amount: item.monthly_amount,
            share_of_total_pct: percent_of(item.monthly_amount, total_monthly),
        })
        .collect();

    ExpenseBreakdown {
        items,
        total_monthly,
        total_annual: total_monthly * 12.0,
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}
