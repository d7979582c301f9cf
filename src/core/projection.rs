use super::types::{Profile, ProjectionOptions, Status, TrajectoryPoint};

/// Year-by-year balance from the profile's current age through the default
/// horizon.
pub fn compute_trajectory(profile: &Profile) -> Vec<TrajectoryPoint> {
    compute_trajectory_with(profile, &ProjectionOptions::default())
}

/// Each entry records the balance after that age's year of growth and
/// contribution, so the first point is already one year ahead of the
/// starting principal. Contributions escalate with salary growth and are
/// posted once per year while the person is still working.
pub fn compute_trajectory_with(
    profile: &Profile,
    options: &ProjectionOptions,
) -> Vec<TrajectoryPoint> {
    let horizon = options.effective_horizon(profile);
    if profile.age > horizon {
        return Vec::new();
    }

    let growth = 1.0 + profile.annual_return_pct / 100.0;
    let salary_growth = 1.0 + profile.salary_growth_pct / 100.0;

    let mut balance = profile.total_savings();
    let mut trajectory = Vec::with_capacity((horizon - profile.age + 1) as usize);
    for age in profile.age..=horizon {
        let years_elapsed = age - profile.age;
        if contributes_at(profile, age) {
            let monthly = profile.monthly_contributions * salary_growth.powi(years_elapsed as i32);
            balance = balance * growth + monthly * 12.0;
        } else {
            balance *= growth;
            if options.clamp_balance_at_zero {
                balance = balance.max(0.0);
            }
        }
        trajectory.push(TrajectoryPoint { age, balance });
    }
    trajectory
}

fn contributes_at(profile: &Profile, age: u32) -> bool {
    profile.status == Status::Working && age < profile.retirement_age
}

pub fn years_to_retirement(profile: &Profile) -> u32 {
    profile.retirement_age.saturating_sub(profile.age)
}

/// Retirement goal compounded forward by inflation to the retirement year.
/// Someone already past retirement age gets the goal unchanged.
pub fn compute_inflation_adjusted_goal(profile: &Profile) -> f64 {
    let inflation = 1.0 + profile.inflation_pct / 100.0;
    profile.retirement_goal * inflation.powi(years_to_retirement(profile) as i32)
}

fn retirement_index(trajectory: &[TrajectoryPoint], profile: &Profile) -> Option<usize> {
    let index = i64::from(profile.retirement_age) - i64::from(profile.age);
    usize::try_from(index)
        .ok()
        .filter(|&index| index < trajectory.len())
}

/// Whether the trajectory actually contains the retirement year.
pub fn retirement_within_horizon(trajectory: &[TrajectoryPoint], profile: &Profile) -> bool {
    retirement_index(trajectory, profile).is_some()
}

/// Balance recorded for the retirement age.
///
/// When the retirement age falls outside the trajectory (beyond the horizon,
/// or before the current age) the final entry is returned instead, which
/// overstates or understates the real figure. Callers should check
/// [`retirement_within_horizon`] before presenting it as the retirement
/// balance. An empty trajectory yields today's total savings.
pub fn compute_projected_at_retirement(trajectory: &[TrajectoryPoint], profile: &Profile) -> f64 {
    match retirement_index(trajectory, profile) {
        Some(index) => trajectory[index].balance,
        None => trajectory
            .last()
            .map(|point| point.balance)
            .unwrap_or_else(|| profile.total_savings()),
    }
}

pub fn is_on_track(projected_at_retirement: f64, inflation_adjusted_goal: f64) -> bool {
    projected_at_retirement >= inflation_adjusted_goal
}
