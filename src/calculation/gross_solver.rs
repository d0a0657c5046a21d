//! Gross-for-take-home solver.
//!
//! This module inverts [`calculate_deductions`]: given the take-home pay an
//! employee should receive, it finds the smallest whole-franc gross salary
//! that yields at least that much after every deduction.
//!
//! The inversion is a bounded numeric search rather than a closed form per
//! bracket, so it keeps working when the bracket table or contribution rates
//! change. It runs in three phases:
//!
//! 1. Bracketing: grow an upper bound until its take-home reaches the target.
//! 2. Bisection: narrow the interval until take-home is within `tolerance`
//!    of the target, the iteration cap is reached, or the midpoint can no
//!    longer be represented between the bounds.
//! 3. Whole-unit adjustment: round the bounds out to whole francs and
//!    narrow down to the minimal whole franc reaching the target.
//!
//! Phase 3 alone determines the answer; `tolerance` and `max_iterations`
//! only decide how much work phase 2 saves it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{DeductionSchedule, SolverSettings};
use crate::models::{DeductionResult, MoneyAmount};

use super::deductions::calculate_deductions;

/// The outcome of a solve, with counters describing the work done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrossSolution {
    /// Deductions at the solved gross, rounded to whole units.
    pub result: DeductionResult,
    /// Whether an upper bound reaching the target was found. When false the
    /// target lies beyond any representable gross and `result` is taken at
    /// the largest gross tried, so its take-home falls short of the target.
    pub bracketed: bool,
    /// Times the upper bound was doubled while bracketing.
    pub doublings: u32,
    /// Bisection steps taken.
    pub iterations: u32,
    /// Whether bisection stopped on the tolerance check.
    pub converged: bool,
    /// Whole-unit evaluations spent narrowing to the minimal gross.
    pub adjustment_steps: u32,
}

/// Finds the minimal whole-unit gross whose take-home reaches `target`.
///
/// Returns the rounded [`DeductionResult`] at that gross. A target of zero or
/// less returns the all-zero result without searching.
///
/// Targets so large that no representable gross reaches them are not
/// solvable; callers taking untrusted input should bound the target first
/// with [`SolverSettings::check_take_home`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{calculate_deductions, solve_for_take_home};
/// use payroll_engine::config::{DeductionSchedule, SolverSettings};
/// use rust_decimal_macros::dec;
///
/// let schedule = DeductionSchedule::rwanda();
/// let result = solve_for_take_home(dec!(100000), true, &schedule, &SolverSettings::default());
///
/// assert_eq!(result.gross_pay, dec!(129805));
/// assert!(calculate_deductions(dec!(129805), true, &schedule).take_home_2 >= dec!(100000));
/// assert!(calculate_deductions(dec!(129804), true, &schedule).take_home_2 < dec!(100000));
/// ```
pub fn solve_for_take_home(
    target: MoneyAmount,
    apply_tax: bool,
    schedule: &DeductionSchedule,
    settings: &SolverSettings,
) -> DeductionResult {
    solve_with_stats(target, apply_tax, schedule, settings).result
}

/// Same as [`solve_for_take_home`], also reporting how the search went.
pub fn solve_with_stats(
    target: MoneyAmount,
    apply_tax: bool,
    schedule: &DeductionSchedule,
    settings: &SolverSettings,
) -> GrossSolution {
    if target <= Decimal::ZERO {
        return GrossSolution {
            result: calculate_deductions(Decimal::ZERO, apply_tax, schedule).rounded(),
            bracketed: true,
            doublings: 0,
            iterations: 0,
            converged: true,
            adjustment_steps: 0,
        };
    }

    let take_home_at = |gross: Decimal| calculate_deductions(gross, apply_tax, schedule).take_home_2;

    // Phase 1: bracket the root. A seed too large to represent starts at
    // the largest representable gross.
    let seed = target
        .checked_div(settings.take_home_floor_ratio)
        .unwrap_or(Decimal::MAX);
    let mut lo = Decimal::ZERO;
    let mut hi = seed.max(settings.initial_upper_bound);
    let mut doublings = 0;
    while doublings < settings.max_doublings && take_home_at(hi) < target {
        if hi == Decimal::MAX {
            break;
        }
        hi = hi.checked_mul(Decimal::TWO).unwrap_or(Decimal::MAX);
        doublings += 1;
    }

    if take_home_at(hi) < target {
        warn!(
            target = %target,
            gross = %hi,
            doublings,
            "No gross reaches the target take-home"
        );
        return GrossSolution {
            result: calculate_deductions(hi.floor(), apply_tax, schedule).rounded(),
            bracketed: false,
            doublings,
            iterations: 0,
            converged: false,
            adjustment_steps: 0,
        };
    }

    // Phase 2: bisection.
    // Invariant: take_home_at(lo) < target <= take_home_at(hi).
    let mut iterations = 0;
    let mut converged = false;
    while iterations < settings.max_iterations {
        let mid = lo + (hi - lo) / Decimal::TWO;
        if mid == lo || mid == hi {
            break;
        }
        iterations += 1;
        let take_home = take_home_at(mid);
        if take_home < target {
            lo = mid;
        } else {
            hi = mid;
        }
        if (take_home - target).abs() <= settings.tolerance {
            converged = true;
            break;
        }
    }

    // Phase 3: minimal whole unit. `hi.ceil()` still reaches the target, and
    // `lo.floor()` still misses it.
    let mut gross = hi.ceil();
    let mut miss = lo.floor();
    let mut adjustment_steps = 0;
    while gross - miss > Decimal::ONE {
        let mid = (miss + (gross - miss) / Decimal::TWO).floor();
        adjustment_steps += 1;
        if take_home_at(mid) >= target {
            gross = mid;
        } else {
            miss = mid;
        }
    }

    debug!(
        target = %target,
        apply_tax,
        gross = %gross,
        doublings,
        iterations,
        converged,
        adjustment_steps,
        "Solved gross for take-home"
    );

    GrossSolution {
        result: calculate_deductions(gross, apply_tax, schedule).rounded(),
        bracketed: true,
        doublings,
        iterations,
        converged,
        adjustment_steps,
    }
}

/// Computes the gross salary and full deduction breakdown for a target
/// take-home pay under the built-in Rwandan schedule.
///
/// This is the engine's public entry point; the usual call passes
/// `apply_tax = true`, a tolerance of one franc and 60 iterations.
///
/// # Examples
///
/// ```
/// use payroll_engine::compute_gross_for_take_home;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// let result = compute_gross_for_take_home(dec!(100000), true, Decimal::ONE, 60);
/// assert_eq!(result.gross_pay, dec!(129805));
/// assert_eq!(result.paye, dec!(9961));
/// assert_eq!(result.take_home_2, dec!(100001));
/// ```
pub fn compute_gross_for_take_home(
    take_home: MoneyAmount,
    apply_tax: bool,
    tolerance: MoneyAmount,
    max_iterations: u32,
) -> DeductionResult {
    let settings = SolverSettings::default().with_limits(tolerance, max_iterations);
    solve_for_take_home(take_home, apply_tax, &DeductionSchedule::rwanda(), &settings)
}
