//! Money helpers shared by every calculation.
//!
//! Amounts are [`Decimal`]s in Rwandan francs. Solver arithmetic is kept at
//! full precision; only values handed back to callers are rounded.

use rust_decimal::Decimal;

/// A monetary amount in the single unit of account.
pub type MoneyAmount = Decimal;

/// Coerces an optional amount to a number, treating a missing value as zero.
///
/// Every place where row data enters a calculation goes through this, so a
/// blank field degrades to a zero-valued computation instead of an error.
///
/// ```
/// use payroll_engine::models::or_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(or_zero(None), Decimal::ZERO);
/// assert_eq!(or_zero(Some(Decimal::TEN)), Decimal::TEN);
/// ```
pub fn or_zero(amount: Option<MoneyAmount>) -> MoneyAmount {
    amount.unwrap_or(Decimal::ZERO)
}

/// Rounds an amount to whole currency units (banker's rounding).
pub fn round_whole(amount: MoneyAmount) -> MoneyAmount {
    amount.round_dp(0)
}

/// Clamps negative amounts to zero.
pub fn non_negative(amount: MoneyAmount) -> MoneyAmount {
    amount.max(Decimal::ZERO)
}
