//! Affordability calculations
//!
//! Derives the debt-to-income ratio and the maximum recommendable loan amount
//! from a financial profile under the policy's term assumption.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::policy::ScoringPolicy;
use crate::profile::FinancialProfile;

/// Maximum loan amount that can be recommended for this profile
///
/// Works backwards from the monthly payment the applicant can afford: income
/// times the safe-DTI ceiling, minus existing obligations, spread over the
/// policy loan term. An applicant already spending past the ceiling gets a
/// zero recommendation, as does one with no income.
pub fn recommended_max_amount(profile: &FinancialProfile, policy: &ScoringPolicy) -> Decimal {
    let max_total_monthly_payment = profile.income * policy.max_safe_dti;
    let available_for_new_payment =
        (max_total_monthly_payment - profile.monthly_payments).max(Decimal::ZERO);

    available_for_new_payment * Decimal::from(policy.loan_term_months)
}

/// Debt-to-income ratio including the payment on the requested amount
///
/// A zero income forces the ratio to 1.0, the worst case.
pub fn debt_to_income(
    profile: &FinancialProfile,
    requested_amount: Decimal,
    policy: &ScoringPolicy,
) -> Decimal {
    if profile.income.is_zero() {
        return dec!(1.0);
    }

    let new_monthly_payment = requested_amount / Decimal::from(policy.loan_term_months);
    (profile.monthly_payments + new_monthly_payment) / profile.income
}
