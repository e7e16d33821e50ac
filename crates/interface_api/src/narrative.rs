//! Narrative adapter
//!
//! Local, deterministic implementation of the narrative port: extracts a
//! requested amount from free text and renders a client-facing explanation of
//! a score result. The wording follows the same script the production
//! assistant uses; swapping in an LLM-backed adapter only requires another
//! implementation of `NarrativePort`.

use async_trait::async_trait;
use rust_decimal::Decimal;

use core_kernel::{DomainPort, PortError};
use domain_scoring::{Decision, NarrativePort, ScoreResult};

/// Reply sent when no usable amount could be extracted from the query
pub const AMOUNT_PROMPT: &str = "I can help you with a loan calculation. Please state the \
     desired amount, for example: 'I would like a loan of 15,000,000'.";

/// Template-based narrator
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    /// Creates a new narrator
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TemplateNarrator {}

#[async_trait]
impl NarrativePort for TemplateNarrator {
    async fn extract_amount(&self, query: &str) -> Result<Option<Decimal>, PortError> {
        Ok(extract_amount(query))
    }

    async fn explain(&self, result: &ScoreResult) -> Result<String, PortError> {
        Ok(explain(result))
    }
}

/// Extracts the largest number mentioned in the query
///
/// Digit groups separated by spaces or commas are treated as one number when
/// they look like thousands grouping ("15 000 000", "50,000,000").
fn extract_amount(query: &str) -> Option<Decimal> {
    let chars: Vec<char> = query.chars().collect();
    let mut candidates: Vec<Decimal> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let mut digits = String::new();
        while i < chars.len() {
            let c = chars[i];
            if c.is_ascii_digit() {
                digits.push(c);
                i += 1;
            } else if (c == ' ' || c == ',') && is_thousands_group(&chars, i + 1) {
                i += 1; // grouping separator
            } else {
                break;
            }
        }

        if let Ok(value) = digits.parse::<Decimal>() {
            candidates.push(value);
        }
    }

    candidates.into_iter().max()
}

/// Whether the three characters at `start` form a complete thousands group
fn is_thousands_group(chars: &[char], start: usize) -> bool {
    if start + 3 > chars.len() {
        return false;
    }
    let group_is_digits = chars[start..start + 3].iter().all(|c| c.is_ascii_digit());
    let followed_by_digit = chars.get(start + 3).is_some_and(|c| c.is_ascii_digit());
    group_is_digits && !followed_by_digit
}

/// Renders the client-facing explanation for a score result
fn explain(result: &ScoreResult) -> String {
    let amount = format_amount(result.requested_amount);

    match result.decision {
        Decision::Approved => format!(
            "Congratulations! Your loan application for {} has been preliminarily \
             approved. A manager will contact you to finalize the paperwork.",
            amount
        ),
        Decision::ManualReview => {
            let mut text = format!(
                "Your loan application for {} has been sent for manual review.",
                amount
            );
            if let Some(reasons) = leading_reasons(result) {
                text.push_str(&format!(" Main factors: {}.", reasons));
            }
            if result.requested_amount > result.recommended_max_amount {
                text.push_str(
                    " In particular, the requested amount may be too high for your \
                     current income; our manager may offer an adjusted amount.",
                );
            }
            text
        }
        Decision::Denied => {
            if result.requested_amount > result.recommended_max_amount {
                let mut text = format!(
                    "Unfortunately, your loan application for {} was denied. The main \
                     reason is that the requested amount is too large for your current \
                     verified income.",
                    amount
                );
                if result.recommended_max_amount > Decimal::ZERO {
                    text.push_str(&format!(
                        " Based on your profile, we could quickly approve an amount of \
                         up to {}. You are welcome to reapply for that amount.",
                        format_amount(result.recommended_max_amount)
                    ));
                }
                text
            } else {
                let mut text = format!(
                    "Unfortunately, your loan application for {} was denied.",
                    amount
                );
                if let Some(reasons) = leading_reasons(result) {
                    text.push_str(&format!(" Main reasons: {}.", reasons));
                }
                text.push_str(
                    " We recommend improving these factors and applying again in a few \
                     months.",
                );
                text
            }
        }
    }
}

/// Short fallback used when narrative generation fails
///
/// The application is still recorded with its computed decision; only the
/// client-facing text is degraded.
pub fn generic_answer(result: &ScoreResult) -> String {
    match result.decision {
        Decision::Approved => "Your application has been preliminarily approved.",
        Decision::ManualReview => "Your application has been sent for manual review.",
        Decision::Denied => "Unfortunately, your application was denied.",
    }
    .to_string()
}

fn leading_reasons(result: &ScoreResult) -> Option<String> {
    if result.recommendations.is_empty() {
        return None;
    }
    let listed: Vec<String> = result
        .recommendations
        .iter()
        .take(2)
        .map(|r| r.to_string())
        .collect();
    Some(listed.join("; "))
}

fn format_amount(amount: Decimal) -> String {
    amount.round_dp(0).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_scoring::{score, CreditHistory, FinancialProfile, IncomeProof, ScoringPolicy};
    use rust_decimal_macros::dec;

    fn strong_profile() -> FinancialProfile {
        FinancialProfile {
            income: dec!(500000),
            monthly_payments: dec!(50000),
            credit_history: CreditHistory::NoIssues,
            job_experience_years: dec!(5),
            age: 35,
            income_proof: IncomeProof::Official,
        }
    }

    #[test]
    fn test_extract_plain_number() {
        assert_eq!(extract_amount("I want 15000000"), Some(dec!(15000000)));
    }

    #[test]
    fn test_extract_grouped_number() {
        assert_eq!(
            extract_amount("I would like a loan of 15 000 000 for a car"),
            Some(dec!(15000000))
        );
        assert_eq!(extract_amount("give me 50,000,000"), Some(dec!(50000000)));
    }

    #[test]
    fn test_extract_prefers_largest_candidate() {
        assert_eq!(
            extract_amount("I need 2000000 for 5 years"),
            Some(dec!(2000000))
        );
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_amount("how do loans work?"), None);
    }

    #[test]
    fn test_adjacent_words_do_not_merge_numbers() {
        // "5" and "30" are separate numbers, not a thousands group
        assert_eq!(extract_amount("5 year term, 30 days"), Some(dec!(30)));
    }

    #[test]
    fn test_approved_explanation() {
        let result = score(&strong_profile(), dec!(1000000), &ScoringPolicy::default()).unwrap();
        let text = explain(&result);
        assert!(text.contains("preliminarily approved"));
        assert!(text.contains("1000000"));
    }

    #[test]
    fn test_denied_over_request_offers_alternative() {
        let result =
            score(&strong_profile(), dec!(50000000000), &ScoringPolicy::default()).unwrap();
        let text = explain(&result);
        assert!(text.contains("denied"));
        assert!(text.contains("too large"));
        // The recommended alternative is included
        assert!(text.contains("9000000"));
    }
}
