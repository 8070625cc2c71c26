//! Outcome label/index lookup
//!
//! Every provider stores outcome labels as an ordered list positionally
//! aligned with its pricing data. These lookups are shared so the error
//! semantics are identical regardless of source.

use crate::error::{MarketError, MarketResult};

/// Position of `outcome` within `outcomes`
pub fn outcome_index(outcomes: &[String], outcome: &str) -> MarketResult<usize> {
    outcomes
        .iter()
        .position(|candidate| candidate == outcome)
        .ok_or_else(|| MarketError::OutcomeNotFound {
            outcome: outcome.to_string(),
            outcomes: outcomes.to_vec(),
        })
}

/// Outcome label stored at `index`
pub fn outcome_at(outcomes: &[String], index: usize) -> MarketResult<&str> {
    outcomes
        .get(index)
        .map(String::as_str)
        .ok_or(MarketError::OutcomeIndexOutOfRange {
            index,
            len: outcomes.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes() -> Vec<String> {
        vec!["Yes".to_string(), "No".to_string()]
    }

    #[test]
    fn index_and_label_round_trip() {
        let outcomes = outcomes();
        for i in 0..outcomes.len() {
            let label = outcome_at(&outcomes, i).unwrap();
            assert_eq!(outcome_index(&outcomes, label).unwrap(), i);
        }
    }

    #[test]
    fn unknown_label_fails() {
        assert!(matches!(
            outcome_index(&outcomes(), "Maybe"),
            Err(MarketError::OutcomeNotFound { .. })
        ));
    }

    #[test]
    fn index_past_end_fails() {
        let outcomes = outcomes();
        assert!(matches!(
            outcome_at(&outcomes, outcomes.len()),
            Err(MarketError::OutcomeIndexOutOfRange { index: 2, len: 2 })
        ));
    }
}
