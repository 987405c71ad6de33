// [libs/domain/feedback-memory/src/history.rs]
//! Composición del `history_mod` consumido por el smart scorer (§4.9):
//! `-40` si la arista está en whitelist, si no el modificador de
//! feedback más reciente.

use crate::record::{feedback_modifier, FeedbackRecord};

pub const WHITELIST_MODIFIER: i32 = -40;
pub const WHITELIST_REASON: &str = "edge is on tenant's active whitelist";

/// Devuelve `(history_mod, reason)` listo para `ScorerInput` de
/// `risk-engine`, sin acoplar ese crate a los tipos de feedback.
pub fn compute_history_mod(
    whitelisted: bool,
    latest_feedback: Option<&FeedbackRecord>,
) -> (i32, Option<String>) {
    if whitelisted {
        return (WHITELIST_MODIFIER, Some(WHITELIST_REASON.to_string()));
    }

    match latest_feedback {
        Some(record) => {
            let modifier = feedback_modifier(Some(record));
            let reason = if modifier != 0 {
                Some(format!("feedback verdict: {:?}", record.verdict))
            } else {
                None
            };
            (modifier, reason)
        }
        None => (0, None),
    }
}
