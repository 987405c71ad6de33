// [libs/domain/feedback-memory/src/lib.rs]
/*!
 * =================================================================
 * APARATO: FEEDBACK & WHITELIST MEMORY (C9)
 * CLASIFICACIÓN: DOMAIN MODEL + STORE CONTRACT (ESTRATO L2)
 * =================================================================
 */

pub mod error;
pub mod history;
pub mod record;
pub mod store;
pub mod whitelist;

pub use error::{FeedbackError, FeedbackResult};
pub use history::{compute_history_mod, WHITELIST_MODIFIER};
pub use record::{feedback_modifier, FeedbackRecord, FeedbackVerdict};
pub use store::FeedbackStore;
pub use whitelist::{SuppressRule, WhitelistEntry, AUTO_WHITELIST_REASON};
