//! Credit Scoring Domain
//!
//! This crate implements the deterministic credit risk decision engine: a pure
//! function from an applicant's financial profile and a requested loan amount
//! to a risk score, a preliminary decision, a maximum safe loan amount, and a
//! list of explanatory reason codes.
//!
//! # Pipeline
//!
//! ```text
//! FinancialProfile + requested amount
//!     -> affordability (recommended max, debt-to-income)
//!     -> rule pipeline (score deltas + reason codes)
//!     -> decision bands + overleverage override
//!     -> ScoreResult
//! ```
//!
//! The engine performs no I/O and holds no state; identical inputs always
//! produce identical results, so invocations are freely concurrent and
//! retryable.

pub mod affordability;
pub mod engine;
pub mod error;
pub mod policy;
pub mod ports;
pub mod profile;
pub mod rules;

pub use engine::{score, ScoreResult};
pub use error::ScoringError;
pub use policy::{Decision, ScoringPolicy};
pub use ports::{NarrativePort, ProfileStore};
pub use profile::{CreditHistory, FinancialProfile, IncomeProof};
pub use rules::ReasonCode;
