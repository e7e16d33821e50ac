//! Application Review Domain
//!
//! This crate implements the lifecycle of a scoring application from the
//! moment the engine produces its decision through final human-agent
//! resolution.
//!
//! # Lifecycle
//!
//! ```text
//! score -> Approved / Denied          (auto-terminal at creation)
//!       -> Pending -> AgentApproved   (agent action)
//!                  -> AgentDenied     (agent action)
//! ```
//!
//! A record is only left open for human action when the automatic decision
//! was itself ambiguous; every other state is terminal.

pub mod application;
pub mod error;
pub mod ports;

pub use application::{Application, ReviewAction, ReviewStatus};
pub use error::ReviewError;
pub use ports::{ApplicationFilter, ApplicationStore, Page, PagedApplications};
