//! Core Kernel - Foundational types and utilities for the lending system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Strongly-typed identifiers for domain entities
//! - Common error types
//! - Port abstractions for the hexagonal architecture

pub mod error;
pub mod identifiers;
pub mod ports;

pub use error::CoreError;
pub use identifiers::{AgentId, ApplicantId, ApplicationId};
pub use ports::{DomainPort, PortError};
