//! Repository implementations of the domain storage ports

pub mod applications;
pub mod profiles;

pub use applications::PgApplicationStore;
pub use profiles::PgProfileStore;
