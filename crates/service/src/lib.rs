//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business rules from data access.
//! - Reuses entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod db;
pub mod errors;
pub mod meetup;
pub mod pagination;
#[cfg(test)]
pub mod test_support;
