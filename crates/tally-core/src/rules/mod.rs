//! Input rules applied before a request is built
//!
//! - `validation`: identifier syntax and wallet resolution
//! - `amount`: textual amounts to smallest-unit integers

pub mod amount;
pub mod validation;

pub use amount::parse_amount;
pub use validation::{account_context, validate_identifier};
