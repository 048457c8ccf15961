//! Users Core
//!
//! Store-agnostic types, validation rules and error handling for the users
//! service.
//!
//! This crate is shared by the storage layer, the HTTP server and the client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `UserFields`, `UserInput`
//! - **Validation**: `validate`, accumulating every violation
//! - **Wire Format**: the `Envelope` wrapper every API response uses
//! - **Store Trait**: `UserStore`, implemented by `SQLite` and in-memory stores
//! - **Error Handling**: `UsersError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use users_core::{validate, UserInput};
//!
//! let input = UserInput::new("  Ana ", " Ana@Example.com ");
//! let fields = validate(&input).unwrap();
//!
//! assert_eq!(fields.name, "Ana");
//! assert_eq!(fields.email, "ana@example.com");
//! ```

#![forbid(unsafe_code)]

pub mod envelope;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use envelope::Envelope;
pub use error::{Result, UsersError};
pub use store::UserStore;
pub use types::{User, UserFields, UserId, UserInput};
pub use validation::{is_valid_email, validate, ValidationErrors, Violation};
