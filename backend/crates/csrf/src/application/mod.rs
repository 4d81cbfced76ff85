//! Application Layer - Use Cases
//!
//! Orchestrates domain logic and the session token store.

pub mod config;
pub mod issue_token;
pub mod protect_request;
pub mod session_token;
pub mod validate_token;

pub use issue_token::{IssueTokenOutput, IssueTokenUseCase};
pub use protect_request::ProtectRequestUseCase;
pub use validate_token::ValidateTokenUseCase;
