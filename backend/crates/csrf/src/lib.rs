//! CSRF (Cross-Site Request Forgery) Protection Module
//!
//! Clean Architecture structure:
//! - `domain/` - Tokens, session records, store trait
//! - `application/` - Use cases (issue, validate, protect) and configuration
//! - `infra/` - Store implementations
//! - `presentation/` - HTTP handlers, middleware, router
//!
//! ## Security Model
//! - Synchronizer token pattern: each session holds at most one pending token
//! - Tokens are 128-bit (configurable) OS-random values, hex encoded
//! - Issuance emits the token in the JSON body and a host-only, strict cookie
//! - Comparison is exact and constant-time
//! - With single-use enabled a token is spent atomically on success
//! - Session ids travel in an HMAC-signed cookie

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{ConfigError, CsrfConfig, TokenSource};
pub use domain::repository::{LocalSessionTokenStore, SessionTokenStore};
pub use domain::value_objects::{CsrfToken, TokenSize};
pub use error::{CsrfError, CsrfResult};
pub use infra::memory::MemorySessionTokenStore;
pub use presentation::handlers::CsrfAppState;
pub use presentation::middleware::SessionContext;
pub use presentation::router::{csrf_router, csrf_router_generic, protect, with_sessions};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
