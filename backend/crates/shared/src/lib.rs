//! Shared Kernel - Vocabulary shared by every crate in the workspace
//!
//! Holds the pieces whose meaning must not drift between crates:
//! - The unified HTTP-facing error type and its classification
//! - Typed identifiers (session ids)
//!
//! Keep this crate small. Domain logic belongs in the domain crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
