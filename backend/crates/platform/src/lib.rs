//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (OS randomness, HMAC-SHA256, encodings, constant-time eq)
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
