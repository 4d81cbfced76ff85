//! Infrastructure Layer
//!
//! Session token store implementations.

pub mod memory;
