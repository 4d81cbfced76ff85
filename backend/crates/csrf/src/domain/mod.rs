//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (CsrfSession)
//! - Value objects (CsrfToken, TokenSize)
//! - Domain services (token comparison)
//! - Repository traits (SessionTokenStore)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
