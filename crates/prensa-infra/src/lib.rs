//! # Prensa Infrastructure
//!
//! Concrete implementations of the ports defined in `prensa-core`:
//! the SeaORM-backed relational store, an in-memory store for
//! database-less operation, and the JWT identity provider adapter.

pub mod auth;
pub mod database;

pub use auth::{JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository, PostgresPostRepository};
