//! SeaORM entity models.

pub mod post;
