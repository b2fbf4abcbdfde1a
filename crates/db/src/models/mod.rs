//! Row models.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a table
//! row. Create and update DTOs live with the domain types in
//! `scenestore_core`.

pub mod object;
