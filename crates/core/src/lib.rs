//! Domain layer for the scene object store.
//!
//! Holds everything that is neither HTTP nor SQL: the object document and its
//! validation rules, stored-file naming, image variant derivation and the
//! on-disk asset store.

pub mod error;
pub mod imaging;
pub mod naming;
pub mod object;
pub mod storage;
pub mod transform;
pub mod types;
