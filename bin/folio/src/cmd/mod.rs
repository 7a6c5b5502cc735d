//! Command implementations.

pub mod check;
pub mod index;
pub mod recent;
pub mod search;
