//! CLI command implementations

pub mod apply;
pub mod info;
pub mod interactive;
