//! Command implementations

pub mod about;
pub mod clean;
pub mod generate;
pub mod list;
pub mod postbuild;
pub mod show;
pub mod tools;
