//! JSON configuration for the command-line demo.
pub mod grid;
