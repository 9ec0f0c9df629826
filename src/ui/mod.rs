//! User interface module
//!
//! Contains the interactive histogram window ([`histogram_window`]).

pub mod histogram_window;
