//! Latency statistics
//!
//! Fixed-range histogram binning ([`histogram`]) and summary
//! statistics over a whole series ([`summary`]).

pub mod histogram;
pub mod summary;
