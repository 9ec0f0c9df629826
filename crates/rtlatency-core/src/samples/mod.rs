//! Latency sample files
//!
//! This module contains:
//! - CSV loading and unit conversion ([`reader`])
//! - CSV output for measured wakeup latencies ([`writer`])

pub mod reader;
pub mod writer;
