//! Pipedash: planned vs. executed pipeline dashboard
//!
//! Reads semicolon-delimited work-item exports and reports planned (edital)
//! against executed (executivo) lengths, overall and by diameter and method.

pub mod cli;
pub mod core;
