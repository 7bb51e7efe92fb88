#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! TUI client for generating multiple choice questions from documents.

pub mod client;
pub mod config;
pub mod model;
pub mod tui;
