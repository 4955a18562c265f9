//! Congress Pulse HTTP service.
//!
//! Serves recent congressional bills fetched from congress.gov, filtered
//! with [`cp_bills`], plus AI-assisted bill analysis and representative
//! lookup through [`cp_llm`].

#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

pub mod analysis;
pub mod app;
pub mod build_info;
pub mod config;
pub mod congress;
pub mod representatives;
pub mod rest;
