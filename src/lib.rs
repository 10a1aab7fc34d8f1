//! Library entry for Vitrina exposing the view pipeline for integration tests.

pub mod app;
pub mod catalog;
pub mod config;
pub mod logic;
pub mod state;
pub mod util;
