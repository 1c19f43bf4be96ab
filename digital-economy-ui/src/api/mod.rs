//! Evaluation backend access

pub mod client;

pub use client::*;
