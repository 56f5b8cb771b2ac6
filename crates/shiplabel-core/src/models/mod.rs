//! Data models for addresses, packages, labels and configuration.

pub mod address;
pub mod config;
pub mod label;
pub mod package;
pub mod tracking;
