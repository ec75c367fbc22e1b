//! The infractl control plane client library.
//!
//! This crate provides the core functionality of the `infractl` CLI:
//! the control plane API client, the data model, waiting for asynchronous
//! operations and command execution.
//!
//! # Modules
//!
//! - `actions`: Command implementations
//! - `cli`: Dispatch of parsed command lines to actions
//! - `client`: Typed control plane API client
//! - `commands`: CLI command parsing
//! - `configuration`: Configuration loading
//! - `format`: Output formatting (tsv, json, yaml)
//! - `model`: Data models for tasks and resources
//! - `waiter`: Task completion and resource readiness polling

pub mod actions;
pub mod cli;
pub mod client;
pub mod commands;
pub mod configuration;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod format;
pub mod http_utils;
pub mod model;
pub mod waiter;
