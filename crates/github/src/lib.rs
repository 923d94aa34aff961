//! GitHub API surface for roastbot.
//!
//! This crate provides:
//! - A REST client for the three endpoints the service calls (repository
//!   variables, issue comments, commit comments)
//! - Webhook payload types for `workflow_run` events
//! - Webhook signature verification

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod events;
pub mod webhooks;

pub use client::GithubClient;
pub use error::GithubError;
pub use events::*;
pub use webhooks::verify_signature;
