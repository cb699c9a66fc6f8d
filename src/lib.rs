//! taskdash - Task Dashboard Core Library
//!
//! This library keeps a local task collection consistent with a remote task
//! service and derives live aggregate projections from it for dashboard
//! rendering.
//!
//! # Core Concepts
//!
//! - **Repository**: the remote task service behind an async CRUD contract
//! - **Store**: the single authoritative snapshot, replaced wholesale on
//!   every successful refresh
//! - **Projections**: pure status-by-day and priority-count aggregates
//!   recomputed from each snapshot
//! - **Dashboard**: the controller that relays commands and publishes
//!   collection plus projections to the presentation layer
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `.taskdash.toml`
//! - `error`: error types and result aliases
//! - `task`: task model and wire format
//! - `repository`: task service contract and HTTP implementation
//! - `store`: snapshot ownership and refresh-after-mutation sync
//! - `aggregate`: projection functions
//! - `dashboard`: controller and published dashboard state
//! - `output`: shared CLI output formatting

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod output;
pub mod repository;
pub mod store;
pub mod task;

pub use error::{Error, Result};
