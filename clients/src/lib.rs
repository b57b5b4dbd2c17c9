//! Library half of the `dissoc` client: configuration loading and command
//! execution, kept out of the binary so they can be tested.

#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

pub mod commands;
pub mod config;

pub use commands::{run, Command, Outcome};
pub use config::{Config, GroupKind, Overrides};
