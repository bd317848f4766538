//! Library side of the `payrun` binary: profile config, logging and the
//! per-profile run.

pub mod config;
pub mod logging;
pub mod run;
pub mod types;
