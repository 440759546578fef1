//! Structured logging setup.
//!
//! Every layer logs through `tracing` macros: a `debug_span!` per handled
//! event and per worker effect, with structured fields such as `ticket`,
//! `phase` and `result_count`. This module only installs the subscriber.
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` config option
//! 3. Default: `"info"`
//!
//! # Usage
//!
//! Initialize tracing early, before the first event is dispatched:
//!
//! ```rust
//! use foodfinder::observability::init_tracing;
//! use foodfinder::Config;
//!
//! let config = Config::default();
//! init_tracing(&config);
//!
//! tracing::debug!("coordinator initialized");
//! ```

mod init;

pub use init::init_tracing;
