//! # mval-cli: Command Line for Model Validation
//!
//! Provides the `mval` binary.
//!
//! ## Subcommands
//!
//! - `mval validate`: validate a model with the built-in rules.
//! - `mval rules`: list the registered rules.
//!
//! ```bash
//! mval validate --model system.yaml
//! mval validate --model system.yaml --element 3f0c8f7e-8d7a-4c55-9a43-5b6f0a3c1d20 --format json
//! mval validate --model system.yaml --save-results results.json
//! mval validate --model system.yaml --resume results.json --rule Rule-002
//! mval rules --config mval.yaml --format yaml
//! ```

pub mod config;
pub mod output;
pub mod rules;
pub mod validate;

pub use config::CliConfig;
pub use output::OutputFormat;
