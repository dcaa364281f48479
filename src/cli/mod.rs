//! # CLI Module
//!
//! Thin command-line wrapper around [`crate::config`], [`crate::generator`]
//! and [`crate::linter`]. It parses arguments, calls the library and prints a
//! one-line summary; it performs no generation logic itself.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! ```bash
//! crudgen generate shop.json --output-dir out --seed 42 --fmt
//! ```
//!
//! Options:
//! - `-o, --output-dir <DIR>` - Parent directory of the project root (default: `.`)
//! - `--seed <N>` - Seed for the port default (also `CRUDGEN_SEED`)
//! - `--port <N>` - Port override
//! - `--fmt` - Run `gofmt -w .` over the result
//!
//! ### `validate`
//!
//! ```bash
//! crudgen validate shop.yaml
//! ```
//!
//! ### `lint`
//!
//! ```bash
//! crudgen lint shop.toml --fail-on-error
//! ```

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
