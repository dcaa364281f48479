//! # Project Configuration
//!
//! The declarative input to the generator: a project name, a Go module path,
//! an ordered list of entities, the storage backends to generate, and a set
//! of feature switches.
//!
//! ```json
//! {
//!   "name": "shop",
//!   "module": "github.com/acme/shop",
//!   "entities": [
//!     { "name": "Order", "fields": [{ "name": "Total", "type": "float64", "required": true }] }
//!   ],
//!   "repositories": ["postgres"],
//!   "features": { "rest": true, "migrations": true }
//! }
//! ```
//!
//! Documents may be JSON, YAML or TOML (picked by file extension). Everything
//! is parsed and validated before the generator touches the filesystem.

mod error;
mod load;
mod types;

pub use error::ConfigError;
pub use load::*;
pub use types::*;
