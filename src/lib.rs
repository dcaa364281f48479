//! # crudgen
//!
//! **crudgen** turns a small declarative model of a service (a project name, a
//! Go module path, a list of entities with typed fields, the storage backends
//! to support and a handful of feature switches) into a complete, layered Go
//! CRUD project on disk.
//!
//! ## Overview
//!
//! Every entity gets a domain type, a repository interface, a use case and one
//! repository implementation per configured backend. Feature switches add REST
//! controllers, protobuf contracts, controller tests, database migrations,
//! container files and Swagger annotations. Project-wide files (entrypoint,
//! `config.yaml`, `go.mod`, `README.md`, `Makefile`) wire the pieces together.
//!
//! ## Architecture
//!
//! - **[`config`]** - Configuration model, JSON/YAML/TOML loading and validation
//! - **[`generator`]** - Planning, template rendering and file emission
//! - **[`linter`]** - Advisory checks over a configuration
//! - **[`logging`]** - `tracing` subscriber setup for the binary
//! - **[`cli`]** - The `crudgen` command-line front end
//!
//! ### Generation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(crudgen)
//!     participant Config as config::load_config
//!     participant Plan as generator::plan_project
//!     participant Registry as generator::TemplateRegistry
//!     participant Emitter as generator::Emitter
//!     participant FS as File System
//!
//!     User->>CLI: crudgen generate shop.json -o out
//!     CLI->>Config: load_config("shop.json")
//!     Config->>Config: Parse + validate
//!     Config-->>CLI: ProjectConfig
//!
//!     CLI->>Plan: plan_project(&config, port, &registry)
//!     Plan->>Registry: resolve_backend(id)
//!     alt Unknown backend
//!         Registry-->>CLI: GenerateError (nothing written)
//!     end
//!     Plan-->>CLI: ProjectPlan (dirs, files, order)
//!
//!     CLI->>Emitter: create dirs + go.mod
//!     loop Each entity
//!         Emitter->>Registry: render(artifact)
//!         Emitter->>FS: write file
//!     end
//!     Emitter->>FS: main.go, config.yaml, Docker files
//!     Emitter->>FS: README.md, Makefile
//!     CLI-->>User: ✅ Generated N files
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use crudgen::config::load_config;
//! use crudgen::generator::{generate_project, GenerateOptions};
//! use std::path::Path;
//!
//! let mut config = load_config(Path::new("shop.json"))?;
//! let report = generate_project(&mut config, &GenerateOptions::new("out"))?;
//! println!("{} files under {}", report.files.len(), report.root.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Generated Project Structure
//!
//! For an entity `Order` with the `postgres` backend and every feature on:
//!
//! ```text
//! shop/
//! ├── go.mod
//! ├── config.yaml
//! ├── Dockerfile
//! ├── docker-compose.yml
//! ├── README.md
//! ├── Makefile
//! ├── cmd/server/main.go
//! ├── internal/
//! │   ├── domain/order.go
//! │   ├── repository/order.go
//! │   ├── repository/postgres/order.go
//! │   ├── usecase/order.go
//! │   └── controller/order.go
//! ├── proto/order.proto
//! ├── tests/unit/order_controller_test.go
//! └── migrations/postgres/001_create_order.up.sql
//! ```
//!
//! Regenerating into the same directory overwrites every produced file; files
//! the generator does not produce are left alone.

pub mod cli;
pub mod config;
pub mod generator;
pub mod linter;
pub mod logging;

pub use config::{load_config, ConfigError, ProjectConfig};
pub use generator::{generate_project, GenerateError, GenerateOptions, GenerationReport};
