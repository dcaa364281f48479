//! # Generator Module
//!
//! The generator turns a [`ProjectConfig`](crate::config::ProjectConfig) into a
//! complete Go CRUD service: domain types, repository interfaces, storage
//! implementations per backend, use-cases, REST controllers, proto contracts,
//! controller tests, migrations and the project scaffolding around them.
//!
//! ## Architecture
//!
//! ```text
//! ProjectConfig → Planner → Emitter (TemplateRegistry + mapping helpers) → output tree
//! ```
//!
//! 1. **Planner** ([`plan_project`]) - resolves backends and computes every
//!    directory and file for the enabled features, before anything is written
//! 2. **Template Registry** ([`TemplateRegistry`]) - one Askama template per
//!    artifact kind, compiled into the binary
//! 3. **Emitter** ([`Emitter`]) - renders an artifact and writes it, creating
//!    parent directories and overwriting existing files
//! 4. **Assembler** ([`generate_project`]) - runs structure, per-entity and
//!    project-wide phases in a fixed order
//!
//! ## Generated Structure
//!
//! ```text
//! shop/
//! ├── go.mod
//! ├── config.yaml
//! ├── Dockerfile                    # docker
//! ├── docker-compose.yml            # docker
//! ├── README.md
//! ├── Makefile
//! ├── cmd/server/main.go
//! ├── internal/
//! │   ├── domain/order.go
//! │   ├── repository/order.go
//! │   ├── repository/postgres/order.go
//! │   ├── usecase/order.go
//! │   └── controller/order.go       # rest
//! ├── proto/order.proto             # grpc
//! ├── migrations/postgres/001_create_order.up.sql   # migrations
//! └── tests/unit/order_controller_test.go           # tests
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudgen::config::load_config;
//! use crudgen::generator::{generate_project, GenerateOptions};
//!
//! let mut config = load_config("shop.json".as_ref())?;
//! let report = generate_project(&mut config, &GenerateOptions::new("out"))?;
//! println!("{} files under {}", report.files.len(), report.root.display());
//! ```
//!
//! ## Templates
//!
//! Template bodies live in `templates/` and are checked at compile time:
//!
//! - `domain.go.txt`, `repository.go.txt`, `usecase.go.txt`
//! - `postgres_repository.go.txt`, `mongodb_repository.go.txt`
//! - `rest_controller.go.txt`, `service.proto.txt`, `controller_test.go.txt`
//! - `postgres_migration.sql.txt`, `mongodb_migration.json.txt`
//! - `main.go.txt`, `config.yaml.txt`, `Dockerfile.txt`, `docker-compose.yml.txt`

mod emit;
mod error;
pub mod mapping;
mod plan;
mod project;
mod scaffold;
mod templates;

pub use emit::Emitter;
pub use error::GenerateError;
pub use plan::*;
pub use project::*;
pub use scaffold::*;
pub use templates::*;
