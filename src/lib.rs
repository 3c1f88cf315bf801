//! Herbarium – a catalog query service for plant records.
//!
//! Herbarium centers on the *plant record*: a small immutable fact sheet
//! of the form `(identifier, names, care attributes)`, where:
//! * A [`catalog::PlantId`] is an opaque identity (a simple `i64`).
//! * A [`catalog::Plant`] couples botanical and common names with sun
//!   tolerance, care difficulty, mature size and safety attributes.
//! * A [`catalog::PlantName`] is the name-oriented projection of a record,
//!   used whenever callers browse rather than inspect.
//!
//! Records are owned and shared by a "keeper" structure (see the `catalog`
//! module) enabling canonical sharing through `Arc` while keeping full
//! scans in ascending identifier order.
//!
//! ## Modules
//! * [`catalog`] – Record building blocks, the keeper and the identifier generator.
//! * [`engine`] – Stateless query evaluation: lookups, name searches,
//!   attribute filters and the care-quiz recommendation.
//! * [`persist`] – SQLite persistence & restoration layer.
//! * [`server`] – The HTTP surface exposing the engine over axum.
//! * [`settings`] – Layered runtime settings (defaults, file, environment).
//! * [`error`] – The error type shared across all of the above.
//!
//! ## Persistence
//! The [`persist::Persistor`] encapsulates SQLite schema creation and durable
//! storage for records. The [`catalog::Catalog`] wires a persistor together
//! with the in-memory keeper and restores prior state on startup.
//!
//! ## Quick Start
//! ```
//! use herbarium::catalog::{Catalog, Plant, UNASSIGNED};
//! use herbarium::engine::Engine;
//! use herbarium::persist::PersistenceMode;
//!
//! let catalog = Catalog::open(PersistenceMode::InMemory).unwrap();
//! let engine = Engine::new(&catalog);
//! engine
//!     .add_plant(Plant::new(
//!         UNASSIGNED,
//!         "Rosa chinensis".to_string(),
//!         "China rose".to_string(),
//!         3,
//!         0,
//!         1.5,
//!         true,
//!         false,
//!     ))
//!     .unwrap();
//! assert_eq!(engine.plants_by_name("rosa").unwrap().len(), 1);
//! assert_eq!(catalog.plant_keeper().lock().unwrap().len(), 1);
//! ```
//!
//! ## Status
//! The engine evaluates every query over a full scan of the kept records,
//! which is fine at catalog scale. Should that change, the keeper is the
//! place to grow secondary indexes.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod persist;
pub mod server;
pub mod settings;
