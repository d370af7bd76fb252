//! # Arena
//!
//! An in-memory engine for esports tournaments: players, teams, games,
//! tournaments and matches, with ELO-style rating changes, penalty
//! escalation and greedy tier-based matchmaking.
//!
//! ## Architecture
//!
//! Components, leaves first:
//!
//! - [`rating`]: pure rating deltas per match outcome, and tier bands
//! - [`entities`]: domain types, each guarding its own invariants and
//!   status machine (tournament, match, penalty)
//! - [`registry`]: the orchestrator that owns every entity, enforces
//!   registry-wide uniqueness, escalates penalties and runs the
//!   matchmaking queue behind a single async read/write lock
//! - [`reporting`]: read-only rankings and statistics over the registry
//!
//! Every fallible operation returns an [`ArenaResult`]; the error's
//! [`ErrorKind`] tells adapters how to present it.
//!
//! ## Example
//!
//! ```
//! use arena::{entities::Player, registry::Registry};
//! use chrono::NaiveDate;
//!
//! # tokio_test_block_on(async {
//! let registry = Registry::new();
//! let player = Player::new(
//!     "aspas",
//!     "Erick Santos",
//!     "aspas@example.com",
//!     NaiveDate::from_ymd_opt(2003, 6, 15),
//! )
//! .unwrap();
//! registry.register_player(player).await.unwrap();
//! registry.join_queue("aspas").await.unwrap();
//! assert_eq!(registry.view_queue().await, vec!["aspas".to_string()]);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod entities;
pub mod errors;
pub mod rating;
pub mod registry;
pub mod reporting;

pub use errors::{ArenaError, ArenaResult, ErrorKind};
pub use registry::Registry;
pub use reporting::ReportingEngine;
