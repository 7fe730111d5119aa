//! # explevel Core Library
//!
//! Experience and leveling for game entities.
//!
//! Two pieces work together:
//!
//! - [`Formula`] — converts between a level and an experience total
//!   (`Linear`: 100 experience per level, `Power(c)`: square-root curve).
//! - [`Store`] — a caller-owned keyed collection of records with
//!   add/find/delete/clear and whole-store JSON save/load.
//!
//! The [`experience`] module layers derived calculations (remaining
//! experience, progress, deltas, gains and losses) on top of an [`Entity`],
//! either directly or by id through an [`EntityStore`].
//!
//! ```
//! use explevel_core::{EntityStore, Formula};
//!
//! let mut store = EntityStore::new();
//! let id = store.spawn("Mark", 1, Formula::power_default())?;
//! store.add_experience(&id, 33)?;
//! assert_eq!(store.progress(&id)?, 11);
//! # Ok::<(), explevel_core::ExpError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod entity;
pub mod error;
pub mod experience;
pub mod formula;
pub mod persistence;
pub mod store;
pub mod types;

pub use config::{DEFAULT_STORE_FILE, ExpConfig};
pub use entity::Entity;
pub use error::{ExpError, Result};
pub use formula::Formula;
pub use store::{EntityStore, Record, Store};
pub use types::EntityId;
