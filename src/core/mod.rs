//! Core module - parts, stat aggregation, compatibility and build search

pub mod armory;
pub mod catalog;
pub mod config;
pub mod graph;
pub mod loader;
pub mod part;
pub mod pool;
pub mod search;
pub mod stats;

pub use armory::{Armory, Generation};
pub use catalog::{CatalogError, PartCatalog};
pub use config::{Config, ConfigError};
pub use graph::{are_compatible, CompatibilityGraph};
pub use loader::{load_all, load_dir, load_embedded, load_parts, LoadError};
pub use part::{Part, WeaponClass};
pub use pool::{select_pool, type_order, PoolFilter};
pub use search::{search, Build, BuildSearch, SearchOutcome, SearchStats, Thresholds};
pub use stats::{compute_stats, BaseStats, Stat, StatProfile, StatTotals};
