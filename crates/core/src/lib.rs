//! Marketlens Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Marketlens: the
//! expiring cache over the persistent key-value store, the cached market
//! data service, and the watchlist domain. It is database-agnostic and
//! defines the traits that are implemented by the `storage-sqlite` crate.

pub mod cache;
pub mod errors;
pub mod market;
pub mod watchlists;

// Re-export error types
pub use errors::Error;
pub use errors::Result;

// Re-export commonly used types
pub use cache::{CacheEntry, CacheStore, KvRepositoryTrait};
pub use market::{MarketDataService, MarketDataServiceTrait};
pub use watchlists::{
    Watchlist, WatchlistContext, WatchlistRepositoryTrait, WatchlistService, WatchlistServiceTrait,
};
