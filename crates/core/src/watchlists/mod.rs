//! Watchlists module - domain models, services, traits, and the reactive
//! context.

mod watchlists_context;
mod watchlists_model;
mod watchlists_service;
mod watchlists_traits;


pub use watchlists_context::WatchlistContext;
pub use watchlists_model::Watchlist;
pub use watchlists_service::WatchlistService;
pub use watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
