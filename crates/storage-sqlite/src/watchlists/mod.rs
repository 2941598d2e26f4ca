//! SQLite-backed watchlist persistence.

mod repository;

pub use repository::WatchlistRepository;

// Re-export trait from core for convenience
pub use marketlens_core::watchlists::WatchlistRepositoryTrait;
