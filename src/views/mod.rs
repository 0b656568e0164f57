pub mod actors;
pub mod geography;
pub mod popularity;
pub mod watchlist;

pub use watchlist::{ListKind, SessionLists, WatchLists};
