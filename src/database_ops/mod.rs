pub mod db;
pub mod movies;

pub use movies::{MemoryMovieStore, MovieStore, NdjsonMovieStore, PgMovieStore};
