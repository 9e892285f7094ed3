//! Star schema module
//!
//! Row types for the fact and dimension tables, and the fixed table and
//! statement definitions the loader executes.
//!
//! # Tables
//!
//! - `songs`, `artists`, `time`, `users` - dimension tables
//! - `songplays` - fact table referencing the dimensions

mod tables;
mod types;

pub use tables::{
    ConflictPolicy, TableDef, ALL_TABLES, ARTISTS, RESOLVE_SONG_SQL, SONGPLAYS, SONGS, TIME, USERS,
};
pub use types::{Artist, DimensionKeys, Song, Songplay, TimeDimension, User};
