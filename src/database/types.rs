//! Store traits and summary types

use crate::error::Result;
use crate::schema::{Artist, DimensionKeys, Song, Songplay, TimeDimension, User};
use serde::Serialize;

/// Applies extracted rows to the star schema
///
/// Conflicts on natural keys are resolved by each table's
/// [`ConflictPolicy`](crate::schema::ConflictPolicy). A rejected write is
/// returned as [`Error::Load`](crate::Error::Load) carrying the row.
pub trait Loader {
    fn upsert_song(&self, song: &Song) -> Result<()>;

    fn upsert_artist(&self, artist: &Artist) -> Result<()>;

    fn upsert_time(&self, time: &TimeDimension) -> Result<()>;

    /// Last write wins for every non-key column
    fn upsert_user(&self, user: &User) -> Result<()>;

    fn insert_songplay(&self, songplay: &Songplay) -> Result<()>;
}

/// Looks up the dimension ids for a play event
pub trait DimensionResolver {
    /// Find the song and artist matching title, artist name and duration
    /// exactly. `Ok(None)` is the ordinary "no match" outcome.
    fn resolve(&self, title: &str, artist_name: &str, duration: f64)
        -> Result<Option<DimensionKeys>>;
}

/// Transaction control for the per-file commit boundary
pub trait Transactional {
    fn begin(&self) -> Result<()>;

    fn commit(&self) -> Result<()>;

    fn rollback(&self) -> Result<()>;
}

/// Everything the pipeline needs from a session handle
pub trait Session: Loader + DimensionResolver + Transactional {}

impl<T: Loader + DimensionResolver + Transactional> Session for T {}

/// Row count of every table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub songs: usize,
    pub artists: usize,
    pub time: usize,
    pub users: usize,
    pub songplays: usize,
}

impl std::fmt::Display for TableCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "songs={} artists={} time={} users={} songplays={}",
            self.songs, self.artists, self.time, self.users, self.songplays
        )
    }
}
