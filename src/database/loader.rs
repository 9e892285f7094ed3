//! Upserts through the DuckDB session

use super::engine::DatabaseEngine;
use super::types::Loader;
use crate::error::{Error, Result};
use crate::schema::{Artist, Song, Songplay, TimeDimension, User};
use crate::schema::{ARTISTS, SONGPLAYS, SONGS, TIME, USERS};
use duckdb::params;

impl Loader for DatabaseEngine {
    fn upsert_song(&self, song: &Song) -> Result<()> {
        self.conn
            .execute(
                SONGS.insert_sql,
                params![song.song_id, song.title, song.artist_id, song.year, song.duration],
            )
            .map_err(|e| Error::load(SONGS.name, song, e))?;
        Ok(())
    }

    fn upsert_artist(&self, artist: &Artist) -> Result<()> {
        self.conn
            .execute(
                ARTISTS.insert_sql,
                params![
                    artist.artist_id,
                    artist.name,
                    artist.location,
                    artist.latitude,
                    artist.longitude
                ],
            )
            .map_err(|e| Error::load(ARTISTS.name, artist, e))?;
        Ok(())
    }

    fn upsert_time(&self, time: &TimeDimension) -> Result<()> {
        self.conn
            .execute(
                TIME.insert_sql,
                params![
                    time.start_time_sql(),
                    i64::from(time.hour),
                    i64::from(time.day),
                    i64::from(time.week),
                    i64::from(time.month),
                    time.year,
                    i64::from(time.weekday)
                ],
            )
            .map_err(|e| Error::load(TIME.name, time, e))?;
        Ok(())
    }

    fn upsert_user(&self, user: &User) -> Result<()> {
        self.conn
            .execute(
                USERS.insert_sql,
                params![
                    user.user_id,
                    user.first_name,
                    user.last_name,
                    user.gender,
                    user.level
                ],
            )
            .map_err(|e| Error::load(USERS.name, user, e))?;
        Ok(())
    }

    fn insert_songplay(&self, songplay: &Songplay) -> Result<()> {
        self.conn
            .execute(
                SONGPLAYS.insert_sql,
                params![
                    songplay.songplay_id,
                    songplay.start_time_sql(),
                    songplay.user_id,
                    songplay.level,
                    songplay.song_id(),
                    songplay.artist_id(),
                    songplay.session_id,
                    songplay.location,
                    songplay.user_agent
                ],
            )
            .map_err(|e| Error::load(SONGPLAYS.name, songplay, e))?;
        Ok(())
    }
}
