//! Song metadata extraction

use super::normalize::normalize_field;
use crate::decode::RawRecord;
use crate::error::{Error, Result};
use crate::schema::{Artist, Song};
use serde::Deserialize;
use std::path::Path;

/// Song columns, taken from the record unchanged
#[derive(Debug, Deserialize)]
struct SongFields {
    song_id: String,
    title: String,
    artist_id: String,
    year: i32,
    duration: f64,
}

/// Map one song-metadata record to its `Song` and `Artist` rows
///
/// Artist name, location, latitude and longitude go through
/// [`FieldValue`](super::FieldValue) normalization: missing values become
/// empty strings, everything else is kept. `path` is only used for error
/// reporting.
pub fn extract_song(path: &Path, record: &RawRecord) -> Result<(Song, Artist)> {
    let fields = SongFields::deserialize(&record.value)
        .map_err(|e| Error::invalid_record(path, record.line, e.to_string()))?;

    let artist = Artist {
        artist_id: fields.artist_id.clone(),
        name: normalize_field(&record.value, "artist_name"),
        location: normalize_field(&record.value, "artist_location"),
        latitude: normalize_field(&record.value, "artist_latitude"),
        longitude: normalize_field(&record.value, "artist_longitude"),
    };

    let song = Song {
        song_id: fields.song_id,
        title: fields.title,
        artist_id: fields.artist_id,
        year: fields.year,
        duration: fields.duration,
    };

    Ok((song, artist))
}
