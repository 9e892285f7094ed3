//! Table definitions and statement text
//!
//! The SQL here is the fixed contract between the loader and the store.
//! Each insert carries the conflict clause named by its table's
//! [`ConflictPolicy`], so replaying a file never duplicates a dimension row.

/// What an insert does when the natural key already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Keep the existing row
    Ignore,
    /// Overwrite the non-key columns with the incoming row
    Update,
}

/// A table of the star schema
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    /// Column holding the natural key
    pub key: &'static str,
    pub conflict: ConflictPolicy,
    pub create_sql: &'static str,
    pub drop_sql: &'static str,
    pub insert_sql: &'static str,
}

pub const SONGS: TableDef = TableDef {
    name: "songs",
    key: "song_id",
    conflict: ConflictPolicy::Ignore,
    create_sql: "CREATE TABLE IF NOT EXISTS songs (
        song_id VARCHAR PRIMARY KEY,
        title VARCHAR NOT NULL,
        artist_id VARCHAR NOT NULL,
        year INTEGER,
        duration DOUBLE
    )",
    drop_sql: "DROP TABLE IF EXISTS songs",
    insert_sql: "INSERT INTO songs (song_id, title, artist_id, year, duration)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (song_id) DO NOTHING",
};

pub const ARTISTS: TableDef = TableDef {
    name: "artists",
    key: "artist_id",
    conflict: ConflictPolicy::Ignore,
    create_sql: "CREATE TABLE IF NOT EXISTS artists (
        artist_id VARCHAR PRIMARY KEY,
        name VARCHAR NOT NULL,
        location VARCHAR NOT NULL,
        latitude VARCHAR NOT NULL,
        longitude VARCHAR NOT NULL
    )",
    drop_sql: "DROP TABLE IF EXISTS artists",
    insert_sql: "INSERT INTO artists (artist_id, name, location, latitude, longitude)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (artist_id) DO NOTHING",
};

// `time` doubles as a type name, so it is always quoted.
pub const TIME: TableDef = TableDef {
    name: "time",
    key: "start_time",
    conflict: ConflictPolicy::Ignore,
    create_sql: "CREATE TABLE IF NOT EXISTS \"time\" (
        start_time TIMESTAMP PRIMARY KEY,
        hour INTEGER NOT NULL,
        day INTEGER NOT NULL,
        week INTEGER NOT NULL,
        month INTEGER NOT NULL,
        year INTEGER NOT NULL,
        weekday INTEGER NOT NULL
    )",
    drop_sql: "DROP TABLE IF EXISTS \"time\"",
    insert_sql: "INSERT INTO \"time\" (start_time, hour, day, week, month, year, weekday)
        VALUES (CAST(? AS TIMESTAMP), ?, ?, ?, ?, ?, ?)
        ON CONFLICT (start_time) DO NOTHING",
};

pub const USERS: TableDef = TableDef {
    name: "users",
    key: "user_id",
    conflict: ConflictPolicy::Update,
    create_sql: "CREATE TABLE IF NOT EXISTS users (
        user_id VARCHAR PRIMARY KEY,
        first_name VARCHAR,
        last_name VARCHAR,
        gender VARCHAR,
        level VARCHAR NOT NULL
    )",
    drop_sql: "DROP TABLE IF EXISTS users",
    insert_sql: "INSERT INTO users (user_id, first_name, last_name, gender, level)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            gender = excluded.gender,
            level = excluded.level",
};

pub const SONGPLAYS: TableDef = TableDef {
    name: "songplays",
    key: "songplay_id",
    conflict: ConflictPolicy::Ignore,
    create_sql: "CREATE TABLE IF NOT EXISTS songplays (
        songplay_id VARCHAR PRIMARY KEY,
        start_time TIMESTAMP NOT NULL,
        user_id VARCHAR NOT NULL,
        level VARCHAR NOT NULL,
        song_id VARCHAR,
        artist_id VARCHAR,
        session_id BIGINT NOT NULL,
        location VARCHAR,
        user_agent VARCHAR
    )",
    drop_sql: "DROP TABLE IF EXISTS songplays",
    insert_sql: "INSERT INTO songplays (songplay_id, start_time, user_id, level, song_id, artist_id,
            session_id, location, user_agent)
        VALUES (?, CAST(? AS TIMESTAMP), ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (songplay_id) DO NOTHING",
};

/// Every table, dimensions first
pub const ALL_TABLES: [TableDef; 5] = [SONGS, ARTISTS, TIME, USERS, SONGPLAYS];

/// Exact-match lookup of a play event's song and artist
pub const RESOLVE_SONG_SQL: &str = "SELECT s.song_id, a.artist_id
    FROM songs s
    JOIN artists a ON s.artist_id = a.artist_id
    WHERE s.title = ? AND a.name = ? AND s.duration = ?
    LIMIT 1";
