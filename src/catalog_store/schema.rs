//! Versioned schema for the catalog database.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artist",
    foreign_column: "id",
};
const ALBUM_FK: ForeignKey = ForeignKey {
    foreign_table: "album",
    foreign_column: "id",
};
const TRACK_FK: ForeignKey = ForeignKey {
    foreign_table: "track",
    foreign_column: "id",
};
const GENRE_FK: ForeignKey = ForeignKey {
    foreign_table: "genre",
    foreign_column: "id",
};
const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "user",
    foreign_column: "id",
};
const PLAYLIST_FK: ForeignKey = ForeignKey {
    foreign_table: "playlist",
    foreign_column: "id",
};

const ARTIST_TABLE: Table = Table {
    name: "artist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    unique_constraints: &[],
    indices: &[("idx_artist_name", "name")],
};

const ALBUM_TABLE: Table = Table {
    name: "album",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("year", &SqlType::Integer),
    ],
    unique_constraints: &[],
    indices: &[("idx_album_name", "name")],
};

const ALBUM_ARTISTS_TABLE: Table = Table {
    name: "album_artists",
    columns: &[
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ALBUM_FK)
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    unique_constraints: &[&["album_id", "artist_id"]],
    indices: &[("idx_album_artists_album_id", "album_id")],
};

const TRACK_TABLE: Table = Table {
    name: "track",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!(
            "album_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ALBUM_FK)
        ),
        sqlite_column!("track_number", &SqlType::Integer),
        sqlite_column!("disc_number", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Text),
        sqlite_column!("duration", &SqlType::Integer, non_null = true),
        sqlite_column!("bit_rate", &SqlType::Integer),
        sqlite_column!("sample_rate", &SqlType::Integer),
        sqlite_column!("bit_depth", &SqlType::Integer),
        sqlite_column!("channels", &SqlType::Integer),
        sqlite_column!("file_size", &SqlType::Integer),
        sqlite_column!("file_path", &SqlType::Text),
        sqlite_column!("play_count", &SqlType::Integer, non_null = true, default_value = Some("0")),
    ],
    unique_constraints: &[],
    indices: &[("idx_track_album_id", "album_id")],
};

const TRACK_ARTISTS_TABLE: Table = Table {
    name: "track_artists",
    columns: &[
        sqlite_column!(
            "track_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&TRACK_FK)
        ),
        sqlite_column!(
            "artist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ARTIST_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    unique_constraints: &[&["track_id", "artist_id"]],
    indices: &[
        ("idx_track_artists_track_id", "track_id"),
        ("idx_track_artists_artist_id", "artist_id"),
    ],
};

const GENRE_TABLE: Table = Table {
    name: "genre",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
    unique_constraints: &[&["name"]],
    indices: &[],
};

const TRACK_GENRES_TABLE: Table = Table {
    name: "track_genres",
    columns: &[
        sqlite_column!(
            "track_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&TRACK_FK)
        ),
        sqlite_column!(
            "genre_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&GENRE_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
    ],
    unique_constraints: &[&["track_id", "genre_id"]],
    indices: &[
        ("idx_track_genres_track_id", "track_id"),
        ("idx_track_genres_genre_id", "genre_id"),
    ],
};

const USER_TABLE: Table = Table {
    name: "user",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("login", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[&["login"]],
    indices: &[],
};

const PLAYLIST_TABLE: Table = Table {
    name: "playlist",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!(
            "created",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[],
};

const PLAYLIST_TRACKS_TABLE: Table = Table {
    name: "playlist_tracks",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "playlist_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&PLAYLIST_FK)
        ),
        sqlite_column!(
            "track_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&TRACK_FK)
        ),
        sqlite_column!("position", &SqlType::Integer, non_null = true),
        sqlite_column!(
            "added_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    unique_constraints: &[],
    indices: &[("idx_playlist_tracks_playlist_id", "playlist_id")],
};

macro_rules! favourite_table {
    ($table_name:literal, $entity_column:literal, $fk:expr, $index:literal) => {
        Table {
            name: $table_name,
            columns: &[
                sqlite_column!(
                    "user_id",
                    &SqlType::Integer,
                    non_null = true,
                    foreign_key = Some(&USER_FK)
                ),
                sqlite_column!(
                    $entity_column,
                    &SqlType::Integer,
                    non_null = true,
                    foreign_key = Some($fk)
                ),
                sqlite_column!(
                    "added_at",
                    &SqlType::Integer,
                    non_null = true,
                    default_value = Some(DEFAULT_TIMESTAMP)
                ),
            ],
            unique_constraints: &[&["user_id", $entity_column]],
            indices: &[($index, "user_id")],
        }
    };
}

const FAVOURITE_TRACK_TABLE: Table = favourite_table!(
    "favourite_track",
    "track_id",
    &TRACK_FK,
    "idx_favourite_track_user_id"
);
const FAVOURITE_ALBUM_TABLE: Table = favourite_table!(
    "favourite_album",
    "album_id",
    &ALBUM_FK,
    "idx_favourite_album_user_id"
);
const FAVOURITE_ARTIST_TABLE: Table = favourite_table!(
    "favourite_artist",
    "artist_id",
    &ARTIST_FK,
    "idx_favourite_artist_user_id"
);
const FAVOURITE_PLAYLIST_TABLE: Table = favourite_table!(
    "favourite_playlist",
    "playlist_id",
    &PLAYLIST_FK,
    "idx_favourite_playlist_user_id"
);

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        ARTIST_TABLE,
        ALBUM_TABLE,
        ALBUM_ARTISTS_TABLE,
        TRACK_TABLE,
        TRACK_ARTISTS_TABLE,
        GENRE_TABLE,
        TRACK_GENRES_TABLE,
        USER_TABLE,
        PLAYLIST_TABLE,
        PLAYLIST_TRACKS_TABLE,
        FAVOURITE_TRACK_TABLE,
        FAVOURITE_ALBUM_TABLE,
        FAVOURITE_ARTIST_TABLE,
        FAVOURITE_PLAYLIST_TABLE,
    ],
    migration: None,
}];
