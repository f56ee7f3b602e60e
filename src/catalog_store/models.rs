//! Catalog entities and resolved composites returned by the store.
//!
//! Entities are plain immutable snapshots of the relational rows; resolved
//! composites bundle an entity with the related rows the projection layer
//! needs, so no live storage handle ever crosses into the query services.

use serde::{Deserialize, Serialize};

/// Artist entity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
}

/// Album entity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub year: Option<i32>,
}

/// Track entity
///
/// `year` holds the raw tag string; numeric interpretation is left to the
/// query layer. Content type and suffix are derived from `file_path`, never
/// stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub album_id: i64,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub year: Option<String>,
    pub duration_secs: u32,
    pub bit_rate: Option<u32>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u32>,
    pub channels: Option<u32>,
    pub file_size: Option<u64>,
    pub file_path: Option<String>,
    pub play_count: i64,
}

/// Genre entity. Names are unique; counts are always derived, never stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// User entity. Only ownership attribution; credentials are out of scope.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub login: String,
}

/// Playlist entity
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub created: i64,
}

// =============================================================================
// Resolved/Composite Types
// =============================================================================

/// Track with the related rows its projection needs.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedTrack {
    pub track: Track,
    pub album_name: String,
    /// Primary artist of the owning album, if the album has artists.
    pub album_artist_id: Option<i64>,
    /// Track artists in position order.
    pub artists: Vec<Artist>,
    /// Track genres in position order.
    pub genres: Vec<Genre>,
    /// Earliest favourite timestamp across all users, unix seconds.
    pub starred: Option<i64>,
}

/// Album with artists, member tracks and favourite aggregate.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedAlbum {
    pub album: Album,
    /// Album artists in position order; the first one is the album artist.
    pub artists: Vec<Artist>,
    pub tracks: Vec<ResolvedTrack>,
    pub starred: Option<i64>,
}

/// Artist with the aggregates its projection needs.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedArtist {
    pub artist: Artist,
    pub album_count: usize,
    pub starred: Option<i64>,
}

/// One playlist membership row: the resolved track plus when it was added.
#[derive(Clone, Debug, Serialize)]
pub struct PlaylistEntry {
    pub track: ResolvedTrack,
    pub added_at: i64,
}

/// Playlist with owner login and resolved membership in position order.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedPlaylist {
    pub playlist: Playlist,
    pub owner: String,
    pub entries: Vec<PlaylistEntry>,
}

/// Input for inserting a track along with its relationship rows.
#[derive(Clone, Debug, Default)]
pub struct NewTrack {
    pub title: String,
    pub album_id: i64,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    pub year: Option<String>,
    pub duration_secs: u32,
    pub bit_rate: Option<u32>,
    pub sample_rate: Option<u32>,
    pub bit_depth: Option<u32>,
    pub channels: Option<u32>,
    pub file_size: Option<u64>,
    pub file_path: Option<String>,
    pub play_count: i64,
    /// Track artists in order; first becomes position 0.
    pub artist_ids: Vec<i64>,
    /// Genre names in order; missing genres are created.
    pub genres: Vec<String>,
}
