//! Protocol-shaped response trees.
//!
//! Immutable view structs serialized verbatim into the `subsonic-response`
//! envelope. Construction happens exclusively in the projection module.

use serde::Serialize;

/// Sentinel id used where the protocol wants an artist id but the entity has
/// no artists.
pub const NO_ARTIST_ID: i64 = -1;

/// Genre name reported for albums whose tracks carry no genre at all.
pub const UNKNOWN_GENRE: &str = "Unknown Genre";

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ArtistItem {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct GenreItem {
    pub name: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackView {
    pub id: i64,
    pub parent: i64,
    pub is_dir: bool,
    pub title: String,
    pub album: String,
    pub album_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub artist_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disc_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub cover_art: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub play_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<String>,
    #[serde(rename = "type")]
    pub media_type: &'static str,
    pub is_video: bool,
    pub artists: Vec<ArtistItem>,
    pub genres: Vec<GenreItem>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: i64,
    pub parent: i64,
    pub album: String,
    pub title: String,
    pub name: String,
    pub is_dir: bool,
    pub cover_art: String,
    pub song_count: usize,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub play_count: Option<i64>,
    pub artist_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song: Option<Vec<TrackView>>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistView {
    pub id: i64,
    pub name: String,
    pub cover_art: String,
    pub album_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starred: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<Vec<AlbumView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub song: Option<Vec<TrackView>>,
}

/// getGenres entry; the protocol calls the genre name `value`.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GenreView {
    pub song_count: usize,
    pub album_count: usize,
    pub value: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub id: i64,
    pub name: String,
    pub owner: String,
    pub public: bool,
    pub created: String,
    pub changed: String,
    pub song_count: usize,
    pub duration: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<Vec<TrackView>>,
}

/// One alphabetical bucket: `name` is the shared first letter.
#[derive(Clone, Debug, Serialize)]
pub struct IndexBucketView {
    pub name: String,
    pub artist: Vec<ArtistView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct IndexView {
    pub index: Vec<IndexBucketView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child: Option<Vec<TrackView>>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SearchResultView {
    pub artist: Vec<ArtistView>,
    pub album: Vec<AlbumView>,
    pub song: Vec<TrackView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StarredView {
    pub artist: Vec<ArtistView>,
    pub album: Vec<AlbumView>,
    pub song: Vec<TrackView>,
    pub playlist: Vec<PlaylistView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct GenresView {
    pub genre: Vec<GenreView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AlbumListView {
    pub album: Vec<AlbumView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SongListView {
    pub song: Vec<TrackView>,
}

#[derive(Clone, Debug, Serialize)]
pub struct PlaylistsView {
    pub playlist: Vec<PlaylistView>,
}
