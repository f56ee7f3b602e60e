//! Pure projections from catalog entities to protocol views.
//!
//! Nothing here touches the store: every function maps already-fetched
//! immutable snapshots into response shapes.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::catalog_store::{
    Artist, Genre, ResolvedAlbum, ResolvedArtist, ResolvedPlaylist, ResolvedTrack, Track,
};

use super::views::*;

/// Unix seconds to the protocol's ISO-8601 UTC format.
pub fn format_timestamp(unix_secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(unix_secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn join_artist_names(artists: &[Artist]) -> Option<String> {
    if artists.is_empty() {
        return None;
    }
    Some(
        artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

pub fn join_genre_names(genres: &[Genre]) -> Option<String> {
    if genres.is_empty() {
        return None;
    }
    Some(
        genres
            .iter()
            .map(|g| g.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    )
}

/// A tag year is taken at face value only when it is a plain four-digit
/// number; anything else yields None.
pub fn parse_year(raw: Option<&str>) -> Option<i32> {
    let raw = raw?;
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

/// File extension including the leading dot, e.g. ".mp3".
pub fn suffix(file_path: Option<&str>) -> Option<String> {
    let path = file_path?;
    let name = path.rsplit(['/', '\\']).next()?;
    let dot = name.rfind('.')?;
    if dot == 0 || dot + 1 == name.len() {
        return None;
    }
    Some(name[dot..].to_ascii_lowercase())
}

/// Content type for the file extension; derived, never stored.
pub fn content_type(file_path: Option<&str>) -> Option<String> {
    let suffix = suffix(file_path)?;
    let mime = match suffix.as_str() {
        ".mp3" => "audio/mpeg",
        ".flac" => "audio/flac",
        ".ogg" | ".oga" => "audio/ogg",
        ".opus" => "audio/opus",
        ".m4a" | ".mp4" => "audio/mp4",
        ".aac" => "audio/aac",
        ".wav" => "audio/x-wav",
        ".wma" => "audio/x-ms-wma",
        _ => "application/octet-stream",
    };
    Some(mime.to_string())
}

/// Artist id reported for a track: the owning album's primary artist, the
/// first track artist otherwise, the sentinel when there is neither.
fn track_artist_id(resolved: &ResolvedTrack) -> i64 {
    resolved
        .album_artist_id
        .or_else(|| resolved.artists.first().map(|a| a.id))
        .unwrap_or(NO_ARTIST_ID)
}

pub fn project_track(resolved: &ResolvedTrack) -> TrackView {
    let track = &resolved.track;
    TrackView {
        id: track.id,
        parent: track.album_id,
        is_dir: false,
        title: track.title.clone(),
        album: resolved.album_name.clone(),
        album_id: track.album_id,
        artist: join_artist_names(&resolved.artists),
        artist_id: track_artist_id(resolved),
        track: track.track_number,
        disc_number: track.disc_number,
        year: parse_year(track.year.as_deref()),
        genre: join_genre_names(&resolved.genres),
        cover_art: format!("mf-{}", track.id),
        size: track.file_size,
        content_type: content_type(track.file_path.as_deref()),
        suffix: suffix(track.file_path.as_deref()),
        duration: track.duration_secs,
        bit_rate: track.bit_rate,
        bit_depth: track.bit_depth,
        sampling_rate: track.sample_rate,
        channel_count: track.channels,
        path: track.file_path.clone(),
        play_count: track.play_count,
        starred: resolved.starred.map(format_timestamp),
        media_type: "music",
        is_video: false,
        artists: resolved
            .artists
            .iter()
            .map(|a| ArtistItem {
                id: a.id,
                name: a.name.clone(),
            })
            .collect(),
        genres: resolved
            .genres
            .iter()
            .map(|g| GenreItem {
                name: g.name.clone(),
            })
            .collect(),
    }
}

pub fn project_album(resolved: &ResolvedAlbum, with_songs: bool) -> AlbumView {
    let album = &resolved.album;
    let primary_artist_id = resolved
        .artists
        .first()
        .map(|a| a.id)
        .unwrap_or(NO_ARTIST_ID);
    let genre = resolved
        .tracks
        .first()
        .and_then(|t| t.genres.first())
        .map(|g| g.name.clone())
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string());
    AlbumView {
        id: album.id,
        parent: primary_artist_id,
        album: album.name.clone(),
        title: album.name.clone(),
        name: album.name.clone(),
        is_dir: true,
        cover_art: format!("al-{}", album.id),
        song_count: resolved.tracks.len(),
        duration: resolved.tracks.iter().map(|t| t.track.duration_secs).sum(),
        play_count: resolved.tracks.iter().map(|t| t.track.play_count).min(),
        artist_id: primary_artist_id,
        artist: join_artist_names(&resolved.artists),
        genre,
        year: album.year,
        starred: resolved.starred.map(format_timestamp),
        song: with_songs.then(|| resolved.tracks.iter().map(project_track).collect()),
    }
}

pub fn project_artist(
    resolved: &ResolvedArtist,
    albums: Option<Vec<AlbumView>>,
    tracks: Option<Vec<TrackView>>,
) -> ArtistView {
    ArtistView {
        id: resolved.artist.id,
        name: resolved.artist.name.clone(),
        cover_art: format!("ar-{}", resolved.artist.id),
        album_count: resolved.album_count,
        starred: resolved.starred.map(format_timestamp),
        album: albums,
        song: tracks,
    }
}

/// Genre counts are recomputed from the backing track collection on every
/// call; there is no stored counter to trust.
pub fn project_genre(name: &str, tracks: &[Track]) -> GenreView {
    let mut album_ids: Vec<i64> = tracks.iter().map(|t| t.album_id).collect();
    album_ids.sort_unstable();
    album_ids.dedup();
    GenreView {
        song_count: tracks.len(),
        album_count: album_ids.len(),
        value: name.to_string(),
    }
}

pub fn project_playlist(resolved: &ResolvedPlaylist, with_entries: bool) -> PlaylistView {
    let playlist = &resolved.playlist;
    let changed = resolved
        .entries
        .iter()
        .map(|e| e.added_at)
        .max()
        .unwrap_or(playlist.created);
    PlaylistView {
        id: playlist.id,
        name: playlist.name.clone(),
        owner: resolved.owner.clone(),
        public: true,
        created: format_timestamp(playlist.created),
        changed: format_timestamp(changed),
        song_count: resolved.entries.len(),
        duration: resolved
            .entries
            .iter()
            .map(|e| e.track.track.duration_secs)
            .sum(),
        entry: with_entries
            .then(|| resolved.entries.iter().map(|e| project_track(&e.track)).collect()),
    }
}
