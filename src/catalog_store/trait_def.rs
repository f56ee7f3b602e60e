//! CatalogStore trait definition.
//!
//! The query services see the catalog only through this trait: narrow reads,
//! resolved composite fetches, atomic favourite toggles, and playlist CRUD
//! primitives. List ordering beyond what is documented per method is policy
//! owned by the services, not the store.

use anyhow::Result;

use super::models::*;

pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Artists
    // =========================================================================

    fn get_artist(&self, id: i64) -> Result<Option<Artist>>;

    /// All artists, id order. `name_filter` is a case-insensitive substring
    /// match on the name.
    fn list_artists(&self, name_filter: Option<&str>) -> Result<Vec<Artist>>;

    fn get_resolved_artist(&self, id: i64) -> Result<Option<ResolvedArtist>>;

    /// Albums linked to an artist, ordered by year then name.
    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<Album>>;

    /// Ids of every track the artist appears on, id order.
    fn get_artist_track_ids(&self, artist_id: i64) -> Result<Vec<i64>>;

    // =========================================================================
    // Albums
    // =========================================================================

    fn get_album(&self, id: i64) -> Result<Option<Album>>;

    /// All albums, id order. `name_filter` is a case-insensitive substring
    /// match on the name.
    fn list_albums(&self, name_filter: Option<&str>) -> Result<Vec<Album>>;

    /// Albums ordered by name with store-level pagination.
    fn list_albums_by_name(&self, limit: usize, offset: usize) -> Result<Vec<Album>>;

    /// Albums with at least one member track carrying the named genre,
    /// ordered by name.
    fn list_albums_by_genre(&self, genre: &str) -> Result<Vec<Album>>;

    fn get_album_primary_artist(&self, album_id: i64) -> Result<Option<Artist>>;

    /// Aggregated album play count: minimum across member tracks, None for
    /// an album without tracks.
    fn get_album_play_count(&self, album_id: i64) -> Result<Option<i64>>;

    fn get_resolved_album(&self, id: i64) -> Result<Option<ResolvedAlbum>>;

    // =========================================================================
    // Tracks
    // =========================================================================

    fn get_track(&self, id: i64) -> Result<Option<Track>>;

    /// All tracks, id order. `title_filter` is a case-insensitive substring
    /// match on the title.
    fn list_tracks(&self, title_filter: Option<&str>) -> Result<Vec<Track>>;

    /// Tracks carrying the named genre, id order. `limit` of `None` returns
    /// the full set.
    fn list_tracks_by_genre(
        &self,
        genre: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<Track>>;

    fn get_resolved_track(&self, id: i64) -> Result<Option<ResolvedTrack>>;

    // =========================================================================
    // Genres
    // =========================================================================

    /// All genres, name order.
    fn list_genres(&self) -> Result<Vec<Genre>>;

    // =========================================================================
    // Favourites
    // =========================================================================
    //
    // Toggles are single atomic upsert/delete statements: re-starring is a
    // no-op, unstarring a non-starred entity is a no-op.

    fn star_track(&self, user_id: i64, track_id: i64) -> Result<()>;
    fn unstar_track(&self, user_id: i64, track_id: i64) -> Result<()>;
    fn star_album(&self, user_id: i64, album_id: i64) -> Result<()>;
    fn unstar_album(&self, user_id: i64, album_id: i64) -> Result<()>;
    fn star_artist(&self, user_id: i64, artist_id: i64) -> Result<()>;
    fn unstar_artist(&self, user_id: i64, artist_id: i64) -> Result<()>;
    fn star_playlist(&self, user_id: i64, playlist_id: i64) -> Result<()>;
    fn unstar_playlist(&self, user_id: i64, playlist_id: i64) -> Result<()>;

    /// Favourited entity ids for one user, in starring order.
    fn list_starred_track_ids(&self, user_id: i64) -> Result<Vec<i64>>;
    fn list_starred_album_ids(&self, user_id: i64) -> Result<Vec<i64>>;
    fn list_starred_artist_ids(&self, user_id: i64) -> Result<Vec<i64>>;
    fn list_starred_playlist_ids(&self, user_id: i64) -> Result<Vec<i64>>;

    // =========================================================================
    // Playlists
    // =========================================================================

    /// Create a playlist with its initial tracks in one transaction.
    fn create_playlist(&self, name: &str, user_id: i64, track_ids: &[i64]) -> Result<i64>;

    /// Apply rename/add/remove in one transaction. Returns false when the
    /// playlist does not exist. Removal drops every entry of a given track id.
    fn update_playlist(
        &self,
        id: i64,
        name: Option<&str>,
        add: &[i64],
        remove: &[i64],
    ) -> Result<bool>;

    /// Deleting an absent playlist is a no-op.
    fn delete_playlist(&self, id: i64) -> Result<()>;

    fn get_playlist(&self, id: i64) -> Result<Option<Playlist>>;

    fn get_resolved_playlist(&self, id: i64) -> Result<Option<ResolvedPlaylist>>;

    /// All playlists, creation order.
    fn list_playlists(&self) -> Result<Vec<Playlist>>;

    // =========================================================================
    // Users
    // =========================================================================

    fn get_user(&self, id: i64) -> Result<Option<User>>;
    fn get_user_by_login(&self, login: &str) -> Result<Option<User>>;
    fn create_user(&self, login: &str) -> Result<i64>;
}

/// Extension trait for stores that support typed inserts, used by importers
/// and test fixtures.
pub trait WritableCatalogStore: CatalogStore {
    fn insert_artist(&self, name: &str) -> Result<i64>;

    /// Insert an album and its artist links; `artist_ids[0]` becomes the
    /// album artist.
    fn insert_album(&self, name: &str, year: Option<i32>, artist_ids: &[i64]) -> Result<i64>;

    /// Insert a track with its artist and genre links; unknown genre names
    /// are created on the fly.
    fn insert_track(&self, track: &NewTrack) -> Result<i64>;
}
