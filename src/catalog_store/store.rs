//! SQLite-backed catalog store implementation.

use anyhow::{bail, Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::{CatalogStore, WritableCatalogStore};
use crate::sqlite_persistence::{migrate_to_latest, BASE_DB_VERSION};

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

fn row_to_artist(row: &Row) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

fn row_to_album(row: &Row) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        name: row.get(1)?,
        year: row.get(2)?,
    })
}

const TRACK_COLUMNS: &str = "id, title, album_id, track_number, disc_number, year, duration, \
     bit_rate, sample_rate, bit_depth, channels, file_size, file_path, play_count";

fn row_to_track(row: &Row) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        title: row.get(1)?,
        album_id: row.get(2)?,
        track_number: row.get(3)?,
        disc_number: row.get(4)?,
        year: row.get(5)?,
        duration_secs: row.get(6)?,
        bit_rate: row.get(7)?,
        sample_rate: row.get(8)?,
        bit_depth: row.get(9)?,
        channels: row.get(10)?,
        file_size: row.get(11)?,
        file_path: row.get(12)?,
        play_count: row.get(13)?,
    })
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = if db_path.as_ref().exists() {
            let conn = Connection::open_with_flags(
                db_path,
                rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                    | rusqlite::OpenFlags::SQLITE_OPEN_URI
                    | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )
            .context("Failed to open catalog database")?;

            let db_version = conn
                .query_row("PRAGMA user_version;", [], |row| row.get::<_, i64>(0))
                .context("Failed to read database version")?
                - BASE_DB_VERSION as i64;
            if db_version < 0 {
                bail!("Catalog database does not carry a known schema version");
            }
            let version = db_version as usize;
            if version >= CATALOG_VERSIONED_SCHEMAS.len() {
                bail!("Catalog database version {} is too new", version);
            }
            CATALOG_VERSIONED_SCHEMAS[version].validate(&conn)?;
            migrate_to_latest(&conn, CATALOG_VERSIONED_SCHEMAS, version)?;
            conn.execute("PRAGMA foreign_keys = ON;", [])?;
            conn
        } else {
            let conn = Connection::open(db_path).context("Failed to create catalog database")?;
            CATALOG_VERSIONED_SCHEMAS
                .last()
                .expect("at least one schema version")
                .create(&conn)?;
            conn
        };

        let store = SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.log_counts();
        Ok(store)
    }

    /// Fresh in-memory catalog, used by tests and fixtures.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        CATALOG_VERSIONED_SCHEMAS
            .last()
            .expect("at least one schema version")
            .create(&conn)?;
        Ok(SqliteCatalogStore {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn log_counts(&self) {
        let conn = self.conn.lock().unwrap();
        let count = |table: &str| -> i64 {
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| r.get(0))
                .unwrap_or(0)
        };
        info!(
            "Opened catalog: {} artists, {} albums, {} tracks",
            count("artist"),
            count("album"),
            count("track")
        );
    }

    // =========================================================================
    // Internal helpers (run against an already-locked connection)
    // =========================================================================

    fn track_artists(conn: &Connection, track_id: i64) -> Result<Vec<Artist>> {
        let mut stmt = conn.prepare(
            "SELECT ar.id, ar.name FROM artist ar \
             JOIN track_artists ta ON ta.artist_id = ar.id \
             WHERE ta.track_id = ?1 ORDER BY ta.position",
        )?;
        let artists = stmt
            .query_map(params![track_id], row_to_artist)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(artists)
    }

    fn track_genres(conn: &Connection, track_id: i64) -> Result<Vec<Genre>> {
        let mut stmt = conn.prepare(
            "SELECT g.id, g.name FROM genre g \
             JOIN track_genres tg ON tg.genre_id = g.id \
             WHERE tg.track_id = ?1 ORDER BY tg.position",
        )?;
        let genres = stmt
            .query_map(params![track_id], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(genres)
    }

    fn album_artists(conn: &Connection, album_id: i64) -> Result<Vec<Artist>> {
        let mut stmt = conn.prepare(
            "SELECT ar.id, ar.name FROM artist ar \
             JOIN album_artists aa ON aa.artist_id = ar.id \
             WHERE aa.album_id = ?1 ORDER BY aa.position",
        )?;
        let artists = stmt
            .query_map(params![album_id], row_to_artist)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(artists)
    }

    fn earliest_star(conn: &Connection, table: &str, column: &str, id: i64) -> Result<Option<i64>> {
        let starred = conn.query_row(
            &format!("SELECT MIN(added_at) FROM {} WHERE {} = ?1", table, column),
            params![id],
            |r| r.get::<_, Option<i64>>(0),
        )?;
        Ok(starred)
    }

    fn resolve_track(conn: &Connection, track: Track) -> Result<ResolvedTrack> {
        let album_name: String = conn.query_row(
            "SELECT name FROM album WHERE id = ?1",
            params![track.album_id],
            |r| r.get(0),
        )?;
        let album_artist_id: Option<i64> = conn
            .query_row(
                "SELECT artist_id FROM album_artists WHERE album_id = ?1 ORDER BY position LIMIT 1",
                params![track.album_id],
                |r| r.get(0),
            )
            .optional()?;
        let artists = Self::track_artists(conn, track.id)?;
        let genres = Self::track_genres(conn, track.id)?;
        let starred = Self::earliest_star(conn, "favourite_track", "track_id", track.id)?;
        Ok(ResolvedTrack {
            track,
            album_name,
            album_artist_id,
            artists,
            genres,
            starred,
        })
    }

    fn resolve_album(conn: &Connection, album: Album) -> Result<ResolvedAlbum> {
        let artists = Self::album_artists(conn, album.id)?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM track WHERE album_id = ?1 ORDER BY disc_number, track_number, id",
            TRACK_COLUMNS
        ))?;
        let tracks: Vec<Track> = stmt
            .query_map(params![album.id], row_to_track)?
            .collect::<rusqlite::Result<_>>()?;
        let tracks = tracks
            .into_iter()
            .map(|t| Self::resolve_track(conn, t))
            .collect::<Result<_>>()?;
        let starred = Self::earliest_star(conn, "favourite_album", "album_id", album.id)?;
        Ok(ResolvedAlbum {
            album,
            artists,
            tracks,
            starred,
        })
    }

    fn toggle_star(&self, table: &str, column: &str, user_id: i64, id: i64, on: bool) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        if on {
            conn.execute(
                &format!(
                    "INSERT OR IGNORE INTO {} (user_id, {}) VALUES (?1, ?2)",
                    table, column
                ),
                params![user_id, id],
            )?;
        } else {
            conn.execute(
                &format!("DELETE FROM {} WHERE user_id = ?1 AND {} = ?2", table, column),
                params![user_id, id],
            )?;
        }
        Ok(())
    }

    fn starred_ids(&self, table: &str, column: &str, user_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE user_id = ?1 ORDER BY added_at, {}",
            column, table, column
        ))?;
        let ids = stmt
            .query_map(params![user_id], |r| r.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(ids)
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn get_artist(&self, id: i64) -> Result<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        let artist = conn
            .query_row(
                "SELECT id, name FROM artist WHERE id = ?1",
                params![id],
                row_to_artist,
            )
            .optional()?;
        Ok(artist)
    }

    fn list_artists(&self, name_filter: Option<&str>) -> Result<Vec<Artist>> {
        let conn = self.conn.lock().unwrap();
        let mut artists = Vec::new();
        match name_filter {
            Some(filter) => {
                let mut stmt = conn.prepare(
                    "SELECT id, name FROM artist \
                     WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
                )?;
                for artist in stmt.query_map(params![filter], row_to_artist)? {
                    artists.push(artist?);
                }
            }
            None => {
                let mut stmt = conn.prepare("SELECT id, name FROM artist ORDER BY id")?;
                for artist in stmt.query_map([], row_to_artist)? {
                    artists.push(artist?);
                }
            }
        }
        Ok(artists)
    }

    fn get_resolved_artist(&self, id: i64) -> Result<Option<ResolvedArtist>> {
        let conn = self.conn.lock().unwrap();
        let artist = conn
            .query_row(
                "SELECT id, name FROM artist WHERE id = ?1",
                params![id],
                row_to_artist,
            )
            .optional()?;
        let Some(artist) = artist else {
            return Ok(None);
        };
        let album_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM album_artists WHERE artist_id = ?1",
            params![id],
            |r| r.get(0),
        )?;
        let starred = Self::earliest_star(&conn, "favourite_artist", "artist_id", id)?;
        Ok(Some(ResolvedArtist {
            artist,
            album_count: album_count as usize,
            starred,
        }))
    }

    fn get_artist_albums(&self, artist_id: i64) -> Result<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT al.id, al.name, al.year FROM album al \
             JOIN album_artists aa ON aa.album_id = al.id \
             WHERE aa.artist_id = ?1 ORDER BY al.year, al.name",
        )?;
        let albums = stmt
            .query_map(params![artist_id], row_to_album)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(albums)
    }

    fn get_artist_track_ids(&self, artist_id: i64) -> Result<Vec<i64>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT track_id FROM track_artists WHERE artist_id = ?1 ORDER BY track_id",
        )?;
        let ids = stmt
            .query_map(params![artist_id], |r| r.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(ids)
    }

    fn get_album(&self, id: i64) -> Result<Option<Album>> {
        let conn = self.conn.lock().unwrap();
        let album = conn
            .query_row(
                "SELECT id, name, year FROM album WHERE id = ?1",
                params![id],
                row_to_album,
            )
            .optional()?;
        Ok(album)
    }

    fn list_albums(&self, name_filter: Option<&str>) -> Result<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        let mut albums = Vec::new();
        match name_filter {
            Some(filter) => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, year FROM album \
                     WHERE name LIKE '%' || ?1 || '%' ORDER BY id",
                )?;
                for album in stmt.query_map(params![filter], row_to_album)? {
                    albums.push(album?);
                }
            }
            None => {
                let mut stmt = conn.prepare("SELECT id, name, year FROM album ORDER BY id")?;
                for album in stmt.query_map([], row_to_album)? {
                    albums.push(album?);
                }
            }
        }
        Ok(albums)
    }

    fn list_albums_by_name(&self, limit: usize, offset: usize) -> Result<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, year FROM album ORDER BY name, id LIMIT ?1 OFFSET ?2",
        )?;
        let albums = stmt
            .query_map(params![limit as i64, offset as i64], row_to_album)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(albums)
    }

    fn list_albums_by_genre(&self, genre: &str) -> Result<Vec<Album>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT DISTINCT al.id, al.name, al.year FROM album al \
             JOIN track t ON t.album_id = al.id \
             JOIN track_genres tg ON tg.track_id = t.id \
             JOIN genre g ON g.id = tg.genre_id \
             WHERE g.name = ?1 ORDER BY al.name, al.id",
        )?;
        let albums = stmt
            .query_map(params![genre], row_to_album)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(albums)
    }

    fn get_album_primary_artist(&self, album_id: i64) -> Result<Option<Artist>> {
        let conn = self.conn.lock().unwrap();
        let artist = conn
            .query_row(
                "SELECT ar.id, ar.name FROM artist ar \
                 JOIN album_artists aa ON aa.artist_id = ar.id \
                 WHERE aa.album_id = ?1 ORDER BY aa.position LIMIT 1",
                params![album_id],
                row_to_artist,
            )
            .optional()?;
        Ok(artist)
    }

    fn get_album_play_count(&self, album_id: i64) -> Result<Option<i64>> {
        let conn = self.conn.lock().unwrap();
        let play_count = conn.query_row(
            "SELECT MIN(play_count) FROM track WHERE album_id = ?1",
            params![album_id],
            |r| r.get::<_, Option<i64>>(0),
        )?;
        Ok(play_count)
    }

    fn get_resolved_album(&self, id: i64) -> Result<Option<ResolvedAlbum>> {
        let conn = self.conn.lock().unwrap();
        let album = conn
            .query_row(
                "SELECT id, name, year FROM album WHERE id = ?1",
                params![id],
                row_to_album,
            )
            .optional()?;
        match album {
            Some(album) => Ok(Some(Self::resolve_album(&conn, album)?)),
            None => Ok(None),
        }
    }

    fn get_track(&self, id: i64) -> Result<Option<Track>> {
        let conn = self.conn.lock().unwrap();
        let track = conn
            .query_row(
                &format!("SELECT {} FROM track WHERE id = ?1", TRACK_COLUMNS),
                params![id],
                row_to_track,
            )
            .optional()?;
        Ok(track)
    }

    fn list_tracks(&self, title_filter: Option<&str>) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        let mut tracks = Vec::new();
        match title_filter {
            Some(filter) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM track WHERE title LIKE '%' || ?1 || '%' ORDER BY id",
                    TRACK_COLUMNS
                ))?;
                for track in stmt.query_map(params![filter], row_to_track)? {
                    tracks.push(track?);
                }
            }
            None => {
                let mut stmt =
                    conn.prepare(&format!("SELECT {} FROM track ORDER BY id", TRACK_COLUMNS))?;
                for track in stmt.query_map([], row_to_track)? {
                    tracks.push(track?);
                }
            }
        }
        Ok(tracks)
    }

    fn list_tracks_by_genre(
        &self,
        genre: &str,
        limit: Option<usize>,
        offset: usize,
    ) -> Result<Vec<Track>> {
        let conn = self.conn.lock().unwrap();
        // LIMIT -1 means unbounded in sqlite
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn.prepare(
            "SELECT t.id, t.title, t.album_id, t.track_number, t.disc_number, t.year, \
             t.duration, t.bit_rate, t.sample_rate, t.bit_depth, t.channels, t.file_size, \
             t.file_path, t.play_count FROM track t \
             JOIN track_genres tg ON tg.track_id = t.id \
             JOIN genre g ON g.id = tg.genre_id \
             WHERE g.name = ?1 ORDER BY t.id LIMIT ?2 OFFSET ?3",
        )?;
        let tracks = stmt
            .query_map(params![genre, limit, offset as i64], row_to_track)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(tracks)
    }

    fn get_resolved_track(&self, id: i64) -> Result<Option<ResolvedTrack>> {
        let conn = self.conn.lock().unwrap();
        let track = conn
            .query_row(
                &format!("SELECT {} FROM track WHERE id = ?1", TRACK_COLUMNS),
                params![id],
                row_to_track,
            )
            .optional()?;
        match track {
            Some(track) => Ok(Some(Self::resolve_track(&conn, track)?)),
            None => Ok(None),
        }
    }

    fn list_genres(&self) -> Result<Vec<Genre>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name FROM genre ORDER BY name")?;
        let genres = stmt
            .query_map([], |row| {
                Ok(Genre {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(genres)
    }

    fn star_track(&self, user_id: i64, track_id: i64) -> Result<()> {
        self.toggle_star("favourite_track", "track_id", user_id, track_id, true)
    }

    fn unstar_track(&self, user_id: i64, track_id: i64) -> Result<()> {
        self.toggle_star("favourite_track", "track_id", user_id, track_id, false)
    }

    fn star_album(&self, user_id: i64, album_id: i64) -> Result<()> {
        self.toggle_star("favourite_album", "album_id", user_id, album_id, true)
    }

    fn unstar_album(&self, user_id: i64, album_id: i64) -> Result<()> {
        self.toggle_star("favourite_album", "album_id", user_id, album_id, false)
    }

    fn star_artist(&self, user_id: i64, artist_id: i64) -> Result<()> {
        self.toggle_star("favourite_artist", "artist_id", user_id, artist_id, true)
    }

    fn unstar_artist(&self, user_id: i64, artist_id: i64) -> Result<()> {
        self.toggle_star("favourite_artist", "artist_id", user_id, artist_id, false)
    }

    fn star_playlist(&self, user_id: i64, playlist_id: i64) -> Result<()> {
        self.toggle_star("favourite_playlist", "playlist_id", user_id, playlist_id, true)
    }

    fn unstar_playlist(&self, user_id: i64, playlist_id: i64) -> Result<()> {
        self.toggle_star("favourite_playlist", "playlist_id", user_id, playlist_id, false)
    }

    fn list_starred_track_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.starred_ids("favourite_track", "track_id", user_id)
    }

    fn list_starred_album_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.starred_ids("favourite_album", "album_id", user_id)
    }

    fn list_starred_artist_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.starred_ids("favourite_artist", "artist_id", user_id)
    }

    fn list_starred_playlist_ids(&self, user_id: i64) -> Result<Vec<i64>> {
        self.starred_ids("favourite_playlist", "playlist_id", user_id)
    }

    fn create_playlist(&self, name: &str, user_id: i64, track_ids: &[i64]) -> Result<i64> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO playlist (name, user_id) VALUES (?1, ?2)",
            params![name, user_id],
        )?;
        let playlist_id = tx.last_insert_rowid();
        for (position, track_id) in track_ids.iter().enumerate() {
            tx.execute(
                "INSERT INTO playlist_tracks (playlist_id, track_id, position) VALUES (?1, ?2, ?3)",
                params![playlist_id, track_id, position as i64],
            )
            .with_context(|| format!("Failed to add track {} to playlist", track_id))?;
        }
        tx.commit()?;
        Ok(playlist_id)
    }

    fn update_playlist(
        &self,
        id: i64,
        name: Option<&str>,
        add: &[i64],
        remove: &[i64],
    ) -> Result<bool> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let exists: bool = tx
            .query_row("SELECT 1 FROM playlist WHERE id = ?1", params![id], |_| {
                Ok(true)
            })
            .optional()?
            .unwrap_or(false);
        if !exists {
            return Ok(false);
        }
        if let Some(name) = name {
            tx.execute(
                "UPDATE playlist SET name = ?1 WHERE id = ?2",
                params![name, id],
            )?;
        }
        for track_id in remove {
            tx.execute(
                "DELETE FROM playlist_tracks WHERE playlist_id = ?1 AND track_id = ?2",
                params![id, track_id],
            )?;
        }
        let mut next_position: i64 = tx.query_row(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM playlist_tracks WHERE playlist_id = ?1",
            params![id],
            |r| r.get(0),
        )?;
        for track_id in add {
            tx.execute(
                "INSERT INTO playlist_tracks (playlist_id, track_id, position) VALUES (?1, ?2, ?3)",
                params![id, track_id, next_position],
            )
            .with_context(|| format!("Failed to add track {} to playlist", track_id))?;
            next_position += 1;
        }
        tx.commit()?;
        Ok(true)
    }

    fn delete_playlist(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM playlist WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn get_playlist(&self, id: i64) -> Result<Option<Playlist>> {
        let conn = self.conn.lock().unwrap();
        let playlist = conn
            .query_row(
                "SELECT id, name, user_id, created FROM playlist WHERE id = ?1",
                params![id],
                |row| {
                    Ok(Playlist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        user_id: row.get(2)?,
                        created: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(playlist)
    }

    fn get_resolved_playlist(&self, id: i64) -> Result<Option<ResolvedPlaylist>> {
        let playlist = match self.get_playlist(id)? {
            Some(playlist) => playlist,
            None => return Ok(None),
        };
        let conn = self.conn.lock().unwrap();
        let owner: String = conn.query_row(
            "SELECT login FROM user WHERE id = ?1",
            params![playlist.user_id],
            |r| r.get(0),
        )?;
        let mut stmt = conn.prepare(
            "SELECT track_id, added_at FROM playlist_tracks \
             WHERE playlist_id = ?1 ORDER BY position",
        )?;
        let rows: Vec<(i64, i64)> = stmt
            .query_map(params![id], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<_>>()?;
        let mut entries = Vec::with_capacity(rows.len());
        for (track_id, added_at) in rows {
            let track = conn.query_row(
                &format!("SELECT {} FROM track WHERE id = ?1", TRACK_COLUMNS),
                params![track_id],
                row_to_track,
            )?;
            entries.push(PlaylistEntry {
                track: Self::resolve_track(&conn, track)?,
                added_at,
            });
        }
        Ok(Some(ResolvedPlaylist {
            playlist,
            owner,
            entries,
        }))
    }

    fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, user_id, created FROM playlist ORDER BY id")?;
        let playlists = stmt
            .query_map([], |row| {
                Ok(Playlist {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    user_id: row.get(2)?,
                    created: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;
        Ok(playlists)
    }

    fn get_user(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                "SELECT id, login FROM user WHERE id = ?1",
                params![id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        login: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                "SELECT id, login FROM user WHERE login = ?1",
                params![login],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        login: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    fn create_user(&self, login: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO user (login) VALUES (?1)", params![login])
            .with_context(|| format!("Failed to create user {}", login))?;
        Ok(conn.last_insert_rowid())
    }
}

impl WritableCatalogStore for SqliteCatalogStore {
    fn insert_artist(&self, name: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO artist (name) VALUES (?1)", params![name])?;
        Ok(conn.last_insert_rowid())
    }

    fn insert_album(&self, name: &str, year: Option<i32>, artist_ids: &[i64]) -> Result<i64> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO album (name, year) VALUES (?1, ?2)",
            params![name, year],
        )?;
        let album_id = tx.last_insert_rowid();
        for (position, artist_id) in artist_ids.iter().enumerate() {
            tx.execute(
                "INSERT INTO album_artists (album_id, artist_id, position) VALUES (?1, ?2, ?3)",
                params![album_id, artist_id, position as i64],
            )?;
        }
        tx.commit()?;
        Ok(album_id)
    }

    fn insert_track(&self, track: &NewTrack) -> Result<i64> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO track (title, album_id, track_number, disc_number, year, duration, \
             bit_rate, sample_rate, bit_depth, channels, file_size, file_path, play_count) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            params![
                track.title,
                track.album_id,
                track.track_number,
                track.disc_number,
                track.year,
                track.duration_secs,
                track.bit_rate,
                track.sample_rate,
                track.bit_depth,
                track.channels,
                track.file_size,
                track.file_path,
                track.play_count,
            ],
        )?;
        let track_id = tx.last_insert_rowid();
        for (position, artist_id) in track.artist_ids.iter().enumerate() {
            tx.execute(
                "INSERT INTO track_artists (track_id, artist_id, position) VALUES (?1, ?2, ?3)",
                params![track_id, artist_id, position as i64],
            )?;
        }
        for (position, genre_name) in track.genres.iter().enumerate() {
            tx.execute(
                "INSERT OR IGNORE INTO genre (name) VALUES (?1)",
                params![genre_name],
            )?;
            let genre_id: i64 = tx.query_row(
                "SELECT id FROM genre WHERE name = ?1",
                params![genre_name],
                |r| r.get(0),
            )?;
            tx.execute(
                "INSERT INTO track_genres (track_id, genre_id, position) VALUES (?1, ?2, ?3)",
                params![track_id, genre_id, position as i64],
            )?;
        }
        tx.commit()?;
        Ok(track_id)
    }
}
