//! In-memory catalog fixtures for service unit tests.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::catalog_store::{CatalogStore, NewTrack, SqliteCatalogStore, WritableCatalogStore};

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub struct TestCatalog {
    store: SqliteCatalogStore,
}

impl TestCatalog {
    pub fn new() -> Self {
        Self {
            store: SqliteCatalogStore::open_in_memory().unwrap(),
        }
    }

    pub fn store(&self) -> &dyn CatalogStore {
        &self.store
    }

    pub fn artist(&self, name: &str) -> i64 {
        self.store.insert_artist(name).unwrap()
    }

    pub fn album(&self, name: &str, year: Option<i32>, artist_id: i64) -> i64 {
        self.store.insert_album(name, year, &[artist_id]).unwrap()
    }

    /// Album with a single one-minute track, enough for list projections.
    pub fn album_with_track(&self, name: &str, year: Option<i32>, artist_id: i64) -> i64 {
        let album_id = self.album(name, year, artist_id);
        self.track_full(album_id, &format!("{}-t1", name), 60, &[artist_id], &[]);
        album_id
    }

    pub fn track_full(
        &self,
        album_id: i64,
        title: &str,
        duration_secs: u32,
        artist_ids: &[i64],
        genres: &[&str],
    ) -> i64 {
        self.store
            .insert_track(&NewTrack {
                title: title.to_string(),
                album_id,
                duration_secs,
                artist_ids: artist_ids.to_vec(),
                genres: genres.iter().map(|g| g.to_string()).collect(),
                ..Default::default()
            })
            .unwrap()
    }

    pub fn track_with_year(
        &self,
        album_id: i64,
        title: &str,
        year: Option<&str>,
        genres: &[&str],
    ) -> i64 {
        self.store
            .insert_track(&NewTrack {
                title: title.to_string(),
                album_id,
                year: year.map(|y| y.to_string()),
                duration_secs: 60,
                genres: genres.iter().map(|g| g.to_string()).collect(),
                ..Default::default()
            })
            .unwrap()
    }

    pub fn track_with_plays(&self, album_id: i64, title: &str, play_count: i64) -> i64 {
        self.store
            .insert_track(&NewTrack {
                title: title.to_string(),
                album_id,
                duration_secs: 60,
                play_count,
                ..Default::default()
            })
            .unwrap()
    }

    pub fn user(&self, login: &str) -> i64 {
        self.store.create_user(login).unwrap()
    }

    pub fn playlist(&self, name: &str, user_id: i64, track_ids: &[i64]) -> i64 {
        self.store.create_playlist(name, user_id, track_ids).unwrap()
    }
}
