//! Artist query service.

use crate::catalog_store::CatalogStore;

use super::error::{ServiceError, ServiceResult};
use super::projection::{project_album, project_artist, project_track};
use super::views::{AlbumView, ArtistView, TrackView};

pub struct ArtistService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> ArtistService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn get_artist(
        &self,
        id: i64,
        with_albums: bool,
        with_tracks: bool,
    ) -> ServiceResult<ArtistView> {
        let resolved = self
            .store
            .get_resolved_artist(id)?
            .ok_or(ServiceError::NotFound)?;

        let albums = if with_albums {
            Some(self.artist_albums(id)?)
        } else {
            None
        };
        let tracks = if with_tracks {
            Some(self.artist_tracks(id)?)
        } else {
            None
        };
        Ok(project_artist(&resolved, albums, tracks))
    }

    fn artist_albums(&self, artist_id: i64) -> ServiceResult<Vec<AlbumView>> {
        self.store
            .get_artist_albums(artist_id)?
            .into_iter()
            .map(|album| {
                let resolved = self
                    .store
                    .get_resolved_album(album.id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_album(&resolved, false))
            })
            .collect()
    }

    fn artist_tracks(&self, artist_id: i64) -> ServiceResult<Vec<TrackView>> {
        self.store
            .get_artist_track_ids(artist_id)?
            .into_iter()
            .map(|track_id| {
                let resolved = self
                    .store
                    .get_resolved_track(track_id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_track(&resolved))
            })
            .collect()
    }
}
