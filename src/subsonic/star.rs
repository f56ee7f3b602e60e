//! Favourite (star) service.

use crate::catalog_store::CatalogStore;

use super::error::{ServiceError, ServiceResult};
use super::projection::{project_album, project_artist, project_playlist, project_track};
use super::views::StarredView;

/// Id lists of one star/unstar request, one per entity kind.
#[derive(Clone, Debug, Default)]
pub struct StarTargets {
    pub track_ids: Vec<i64>,
    pub album_ids: Vec<i64>,
    pub artist_ids: Vec<i64>,
    pub playlist_ids: Vec<i64>,
}

pub struct StarService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> StarService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Star every referenced entity for the user. Each id-level change is an
    /// idempotent store upsert; unknown ids are rejected up front.
    pub fn star(&self, targets: &StarTargets, user_id: i64) -> ServiceResult<()> {
        self.apply(targets, user_id, true)
    }

    /// Unstar every referenced entity. Unstarring a non-starred entity is a
    /// no-op.
    pub fn unstar(&self, targets: &StarTargets, user_id: i64) -> ServiceResult<()> {
        self.apply(targets, user_id, false)
    }

    fn apply(&self, targets: &StarTargets, user_id: i64, star: bool) -> ServiceResult<()> {
        for &id in &targets.track_ids {
            if self.store.get_track(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
            if star {
                self.store.star_track(user_id, id)?;
            } else {
                self.store.unstar_track(user_id, id)?;
            }
        }
        for &id in &targets.album_ids {
            if self.store.get_album(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
            if star {
                self.store.star_album(user_id, id)?;
            } else {
                self.store.unstar_album(user_id, id)?;
            }
        }
        for &id in &targets.artist_ids {
            if self.store.get_artist(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
            if star {
                self.store.star_artist(user_id, id)?;
            } else {
                self.store.unstar_artist(user_id, id)?;
            }
        }
        for &id in &targets.playlist_ids {
            if self.store.get_playlist(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
            if star {
                self.store.star_playlist(user_id, id)?;
            } else {
                self.store.unstar_playlist(user_id, id)?;
            }
        }
        Ok(())
    }

    pub fn get_starred(&self, user_id: i64) -> ServiceResult<StarredView> {
        let artist = self
            .store
            .list_starred_artist_ids(user_id)?
            .into_iter()
            .map(|id| {
                let resolved = self
                    .store
                    .get_resolved_artist(id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_artist(&resolved, None, None))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        let album = self
            .store
            .list_starred_album_ids(user_id)?
            .into_iter()
            .map(|id| {
                let resolved = self
                    .store
                    .get_resolved_album(id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_album(&resolved, false))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        let song = self
            .store
            .list_starred_track_ids(user_id)?
            .into_iter()
            .map(|id| {
                let resolved = self
                    .store
                    .get_resolved_track(id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_track(&resolved))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        let playlist = self
            .store
            .list_starred_playlist_ids(user_id)?
            .into_iter()
            .map(|id| {
                let resolved = self
                    .store
                    .get_resolved_playlist(id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_playlist(&resolved, false))
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        Ok(StarredView {
            artist,
            album,
            song,
            playlist,
        })
    }
}
