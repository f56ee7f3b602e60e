//! Playlist service. Aggregates (songCount, duration, changed) are always
//! recomputed from current membership by the projection.

use crate::catalog_store::CatalogStore;

use super::error::{ServiceError, ServiceResult};
use super::projection::project_playlist;
use super::views::PlaylistView;

pub struct PlaylistService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> PlaylistService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn create(
        &self,
        name: &str,
        track_ids: &[i64],
        owner_id: i64,
    ) -> ServiceResult<PlaylistView> {
        self.require_tracks(track_ids)?;
        let id = self.store.create_playlist(name, owner_id, track_ids)?;
        self.get(id)
    }

    pub fn update(
        &self,
        id: i64,
        name: Option<&str>,
        add: &[i64],
        remove: &[i64],
    ) -> ServiceResult<PlaylistView> {
        self.require_tracks(add)?;
        if !self.store.update_playlist(id, name, add, remove)? {
            return Err(ServiceError::NotFound);
        }
        self.get(id)
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.store.delete_playlist(id)?;
        Ok(())
    }

    pub fn get(&self, id: i64) -> ServiceResult<PlaylistView> {
        let resolved = self
            .store
            .get_resolved_playlist(id)?
            .ok_or(ServiceError::NotFound)?;
        Ok(project_playlist(&resolved, true))
    }

    pub fn list(&self) -> ServiceResult<Vec<PlaylistView>> {
        self.store
            .list_playlists()?
            .into_iter()
            .map(|playlist| {
                let resolved = self
                    .store
                    .get_resolved_playlist(playlist.id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_playlist(&resolved, false))
            })
            .collect()
    }

    fn require_tracks(&self, track_ids: &[i64]) -> ServiceResult<()> {
        for &id in track_ids {
            if self.store.get_track(id)?.is_none() {
                return Err(ServiceError::NotFound);
            }
        }
        Ok(())
    }
}
