//! Genre query service. Counts are recomputed from the backing tracks on
//! every call, per the protocol's expectation that they track the live
//! catalog.

use crate::catalog_store::CatalogStore;

use super::error::ServiceResult;
use super::projection::project_genre;
use super::views::GenreView;

pub struct GenreService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> GenreService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn list_genres(&self) -> ServiceResult<Vec<GenreView>> {
        self.store
            .list_genres()?
            .into_iter()
            .map(|genre| {
                let tracks = self.store.list_tracks_by_genre(&genre.name, None, 0)?;
                Ok(project_genre(&genre.name, &tracks))
            })
            .collect()
    }
}
