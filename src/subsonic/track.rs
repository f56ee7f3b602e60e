//! Track query service.

use rand::RngCore;

use crate::catalog_store::{CatalogStore, Track};

use super::error::{ServiceError, ServiceResult};
use super::paging;
use super::projection::{parse_year, project_track};
use super::views::TrackView;

pub struct TrackService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> TrackService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn get_track(&self, id: i64) -> ServiceResult<TrackView> {
        let resolved = self
            .store
            .get_resolved_track(id)?
            .ok_or(ServiceError::NotFound)?;
        Ok(project_track(&resolved))
    }

    pub fn list_by_genre(
        &self,
        genre: &str,
        count: usize,
        offset: usize,
    ) -> ServiceResult<Vec<TrackView>> {
        let tracks = self
            .store
            .list_tracks_by_genre(genre, Some(count), offset)?;
        self.project_all(tracks)
    }

    /// Filter first, then draw a uniform sample of min(size, available).
    ///
    /// Year bounds are numeric: the raw tag string must parse as a four-digit
    /// year, and tracks without one are excluded whenever a bound is given.
    pub fn random_tracks(
        &self,
        size: usize,
        genre: Option<&str>,
        from_year: Option<i32>,
        to_year: Option<i32>,
        rng: &mut dyn RngCore,
    ) -> ServiceResult<Vec<TrackView>> {
        let mut tracks = match genre {
            Some(genre) => self.store.list_tracks_by_genre(genre, None, 0)?,
            None => self.store.list_tracks(None)?,
        };
        if let Some(from_year) = from_year {
            tracks.retain(|track| {
                parse_year(track.year.as_deref()).map(|y| y >= from_year) == Some(true)
            });
        }
        if let Some(to_year) = to_year {
            tracks.retain(|track| {
                parse_year(track.year.as_deref()).map(|y| y <= to_year) == Some(true)
            });
        }
        let sampled = paging::sample(tracks, size, rng);
        self.project_all(sampled)
    }

    fn project_all(&self, tracks: Vec<Track>) -> ServiceResult<Vec<TrackView>> {
        tracks
            .into_iter()
            .map(|track| self.get_track(track.id))
            .collect()
    }
}
