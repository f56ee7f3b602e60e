//! Search across artists, albums and tracks.

use crate::catalog_store::CatalogStore;

use super::error::{ServiceError, ServiceResult};
use super::paging::window;
use super::projection::{project_album, project_artist, project_track};
use super::views::SearchResultView;

/// Per-kind count/offset windows of a search request.
#[derive(Clone, Copy, Debug)]
pub struct SearchWindows {
    pub artist_count: usize,
    pub artist_offset: usize,
    pub album_count: usize,
    pub album_offset: usize,
    pub song_count: usize,
    pub song_offset: usize,
}

pub struct SearchService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> SearchService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Substring search on names/titles with per-kind windowing. The empty
    /// query returns the entire catalog for all three kinds with no
    /// windowing; the asymmetry is part of the protocol contract here.
    pub fn search(&self, query: &str, windows: SearchWindows) -> ServiceResult<SearchResultView> {
        let (artists, albums, tracks) = if query.is_empty() {
            (
                self.store.list_artists(None)?,
                self.store.list_albums(None)?,
                self.store.list_tracks(None)?,
            )
        } else {
            (
                window(
                    self.store.list_artists(Some(query))?,
                    windows.artist_count,
                    windows.artist_offset,
                ),
                window(
                    self.store.list_albums(Some(query))?,
                    windows.album_count,
                    windows.album_offset,
                ),
                window(
                    self.store.list_tracks(Some(query))?,
                    windows.song_count,
                    windows.song_offset,
                ),
            )
        };

        let artist = artists
            .into_iter()
            .map(|a| {
                let resolved = self
                    .store
                    .get_resolved_artist(a.id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_artist(&resolved, None, None))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        let album = albums
            .into_iter()
            .map(|a| {
                let resolved = self
                    .store
                    .get_resolved_album(a.id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_album(&resolved, false))
            })
            .collect::<ServiceResult<Vec<_>>>()?;
        let song = tracks
            .into_iter()
            .map(|t| {
                let resolved = self
                    .store
                    .get_resolved_track(t.id)?
                    .ok_or(ServiceError::NotFound)?;
                Ok(project_track(&resolved))
            })
            .collect::<ServiceResult<Vec<_>>>()?;

        Ok(SearchResultView {
            artist,
            album,
            song,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsonic::testutil::TestCatalog;

    fn windows(count: usize, offset: usize) -> SearchWindows {
        SearchWindows {
            artist_count: count,
            artist_offset: offset,
            album_count: count,
            album_offset: offset,
            song_count: count,
            song_offset: offset,
        }
    }

    fn catalog_with_five_matches() -> TestCatalog {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        let album = catalog.album("al1", None, ar);
        for i in 0..5 {
            catalog.track_full(album, &format!("match-{}", i), 60, &[ar], &[]);
        }
        catalog.track_full(album, "other", 60, &[ar], &[]);
        catalog
    }

    #[test]
    fn windowing_multiplies_count_by_offset() {
        let catalog = catalog_with_five_matches();
        let service = SearchService::new(catalog.store());

        let result = service.search("match", windows(2, 1)).unwrap();
        let titles: Vec<&str> = result.song.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["match-2", "match-3"]);

        // 2 * 3 = 6 >= 5 matches
        let result = service.search("match", windows(2, 3)).unwrap();
        assert!(result.song.is_empty());
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("The Band");
        let album = catalog.album("al1", None, ar);
        catalog.track_full(album, "t1", 60, &[ar], &[]);

        let service = SearchService::new(catalog.store());
        let result = service.search("band", windows(10, 0)).unwrap();
        assert_eq!(result.artist.len(), 1);
        let result = service.search("nomatch", windows(10, 0)).unwrap();
        assert!(result.artist.is_empty());
    }

    #[test]
    fn empty_query_returns_whole_catalog_unwindowed() {
        let catalog = catalog_with_five_matches();
        let service = SearchService::new(catalog.store());

        // The windows would cut everything off, but the empty-query branch
        // ignores them.
        let result = service.search("", windows(1, 99)).unwrap();
        assert_eq!(result.artist.len(), 1);
        assert_eq!(result.album.len(), 1);
        assert_eq!(result.song.len(), 6);
    }
}
