//! Alphabetical artist index.

use crate::catalog_store::{Artist, CatalogStore};

use super::error::{ServiceError, ServiceResult};
use super::projection::{project_artist, project_track};
use super::views::{ArtistView, IndexBucketView, IndexView, TrackView};

pub struct IndexService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> IndexService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    /// Artists sorted by name, partitioned into one bucket per distinct
    /// first character. Artists with empty names never appear. With
    /// `with_children`, every track of every artist follows in artist-sorted
    /// order.
    pub fn build_index(&self, with_children: bool) -> ServiceResult<IndexView> {
        let mut artists = self.store.list_artists(None)?;
        artists.sort_by(|a, b| a.name.cmp(&b.name));

        let mut buckets: Vec<IndexBucketView> = Vec::new();
        for artist in artists.iter().filter(|a| !a.name.is_empty()) {
            let letter = artist.name.chars().next().expect("non-empty name");
            let view = self.artist_view(artist.id)?;
            match buckets.last_mut() {
                Some(bucket) if bucket.name.chars().next() == Some(letter) => {
                    bucket.artist.push(view);
                }
                _ => buckets.push(IndexBucketView {
                    name: letter.to_string(),
                    artist: vec![view],
                }),
            }
        }

        let child = if with_children {
            Some(self.all_artist_tracks(&artists)?)
        } else {
            None
        };
        Ok(IndexView {
            index: buckets,
            child,
        })
    }

    fn artist_view(&self, artist_id: i64) -> ServiceResult<ArtistView> {
        let resolved = self
            .store
            .get_resolved_artist(artist_id)?
            .ok_or(ServiceError::NotFound)?;
        Ok(project_artist(&resolved, None, None))
    }

    fn all_artist_tracks(&self, sorted_artists: &[Artist]) -> ServiceResult<Vec<TrackView>> {
        let mut tracks = Vec::new();
        for artist in sorted_artists {
            for track_id in self.store.get_artist_track_ids(artist.id)? {
                let resolved = self
                    .store
                    .get_resolved_track(track_id)?
                    .ok_or(ServiceError::NotFound)?;
                tracks.push(project_track(&resolved));
            }
        }
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsonic::testutil::TestCatalog;

    #[test]
    fn buckets_are_sorted_and_partitioned_by_first_letter() {
        let catalog = TestCatalog::new();
        for name in ["banana", "apple", "avocado", "cherry"] {
            catalog.artist(name);
        }

        let service = IndexService::new(catalog.store());
        let index = service.build_index(false).unwrap();

        let letters: Vec<&str> = index.index.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(letters, vec!["a", "b", "c"]);

        let a_bucket: Vec<&str> = index.index[0]
            .artist
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(a_bucket, vec!["apple", "avocado"]);
        assert!(index.index.iter().all(|b| !b.artist.is_empty()));
        assert!(index.child.is_none());
    }

    #[test]
    fn empty_named_artists_are_skipped() {
        let catalog = TestCatalog::new();
        catalog.artist("");
        catalog.artist("apple");

        let service = IndexService::new(catalog.store());
        let index = service.build_index(false).unwrap();
        assert_eq!(index.index.len(), 1);
        assert_eq!(index.index[0].name, "a");
    }

    #[test]
    fn children_follow_artist_sorted_order() {
        let catalog = TestCatalog::new();
        let zed = catalog.artist("zed");
        let amy = catalog.artist("amy");
        let album = catalog.album("al1", None, amy);
        catalog.track_full(album, "by-zed", 60, &[zed], &[]);
        catalog.track_full(album, "by-amy", 60, &[amy], &[]);

        let service = IndexService::new(catalog.store());
        let index = service.build_index(true).unwrap();
        let titles: Vec<&str> = index
            .child
            .as_ref()
            .unwrap()
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["by-amy", "by-zed"]);
    }
}
