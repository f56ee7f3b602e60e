//! Album query service: list modes, lookups, artist discographies.

use rand::RngCore;

use crate::catalog_store::{Album, CatalogStore};

use super::error::{ServiceError, ServiceResult};
use super::paging;
use super::projection::project_album;
use super::views::AlbumView;

/// The nine protocol list modes, each variant carrying exactly the
/// parameters it needs. Unknown strings and missing required parameters are
/// rejected at construction, unimplemented modes fail loudly when listed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlbumListMode {
    Random,
    Newest,
    Highest,
    Frequent,
    Recent,
    ByName,
    ByArtist,
    ByYear { from_year: i32, to_year: i32 },
    ByGenre { genre: String },
}

impl AlbumListMode {
    pub fn from_request(
        list_type: &str,
        from_year: Option<i32>,
        to_year: Option<i32>,
        genre: Option<String>,
    ) -> ServiceResult<Self> {
        match list_type {
            "random" => Ok(AlbumListMode::Random),
            "newest" => Ok(AlbumListMode::Newest),
            "highest" => Ok(AlbumListMode::Highest),
            "frequent" => Ok(AlbumListMode::Frequent),
            "recent" => Ok(AlbumListMode::Recent),
            "alphabeticalByName" => Ok(AlbumListMode::ByName),
            "alphabeticalByArtist" => Ok(AlbumListMode::ByArtist),
            "byYear" => match (from_year, to_year) {
                (Some(from_year), Some(to_year)) => Ok(AlbumListMode::ByYear { from_year, to_year }),
                _ => Err(ServiceError::InvalidArgument(
                    "byYear requires fromYear and toYear".to_string(),
                )),
            },
            "byGenre" => match genre {
                Some(genre) => Ok(AlbumListMode::ByGenre { genre }),
                None => Err(ServiceError::InvalidArgument(
                    "byGenre requires genre".to_string(),
                )),
            },
            other => Err(ServiceError::InvalidArgument(format!(
                "unknown album list type: {}",
                other
            ))),
        }
    }
}

pub struct AlbumService<'a> {
    store: &'a dyn CatalogStore,
}

impl<'a> AlbumService<'a> {
    pub fn new(store: &'a dyn CatalogStore) -> Self {
        Self { store }
    }

    pub fn get_album(&self, id: i64) -> ServiceResult<AlbumView> {
        let resolved = self
            .store
            .get_resolved_album(id)?
            .ok_or(ServiceError::NotFound)?;
        Ok(project_album(&resolved, true))
    }

    pub fn list_albums(
        &self,
        mode: AlbumListMode,
        size: usize,
        offset: usize,
        rng: &mut dyn RngCore,
    ) -> ServiceResult<Vec<AlbumView>> {
        let selected = match mode {
            AlbumListMode::Random => {
                let albums = self.store.list_albums(None)?;
                paging::sample(albums, size, rng)
            }
            AlbumListMode::ByName => self.store.list_albums_by_name(size, offset)?,
            AlbumListMode::ByArtist => {
                let albums = self.store.list_albums(None)?;
                let mut keyed = Vec::with_capacity(albums.len());
                for album in albums {
                    let artist_name = self
                        .store
                        .get_album_primary_artist(album.id)?
                        .map(|artist| artist.name)
                        .unwrap_or_default();
                    keyed.push((artist_name, album));
                }
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                let sorted: Vec<Album> = keyed.into_iter().map(|(_, album)| album).collect();
                paging::page(sorted, size, offset)
            }
            AlbumListMode::ByYear { from_year, to_year } => {
                let lo = from_year.min(to_year);
                let hi = from_year.max(to_year);
                let mut albums: Vec<Album> = self
                    .store
                    .list_albums(None)?
                    .into_iter()
                    .filter(|album| album.year.map(|y| lo <= y && y <= hi).unwrap_or(false))
                    .collect();
                albums.sort_by_key(|album| album.year);
                let mut albums = paging::page(albums, size, offset);
                if from_year > to_year {
                    albums.reverse();
                }
                albums
            }
            AlbumListMode::Frequent => {
                let albums = self.store.list_albums(None)?;
                let mut keyed = Vec::with_capacity(albums.len());
                for album in albums {
                    let play_count = self.store.get_album_play_count(album.id)?;
                    keyed.push((play_count, album));
                }
                // descending, albums without tracks last
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
                let sorted: Vec<Album> = keyed.into_iter().map(|(_, album)| album).collect();
                paging::page(sorted, size, offset)
            }
            AlbumListMode::ByGenre { genre } => {
                paging::page(self.store.list_albums_by_genre(&genre)?, size, offset)
            }
            AlbumListMode::Newest => return Err(ServiceError::Unsupported("newest")),
            AlbumListMode::Highest => return Err(ServiceError::Unsupported("highest")),
            AlbumListMode::Recent => return Err(ServiceError::Unsupported("recent")),
        };

        selected
            .into_iter()
            .map(|album| self.project(album.id))
            .collect()
    }

    pub fn list_artist_albums(
        &self,
        artist_id: i64,
        size: usize,
        offset: usize,
    ) -> ServiceResult<Vec<AlbumView>> {
        let albums = paging::page(self.store.get_artist_albums(artist_id)?, size, offset);
        albums
            .into_iter()
            .map(|album| self.project(album.id))
            .collect()
    }

    fn project(&self, album_id: i64) -> ServiceResult<AlbumView> {
        let resolved = self
            .store
            .get_resolved_album(album_id)?
            .ok_or(ServiceError::NotFound)?;
        Ok(project_album(&resolved, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subsonic::testutil::{seeded_rng, TestCatalog};

    #[test]
    fn from_request_parses_known_modes() {
        assert_eq!(
            AlbumListMode::from_request("random", None, None, None).unwrap(),
            AlbumListMode::Random
        );
        assert_eq!(
            AlbumListMode::from_request("alphabeticalByArtist", None, None, None).unwrap(),
            AlbumListMode::ByArtist
        );
        assert_eq!(
            AlbumListMode::from_request("byYear", Some(2000), Some(2010), None).unwrap(),
            AlbumListMode::ByYear {
                from_year: 2000,
                to_year: 2010
            }
        );
    }

    #[test]
    fn from_request_rejects_missing_year_bounds() {
        for (from_year, to_year) in [(None, None), (Some(2000), None), (None, Some(2010))] {
            let err = AlbumListMode::from_request("byYear", from_year, to_year, None).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidArgument(_)));
        }
    }

    #[test]
    fn from_request_rejects_unknown_mode() {
        let err = AlbumListMode::from_request("byMood", None, None, None).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[test]
    fn by_year_filters_sorts_and_reverses() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        catalog.album_with_track("a-2011", Some(2011), ar);
        catalog.album_with_track("a-2005", Some(2005), ar);
        catalog.album_with_track("a-2003", Some(2003), ar);
        catalog.album_with_track("a-none", None, ar);

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();

        let mode = AlbumListMode::ByYear {
            from_year: 2000,
            to_year: 2010,
        };
        let albums = service.list_albums(mode, 10, 0, &mut rng).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a-2003", "a-2005"]);

        let mode = AlbumListMode::ByYear {
            from_year: 2010,
            to_year: 2000,
        };
        let albums = service.list_albums(mode, 10, 0, &mut rng).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a-2005", "a-2003"]);
    }

    #[test]
    fn by_artist_sorts_empty_artist_name_first() {
        let catalog = TestCatalog::new();
        let nameless = catalog.artist("");
        let beta = catalog.artist("beta");
        let alpha = catalog.artist("alpha");
        catalog.album_with_track("by-beta", None, beta);
        catalog.album_with_track("by-nameless", None, nameless);
        catalog.album_with_track("by-alpha", None, alpha);

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(AlbumListMode::ByArtist, 10, 0, &mut rng)
            .unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["by-nameless", "by-alpha", "by-beta"]);
    }

    #[test]
    fn by_name_paginates_at_the_store() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        for name in ["delta", "alpha", "charlie", "bravo"] {
            catalog.album_with_track(name, None, ar);
        }

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(AlbumListMode::ByName, 2, 1, &mut rng)
            .unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["bravo", "charlie"]);
    }

    #[test]
    fn frequent_orders_by_aggregated_play_count() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        let cold = catalog.album("cold", None, ar);
        catalog.track_with_plays(cold, "c1", 1);
        let hot = catalog.album("hot", None, ar);
        catalog.track_with_plays(hot, "h1", 9);

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(AlbumListMode::Frequent, 10, 0, &mut rng)
            .unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["hot", "cold"]);
    }

    #[test]
    fn by_genre_filters_on_member_track_genres() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        let rock = catalog.album("rock-album", None, ar);
        catalog.track_full(rock, "t1", 60, &[ar], &["Rock"]);
        let jazz = catalog.album("jazz-album", None, ar);
        catalog.track_full(jazz, "t2", 60, &[ar], &["Jazz"]);

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(
                AlbumListMode::ByGenre {
                    genre: "Rock".to_string(),
                },
                10,
                0,
                &mut rng,
            )
            .unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["rock-album"]);
    }

    #[test]
    fn random_caps_sample_at_catalog_size() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        for name in ["one", "two", "three"] {
            catalog.album_with_track(name, None, ar);
        }

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(AlbumListMode::Random, 10, 0, &mut rng)
            .unwrap();
        assert_eq!(albums.len(), 3);
        let albums = service
            .list_albums(AlbumListMode::Random, 2, 0, &mut rng)
            .unwrap();
        assert_eq!(albums.len(), 2);
    }

    #[test]
    fn unsupported_modes_fail_loudly() {
        let catalog = TestCatalog::new();
        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        for mode in [
            AlbumListMode::Newest,
            AlbumListMode::Highest,
            AlbumListMode::Recent,
        ] {
            let err = service.list_albums(mode, 10, 0, &mut rng).unwrap_err();
            assert!(matches!(err, ServiceError::Unsupported(_)));
        }
    }

    #[test]
    fn offset_past_the_end_yields_empty_list() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        catalog.album_with_track("only", None, ar);

        let service = AlbumService::new(catalog.store());
        let mut rng = seeded_rng();
        let albums = service
            .list_albums(AlbumListMode::ByName, 10, 50, &mut rng)
            .unwrap();
        assert!(albums.is_empty());
    }

    #[test]
    fn get_album_reports_not_found() {
        let catalog = TestCatalog::new();
        let service = AlbumService::new(catalog.store());
        assert!(matches!(
            service.get_album(12345).unwrap_err(),
            ServiceError::NotFound
        ));
    }

    #[test]
    fn album_aggregates_stay_consistent_with_membership() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        let album = catalog.album("al1", None, ar);
        catalog.track_full(album, "t1", 60, &[ar], &[]);
        catalog.track_full(album, "t2", 30, &[ar], &[]);

        let service = AlbumService::new(catalog.store());
        let view = service.get_album(album).unwrap();
        assert_eq!(view.song_count, view.song.as_ref().unwrap().len());
        assert_eq!(view.duration, 90);

        catalog.track_full(album, "t3", 10, &[ar], &[]);
        let view = service.get_album(album).unwrap();
        assert_eq!(view.song_count, 3);
        assert_eq!(view.duration, 100);
    }

    #[test]
    fn list_artist_albums_orders_by_year_then_name() {
        let catalog = TestCatalog::new();
        let ar = catalog.artist("ar1");
        catalog.album_with_track("late", Some(2010), ar);
        catalog.album_with_track("early", Some(1999), ar);
        catalog.album_with_track("aaa-mid", Some(2005), ar);
        catalog.album_with_track("zzz-mid", Some(2005), ar);

        let service = AlbumService::new(catalog.store());
        let albums = service.list_artist_albums(ar, 10, 0).unwrap();
        let names: Vec<&str> = albums.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["early", "aaa-mid", "zzz-mid", "late"]);
    }
}
