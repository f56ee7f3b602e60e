//! Test fixture catalog: two artists, three albums, a handful of tracks
//! spread over two genres.

use sonica_server::catalog_store::{NewTrack, SqliteCatalogStore, WritableCatalogStore};

pub struct Fixture {
    pub artist_alpha: i64,
    pub artist_beta: i64,
    pub album_2003: i64,
    pub album_2005: i64,
    pub album_2011: i64,
    /// First track of `album_2003`: "Opening Theme", 60s, Rock + Jazz,
    /// by both artists.
    pub track_opening: i64,
    pub all_track_ids: Vec<i64>,
}

pub fn populate(store: &SqliteCatalogStore) -> Fixture {
    let artist_alpha = store.insert_artist("Alpha Band").unwrap();
    let artist_beta = store.insert_artist("Beta Ensemble").unwrap();

    let album_2003 = store
        .insert_album("Early Works", Some(2003), &[artist_alpha])
        .unwrap();
    let album_2005 = store
        .insert_album("Middle Years", Some(2005), &[artist_alpha, artist_beta])
        .unwrap();
    let album_2011 = store
        .insert_album("Late Period", Some(2011), &[artist_beta])
        .unwrap();

    let track_opening = store
        .insert_track(&NewTrack {
            title: "Opening Theme".to_string(),
            album_id: album_2003,
            track_number: Some(1),
            year: Some("2003".to_string()),
            duration_secs: 60,
            bit_rate: Some(320),
            sample_rate: Some(44100),
            channels: Some(2),
            file_size: Some(2_400_000),
            file_path: Some("albums/early-works/01-opening-theme.mp3".to_string()),
            artist_ids: vec![artist_alpha, artist_beta],
            genres: vec!["Rock".to_string(), "Jazz".to_string()],
            ..Default::default()
        })
        .unwrap();

    let mut all_track_ids = vec![track_opening];
    all_track_ids.push(
        store
            .insert_track(&NewTrack {
                title: "Second Movement".to_string(),
                album_id: album_2003,
                track_number: Some(2),
                year: Some("2003".to_string()),
                duration_secs: 90,
                file_path: Some("albums/early-works/02-second-movement.mp3".to_string()),
                artist_ids: vec![artist_alpha],
                genres: vec!["Rock".to_string()],
                ..Default::default()
            })
            .unwrap(),
    );
    all_track_ids.push(
        store
            .insert_track(&NewTrack {
                title: "Middle Anthem".to_string(),
                album_id: album_2005,
                track_number: Some(1),
                year: Some("2005".to_string()),
                duration_secs: 120,
                file_path: Some("albums/middle-years/01-middle-anthem.flac".to_string()),
                artist_ids: vec![artist_alpha, artist_beta],
                genres: vec!["Jazz".to_string()],
                ..Default::default()
            })
            .unwrap(),
    );
    all_track_ids.push(
        store
            .insert_track(&NewTrack {
                title: "Late Elegy".to_string(),
                album_id: album_2011,
                track_number: Some(1),
                year: Some("2011".to_string()),
                duration_secs: 45,
                file_path: Some("albums/late-period/01-late-elegy.mp3".to_string()),
                play_count: 7,
                artist_ids: vec![artist_beta],
                genres: vec!["Jazz".to_string()],
                ..Default::default()
            })
            .unwrap(),
    );

    Fixture {
        artist_alpha,
        artist_beta,
        album_2003,
        album_2005,
        album_2011,
        track_opening,
        all_track_ids,
    }
}
