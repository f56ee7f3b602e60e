//! `/rest` protocol routes: parameter parsing, service dispatch, error
//! status mapping.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use axum_extra::extract::Query;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::catalog_store::CatalogStore;
use crate::subsonic::{
    AlbumListMode, AlbumListView, AlbumService, ArtistService, GenreService, GenresView,
    IndexService, PlaylistService, PlaylistsView, SearchService, SearchWindows, ServiceError,
    SongListView, StarService, StarTargets, TrackService,
};

use super::envelope::SubsonicResponse;
use super::http_layers::log_requests;
use super::state::ServerState;
use super::ServerConfig;

fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "No such id"})),
        )
            .into_response(),
        ServiceError::InvalidArgument(_) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid arguments"})),
        )
            .into_response(),
        ServiceError::Unsupported(_) => (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({"detail": "Not implemented"})),
        )
            .into_response(),
        ServiceError::Store(err) => {
            error!("Store failure: {:#}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Render a service result through the envelope with the endpoint's root key.
fn respond<T: serde::Serialize>(root_key: &str, result: Result<T, ServiceError>) -> Response {
    match result {
        Ok(payload) => SubsonicResponse::with_payload(root_key, payload).into_response(),
        Err(err) => error_response(err),
    }
}

/// Resolve the acting user from the optional `u` parameter; unknown or
/// absent logins act as the default user.
fn acting_user(state: &ServerState, login: Option<&str>) -> i64 {
    login
        .and_then(|login| state.store.get_user_by_login(login).ok().flatten())
        .map(|user| user.id)
        .unwrap_or(state.default_user_id)
}

fn invalid(detail: &str) -> ServiceError {
    ServiceError::InvalidArgument(detail.to_string())
}

fn default_size() -> usize {
    10
}

fn default_search_count() -> usize {
    20
}

async fn ping() -> Response {
    SubsonicResponse::ok().into_response()
}

#[derive(Deserialize, Debug)]
struct IdParams {
    id: i64,
}

async fn get_song(State(state): State<ServerState>, Query(params): Query<IdParams>) -> Response {
    respond("song", TrackService::new(state.store.as_ref()).get_track(params.id))
}

async fn get_album(State(state): State<ServerState>, Query(params): Query<IdParams>) -> Response {
    respond("album", AlbumService::new(state.store.as_ref()).get_album(params.id))
}

async fn get_artist(State(state): State<ServerState>, Query(params): Query<IdParams>) -> Response {
    respond(
        "artist",
        ArtistService::new(state.store.as_ref()).get_artist(params.id, true, true),
    )
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct AlbumListParams {
    #[serde(rename = "type")]
    list_type: Option<String>,
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default)]
    offset: usize,
    from_year: Option<i32>,
    to_year: Option<i32>,
    genre: Option<String>,
}

async fn get_album_list2(
    State(state): State<ServerState>,
    Query(params): Query<AlbumListParams>,
) -> Response {
    let result = (|| -> Result<AlbumListView, ServiceError> {
        let list_type = params.list_type.ok_or_else(|| invalid("type is required"))?;
        let mode = AlbumListMode::from_request(
            &list_type,
            params.from_year,
            params.to_year,
            params.genre,
        )?;
        let mut rng = state.rng.lock().unwrap();
        let albums = AlbumService::new(state.store.as_ref()).list_albums(
            mode,
            params.size,
            params.offset,
            &mut *rng,
        )?;
        Ok(AlbumListView { album: albums })
    })();
    respond("albumList2", result)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SortedArtistAlbumsParams {
    id: i64,
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default)]
    offset: usize,
}

async fn get_sorted_artist_albums(
    State(state): State<ServerState>,
    Query(params): Query<SortedArtistAlbumsParams>,
) -> Response {
    let result = AlbumService::new(state.store.as_ref())
        .list_artist_albums(params.id, params.size, params.offset)
        .map(|albums| AlbumListView { album: albums });
    respond("sortedArtistAlbums", result)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RandomSongsParams {
    #[serde(default = "default_size")]
    size: usize,
    genre: Option<String>,
    from_year: Option<i32>,
    to_year: Option<i32>,
}

async fn get_random_songs(
    State(state): State<ServerState>,
    Query(params): Query<RandomSongsParams>,
) -> Response {
    let mut rng = state.rng.lock().unwrap();
    let result = TrackService::new(state.store.as_ref())
        .random_tracks(
            params.size,
            params.genre.as_deref(),
            params.from_year,
            params.to_year,
            &mut *rng,
        )
        .map(|songs| SongListView { song: songs });
    respond("randomSongs", result)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SongsByGenreParams {
    genre: Option<String>,
    #[serde(default = "default_size")]
    count: usize,
    #[serde(default)]
    offset: usize,
}

async fn get_songs_by_genre(
    State(state): State<ServerState>,
    Query(params): Query<SongsByGenreParams>,
) -> Response {
    let result = (|| -> Result<SongListView, ServiceError> {
        let genre = params.genre.ok_or_else(|| invalid("genre is required"))?;
        let songs = TrackService::new(state.store.as_ref()).list_by_genre(
            &genre,
            params.count,
            params.offset,
        )?;
        Ok(SongListView { song: songs })
    })();
    respond("songsByGenre", result)
}

async fn get_genres(State(state): State<ServerState>) -> Response {
    let result = GenreService::new(state.store.as_ref())
        .list_genres()
        .map(|genres| GenresView { genre: genres });
    respond("genres", result)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct IndexesParams {
    #[serde(default)]
    with_children: bool,
}

async fn get_indexes(
    State(state): State<ServerState>,
    Query(params): Query<IndexesParams>,
) -> Response {
    respond(
        "indexes",
        IndexService::new(state.store.as_ref()).build_index(params.with_children),
    )
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SearchParams {
    #[serde(default)]
    query: String,
    #[serde(default = "default_search_count")]
    artist_count: usize,
    #[serde(default)]
    artist_offset: usize,
    #[serde(default = "default_search_count")]
    album_count: usize,
    #[serde(default)]
    album_offset: usize,
    #[serde(default = "default_search_count")]
    song_count: usize,
    #[serde(default)]
    song_offset: usize,
}

fn run_search(state: &ServerState, params: SearchParams, root_key: &str) -> Response {
    let windows = SearchWindows {
        artist_count: params.artist_count,
        artist_offset: params.artist_offset,
        album_count: params.album_count,
        album_offset: params.album_offset,
        song_count: params.song_count,
        song_offset: params.song_offset,
    };
    respond(
        root_key,
        SearchService::new(state.store.as_ref()).search(&params.query, windows),
    )
}

async fn search2(State(state): State<ServerState>, Query(params): Query<SearchParams>) -> Response {
    run_search(&state, params, "searchResult2")
}

async fn search3(State(state): State<ServerState>, Query(params): Query<SearchParams>) -> Response {
    run_search(&state, params, "searchResult3")
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct StarParams {
    u: Option<String>,
    #[serde(default)]
    id: Vec<i64>,
    #[serde(default)]
    album_id: Vec<i64>,
    #[serde(default)]
    artist_id: Vec<i64>,
    #[serde(default)]
    playlist_id: Vec<i64>,
}

impl StarParams {
    fn targets(&self) -> StarTargets {
        StarTargets {
            track_ids: self.id.clone(),
            album_ids: self.album_id.clone(),
            artist_ids: self.artist_id.clone(),
            playlist_ids: self.playlist_id.clone(),
        }
    }
}

async fn star(State(state): State<ServerState>, Query(params): Query<StarParams>) -> Response {
    let user_id = acting_user(&state, params.u.as_deref());
    match StarService::new(state.store.as_ref()).star(&params.targets(), user_id) {
        Ok(()) => SubsonicResponse::ok().into_response(),
        Err(err) => error_response(err),
    }
}

async fn unstar(State(state): State<ServerState>, Query(params): Query<StarParams>) -> Response {
    let user_id = acting_user(&state, params.u.as_deref());
    match StarService::new(state.store.as_ref()).unstar(&params.targets(), user_id) {
        Ok(()) => SubsonicResponse::ok().into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Deserialize, Debug)]
struct UserParams {
    u: Option<String>,
}

async fn get_starred2(
    State(state): State<ServerState>,
    Query(params): Query<UserParams>,
) -> Response {
    let user_id = acting_user(&state, params.u.as_deref());
    respond(
        "starred2",
        StarService::new(state.store.as_ref()).get_starred(user_id),
    )
}

async fn get_playlists(State(state): State<ServerState>) -> Response {
    let result = PlaylistService::new(state.store.as_ref())
        .list()
        .map(|playlists| PlaylistsView { playlist: playlists });
    respond("playlists", result)
}

async fn get_playlist(State(state): State<ServerState>, Query(params): Query<IdParams>) -> Response {
    respond(
        "playlist",
        PlaylistService::new(state.store.as_ref()).get(params.id),
    )
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreatePlaylistParams {
    u: Option<String>,
    name: Option<String>,
    #[serde(default)]
    song_id: Vec<i64>,
}

async fn create_playlist(
    State(state): State<ServerState>,
    Query(params): Query<CreatePlaylistParams>,
) -> Response {
    let user_id = acting_user(&state, params.u.as_deref());
    let result = (|| -> Result<_, ServiceError> {
        let name = params.name.ok_or_else(|| invalid("name is required"))?;
        PlaylistService::new(state.store.as_ref()).create(&name, &params.song_id, user_id)
    })();
    respond("playlist", result)
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdatePlaylistParams {
    playlist_id: Option<i64>,
    name: Option<String>,
    #[serde(default)]
    song_id_to_add: Vec<i64>,
    #[serde(default)]
    song_id_to_remove: Vec<i64>,
}

async fn update_playlist(
    State(state): State<ServerState>,
    Query(params): Query<UpdatePlaylistParams>,
) -> Response {
    let result = (|| -> Result<_, ServiceError> {
        let id = params
            .playlist_id
            .ok_or_else(|| invalid("playlistId is required"))?;
        PlaylistService::new(state.store.as_ref()).update(
            id,
            params.name.as_deref(),
            &params.song_id_to_add,
            &params.song_id_to_remove,
        )
    })();
    respond("playlist", result)
}

async fn delete_playlist(
    State(state): State<ServerState>,
    Query(params): Query<IdParams>,
) -> Response {
    match PlaylistService::new(state.store.as_ref()).delete(params.id) {
        Ok(()) => SubsonicResponse::ok().into_response(),
        Err(err) => error_response(err),
    }
}

pub fn make_app(config: ServerConfig, store: Arc<dyn CatalogStore>) -> Result<Router> {
    let default_user_id = match store.get_user_by_login(&config.default_user_login)? {
        Some(user) => user.id,
        None => store.create_user(&config.default_user_login)?,
    };

    let state = ServerState {
        config,
        start_time: Instant::now(),
        store,
        rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        default_user_id,
    };

    let rest_routes: Router = Router::new()
        .route("/ping", get(ping))
        .route("/getSong", get(get_song))
        .route("/getAlbum", get(get_album))
        .route("/getArtist", get(get_artist))
        .route("/getAlbumList2", get(get_album_list2))
        .route("/getSortedArtistAlbums", get(get_sorted_artist_albums))
        .route("/getRandomSongs", get(get_random_songs))
        .route("/getSongsByGenre", get(get_songs_by_genre))
        .route("/getGenres", get(get_genres))
        .route("/getIndexes", get(get_indexes))
        .route("/search2", get(search2))
        .route("/search3", get(search3))
        .route("/star", get(star))
        .route("/unstar", get(unstar))
        .route("/getStarred2", get(get_starred2))
        .route("/getPlaylists", get(get_playlists))
        .route("/getPlaylist", get(get_playlist))
        .route("/createPlaylist", get(create_playlist))
        .route("/updatePlaylist", get(update_playlist))
        .route("/deletePlaylist", get(delete_playlist))
        .with_state(state.clone());

    let app = Router::new()
        .nest("/rest", rest_routes)
        .layer(middleware::from_fn_with_state(state, log_requests));

    Ok(app)
}

pub async fn run_server(store: Arc<dyn CatalogStore>, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, store)?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Ready to serve at port {}!", port);
    Ok(axum::serve(listener, app).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::SqliteCatalogStore;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt; // for `oneshot`

    fn test_app() -> Router {
        let store = Arc::new(SqliteCatalogStore::open_in_memory().unwrap());
        make_app(ServerConfig::default(), store).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn ping_returns_ok_envelope() {
        let app = test_app();
        let request = Request::builder()
            .uri("/rest/ping")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["subsonic-response"]["status"], "ok");
        assert_eq!(body["subsonic-response"]["openSubsonic"], true);
    }

    #[tokio::test]
    async fn missing_id_maps_to_not_found_detail() {
        let app = test_app();
        let request = Request::builder()
            .uri("/rest/getSong?id=4242")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "No such id");
    }

    #[tokio::test]
    async fn invalid_list_type_maps_to_bad_request_detail() {
        let app = test_app();
        let request = Request::builder()
            .uri("/rest/getAlbumList2?type=byMood")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["detail"], "Invalid arguments");
    }

    #[tokio::test]
    async fn unsupported_list_type_maps_to_not_implemented() {
        let app = test_app();
        let request = Request::builder()
            .uri("/rest/getAlbumList2?type=newest")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
