mod models;
mod schema;
mod store;
mod trait_def;

pub use models::{
    Album, Artist, Genre, NewTrack, Playlist, PlaylistEntry, ResolvedAlbum, ResolvedArtist,
    ResolvedPlaylist, ResolvedTrack, Track, User,
};
pub use store::SqliteCatalogStore;
pub use trait_def::{CatalogStore, WritableCatalogStore};
