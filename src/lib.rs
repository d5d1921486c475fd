//! Media Library Bridge
//!
//! Converts the objects of a media library into flat C-compatible records for
//! a host application.
//!
//! # Architecture
//!
//! The native side is a set of read-only traits (`library` module). Anything
//! implementing them can be bridged; this crate ships one implementation that
//! loads a complete object graph from a JSON snapshot (`snapshot` module).
//!
//! The host side is a set of `#[repr(C)]` records whose string fields are
//! null when absent (`records` module). Records own their strings and free
//! them on drop.
//!
//! # Core Features Implemented
//!
//! ## Conversion (`convert` module)
//! - `convert_media()` - Media to `CMediaWrapper`, or nothing when no file is reachable
//! - `convert_album()`, `convert_artist()`, `convert_genre()`, `convert_playlist()`,
//!   `convert_folder()`, `convert_video_group()` - One record per entity
//! - `convert_*_list()` - Bulk conversion into record arrays
//!
//! ## Search Results (`search` module)
//! - `convert_search_aggregate()` - Six result arrays, media split into tracks and videos
//!
//! ## Compaction (`compact` module)
//! - `filtered_array()` - Drop the null slots of a record array
//!
//! ## FFI Bindings (`ffi` module)
//! - `medialib_library_open()` / `medialib_free_library()` - Library lifetime
//! - `medialib_*_list()` - Bulk conversion
//! - `medialib_*_array_count()` / `_get()` / `_filter()` - Array access
//! - `medialib_search()` - Search and convert the results
//! - `medialib_search_aggregate_take_*()` / `_filter_media()` - Own or compact search arrays
//! - `medialib_free_*()` - Memory management functions

pub mod compact;
pub mod convert;
pub mod error;
pub mod ffi;
pub mod library;
pub mod records;
pub mod search;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod test_utils;

pub use compact::filtered_array;
pub use convert::{
    convert_album, convert_album_list, convert_artist, convert_artist_list, convert_folder,
    convert_folder_list, convert_genre, convert_genre_list, convert_media, convert_media_list,
    convert_playlist, convert_playlist_list, convert_video_group, convert_video_group_list,
};
pub use error::{Error, Result};
pub use records::{
    CAlbum, CArtist, CFolder, CGenre, CMediaWrapper, CPlaylist, CRecordArray, CSearchAggregate,
    CVideoGroup,
};
pub use search::convert_search_aggregate;
pub use snapshot::{SearchCategories, SnapshotLibrary};
