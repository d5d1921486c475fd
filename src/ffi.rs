//! FFI (Foreign Function Interface) bindings for host applications.
//!
//! This module exposes a media library and its record conversions through
//! C-compatible functions.
//!
//! # Memory Management
//!
//! - Rust allocates every record, array and library handle it returns
//! - The calling code MUST call the corresponding `_free` functions to prevent leaks
//! - Records borrowed from an array with `_get` stay owned by the array
//! - Strings inside records are null-terminated UTF-8, or null when absent
//!
//! # Usage from C
//!
//! ```c
//! CLibrary *lib = medialib_library_open("/data/library.json");
//! CMediaArray *media = medialib_media_list(lib);
//! for (int i = 0; i < medialib_media_array_count(media); i++) {
//!     const CMediaWrapper *m = medialib_media_array_get(media, i);
//!     // Use m->title, m->mrl...
//! }
//! medialib_free_media_array(media);
//! medialib_free_library(lib);
//! ```

use crate::compact::filtered_array;
use crate::convert::{
    convert_album_list, convert_artist_list, convert_folder_list, convert_genre_list,
    convert_media, convert_media_list, convert_playlist_list, convert_video_group_list,
};
use crate::records::{
    CAlbum, CArtist, CFolder, CGenre, CMediaWrapper, CPlaylist, CRecordArray, CSearchAggregate,
    CVideoGroup,
};
use crate::search::convert_search_aggregate;
use crate::snapshot::{SearchCategories, SnapshotLibrary};
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr;
use tracing_subscriber::EnvFilter;

// ============================================================================
// C-Compatible Types
// ============================================================================

/// Opaque handle to a loaded media library
pub struct CLibrary {
    library: SnapshotLibrary,
}

/// Result code for operations
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum CResultCode {
    Success = 0,
    Error = 1,
}

// ============================================================================
// Library
// ============================================================================

/// Load a media library snapshot from a JSON file.
/// Caller MUST call medialib_free_library() when done.
#[no_mangle]
pub extern "C" fn medialib_library_open(path: *const c_char) -> *mut CLibrary {
    let Some(path) = str_arg(path) else {
        return ptr::null_mut();
    };
    match SnapshotLibrary::load(Path::new(path)) {
        Ok(library) => Box::into_raw(Box::new(CLibrary { library })),
        Err(e) => {
            tracing::warn!(path, error = %e, "Error opening media library");
            ptr::null_mut()
        }
    }
}

/// Load a media library snapshot from a JSON document.
/// Caller MUST call medialib_free_library() when done.
#[no_mangle]
pub extern "C" fn medialib_library_from_json(json: *const c_char) -> *mut CLibrary {
    let Some(json) = str_arg(json) else {
        return ptr::null_mut();
    };
    match SnapshotLibrary::from_json(json) {
        Ok(library) => Box::into_raw(Box::new(CLibrary { library })),
        Err(e) => {
            tracing::warn!(error = %e, "Error parsing media library snapshot");
            ptr::null_mut()
        }
    }
}

/// Free a library returned by medialib_library_open() or medialib_library_from_json().
#[no_mangle]
pub extern "C" fn medialib_free_library(lib: *mut CLibrary) {
    if !lib.is_null() {
        unsafe {
            let _ = Box::from_raw(lib);
        }
    }
}

// ============================================================================
// Single Media
// ============================================================================

/// Convert one media, looked up by id.
/// Returns null if the id is unknown, the media has no file or its device is
/// not mounted. Caller MUST call medialib_free_media() when done.
#[no_mangle]
pub extern "C" fn medialib_media_get(lib: *const CLibrary, id: i64) -> *mut CMediaWrapper {
    let Some(lib) = (unsafe { lib.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(media) = lib.library.media(id) else {
        return ptr::null_mut();
    };
    match convert_media(media.as_ref()) {
        Ok(Some(wrapper)) => Box::into_raw(wrapper),
        Ok(None) => ptr::null_mut(),
        Err(e) => {
            tracing::warn!(media_id = id, error = %e, "Error converting media");
            ptr::null_mut()
        }
    }
}

/// Free a record returned by medialib_media_get().
#[no_mangle]
pub extern "C" fn medialib_free_media(media: *mut CMediaWrapper) {
    if !media.is_null() {
        unsafe {
            let _ = Box::from_raw(media);
        }
    }
}

// ============================================================================
// Bulk Conversion
// ============================================================================

/// Convert every media of the library. Media that convert to nothing are
/// left out. Caller MUST call medialib_free_media_array() when done.
#[no_mangle]
pub extern "C" fn medialib_media_list(lib: *const CLibrary) -> *mut CRecordArray<CMediaWrapper> {
    let Some(lib) = (unsafe { lib.as_ref() }) else {
        return ptr::null_mut();
    };
    match convert_media_list(lib.library.all_media()) {
        Ok(array) => Box::into_raw(array),
        Err(e) => {
            tracing::warn!(error = %e, "Error converting media list");
            ptr::null_mut()
        }
    }
}

/// Caller MUST call medialib_free_album_array() when done.
#[no_mangle]
pub extern "C" fn medialib_album_list(lib: *const CLibrary) -> *mut CRecordArray<CAlbum> {
    match unsafe { lib.as_ref() } {
        Some(lib) => Box::into_raw(convert_album_list(lib.library.albums())),
        None => ptr::null_mut(),
    }
}

/// Caller MUST call medialib_free_artist_array() when done.
#[no_mangle]
pub extern "C" fn medialib_artist_list(lib: *const CLibrary) -> *mut CRecordArray<CArtist> {
    match unsafe { lib.as_ref() } {
        Some(lib) => Box::into_raw(convert_artist_list(lib.library.artists())),
        None => ptr::null_mut(),
    }
}

/// Caller MUST call medialib_free_genre_array() when done.
#[no_mangle]
pub extern "C" fn medialib_genre_list(lib: *const CLibrary) -> *mut CRecordArray<CGenre> {
    match unsafe { lib.as_ref() } {
        Some(lib) => Box::into_raw(convert_genre_list(lib.library.genres())),
        None => ptr::null_mut(),
    }
}

/// Caller MUST call medialib_free_playlist_array() when done.
#[no_mangle]
pub extern "C" fn medialib_playlist_list(lib: *const CLibrary) -> *mut CRecordArray<CPlaylist> {
    match unsafe { lib.as_ref() } {
        Some(lib) => Box::into_raw(convert_playlist_list(lib.library.playlists())),
        None => ptr::null_mut(),
    }
}

/// Returns null if any folder MRL cannot be resolved.
/// Caller MUST call medialib_free_folder_array() when done.
#[no_mangle]
pub extern "C" fn medialib_folder_list(lib: *const CLibrary) -> *mut CRecordArray<CFolder> {
    let Some(lib) = (unsafe { lib.as_ref() }) else {
        return ptr::null_mut();
    };
    match convert_folder_list(lib.library.folders()) {
        Ok(array) => Box::into_raw(array),
        Err(e) => {
            tracing::warn!(error = %e, "Error converting folder list");
            ptr::null_mut()
        }
    }
}

/// Caller MUST call medialib_free_video_group_array() when done.
#[no_mangle]
pub extern "C" fn medialib_video_group_list(
    lib: *const CLibrary,
) -> *mut CRecordArray<CVideoGroup> {
    match unsafe { lib.as_ref() } {
        Some(lib) => Box::into_raw(convert_video_group_list(lib.library.video_groups())),
        None => ptr::null_mut(),
    }
}

// ============================================================================
// Record Arrays
// ============================================================================

macro_rules! record_array_abi {
    ($record:ty, $count:ident, $get:ident, $filter:ident, $free:ident) => {
        /// Number of slots in an array, null slots included.
        #[no_mangle]
        pub extern "C" fn $count(array: *const CRecordArray<$record>) -> c_int {
            match unsafe { array.as_ref() } {
                Some(array) => slot_count(array.len()),
                None => 0,
            }
        }

        /// Borrow the record at `index`. Returns null for a null slot or an
        /// index out of range. The record stays owned by the array.
        #[no_mangle]
        pub extern "C" fn $get(array: *const CRecordArray<$record>, index: c_int) -> *const $record {
            let Some(array) = (unsafe { array.as_ref() }) else {
                return ptr::null();
            };
            if index < 0 {
                return ptr::null();
            }
            match array.get(index as usize) {
                Some(record) => record as *const $record,
                None => ptr::null(),
            }
        }

        /// Remove the null slots of an array. Pass -1 as `removal_count` when
        /// the number of null slots is unknown. Takes ownership of `array`:
        /// use only the returned pointer afterwards.
        ///
        /// Only pass arrays the caller owns, as returned by a `_list` function
        /// or moved out of a search result with a `_take_` function. Arrays still
        /// held by a search result are freed with it; compact those with
        /// medialib_search_aggregate_filter_media() instead.
        #[no_mangle]
        pub extern "C" fn $filter(
            array: *mut CRecordArray<$record>,
            removal_count: c_int,
        ) -> *mut CRecordArray<$record> {
            if array.is_null() {
                return ptr::null_mut();
            }
            let array = unsafe { Box::from_raw(array) };
            let removal_count = usize::try_from(removal_count).ok();
            Box::into_raw(filtered_array(array, removal_count))
        }

        /// Free an array and every record it holds.
        #[no_mangle]
        pub extern "C" fn $free(array: *mut CRecordArray<$record>) {
            if !array.is_null() {
                unsafe {
                    let _ = Box::from_raw(array);
                }
            }
        }
    };
}

record_array_abi!(
    CMediaWrapper,
    medialib_media_array_count,
    medialib_media_array_get,
    medialib_media_array_filter,
    medialib_free_media_array
);
record_array_abi!(
    CAlbum,
    medialib_album_array_count,
    medialib_album_array_get,
    medialib_album_array_filter,
    medialib_free_album_array
);
record_array_abi!(
    CArtist,
    medialib_artist_array_count,
    medialib_artist_array_get,
    medialib_artist_array_filter,
    medialib_free_artist_array
);
record_array_abi!(
    CGenre,
    medialib_genre_array_count,
    medialib_genre_array_get,
    medialib_genre_array_filter,
    medialib_free_genre_array
);
record_array_abi!(
    CPlaylist,
    medialib_playlist_array_count,
    medialib_playlist_array_get,
    medialib_playlist_array_filter,
    medialib_free_playlist_array
);
record_array_abi!(
    CFolder,
    medialib_folder_array_count,
    medialib_folder_array_get,
    medialib_folder_array_filter,
    medialib_free_folder_array
);
record_array_abi!(
    CVideoGroup,
    medialib_video_group_array_count,
    medialib_video_group_array_get,
    medialib_video_group_array_filter,
    medialib_free_video_group_array
);

// ============================================================================
// Search
// ============================================================================

/// Search the library. `categories` is a bit set: 1 = albums, 2 = artists,
/// 4 = genres, 8 = playlists, 16 = media. Unknown bits are ignored.
/// Caller MUST call medialib_free_search_aggregate() when done.
#[no_mangle]
pub extern "C" fn medialib_search(
    lib: *const CLibrary,
    pattern: *const c_char,
    categories: u32,
) -> *mut CSearchAggregate {
    let Some(lib) = (unsafe { lib.as_ref() }) else {
        return ptr::null_mut();
    };
    let Some(pattern) = str_arg(pattern) else {
        return ptr::null_mut();
    };
    let categories = SearchCategories::from_bits_truncate(categories);
    let result = lib
        .library
        .search(pattern, categories)
        .and_then(|aggregate| convert_search_aggregate(&aggregate));
    match result {
        Ok(aggregate) => Box::into_raw(aggregate),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Error searching media library");
            ptr::null_mut()
        }
    }
}

/// Move the video array out of a search result, leaving null in its place.
/// Returns null if videos were not searched or were already taken.
/// Caller MUST call medialib_free_media_array() on the returned array.
#[no_mangle]
pub extern "C" fn medialib_search_aggregate_take_videos(
    aggregate: *mut CSearchAggregate,
) -> *mut CRecordArray<CMediaWrapper> {
    match unsafe { aggregate.as_mut() } {
        Some(aggregate) => aggregate.videos.take().map_or(ptr::null_mut(), Box::into_raw),
        None => ptr::null_mut(),
    }
}

/// Move the track array out of a search result, leaving null in its place.
/// Returns null if tracks were not searched or were already taken.
/// Caller MUST call medialib_free_media_array() on the returned array.
#[no_mangle]
pub extern "C" fn medialib_search_aggregate_take_tracks(
    aggregate: *mut CSearchAggregate,
) -> *mut CRecordArray<CMediaWrapper> {
    match unsafe { aggregate.as_mut() } {
        Some(aggregate) => aggregate.tracks.take().map_or(ptr::null_mut(), Box::into_raw),
        None => ptr::null_mut(),
    }
}

/// Remove the null slots of the video and track arrays of a search result.
/// The arrays stay owned by the aggregate; re-read its fields afterwards.
#[no_mangle]
pub extern "C" fn medialib_search_aggregate_filter_media(
    aggregate: *mut CSearchAggregate,
) -> CResultCode {
    let Some(aggregate) = (unsafe { aggregate.as_mut() }) else {
        return CResultCode::Error;
    };
    aggregate.videos = aggregate.videos.take().map(|a| filtered_array(a, None));
    aggregate.tracks = aggregate.tracks.take().map(|a| filtered_array(a, None));
    CResultCode::Success
}

/// Free a search result returned by medialib_search(), with all its arrays.
#[no_mangle]
pub extern "C" fn medialib_free_search_aggregate(aggregate: *mut CSearchAggregate) {
    if !aggregate.is_null() {
        unsafe {
            let _ = Box::from_raw(aggregate);
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Install a log subscriber filtered by `RUST_LOG`.
/// Returns Error if a subscriber is already installed.
#[no_mangle]
pub extern "C" fn medialib_init_logging() -> CResultCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("medialib_bridge=info"));
    match tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
    {
        Ok(()) => CResultCode::Success,
        Err(_) => CResultCode::Error,
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Array lengths beyond `c_int` saturate.
fn slot_count(len: usize) -> c_int {
    c_int::try_from(len).unwrap_or(c_int::MAX)
}

fn str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    match unsafe { CStr::from_ptr(s) }.to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::warn!(error = %e, "String argument is not valid UTF-8");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    const SNAPSHOT: &str = r#"{
        "artists": [{ "id": 1, "name": "Nina Simone" }],
        "genres": [{ "id": 1, "name": "Jazz" }],
        "albums": [{ "id": 1, "title": "Pastel Blues", "album_artist": 1 }],
        "media": [
            {
                "id": 1, "type": "audio", "sub_type": "album_track", "title": "Sinnerman",
                "files": [{ "mrl": "file:///music/sinnerman.flac", "last_modified": "2021-03-04T10:00:00Z" }],
                "album_track": { "artist": 1, "genre": 1, "album": 1, "track_number": 9 },
                "duration": 620000, "progress": 50
            },
            {
                "id": 2, "type": "video", "title": "Blue Planet",
                "files": [{ "mrl": "file:///mnt/usb/blue.mkv", "last_modified": "2020-01-01T00:00:00Z", "device_present": false }]
            },
            { "id": 3, "type": "video", "title": "Bluebird" }
        ],
        "playlists": [{ "id": 1, "name": "Blue evening", "media": [1] }],
        "folders": [{ "id": 1, "name": "music", "mrl": "file:///music/" }],
        "video_groups": [{ "name": "Nature", "media": [2, 3] }]
    }"#;

    fn open() -> *mut CLibrary {
        let json = CString::new(SNAPSHOT).unwrap();
        let lib = medialib_library_from_json(json.as_ptr());
        assert!(!lib.is_null());
        lib
    }

    #[test]
    fn test_null_arguments() {
        assert!(medialib_library_open(ptr::null()).is_null());
        assert!(medialib_library_from_json(ptr::null()).is_null());
        assert!(medialib_media_get(ptr::null(), 1).is_null());
        assert!(medialib_media_list(ptr::null()).is_null());
        assert!(medialib_search(ptr::null(), ptr::null(), 0).is_null());
        assert_eq!(medialib_genre_array_count(ptr::null()), 0);
        assert!(medialib_genre_array_get(ptr::null(), 0).is_null());
        assert!(medialib_genre_array_filter(ptr::null_mut(), -1).is_null());
        medialib_free_library(ptr::null_mut());
        medialib_free_media(ptr::null_mut());
        medialib_free_search_aggregate(ptr::null_mut());
    }

    #[test]
    fn test_invalid_snapshot() {
        let json = CString::new("{\"albums\": [{\"id\": 1, \"title\": \"x\", \"album_artist\": 5}]}")
            .unwrap();
        assert!(medialib_library_from_json(json.as_ptr()).is_null());
    }

    #[test]
    fn test_media_get() {
        let lib = open();

        let media = medialib_media_get(lib, 1);
        assert!(!media.is_null());
        let record = unsafe { &*media };
        assert_eq!(record.title(), Some("Sinnerman"));
        assert_eq!(record.artist(), Some("Nina Simone"));
        assert_eq!(record.time, 310_000);
        medialib_free_media(media);

        // Device not mounted, no file, unknown id
        assert!(medialib_media_get(lib, 2).is_null());
        assert!(medialib_media_get(lib, 3).is_null());
        assert!(medialib_media_get(lib, 99).is_null());

        medialib_free_library(lib);
    }

    #[test]
    fn test_media_list_skips_absent_media() {
        let lib = open();
        let array = medialib_media_list(lib);
        assert_eq!(medialib_media_array_count(array), 1);
        let first = medialib_media_array_get(array, 0);
        assert_eq!(unsafe { (*first).id }, 1);
        assert!(medialib_media_array_get(array, 1).is_null());
        assert!(medialib_media_array_get(array, -1).is_null());
        medialib_free_media_array(array);
        medialib_free_library(lib);
    }

    #[test]
    fn test_entity_lists() {
        let lib = open();

        let albums = medialib_album_list(lib);
        assert_eq!(medialib_album_array_count(albums), 1);
        let album = unsafe { &*medialib_album_array_get(albums, 0) };
        assert_eq!(album.album_artist(), Some("Nina Simone"));
        medialib_free_album_array(albums);

        let artists = medialib_artist_list(lib);
        assert_eq!(medialib_artist_array_count(artists), 1);
        medialib_free_artist_array(artists);

        let genres = medialib_genre_list(lib);
        assert_eq!(medialib_genre_array_count(genres), 1);
        medialib_free_genre_array(genres);

        let playlists = medialib_playlist_list(lib);
        let playlist = unsafe { &*medialib_playlist_array_get(playlists, 0) };
        assert_eq!(playlist.track_count, 1);
        medialib_free_playlist_array(playlists);

        let folders = medialib_folder_list(lib);
        let folder = unsafe { &*medialib_folder_array_get(folders, 0) };
        assert_eq!(folder.mrl(), Some("file:///music/"));
        medialib_free_folder_array(folders);

        let groups = medialib_video_group_list(lib);
        let group = unsafe { &*medialib_video_group_array_get(groups, 0) };
        assert_eq!(group.count, 2);
        medialib_free_video_group_array(groups);

        medialib_free_library(lib);
    }

    #[test]
    fn test_filter_without_nulls_keeps_array() {
        let lib = open();
        let genres = medialib_genre_list(lib);
        let filtered = medialib_genre_array_filter(genres, -1);
        assert_eq!(filtered, genres);
        medialib_free_genre_array(filtered);
        medialib_free_library(lib);
    }

    const VIDEO_SNAPSHOT: &str = r#"{
        "media": [
            {
                "id": 10, "type": "video", "title": "Blue Lagoon",
                "files": [{ "mrl": "file:///videos/lagoon.mkv", "last_modified": "2022-05-01T08:00:00Z" }]
            },
            { "id": 11, "type": "video", "title": "Blue Moon" },
            {
                "id": 12, "type": "video", "title": "Blue Whale",
                "files": [{ "mrl": "file:///videos/whale.mkv", "last_modified": "2022-05-02T08:00:00Z" }]
            },
            {
                "id": 13, "type": "audio", "sub_type": "album_track", "title": "Blue in Green",
                "files": [{ "mrl": "file:///music/blue_in_green.flac", "last_modified": "2022-05-03T08:00:00Z" }]
            }
        ]
    }"#;

    fn search_videos() -> (*mut CLibrary, *mut CSearchAggregate) {
        let json = CString::new(VIDEO_SNAPSHOT).unwrap();
        let lib = medialib_library_from_json(json.as_ptr());
        assert!(!lib.is_null());
        let pattern = CString::new("blue").unwrap();
        let aggregate = medialib_search(lib, pattern.as_ptr(), SearchCategories::MEDIA.bits());
        assert!(!aggregate.is_null());
        (lib, aggregate)
    }

    fn media_ids(array: *const CRecordArray<CMediaWrapper>) -> Vec<Option<i64>> {
        (0..medialib_media_array_count(array))
            .map(|i| {
                let record = medialib_media_array_get(array, i);
                unsafe { record.as_ref() }.map(|m| m.id)
            })
            .collect()
    }

    #[test]
    fn test_taken_videos_compact_with_unknown_count() {
        let (lib, aggregate) = search_videos();

        let videos = medialib_search_aggregate_take_videos(aggregate);
        assert_eq!(media_ids(videos), vec![Some(10), None, Some(12)]);
        assert!(unsafe { (*aggregate).videos.is_none() });
        assert!(medialib_search_aggregate_take_videos(aggregate).is_null());

        let filtered = medialib_media_array_filter(videos, -1);
        assert_eq!(media_ids(filtered), vec![Some(10), Some(12)]);

        medialib_free_media_array(filtered);
        medialib_free_search_aggregate(aggregate);
        medialib_free_library(lib);
    }

    #[test]
    fn test_taken_videos_compact_with_known_count() {
        let (lib, aggregate) = search_videos();

        let videos = medialib_search_aggregate_take_videos(aggregate);
        let filtered = medialib_media_array_filter(videos, 1);
        assert_eq!(media_ids(filtered), vec![Some(10), Some(12)]);
        medialib_free_media_array(filtered);

        let tracks = medialib_search_aggregate_take_tracks(aggregate);
        assert_eq!(media_ids(tracks), vec![Some(13)]);
        let same = medialib_media_array_filter(tracks, 0);
        assert_eq!(same, tracks);
        medialib_free_media_array(same);

        medialib_free_search_aggregate(aggregate);
        medialib_free_library(lib);
    }

    #[test]
    fn test_search_aggregate_filters_media_in_place() {
        let (lib, aggregate) = search_videos();

        assert_eq!(
            medialib_search_aggregate_filter_media(aggregate),
            CResultCode::Success
        );
        let result = unsafe { &*aggregate };
        let videos: Vec<i64> = result.videos.as_ref().unwrap().records().map(|m| m.id).collect();
        assert_eq!(videos, vec![10, 12]);
        assert_eq!(result.videos.as_ref().unwrap().null_count(), 0);
        assert_eq!(result.tracks.as_ref().map(|t| t.len()), Some(1));
        assert!(result.albums.is_none());

        medialib_free_search_aggregate(aggregate);
        medialib_free_library(lib);
    }

    #[test]
    fn test_search_aggregate_null_arguments() {
        assert!(medialib_search_aggregate_take_videos(ptr::null_mut()).is_null());
        assert!(medialib_search_aggregate_take_tracks(ptr::null_mut()).is_null());
        assert_eq!(
            medialib_search_aggregate_filter_media(ptr::null_mut()),
            CResultCode::Error
        );
    }

    #[test]
    fn test_slot_count_saturates() {
        assert_eq!(slot_count(0), 0);
        assert_eq!(slot_count(42), 42);
        assert_eq!(slot_count(usize::MAX), c_int::MAX);
    }

    #[test]
    fn test_search() {
        let lib = open();
        let pattern = CString::new("blue").unwrap();
        let categories = (SearchCategories::ALBUMS | SearchCategories::MEDIA).bits();
        let aggregate = medialib_search(lib, pattern.as_ptr(), categories);
        assert!(!aggregate.is_null());

        let result = unsafe { &*aggregate };
        assert_eq!(result.albums.as_ref().map(|a| a.len()), Some(1));
        assert!(result.artists.is_none());
        assert!(result.playlists.is_none());
        // Both hits are videos that convert to nothing, their slots stay
        let videos = result.videos.as_ref().unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos.null_count(), 2);
        assert_eq!(result.tracks.as_ref().map(|t| t.len()), Some(0));
        medialib_free_search_aggregate(aggregate);

        let blank = CString::new(" ").unwrap();
        assert!(medialib_search(lib, blank.as_ptr(), categories).is_null());

        medialib_free_library(lib);
    }

    #[test]
    fn test_open_missing_file() {
        let path = CString::new("/nonexistent/library.json").unwrap();
        assert!(medialib_library_open(path.as_ptr()).is_null());
    }
}
