//! C-compatible host records.
//!
//! These are the values handed to the host runtime. Field order is the
//! positional contract the host side is compiled against; do not reorder.
//!
//! # Memory Management
//!
//! - Every string field is a NUL-terminated UTF-8 string owned by the record,
//!   or null when the value is absent
//! - Dropping a record frees its strings; dropping a [`CRecordArray`] frees
//!   its records; dropping a [`CSearchAggregate`] frees its arrays
//! - Across the C ABI the host owns what it receives and releases it through
//!   the matching `medialib_free_*` function

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

/// `type` value of a video media.
pub const MEDIA_TYPE_VIDEO: c_int = 0;
/// `type` value of an audio media.
pub const MEDIA_TYPE_AUDIO: c_int = 1;
/// `type` value of a media whose type is not known.
pub const MEDIA_TYPE_ALL: c_int = -1;
/// Audio or subtitle track index of a media that never selected one.
pub const UNSET_TRACK_INDEX: c_int = -2;

// ============================================================================
// Host Strings
// ============================================================================

/// A string being prepared for a host record.
///
/// Until [`HostString::into_raw`] moves it into a record, the allocation is
/// owned here and released on drop, so an early return while a record is
/// half-built frees everything created so far.
#[derive(Debug, Default)]
pub(crate) struct HostString(Option<CString>);

impl HostString {
    pub(crate) fn new(value: &str) -> Self {
        Self(Some(to_c_string(value)))
    }

    /// Absent when `value` is empty.
    pub(crate) fn non_empty(value: &str) -> Self {
        if value.is_empty() {
            Self::absent()
        } else {
            Self::new(value)
        }
    }

    pub(crate) fn absent() -> Self {
        Self(None)
    }

    pub(crate) fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Hand the allocation over to a record.
    pub(crate) fn into_raw(self) -> *mut c_char {
        match self.0 {
            Some(value) => {
                #[cfg(test)]
                live::acquire();
                value.into_raw()
            }
            None => ptr::null_mut(),
        }
    }
}

/// Host strings stop at the first NUL byte, like any C string would.
fn to_c_string(value: &str) -> CString {
    let bytes = value.as_bytes();
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    if end < bytes.len() {
        tracing::debug!(
            kept = end,
            dropped = bytes.len() - end,
            "String truncated at interior NUL"
        );
    }
    CString::new(&bytes[..end]).unwrap_or_default()
}

fn free_c_char(s: *mut c_char) {
    if !s.is_null() {
        #[cfg(test)]
        live::release();
        unsafe {
            let _ = CString::from_raw(s);
        }
    }
}

fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}


macro_rules! release_strings_on_drop {
    ($record:ty { $($field:ident),+ $(,)? }) => {
        impl Drop for $record {
            fn drop(&mut self) {
                $( free_c_char(std::mem::replace(&mut self.$field, ptr::null_mut())); )+
            }
        }
    };
}

// ============================================================================
// Records
// ============================================================================

/// A media item as seen by the host player.
#[repr(C)]
#[derive(Debug)]
pub struct CMediaWrapper {
    pub id: i64,
    pub(crate) mrl: *mut c_char,
    /// Playback position in milliseconds
    pub time: i64,
    /// Duration in milliseconds
    pub length: i64,
    /// One of `MEDIA_TYPE_VIDEO`, `MEDIA_TYPE_AUDIO`, `MEDIA_TYPE_ALL`
    pub media_type: c_int,
    pub(crate) title: *mut c_char,
    pub(crate) filename: *mut c_char,
    pub(crate) artist: *mut c_char,
    pub(crate) genre: *mut c_char,
    pub(crate) album: *mut c_char,
    pub(crate) album_artist: *mut c_char,
    pub width: c_int,
    pub height: c_int,
    pub(crate) artwork_url: *mut c_char,
    pub audio_track: c_int,
    pub spu_track: c_int,
    pub track_number: c_int,
    pub disc_number: c_int,
    pub last_modified: i64,
    pub seen: i64,
    pub is_thumbnail_generated: bool,
    pub release_date: c_int,
}

release_strings_on_drop!(CMediaWrapper {
    mrl,
    title,
    filename,
    artist,
    genre,
    album,
    album_artist,
    artwork_url,
});

impl CMediaWrapper {
    pub fn mrl(&self) -> Option<&str> {
        borrow_str(self.mrl)
    }

    pub fn title(&self) -> Option<&str> {
        borrow_str(self.title)
    }

    pub fn filename(&self) -> Option<&str> {
        borrow_str(self.filename)
    }

    pub fn artist(&self) -> Option<&str> {
        borrow_str(self.artist)
    }

    pub fn genre(&self) -> Option<&str> {
        borrow_str(self.genre)
    }

    pub fn album(&self) -> Option<&str> {
        borrow_str(self.album)
    }

    pub fn album_artist(&self) -> Option<&str> {
        borrow_str(self.album_artist)
    }

    pub fn artwork_url(&self) -> Option<&str> {
        borrow_str(self.artwork_url)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CAlbum {
    pub id: i64,
    pub(crate) title: *mut c_char,
    pub release_year: c_int,
    pub(crate) artwork_url: *mut c_char,
    pub(crate) album_artist: *mut c_char,
    /// 0 when the album has no album artist
    pub album_artist_id: i64,
    pub nb_tracks: c_int,
    pub duration: c_int,
}

release_strings_on_drop!(CAlbum {
    title,
    artwork_url,
    album_artist
});

impl CAlbum {
    pub fn title(&self) -> Option<&str> {
        borrow_str(self.title)
    }

    pub fn artwork_url(&self) -> Option<&str> {
        borrow_str(self.artwork_url)
    }

    pub fn album_artist(&self) -> Option<&str> {
        borrow_str(self.album_artist)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CArtist {
    pub id: i64,
    pub(crate) name: *mut c_char,
    pub(crate) short_bio: *mut c_char,
    pub(crate) artwork_url: *mut c_char,
    pub(crate) music_brainz_id: *mut c_char,
}

release_strings_on_drop!(CArtist {
    name,
    short_bio,
    artwork_url,
    music_brainz_id
});

impl CArtist {
    pub fn name(&self) -> Option<&str> {
        borrow_str(self.name)
    }

    pub fn short_bio(&self) -> Option<&str> {
        borrow_str(self.short_bio)
    }

    pub fn artwork_url(&self) -> Option<&str> {
        borrow_str(self.artwork_url)
    }

    pub fn music_brainz_id(&self) -> Option<&str> {
        borrow_str(self.music_brainz_id)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CGenre {
    pub id: i64,
    pub(crate) name: *mut c_char,
}

release_strings_on_drop!(CGenre { name });

impl CGenre {
    pub fn name(&self) -> Option<&str> {
        borrow_str(self.name)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CPlaylist {
    pub id: i64,
    pub(crate) name: *mut c_char,
    pub track_count: c_int,
}

release_strings_on_drop!(CPlaylist { name });

impl CPlaylist {
    pub fn name(&self) -> Option<&str> {
        borrow_str(self.name)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CFolder {
    pub id: i64,
    pub(crate) name: *mut c_char,
    pub(crate) mrl: *mut c_char,
}

release_strings_on_drop!(CFolder { name, mrl });

impl CFolder {
    pub fn name(&self) -> Option<&str> {
        borrow_str(self.name)
    }

    pub fn mrl(&self) -> Option<&str> {
        borrow_str(self.mrl)
    }
}

#[repr(C)]
#[derive(Debug)]
pub struct CVideoGroup {
    pub(crate) name: *mut c_char,
    pub count: c_int,
}

release_strings_on_drop!(CVideoGroup { name });

impl CVideoGroup {
    pub fn name(&self) -> Option<&str> {
        borrow_str(self.name)
    }
}

// ============================================================================
// Arrays
// ============================================================================

/// Opaque fixed-size array of nullable record slots.
///
/// Bulk conversion fills one slot per source entity; a slot stays null when
/// its entity converted to nothing. See [`crate::compact`] to drop those.
#[derive(Debug)]
pub struct CRecordArray<T> {
    slots: Vec<Option<Box<T>>>,
}

impl<T> CRecordArray<T> {
    /// An array of `len` null slots.
    pub fn with_len(len: usize) -> Self {
        let mut slots = Vec::with_capacity(len);
        slots.resize_with(len, || None);
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store a record in slot `index`, releasing whatever was there.
    pub fn set(&mut self, index: usize, record: Option<Box<T>>) {
        self.slots[index] = record;
    }

    /// The record in slot `index`, or `None` for a null or out of range slot.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(|slot| slot.as_deref())
    }

    pub fn null_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Every slot in order, null ones included.
    pub fn slots(&self) -> impl Iterator<Item = Option<&T>> + '_ {
        self.slots.iter().map(|slot| slot.as_deref())
    }

    /// Non-null records in order.
    pub fn records(&self) -> impl Iterator<Item = &T> + '_ {
        self.slots.iter().filter_map(|slot| slot.as_deref())
    }

    pub(crate) fn into_slots(self) -> Vec<Option<Box<T>>> {
        self.slots
    }
}

impl<T> FromIterator<Option<Box<T>>> for CRecordArray<T> {
    fn from_iter<I: IntoIterator<Item = Option<Box<T>>>>(iter: I) -> Self {
        Self {
            slots: iter.into_iter().collect(),
        }
    }
}

/// Results of one search, one array per category.
///
/// A null array means the category was not searched; an empty array means it
/// was searched without hits.
#[repr(C)]
#[derive(Debug, Default)]
pub struct CSearchAggregate {
    pub albums: Option<Box<CRecordArray<CAlbum>>>,
    pub artists: Option<Box<CRecordArray<CArtist>>>,
    pub genres: Option<Box<CRecordArray<CGenre>>>,
    pub videos: Option<Box<CRecordArray<CMediaWrapper>>>,
    pub tracks: Option<Box<CRecordArray<CMediaWrapper>>>,
    pub playlists: Option<Box<CRecordArray<CPlaylist>>>,
}
