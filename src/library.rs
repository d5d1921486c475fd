//! Read-only view of the wrapped media library.
//!
//! The bridge never owns domain objects. Everything it converts is reached
//! through the traits in this module, which a binding to the native library
//! implements (the crate ships one such binding, [`crate::snapshot`]).
//! Objects are shared handles (`Arc<dyn Trait>`), borrowed for the duration
//! of a single conversion call.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub type MediaPtr = Arc<dyn Media>;
pub type FilePtr = Arc<dyn MediaFile>;
pub type AlbumTrackPtr = Arc<dyn AlbumTrack>;
pub type AlbumPtr = Arc<dyn Album>;
pub type ArtistPtr = Arc<dyn Artist>;
pub type GenrePtr = Arc<dyn Genre>;
pub type PlaylistPtr = Arc<dyn Playlist>;
pub type FolderPtr = Arc<dyn Folder>;
pub type VideoGroupPtr = Arc<dyn VideoGroup>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    #[default]
    Unknown,
    Video,
    Audio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSubType {
    #[default]
    Unknown,
    ShowEpisode,
    Movie,
    AlbumTrack,
}

/// Keys accepted by [`Media::metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataType {
    AudioTrack,
    SubtitleTrack,
    Progress,
    Seen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailSizeType {
    #[default]
    Thumbnail,
    Banner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailStatus {
    #[default]
    Missing,
    Available,
    Failure,
    PersistentFailure,
    Crash,
}

/// A metadata slot of a media: either unset or holding an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metadata(Option<i64>);

impl Metadata {
    pub fn unset() -> Self {
        Self(None)
    }

    pub fn new(value: i64) -> Self {
        Self(Some(value))
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_int(&self) -> Option<i64> {
        self.0
    }
}

impl From<Option<i64>> for Metadata {
    fn from(value: Option<i64>) -> Self {
        Self(value)
    }
}

/// Dimensions of one video stream of a media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoTrack {
    pub width: u32,
    pub height: u32,
}

/// A file backing a media. The first file of a media is its canonical one.
pub trait MediaFile {
    /// Resolve the file's MRL.
    ///
    /// Fails with [`crate::Error::DeviceRemoved`] when the device holding the
    /// file is not available.
    fn mrl(&self) -> Result<String>;

    /// Last modification date, in seconds since the Unix epoch.
    fn last_modification_date(&self) -> i64;
}

pub trait Media {
    fn id(&self) -> i64;
    fn media_type(&self) -> MediaType;
    fn sub_type(&self) -> MediaSubType;
    /// Empty when the media has no title.
    fn title(&self) -> &str;
    /// Empty when the media has no file name.
    fn file_name(&self) -> &str;
    fn files(&self) -> Vec<FilePtr>;
    /// Present for media classified as music tracks.
    fn album_track(&self) -> Option<AlbumTrackPtr>;
    fn metadata(&self, kind: MetadataType) -> Metadata;
    /// Empty when no thumbnail is known for this size.
    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String;
    fn thumbnail_status(&self, size: ThumbnailSizeType) -> ThumbnailStatus;
    fn video_tracks(&self) -> Vec<VideoTrack>;
    /// Duration in milliseconds.
    fn duration(&self) -> i64;
    fn release_date(&self) -> u32;
}

/// Relation between a music track and the album it belongs to.
pub trait AlbumTrack {
    fn artist(&self) -> Option<ArtistPtr>;
    fn genre(&self) -> Option<GenrePtr>;
    fn album(&self) -> Option<AlbumPtr>;
    fn track_number(&self) -> u32;
    fn disc_number(&self) -> u32;
}

pub trait Album {
    fn id(&self) -> i64;
    fn title(&self) -> &str;
    fn release_year(&self) -> u32;
    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String;
    fn album_artist(&self) -> Option<ArtistPtr>;
    fn nb_tracks(&self) -> u32;
    /// Total duration of the album's tracks, in milliseconds.
    fn duration(&self) -> i64;
}

pub trait Artist {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn short_bio(&self) -> &str;
    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String;
    fn music_brainz_id(&self) -> &str;
}

pub trait Genre {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

pub trait Playlist {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn media_count(&self) -> u32;
}

pub trait Folder {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn mrl(&self) -> Result<String>;
}

pub trait VideoGroup {
    fn name(&self) -> &str;
    fn count(&self) -> u32;
}

/// Results of one search. A `None` collection was not searched, which is
/// different from a searched collection with no hits.
#[derive(Clone, Default)]
pub struct SearchAggregate {
    pub albums: Option<Vec<AlbumPtr>>,
    pub artists: Option<Vec<ArtistPtr>>,
    pub genres: Option<Vec<GenrePtr>>,
    pub playlists: Option<Vec<PlaylistPtr>>,
    pub media: Option<Vec<MediaPtr>>,
}

impl fmt::Debug for SearchAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchAggregate")
            .field("albums", &self.albums.as_ref().map(Vec::len))
            .field("artists", &self.artists.as_ref().map(Vec::len))
            .field("genres", &self.genres.as_ref().map(Vec::len))
            .field("playlists", &self.playlists.as_ref().map(Vec::len))
            .field("media", &self.media.as_ref().map(Vec::len))
            .finish()
    }
}
