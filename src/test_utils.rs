//! Test fixtures: in-memory native objects with public fields.
//!
//! Customize with struct update syntax:
//!
//! ```ignore
//! let media = MockMedia {
//!     title: "Custom Title".to_string(),
//!     ..mock_media()
//! };
//! ```

use crate::library::*;
use crate::{Error, Result};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    DeviceRemoved,
    Library,
}

#[derive(Debug, Clone, Default)]
pub struct MockFile {
    pub mrl: String,
    pub last_modified: i64,
    pub failure: Option<MockFailure>,
}

impl MediaFile for MockFile {
    fn mrl(&self) -> Result<String> {
        match self.failure {
            Some(MockFailure::DeviceRemoved) => Err(Error::device_removed("/mnt/usb0")),
            Some(MockFailure::Library) => Err(Error::library("file table is corrupted")),
            None => Ok(self.mrl.clone()),
        }
    }

    fn last_modification_date(&self) -> i64 {
        self.last_modified
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockArtist {
    pub id: i64,
    pub name: String,
    pub short_bio: String,
    pub thumbnail: String,
    pub music_brainz_id: String,
}

impl Artist for MockArtist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn short_bio(&self) -> &str {
        &self.short_bio
    }

    fn thumbnail_mrl(&self, _size: ThumbnailSizeType) -> String {
        self.thumbnail.clone()
    }

    fn music_brainz_id(&self) -> &str {
        &self.music_brainz_id
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockGenre {
    pub id: i64,
    pub name: String,
}

impl Genre for MockGenre {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAlbum {
    pub id: i64,
    pub title: String,
    pub release_year: u32,
    pub thumbnail: String,
    pub album_artist: Option<MockArtist>,
    pub nb_tracks: u32,
    pub duration: i64,
}

impl Album for MockAlbum {
    fn id(&self) -> i64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn release_year(&self) -> u32 {
        self.release_year
    }

    fn thumbnail_mrl(&self, _size: ThumbnailSizeType) -> String {
        self.thumbnail.clone()
    }

    fn album_artist(&self) -> Option<ArtistPtr> {
        self.album_artist
            .clone()
            .map(|artist| Arc::new(artist) as ArtistPtr)
    }

    fn nb_tracks(&self) -> u32 {
        self.nb_tracks
    }

    fn duration(&self) -> i64 {
        self.duration
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockAlbumTrack {
    pub artist: Option<MockArtist>,
    pub genre: Option<MockGenre>,
    pub album: Option<MockAlbum>,
    pub track_number: u32,
    pub disc_number: u32,
}

impl AlbumTrack for MockAlbumTrack {
    fn artist(&self) -> Option<ArtistPtr> {
        self.artist.clone().map(|a| Arc::new(a) as ArtistPtr)
    }

    fn genre(&self) -> Option<GenrePtr> {
        self.genre.clone().map(|g| Arc::new(g) as GenrePtr)
    }

    fn album(&self) -> Option<AlbumPtr> {
        self.album.clone().map(|a| Arc::new(a) as AlbumPtr)
    }

    fn track_number(&self) -> u32 {
        self.track_number
    }

    fn disc_number(&self) -> u32 {
        self.disc_number
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockMedia {
    pub id: i64,
    pub media_type: MediaType,
    pub sub_type: MediaSubType,
    pub title: String,
    pub file_name: String,
    pub files: Vec<MockFile>,
    pub album_track: Option<MockAlbumTrack>,
    pub audio_track: Option<i64>,
    pub subtitle_track: Option<i64>,
    pub progress: Option<i64>,
    pub seen: Option<i64>,
    pub thumbnail: String,
    pub thumbnail_status: ThumbnailStatus,
    pub video_tracks: Vec<VideoTrack>,
    pub duration: i64,
    pub release_date: u32,
}

impl Media for MockMedia {
    fn id(&self) -> i64 {
        self.id
    }

    fn media_type(&self) -> MediaType {
        self.media_type
    }

    fn sub_type(&self) -> MediaSubType {
        self.sub_type
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn files(&self) -> Vec<FilePtr> {
        self.files
            .iter()
            .cloned()
            .map(|f| Arc::new(f) as FilePtr)
            .collect()
    }

    fn album_track(&self) -> Option<AlbumTrackPtr> {
        self.album_track
            .clone()
            .map(|t| Arc::new(t) as AlbumTrackPtr)
    }

    fn metadata(&self, kind: MetadataType) -> Metadata {
        let value = match kind {
            MetadataType::AudioTrack => self.audio_track,
            MetadataType::SubtitleTrack => self.subtitle_track,
            MetadataType::Progress => self.progress,
            MetadataType::Seen => self.seen,
        };
        Metadata::from(value)
    }

    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String {
        match size {
            ThumbnailSizeType::Thumbnail => self.thumbnail.clone(),
            ThumbnailSizeType::Banner => String::new(),
        }
    }

    fn thumbnail_status(&self, size: ThumbnailSizeType) -> ThumbnailStatus {
        match size {
            ThumbnailSizeType::Thumbnail => self.thumbnail_status,
            ThumbnailSizeType::Banner => ThumbnailStatus::Missing,
        }
    }

    fn video_tracks(&self) -> Vec<VideoTrack> {
        self.video_tracks.clone()
    }

    fn duration(&self) -> i64 {
        self.duration
    }

    fn release_date(&self) -> u32 {
        self.release_date
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockPlaylist {
    pub id: i64,
    pub name: String,
    pub media_count: u32,
}

impl Playlist for MockPlaylist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn media_count(&self) -> u32 {
        self.media_count
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockFolder {
    pub id: i64,
    pub name: String,
    pub mrl: String,
    pub failure: Option<MockFailure>,
}

impl Folder for MockFolder {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mrl(&self) -> Result<String> {
        match self.failure {
            Some(MockFailure::DeviceRemoved) => Err(Error::device_removed("/mnt/sd1")),
            Some(MockFailure::Library) => Err(Error::library("folder vanished")),
            None => Ok(self.mrl.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockVideoGroup {
    pub name: String,
    pub count: u32,
}

impl VideoGroup for MockVideoGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> u32 {
        self.count
    }
}

/// A file on a mounted device.
pub fn mock_file(mrl: &str) -> MockFile {
    MockFile {
        mrl: mrl.to_string(),
        last_modified: 1_600_000_000,
        failure: None,
    }
}

/// A plain video with one file and nothing optional set.
pub fn mock_media() -> MockMedia {
    MockMedia {
        id: 1,
        media_type: MediaType::Video,
        sub_type: MediaSubType::Unknown,
        title: "Test Video".to_string(),
        file_name: "test_video.mkv".to_string(),
        files: vec![mock_file("file:///sdcard/Movies/test_video.mkv")],
        duration: 60_000,
        ..Default::default()
    }
}

/// A music track with artist, genre and album (with album artist).
pub fn mock_track() -> MockMedia {
    let artist = MockArtist {
        id: 10,
        name: "Test Artist".to_string(),
        ..Default::default()
    };
    MockMedia {
        id: 2,
        media_type: MediaType::Audio,
        sub_type: MediaSubType::AlbumTrack,
        title: "Test Track".to_string(),
        file_name: "01 - test_track.flac".to_string(),
        files: vec![mock_file("file:///sdcard/Music/01 - test_track.flac")],
        album_track: Some(MockAlbumTrack {
            artist: Some(artist.clone()),
            genre: Some(MockGenre {
                id: 20,
                name: "Test Genre".to_string(),
            }),
            album: Some(MockAlbum {
                id: 30,
                title: "Test Album".to_string(),
                album_artist: Some(artist),
                nb_tracks: 12,
                ..Default::default()
            }),
            track_number: 1,
            disc_number: 1,
        }),
        duration: 180_000,
        ..Default::default()
    }
}

pub fn mock_album() -> MockAlbum {
    MockAlbum {
        id: 30,
        title: "Test Album".to_string(),
        release_year: 1999,
        thumbnail: "file:///thumbs/album30.jpg".to_string(),
        album_artist: Some(MockArtist {
            id: 10,
            name: "Test Artist".to_string(),
            ..Default::default()
        }),
        nb_tracks: 12,
        duration: 2_700_000,
    }
}

pub fn mock_artist() -> MockArtist {
    MockArtist {
        id: 10,
        name: "Test Artist".to_string(),
        short_bio: "Formed in a garage.".to_string(),
        thumbnail: "file:///thumbs/artist10.jpg".to_string(),
        music_brainz_id: "5b11f4ce-a62d-471e-81fc-a69a8278c7da".to_string(),
    }
}

pub fn media_ptr(media: MockMedia) -> MediaPtr {
    Arc::new(media)
}
