//! An in-memory media library loaded from a JSON snapshot.
//!
//! The snapshot is a complete object graph: flat entity lists whose relations
//! point at other entities by id. Loading resolves every relation once, so
//! the resulting [`SnapshotLibrary`] hands out the same shared handles a
//! binding to a live library would.
//!
//! # Format
//!
//! ```json
//! {
//!   "artists": [{ "id": 1, "name": "Nina Simone" }],
//!   "genres": [{ "id": 1, "name": "Jazz" }],
//!   "albums": [{ "id": 1, "title": "Pastel Blues", "album_artist": 1 }],
//!   "media": [{
//!     "id": 1, "type": "audio", "sub_type": "album_track",
//!     "title": "Sinnerman",
//!     "files": [{ "mrl": "file:///music/sinnerman.flac",
//!                 "last_modified": "2021-03-04T10:00:00Z" }],
//!     "album_track": { "artist": 1, "genre": 1, "album": 1, "track_number": 9 }
//!   }],
//!   "playlists": [{ "id": 1, "name": "Favourites", "media": [1] }],
//!   "folders": [{ "id": 1, "name": "music", "mrl": "file:///music/" }],
//!   "video_groups": [{ "name": "Holidays", "media": [] }]
//! }
//! ```
//!
//! A file or folder with `"device_present": false` lives on a device that is
//! not mounted; resolving its MRL fails with [`Error::DeviceRemoved`].

use crate::library::*;
use crate::{Error, Result};
use bitflags::bitflags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

bitflags! {
    /// Entity categories a search looks into.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SearchCategories: u32 {
        const ALBUMS = 1 << 0;
        const ARTISTS = 1 << 1;
        const GENRES = 1 << 2;
        const PLAYLISTS = 1 << 3;
        const MEDIA = 1 << 4;
    }
}

impl Default for SearchCategories {
    fn default() -> Self {
        Self::all()
    }
}

// ============================================================================
// Snapshot Document
// ============================================================================

fn present() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub artists: Vec<ArtistEntry>,
    pub genres: Vec<GenreEntry>,
    pub albums: Vec<AlbumEntry>,
    pub media: Vec<MediaEntry>,
    pub playlists: Vec<PlaylistEntry>,
    pub folders: Vec<FolderEntry>,
    pub video_groups: Vec<VideoGroupEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub short_bio: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub music_brainz_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumEntry {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub release_year: u32,
    #[serde(default)]
    pub thumbnail: String,
    /// Artist id
    #[serde(default)]
    pub album_artist: Option<i64>,
    #[serde(default)]
    pub nb_tracks: u32,
    #[serde(default)]
    pub duration: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub mrl: String,
    pub last_modified: DateTime<Utc>,
    #[serde(default = "present")]
    pub device_present: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumTrackEntry {
    pub artist: Option<i64>,
    pub genre: Option<i64>,
    pub album: Option<i64>,
    pub track_number: u32,
    pub disc_number: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThumbnailEntry {
    pub mrl: String,
    #[serde(default)]
    pub status: ThumbnailStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaEntry {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub media_type: MediaType,
    #[serde(default)]
    pub sub_type: MediaSubType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub album_track: Option<AlbumTrackEntry>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub seen: Option<i64>,
    #[serde(default)]
    pub audio_track: Option<i64>,
    #[serde(default)]
    pub subtitle_track: Option<i64>,
    #[serde(default)]
    pub thumbnails: HashMap<ThumbnailSizeType, ThumbnailEntry>,
    #[serde(default)]
    pub video_tracks: Vec<VideoTrack>,
    /// Milliseconds
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub release_date: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub id: i64,
    pub name: String,
    /// Media ids, in playlist order
    #[serde(default)]
    pub media: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: i64,
    pub name: String,
    pub mrl: String,
    #[serde(default = "present")]
    pub device_present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoGroupEntry {
    pub name: String,
    #[serde(default)]
    pub media: Vec<i64>,
}

// ============================================================================
// Native Object Implementations
// ============================================================================

impl MediaFile for FileEntry {
    fn mrl(&self) -> Result<String> {
        if self.device_present {
            Ok(self.mrl.clone())
        } else {
            Err(Error::device_removed(&self.mrl))
        }
    }

    fn last_modification_date(&self) -> i64 {
        self.last_modified.timestamp()
    }
}

impl Artist for ArtistEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn short_bio(&self) -> &str {
        &self.short_bio
    }

    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String {
        match size {
            ThumbnailSizeType::Thumbnail => self.thumbnail.clone(),
            ThumbnailSizeType::Banner => String::new(),
        }
    }

    fn music_brainz_id(&self) -> &str {
        &self.music_brainz_id
    }
}

impl Genre for GenreEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Folder for FolderEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn mrl(&self) -> Result<String> {
        if self.device_present {
            Ok(self.mrl.clone())
        } else {
            Err(Error::device_removed(&self.mrl))
        }
    }
}

impl VideoGroup for VideoGroupEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn count(&self) -> u32 {
        self.media.len() as u32
    }
}

impl Playlist for PlaylistEntry {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn media_count(&self) -> u32 {
        self.media.len() as u32
    }
}

struct LoadedAlbum {
    entry: AlbumEntry,
    album_artist: Option<ArtistPtr>,
}

impl Album for LoadedAlbum {
    fn id(&self) -> i64 {
        self.entry.id
    }

    fn title(&self) -> &str {
        &self.entry.title
    }

    fn release_year(&self) -> u32 {
        self.entry.release_year
    }

    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String {
        match size {
            ThumbnailSizeType::Thumbnail => self.entry.thumbnail.clone(),
            ThumbnailSizeType::Banner => String::new(),
        }
    }

    fn album_artist(&self) -> Option<ArtistPtr> {
        self.album_artist.clone()
    }

    fn nb_tracks(&self) -> u32 {
        self.entry.nb_tracks
    }

    fn duration(&self) -> i64 {
        self.entry.duration
    }
}

struct LoadedAlbumTrack {
    artist: Option<ArtistPtr>,
    genre: Option<GenrePtr>,
    album: Option<AlbumPtr>,
    track_number: u32,
    disc_number: u32,
}

impl AlbumTrack for LoadedAlbumTrack {
    fn artist(&self) -> Option<ArtistPtr> {
        self.artist.clone()
    }

    fn genre(&self) -> Option<GenrePtr> {
        self.genre.clone()
    }

    fn album(&self) -> Option<AlbumPtr> {
        self.album.clone()
    }

    fn track_number(&self) -> u32 {
        self.track_number
    }

    fn disc_number(&self) -> u32 {
        self.disc_number
    }
}

struct LoadedMedia {
    entry: MediaEntry,
    files: Vec<FilePtr>,
    album_track: Option<AlbumTrackPtr>,
}

impl Media for LoadedMedia {
    fn id(&self) -> i64 {
        self.entry.id
    }

    fn media_type(&self) -> MediaType {
        self.entry.media_type
    }

    fn sub_type(&self) -> MediaSubType {
        self.entry.sub_type
    }

    fn title(&self) -> &str {
        &self.entry.title
    }

    fn file_name(&self) -> &str {
        &self.entry.file_name
    }

    fn files(&self) -> Vec<FilePtr> {
        self.files.clone()
    }

    fn album_track(&self) -> Option<AlbumTrackPtr> {
        self.album_track.clone()
    }

    fn metadata(&self, kind: MetadataType) -> Metadata {
        let value = match kind {
            MetadataType::AudioTrack => self.entry.audio_track,
            MetadataType::SubtitleTrack => self.entry.subtitle_track,
            MetadataType::Progress => self.entry.progress,
            MetadataType::Seen => self.entry.seen,
        };
        Metadata::from(value)
    }

    fn thumbnail_mrl(&self, size: ThumbnailSizeType) -> String {
        self.entry
            .thumbnails
            .get(&size)
            .map(|t| t.mrl.clone())
            .unwrap_or_default()
    }

    fn thumbnail_status(&self, size: ThumbnailSizeType) -> ThumbnailStatus {
        self.entry
            .thumbnails
            .get(&size)
            .map(|t| t.status)
            .unwrap_or_default()
    }

    fn video_tracks(&self) -> Vec<VideoTrack> {
        self.entry.video_tracks.clone()
    }

    fn duration(&self) -> i64 {
        self.entry.duration
    }

    fn release_date(&self) -> u32 {
        self.entry.release_date
    }
}

// ============================================================================
// Library
// ============================================================================

/// A fully resolved media library.
pub struct SnapshotLibrary {
    artists: Vec<ArtistPtr>,
    genres: Vec<GenrePtr>,
    albums: Vec<AlbumPtr>,
    media: Vec<MediaPtr>,
    playlists: Vec<PlaylistPtr>,
    folders: Vec<FolderPtr>,
    video_groups: Vec<VideoGroupPtr>,
    media_index: HashMap<i64, usize>,
}

impl std::fmt::Debug for SnapshotLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotLibrary")
            .field("artists", &self.artists.len())
            .field("genres", &self.genres.len())
            .field("albums", &self.albums.len())
            .field("media", &self.media.len())
            .field("playlists", &self.playlists.len())
            .field("folders", &self.folders.len())
            .field("video_groups", &self.video_groups.len())
            .finish()
    }
}

/// Index a list by id, rejecting duplicates.
fn index_by_id<T: Clone>(kind: &str, items: &[(i64, T)]) -> Result<HashMap<i64, T>> {
    let mut index = HashMap::with_capacity(items.len());
    for (id, item) in items {
        if index.insert(*id, item.clone()).is_some() {
            return Err(Error::snapshot(format!("duplicate {kind} id {id}")));
        }
    }
    Ok(index)
}

fn resolve<T: Clone>(
    index: &HashMap<i64, T>,
    id: Option<i64>,
    owner: &str,
    kind: &str,
) -> Result<Option<T>> {
    match id {
        None => Ok(None),
        Some(id) => index
            .get(&id)
            .cloned()
            .map(Some)
            .ok_or_else(|| Error::snapshot(format!("{owner} references unknown {kind} {id}"))),
    }
}

impl SnapshotLibrary {
    /// Load a snapshot file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let library = Self::from_json(&content)?;
        tracing::info!(path = %path.display(), ?library, "Loaded media library snapshot");
        Ok(library)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }

    /// Resolve every relation of `snapshot`.
    ///
    /// Fails on duplicate ids within an entity kind and on relations pointing
    /// at an id that does not exist.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let artists: Vec<(i64, ArtistPtr)> = snapshot
            .artists
            .into_iter()
            .map(|a| (a.id, Arc::new(a) as ArtistPtr))
            .collect();
        let artist_index = index_by_id("artist", &artists)?;

        let genres: Vec<(i64, GenrePtr)> = snapshot
            .genres
            .into_iter()
            .map(|g| (g.id, Arc::new(g) as GenrePtr))
            .collect();
        let genre_index = index_by_id("genre", &genres)?;

        let mut albums: Vec<(i64, AlbumPtr)> = Vec::with_capacity(snapshot.albums.len());
        for entry in snapshot.albums {
            let owner = format!("album {}", entry.id);
            let album_artist = resolve(&artist_index, entry.album_artist, &owner, "artist")?;
            albums.push((entry.id, Arc::new(LoadedAlbum { entry, album_artist }) as AlbumPtr));
        }
        let album_index = index_by_id("album", &albums)?;

        let mut media: Vec<(i64, MediaPtr)> = Vec::with_capacity(snapshot.media.len());
        for mut entry in snapshot.media {
            let owner = format!("media {}", entry.id);
            let album_track = match entry.album_track.take() {
                None => None,
                Some(track) => Some(Arc::new(LoadedAlbumTrack {
                    artist: resolve(&artist_index, track.artist, &owner, "artist")?,
                    genre: resolve(&genre_index, track.genre, &owner, "genre")?,
                    album: resolve(&album_index, track.album, &owner, "album")?,
                    track_number: track.track_number,
                    disc_number: track.disc_number,
                }) as AlbumTrackPtr),
            };
            let files = std::mem::take(&mut entry.files)
                .into_iter()
                .map(|f| Arc::new(f) as FilePtr)
                .collect();
            media.push((
                entry.id,
                Arc::new(LoadedMedia {
                    entry,
                    files,
                    album_track,
                }) as MediaPtr,
            ));
        }
        let media_positions: Vec<(i64, usize)> = media
            .iter()
            .enumerate()
            .map(|(position, (id, _))| (*id, position))
            .collect();
        let media_index = index_by_id("media", &media_positions)?;

        let known_media: HashSet<i64> = media_index.keys().copied().collect();
        for playlist in &snapshot.playlists {
            check_members(&known_media, &playlist.media, &format!("playlist {}", playlist.id))?;
        }
        for group in &snapshot.video_groups {
            check_members(&known_media, &group.media, &format!("video group {:?}", group.name))?;
        }

        let playlists: Vec<(i64, PlaylistPtr)> = snapshot
            .playlists
            .into_iter()
            .map(|p| (p.id, Arc::new(p) as PlaylistPtr))
            .collect();
        index_by_id("playlist", &playlists)?;

        let folders: Vec<(i64, FolderPtr)> = snapshot
            .folders
            .into_iter()
            .map(|f| (f.id, Arc::new(f) as FolderPtr))
            .collect();
        index_by_id("folder", &folders)?;

        Ok(Self {
            artists: artists.into_iter().map(|(_, a)| a).collect(),
            genres: genres.into_iter().map(|(_, g)| g).collect(),
            albums: albums.into_iter().map(|(_, a)| a).collect(),
            media: media.into_iter().map(|(_, m)| m).collect(),
            playlists: playlists.into_iter().map(|(_, p)| p).collect(),
            folders: folders.into_iter().map(|(_, f)| f).collect(),
            video_groups: snapshot
                .video_groups
                .into_iter()
                .map(|g| Arc::new(g) as VideoGroupPtr)
                .collect(),
            media_index,
        })
    }

    /// Look a media up by id.
    pub fn media(&self, id: i64) -> Option<MediaPtr> {
        self.media_index.get(&id).map(|&i| self.media[i].clone())
    }

    pub fn all_media(&self) -> &[MediaPtr] {
        &self.media
    }

    pub fn albums(&self) -> &[AlbumPtr] {
        &self.albums
    }

    pub fn artists(&self) -> &[ArtistPtr] {
        &self.artists
    }

    pub fn genres(&self) -> &[GenrePtr] {
        &self.genres
    }

    pub fn playlists(&self) -> &[PlaylistPtr] {
        &self.playlists
    }

    pub fn folders(&self) -> &[FolderPtr] {
        &self.folders
    }

    pub fn video_groups(&self) -> &[VideoGroupPtr] {
        &self.video_groups
    }

    /// Case-insensitive substring search.
    ///
    /// Categories left out of `categories` come back as `None`.
    pub fn search(&self, pattern: &str, categories: SearchCategories) -> Result<SearchAggregate> {
        let query = pattern.trim().to_lowercase();
        if query.is_empty() {
            return Err(Error::InvalidPattern(pattern.to_string()));
        }
        let matches = |text: &str| text.to_lowercase().contains(&query);

        let aggregate = SearchAggregate {
            albums: categories.contains(SearchCategories::ALBUMS).then(|| {
                self.albums.iter().filter(|a| matches(a.title())).cloned().collect()
            }),
            artists: categories.contains(SearchCategories::ARTISTS).then(|| {
                self.artists.iter().filter(|a| matches(a.name())).cloned().collect()
            }),
            genres: categories.contains(SearchCategories::GENRES).then(|| {
                self.genres.iter().filter(|g| matches(g.name())).cloned().collect()
            }),
            playlists: categories.contains(SearchCategories::PLAYLISTS).then(|| {
                self.playlists.iter().filter(|p| matches(p.name())).cloned().collect()
            }),
            media: categories.contains(SearchCategories::MEDIA).then(|| {
                self.media.iter().filter(|m| matches(m.title())).cloned().collect()
            }),
        };
        tracing::debug!(pattern, ?categories, ?aggregate, "Searched snapshot library");
        Ok(aggregate)
    }
}

fn check_members(known: &HashSet<i64>, members: &[i64], owner: &str) -> Result<()> {
    match members.iter().find(|id| !known.contains(id)) {
        Some(id) => Err(Error::snapshot(format!("{owner} references unknown media {id}"))),
        None => Ok(()),
    }
}
