//! Entity converters: native library objects to host records.
//!
//! Each converter reads accessors of a borrowed native object and builds one
//! record. Strings are staged as [`HostString`]s and only handed to the record
//! once it is complete, so every early return releases what was created.
//!
//! - `convert_media()` - Media to `CMediaWrapper`, or `None` when the media
//!   has no file or its device is gone
//! - `convert_album()`, `convert_artist()`, `convert_genre()`,
//!   `convert_playlist()`, `convert_folder()`, `convert_video_group()`
//! - `convert_*_list()` - Bulk conversion into a [`CRecordArray`]

use crate::compact::filtered_array;
use crate::library::*;
use crate::records::*;
use crate::Result;
use std::os::raw::c_int;

/// Map a native media type onto the host's type codes.
pub fn media_type_code(media_type: MediaType) -> c_int {
    match media_type {
        MediaType::Video => MEDIA_TYPE_VIDEO,
        MediaType::Audio => MEDIA_TYPE_AUDIO,
        MediaType::Unknown => MEDIA_TYPE_ALL,
    }
}

/// Convert a stored progress value into a playback time.
///
/// Older libraries stored progress as a percentage. Anything below 100 other
/// than 0 is treated as one and rescaled against the duration; other values
/// are already a time and pass through.
pub fn rescale_legacy_progress(progress: i64, duration: i64) -> i64 {
    if progress != 0 && progress < 100 {
        (duration as f64 * (progress as f64 / 100.0)) as i64
    } else {
        progress
    }
}

fn track_index(meta: Metadata) -> c_int {
    meta.as_int()
        .map(|index| index as c_int)
        .unwrap_or(UNSET_TRACK_INDEX)
}

/// Convert a media into a `CMediaWrapper`.
///
/// Returns `Ok(None)` when the media has no file, or when the device holding
/// its first file was removed. Other native errors are returned as is.
pub fn convert_media(media: &dyn Media) -> Result<Option<Box<CMediaWrapper>>> {
    let files = media.files();
    let Some(canonical) = files.first() else {
        tracing::debug!(media_id = media.id(), "Media has no file, skipping");
        return Ok(None);
    };
    let mrl = match canonical.mrl() {
        Ok(mrl) => HostString::new(&mrl),
        Err(e) if e.is_device_removed() => {
            tracing::debug!(media_id = media.id(), error = %e, "Media is on a removed device, skipping");
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let mut artist = HostString::absent();
    let mut genre = HostString::absent();
    let mut album = HostString::absent();
    let mut album_artist = HostString::absent();
    let mut track_number = 0;
    let mut disc_number = 0;
    if let Some(album_track) = media.album_track() {
        if let Some(a) = album_track.artist() {
            artist = HostString::new(a.name());
        }
        if let Some(g) = album_track.genre() {
            genre = HostString::new(g.name());
        }
        if let Some(al) = album_track.album() {
            album = HostString::new(al.title());
            if let Some(aa) = al.album_artist() {
                album_artist = HostString::new(aa.name());
            }
        }
        track_number = album_track.track_number() as c_int;
        disc_number = album_track.disc_number() as c_int;
    }

    let audio_track = track_index(media.metadata(MetadataType::AudioTrack));
    let spu_track = track_index(media.metadata(MetadataType::SubtitleTrack));
    let title = HostString::non_empty(media.title());
    let filename = HostString::non_empty(media.file_name());
    let thumbnail = HostString::non_empty(&media.thumbnail_mrl(ThumbnailSizeType::Thumbnail));

    let (width, height) = media
        .video_tracks()
        .first()
        .map(|track| (track.width as c_int, track.height as c_int))
        .unwrap_or((0, 0));

    let duration = media.duration();
    let progress = media.metadata(MetadataType::Progress).as_int().unwrap_or(0);
    let time = rescale_legacy_progress(progress, duration);
    let seen = media.metadata(MetadataType::Seen).as_int().unwrap_or(0);
    let has_thumbnail =
        media.thumbnail_status(ThumbnailSizeType::Thumbnail) == ThumbnailStatus::Available;

    Ok(Some(Box::new(CMediaWrapper {
        id: media.id(),
        mrl: mrl.into_raw(),
        time,
        length: duration,
        media_type: media_type_code(media.media_type()),
        title: title.into_raw(),
        filename: filename.into_raw(),
        artist: artist.into_raw(),
        genre: genre.into_raw(),
        album: album.into_raw(),
        album_artist: album_artist.into_raw(),
        width,
        height,
        artwork_url: thumbnail.into_raw(),
        audio_track,
        spu_track,
        track_number,
        disc_number,
        last_modified: canonical.last_modification_date(),
        seen,
        is_thumbnail_generated: has_thumbnail,
        release_date: media.release_date() as c_int,
    })))
}

pub fn convert_album(album: &dyn Album) -> Box<CAlbum> {
    let title = HostString::new(album.title());
    let thumbnail = HostString::non_empty(&album.thumbnail_mrl(ThumbnailSizeType::Thumbnail));
    let artist = album.album_artist();
    let album_artist_id = artist.as_ref().map(|a| a.id()).unwrap_or(0);
    let artist_name = artist
        .as_ref()
        .map(|a| HostString::new(a.name()))
        .unwrap_or_default();

    Box::new(CAlbum {
        id: album.id(),
        title: title.into_raw(),
        release_year: album.release_year() as c_int,
        artwork_url: thumbnail.into_raw(),
        album_artist: artist_name.into_raw(),
        album_artist_id,
        nb_tracks: album.nb_tracks() as c_int,
        duration: album.duration() as c_int,
    })
}

pub fn convert_artist(artist: &dyn Artist) -> Box<CArtist> {
    Box::new(CArtist {
        id: artist.id(),
        name: HostString::new(artist.name()).into_raw(),
        short_bio: HostString::new(artist.short_bio()).into_raw(),
        artwork_url: HostString::non_empty(&artist.thumbnail_mrl(ThumbnailSizeType::Thumbnail))
            .into_raw(),
        music_brainz_id: HostString::new(artist.music_brainz_id()).into_raw(),
    })
}

pub fn convert_genre(genre: &dyn Genre) -> Box<CGenre> {
    Box::new(CGenre {
        id: genre.id(),
        name: HostString::new(genre.name()).into_raw(),
    })
}

pub fn convert_playlist(playlist: &dyn Playlist) -> Box<CPlaylist> {
    Box::new(CPlaylist {
        id: playlist.id(),
        name: HostString::new(playlist.name()).into_raw(),
        track_count: playlist.media_count() as c_int,
    })
}

/// Convert a folder. Unlike media, a folder whose MRL cannot be resolved is
/// an error, device removal included.
pub fn convert_folder(folder: &dyn Folder) -> Result<Box<CFolder>> {
    let name = HostString::new(folder.name());
    let mrl = HostString::new(&folder.mrl()?);
    Ok(Box::new(CFolder {
        id: folder.id(),
        name: name.into_raw(),
        mrl: mrl.into_raw(),
    }))
}

pub fn convert_video_group(group: &dyn VideoGroup) -> Box<CVideoGroup> {
    Box::new(CVideoGroup {
        name: HostString::new(group.name()).into_raw(),
        count: group.count() as c_int,
    })
}

// ============================================================================
// Bulk Conversion
// ============================================================================

/// Convert a list of media, one slot per media, without compaction.
///
/// Returns the array and the number of media that converted to nothing.
pub fn map_media(media: &[MediaPtr]) -> Result<(Box<CRecordArray<CMediaWrapper>>, usize)> {
    let mut array = Box::new(CRecordArray::with_len(media.len()));
    let mut misses = 0;
    for (index, m) in media.iter().enumerate() {
        let record = convert_media(m.as_ref())?;
        if record.is_none() {
            misses += 1;
        }
        array.set(index, record);
    }
    Ok((array, misses))
}

/// Convert a list of media, dropping the ones that converted to nothing.
pub fn convert_media_list(media: &[MediaPtr]) -> Result<Box<CRecordArray<CMediaWrapper>>> {
    let (array, misses) = map_media(media)?;
    tracing::trace!(total = media.len(), skipped = misses, "Converted media list");
    Ok(filtered_array(array, Some(misses)))
}

pub fn convert_album_list(albums: &[AlbumPtr]) -> Box<CRecordArray<CAlbum>> {
    Box::new(albums.iter().map(|a| Some(convert_album(a.as_ref()))).collect())
}

pub fn convert_artist_list(artists: &[ArtistPtr]) -> Box<CRecordArray<CArtist>> {
    Box::new(artists.iter().map(|a| Some(convert_artist(a.as_ref()))).collect())
}

pub fn convert_genre_list(genres: &[GenrePtr]) -> Box<CRecordArray<CGenre>> {
    Box::new(genres.iter().map(|g| Some(convert_genre(g.as_ref()))).collect())
}

pub fn convert_playlist_list(playlists: &[PlaylistPtr]) -> Box<CRecordArray<CPlaylist>> {
    Box::new(
        playlists
            .iter()
            .map(|p| Some(convert_playlist(p.as_ref())))
            .collect(),
    )
}

pub fn convert_folder_list(folders: &[FolderPtr]) -> Result<Box<CRecordArray<CFolder>>> {
    let array = folders
        .iter()
        .map(|f| convert_folder(f.as_ref()).map(Some))
        .collect::<Result<CRecordArray<_>>>()?;
    Ok(Box::new(array))
}

pub fn convert_video_group_list(groups: &[VideoGroupPtr]) -> Box<CRecordArray<CVideoGroup>> {
    Box::new(
        groups
            .iter()
            .map(|g| Some(convert_video_group(g.as_ref())))
            .collect(),
    )
}
