//! Conversion of search results.
//!
//! A [`SearchAggregate`] bundles five optional collections. Collections that
//! were not searched stay null in the [`CSearchAggregate`]; searched ones
//! become arrays sized to their hit count. Media hits are split into music
//! tracks and videos.

use crate::convert::{convert_album, convert_artist, convert_genre, convert_playlist, map_media};
use crate::library::{MediaPtr, MediaSubType, SearchAggregate};
use crate::records::{CMediaWrapper, CRecordArray, CSearchAggregate};
use crate::Result;

fn convert_each<S, T>(items: &[S], convert: impl Fn(&S) -> Box<T>) -> Box<CRecordArray<T>> {
    let mut array = Box::new(CRecordArray::with_len(items.len()));
    for (index, item) in items.iter().enumerate() {
        array.set(index, Some(convert(item)));
    }
    array
}

/// Split media hits into (tracks, videos), keeping their relative order.
pub fn partition_media(media: &[MediaPtr]) -> (Vec<MediaPtr>, Vec<MediaPtr>) {
    media
        .iter()
        .cloned()
        .partition(|m| m.sub_type() == MediaSubType::AlbumTrack)
}

/// Build the host view of a search result.
///
/// Media that convert to nothing keep a null slot, so each media array has
/// exactly one slot per hit of its partition.
pub fn convert_search_aggregate(aggregate: &SearchAggregate) -> Result<Box<CSearchAggregate>> {
    let albums = aggregate
        .albums
        .as_deref()
        .map(|albums| convert_each(albums, |a| convert_album(a.as_ref())));
    let artists = aggregate
        .artists
        .as_deref()
        .map(|artists| convert_each(artists, |a| convert_artist(a.as_ref())));
    let genres = aggregate
        .genres
        .as_deref()
        .map(|genres| convert_each(genres, |g| convert_genre(g.as_ref())));
    let playlists = aggregate
        .playlists
        .as_deref()
        .map(|playlists| convert_each(playlists, |p| convert_playlist(p.as_ref())));

    let mut videos: Option<Box<CRecordArray<CMediaWrapper>>> = None;
    let mut tracks: Option<Box<CRecordArray<CMediaWrapper>>> = None;
    if let Some(media) = aggregate.media.as_deref() {
        let (track_hits, video_hits) = partition_media(media);
        videos = Some(map_media(&video_hits)?.0);
        tracks = Some(map_media(&track_hits)?.0);
    }

    tracing::trace!(?aggregate, "Converted search aggregate");
    Ok(Box::new(CSearchAggregate {
        albums,
        artists,
        genres,
        videos,
        tracks,
        playlists,
    }))
}
