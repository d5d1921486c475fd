use anyhow::Context;
use chrono::DateTime;
use clap::{Parser, ValueEnum};
use medialib_bridge::{
    convert_album_list, convert_artist_list, convert_folder_list, convert_genre_list,
    convert_media_list, convert_playlist_list, convert_search_aggregate, convert_video_group_list,
    CMediaWrapper, CRecordArray, SearchCategories, SnapshotLibrary,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Convert a media library snapshot into host records and print them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the library snapshot (JSON)
    #[arg(env = "MEDIALIB_SNAPSHOT")]
    snapshot: PathBuf,

    /// Search the library instead of listing it
    #[arg(short, long)]
    search: Option<String>,

    /// Categories to search, comma separated (default: all)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    categories: Vec<Category>,

    /// Log conversion details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Category {
    Albums,
    Artists,
    Genres,
    Playlists,
    Media,
}

impl From<Category> for SearchCategories {
    fn from(category: Category) -> Self {
        match category {
            Category::Albums => SearchCategories::ALBUMS,
            Category::Artists => SearchCategories::ARTISTS,
            Category::Genres => SearchCategories::GENRES,
            Category::Playlists => SearchCategories::PLAYLISTS,
            Category::Media => SearchCategories::MEDIA,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let directive = if args.verbose {
        "medialib_bridge=debug"
    } else {
        "medialib_bridge=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let library = SnapshotLibrary::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    match &args.search {
        Some(pattern) => search(&library, pattern, &args.categories),
        None => list(&library),
    }
}

fn list(library: &SnapshotLibrary) -> anyhow::Result<()> {
    let media = convert_media_list(library.all_media()).context("Failed to convert media")?;
    println!(
        "Media: {} converted, {} skipped",
        media.len(),
        library.all_media().len() - media.len()
    );
    print_media(&media);

    println!("Albums: {}", convert_album_list(library.albums()).len());
    println!("Artists: {}", convert_artist_list(library.artists()).len());
    println!("Genres: {}", convert_genre_list(library.genres()).len());
    println!("Playlists: {}", convert_playlist_list(library.playlists()).len());
    let folders = convert_folder_list(library.folders()).context("Failed to convert folders")?;
    println!("Folders: {}", folders.len());
    for folder in folders.records() {
        println!("  {}  {}", folder.name().unwrap_or("?"), folder.mrl().unwrap_or("?"));
    }
    println!(
        "Video groups: {}",
        convert_video_group_list(library.video_groups()).len()
    );
    Ok(())
}

fn search(library: &SnapshotLibrary, pattern: &str, categories: &[Category]) -> anyhow::Result<()> {
    let categories = if categories.is_empty() {
        SearchCategories::all()
    } else {
        categories
            .iter()
            .fold(SearchCategories::empty(), |acc, &c| acc | SearchCategories::from(c))
    };
    let aggregate = library
        .search(pattern, categories)
        .with_context(|| format!("Search for {pattern:?} failed"))?;
    let result = convert_search_aggregate(&aggregate).context("Failed to convert search results")?;

    let count = |len: Option<usize>| match len {
        Some(len) => len.to_string(),
        None => "not searched".to_string(),
    };
    println!("Albums: {}", count(result.albums.as_ref().map(|a| a.len())));
    println!("Artists: {}", count(result.artists.as_ref().map(|a| a.len())));
    println!("Genres: {}", count(result.genres.as_ref().map(|g| g.len())));
    println!("Playlists: {}", count(result.playlists.as_ref().map(|p| p.len())));
    if let Some(tracks) = &result.tracks {
        println!("Tracks: {}", tracks.len());
        print_media(tracks);
    }
    if let Some(videos) = &result.videos {
        println!("Videos: {}", videos.len());
        print_media(videos);
    }
    Ok(())
}

fn print_media(media: &CRecordArray<CMediaWrapper>) {
    for m in media.slots() {
        let Some(m) = m else {
            println!("  (unavailable)");
            continue;
        };
        let modified = DateTime::from_timestamp(m.last_modified, 0)
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "  #{} {}  {}  (modified {})",
            m.id,
            m.title().unwrap_or("<untitled>"),
            m.mrl().unwrap_or("?"),
            modified
        );
    }
}
