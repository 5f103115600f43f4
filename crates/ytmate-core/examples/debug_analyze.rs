//! Debug script to analyze a URL against the live upstream
//!
//! Run with: cargo run --example debug_analyze -p ytmate-core -- <youtube-url> [--convert]

use ytmate_core::{DownloadKind, YtMate, is_youtube_url};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let url = args
        .next()
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());
    let convert_first = args.any(|arg| arg == "--convert");

    if !is_youtube_url(&url) {
        println!("Warning: {} does not look like a YouTube URL", url);
    }

    let proxy = YtMate::new()?;
    println!("Analyzing {} via {}...\n", url, proxy.base_url());

    let analysis = proxy.analyze(&url).await?;
    println!("Title: {}", analysis.video_title);
    if let Some(ref thumb) = analysis.thumbnail {
        println!("Thumbnail: {}", thumb);
    }
    println!("Found {} download options:\n", analysis.downloads.len());

    for (i, option) in analysis.downloads.iter().enumerate() {
        let audio = if option.has_audio { "" } else { " [no audio]" };
        match &option.kind {
            DownloadKind::Direct { url } => {
                println!("{}. {} {}{} direct", i + 1, option.quality, option.size, audio);
                println!("   {}", url);
            }
            DownloadKind::ConversionRequired { conversion_params } => {
                println!("{}. {} {}{} conversion", i + 1, option.quality, option.size, audio);
                println!(
                    "   id={} ext={} note={} format={}",
                    conversion_params.id,
                    conversion_params.ext,
                    conversion_params.note,
                    conversion_params.format
                );
            }
        }
    }

    if convert_first
        && let Some(params) = analysis.downloads.iter().find_map(|d| d.conversion_params())
    {
        println!("\nConverting id={}...", params.id);
        let result = proxy.convert(params).await?;
        match result.download_url() {
            Some(link) => println!("✓ Download URL: {}", link),
            None => println!("✗ No download URL in payload:\n{}", result.0),
        }
    }

    Ok(())
}
