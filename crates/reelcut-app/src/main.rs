//! Reelcut - Project inspector
//!
//! Reads a project document and prints the composition it describes: the
//! sources, the part list with timeline offsets, and the option tokens the
//! export would submit.

use anyhow::{Context, Result};
use reelcut_core::format_hms;
use reelcut_export::ExportSettings;
use reelcut_session::ProjectDocument;
use reelcut_timeline::Timeline;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let path = std::env::args()
        .nth(1)
        .context("usage: reelcut <project.json>")?;

    info!(%path, "inspecting project");
    let data = std::fs::read_to_string(&path).with_context(|| format!("cannot read {path}"))?;
    let document = ProjectDocument::from_json(&data)?;

    let mut timeline = Timeline::new();
    timeline.replace_parts(document.parts.clone());

    println!("project: {path}");
    println!("destination: {}", document.destination_filename);
    println!("aspect ratio: {}", document.aspect_ratio);
    println!("sources: {}", document.sources.len());
    for (id, filename) in &document.sources {
        println!("  {id}: {filename}");
    }

    println!("parts: {}", timeline.len());
    let mut start = 0.0;
    for (index, part) in timeline.parts().iter().enumerate() {
        println!(
            "  #{index} {} [{} - {}] at {} ({})",
            part.source_id,
            format_hms(part.from, true),
            format_hms(part.to, true),
            format_hms(start, true),
            part.color(),
        );
        start += part.duration;
    }
    println!("duration: {}", format_hms(timeline.duration(), true));

    let settings = ExportSettings {
        format: document.export_format.clone(),
        video_codec: document.export_video_codec.clone(),
        audio_codec: document.export_audio_codec.clone(),
        subtitle_codec: document.export_subtitle_codec.clone(),
        map_all_streams: document.map_all_streams,
        ..Default::default()
    };
    println!("options: {}", settings.build_options().join(" "));

    if let Some(at) = timeline.resolve(document.time) {
        println!(
            "cursor: {} in part #{}",
            format_hms(document.time, true),
            at.index
        );
    }

    Ok(())
}
