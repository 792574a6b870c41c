use crate::models::{ChannelExport, VideoRecord};
use crate::services::spreadsheet;
use crate::services::youtube_client::{ApiError, YoutubeClient};
use crate::utils::watch_url;
use anyhow::Result;
use log::info;
use std::path::{Path, PathBuf};

/// Collects channel info and every video's details. `None` when the channel can't be found.
///
/// Videos are looked up one at a time in listing order, so `index` follows the
/// newest-first order of the search results. A single failed lookup fails the export.
pub async fn build_channel_export(
    client: &YoutubeClient,
    channel_name: &str,
) -> Result<Option<ChannelExport>, ApiError> {
    let Some(channel_id) = client.resolve_channel_id(channel_name).await? else {
        info!("No channel found for '{channel_name}'");
        return Ok(None);
    };
    info!("Resolved '{channel_name}' to channel {channel_id}");

    let Some(channel) = client.fetch_channel_info(&channel_id, channel_name).await? else {
        info!("Channel {channel_id} returned no info");
        return Ok(None);
    };

    let stubs = client.list_all_videos(&channel_id).await?;
    let mut videos = Vec::with_capacity(stubs.len());
    for (position, stub) in stubs.into_iter().enumerate() {
        let detail = client
            .fetch_video_detail(&stub.video_id)
            .await?
            .ok_or_else(|| ApiError::VideoNotFound(stub.video_id.clone()))?;

        videos.push(VideoRecord {
            index: position + 1,
            link: watch_url(&stub.video_id),
            title: stub.title,
            detail,
        });
    }
    info!("Fetched details for {} videos of {channel_id}", videos.len());

    Ok(Some(ChannelExport { channel, videos }))
}

/// Builds the export and writes it under `output_dir`, returning the workbook path.
pub async fn export_channel(
    client: &YoutubeClient,
    output_dir: &Path,
    channel_name: &str,
) -> Result<Option<PathBuf>> {
    let Some(export) = build_channel_export(client, channel_name).await? else {
        return Ok(None);
    };

    let path = spreadsheet::write_workbook(output_dir, export).await?;
    info!("Wrote export for '{channel_name}' to {}", path.display());
    Ok(Some(path))
}
