use crate::models::{ChannelExport, ChannelRecord, VideoRecord, NOT_AVAILABLE};
use crate::utils::sanitize_filename;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CHANNEL_SHEET: &str = "Channel Info";
pub const VIDEO_SHEET: &str = "Videos";

pub const CHANNEL_COLUMNS: [&str; 8] = [
    "Channel Name",
    "Subscriber Count",
    "Total Views",
    "Joined Date",
    "Location",
    "Website",
    "Video Count",
    "Description",
];

pub const VIDEO_COLUMNS: [&str; 13] = [
    "Index",
    "Title",
    "Link",
    "View Count",
    "Like Count",
    "Description",
    "Duration",
    "Published At",
    "Subtitles Available",
    "Subtitle Language",
    "Default Audio Language",
    "Default Language",
    "Localized Titles",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to prepare export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write workbook: {0}")]
    Workbook(#[from] XlsxError),
    #[error("workbook writer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub fn output_path(output_dir: &Path, channel_name: &str) -> PathBuf {
    output_dir.join(format!("{}.xlsx", sanitize_filename(channel_name)))
}

/// Writes the two-sheet workbook, replacing any earlier export of the same channel name.
pub async fn write_workbook(output_dir: &Path, export: ChannelExport) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(output_dir).await?;

    let path = output_path(output_dir, &export.channel.channel_name);
    let target = path.clone();
    tokio::task::spawn_blocking(move || save_workbook(&target, &export)).await??;

    Ok(path)
}

fn save_workbook(path: &Path, export: &ChannelExport) -> Result<(), ExportError> {
    let header = Format::new().set_bold();

    let mut workbook = Workbook::new();
    workbook.push_worksheet(channel_sheet(&export.channel, &header)?);
    workbook.push_worksheet(video_sheet(&export.videos, &header)?);
    workbook.save(path)?;
    Ok(())
}

fn channel_sheet(channel: &ChannelRecord, header: &Format) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(CHANNEL_SHEET)?;
    write_header(&mut sheet, &CHANNEL_COLUMNS, header)?;

    let row = [
        channel.channel_name.as_str(),
        cell(&channel.subscriber_count),
        cell(&channel.total_views),
        cell(&channel.joined_date),
        cell(&channel.location),
        cell(&channel.website),
        cell(&channel.video_count),
        cell(&channel.description),
    ];
    for (col, value) in row.into_iter().enumerate() {
        sheet.write_string(1, col as ColNum, value)?;
    }

    Ok(sheet)
}

fn video_sheet(videos: &[VideoRecord], header: &Format) -> Result<Worksheet, XlsxError> {
    let mut sheet = Worksheet::new();
    sheet.set_name(VIDEO_SHEET)?;
    write_header(&mut sheet, &VIDEO_COLUMNS, header)?;

    for (offset, video) in videos.iter().enumerate() {
        let row = (offset + 1) as RowNum;
        let detail = &video.detail;

        sheet.write_number(row, 0, video.index as f64)?;
        sheet.write_string(row, 1, &video.title)?;
        sheet.write_string(row, 2, &video.link)?;
        sheet.write_string(row, 3, cell(&detail.view_count))?;
        sheet.write_string(row, 4, cell(&detail.like_count))?;
        sheet.write_string(row, 5, cell(&detail.description))?;
        sheet.write_string(row, 6, cell(&detail.duration))?;
        sheet.write_string(row, 7, cell(&detail.published_at))?;
        sheet.write_boolean(row, 8, detail.subtitles_available)?;
        sheet.write_string(row, 9, joined(&detail.subtitle_languages))?;
        sheet.write_string(row, 10, cell(&detail.default_audio_language))?;
        sheet.write_string(row, 11, cell(&detail.default_language))?;
        sheet.write_string(row, 12, localized_titles(&detail.localized_titles))?;
    }

    Ok(sheet)
}

fn write_header(sheet: &mut Worksheet, columns: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as ColNum, *name, format)?;
    }
    Ok(())
}

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}

fn joined(values: &[String]) -> String {
    if values.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        values.join(", ")
    }
}

fn localized_titles(titles: &[(String, String)]) -> String {
    let entries: Vec<String> = titles
        .iter()
        .map(|(lang, title)| format!("{lang}: {title}"))
        .collect();
    joined(&entries)
}
