use rocket::FromForm;

/// Written in place of any value the API did not return.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, FromForm)]
pub struct ExportRequest {
    pub channel_name: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelRecord {
    pub channel_name: String,
    pub subscriber_count: Option<String>,
    pub total_views: Option<String>,
    pub joined_date: Option<String>, // YYYY-MM-DD
    pub location: Option<String>,
    pub website: Option<String>,
    pub video_count: Option<String>,
    pub description: Option<String>,
}

/// A search hit that is known to be a video, before detail lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStub {
    pub video_id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct VideoDetail {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>, // ISO8601, e.g. PT4M13S
    pub published_at: Option<String>,
    pub subtitles_available: bool,
    pub subtitle_languages: Vec<String>,
    pub default_audio_language: Option<String>,
    pub default_language: Option<String>,
    pub localized_titles: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoRecord {
    pub index: usize,
    pub title: String,
    pub link: String,
    pub detail: VideoDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelExport {
    pub channel: ChannelRecord,
    pub videos: Vec<VideoRecord>,
}
