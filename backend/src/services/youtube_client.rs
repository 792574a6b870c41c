use crate::config::AppConfig;
use crate::models::{ChannelRecord, VideoDetail, VideoStub};
use crate::utils::{date_part, json_string};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Largest page the search endpoint hands out.
pub const SEARCH_PAGE_SIZE: u32 = 50;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to YouTube Data API failed: {0}")]
    Http(reqwest::Error), // always built with `without_url()`
    #[error("YouTube Data API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid YouTube Data API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("video {0} was listed but could not be looked up")]
    VideoNotFound(String),
}

/// One GET against a Data API resource (`search`, `channels`, ...) returning the decoded body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, ApiError>;
}

pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self {
            client: Client::new(),
            base_url: Url::parse(&config.api_base_url)?,
            api_key: config.youtube_api_key.clone(),
        })
    }

    fn endpoint(&self, resource: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(resource)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
            .append_pair("key", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = self.endpoint(resource, params)?;
        debug!("GET {resource} {params:?}");

        // reqwest errors carry the request url, which includes the key
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("YouTube Data API {resource} call failed with {status}: {body}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ApiError::Http(e.without_url()))
    }
}

// Documentation: https://developers.google.com/youtube/v3/docs
#[derive(Clone)]
pub struct YoutubeClient {
    transport: Arc<dyn Transport>,
}

impl YoutubeClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// First channel-type search hit for `name`, if any.
    pub async fn resolve_channel_id(&self, name: &str) -> Result<Option<String>, ApiError> {
        let response = self
            .transport
            .get_json(
                "search",
                &[
                    ("part", "id".to_string()),
                    ("q", name.to_string()),
                    ("type", "channel".to_string()),
                    ("maxResults", "1".to_string()),
                ],
            )
            .await?;

        Ok(response["items"][0]["id"]["channelId"]
            .as_str()
            .filter(|id| !id.is_empty())
            .map(String::from))
    }

    /// The "Channel Name" column carries the name the user searched for, not the API title.
    pub async fn fetch_channel_info(
        &self,
        channel_id: &str,
        channel_name: &str,
    ) -> Result<Option<ChannelRecord>, ApiError> {
        let response = self
            .transport
            .get_json(
                "channels",
                &[
                    ("part", "statistics,snippet".to_string()),
                    ("id", channel_id.to_string()),
                ],
            )
            .await?;

        let channel = &response["items"][0];
        if channel.is_null() {
            return Ok(None);
        }
        let statistics = &channel["statistics"];
        let snippet = &channel["snippet"];

        Ok(Some(ChannelRecord {
            channel_name: channel_name.to_string(),
            subscriber_count: json_string(&statistics["subscriberCount"]),
            total_views: json_string(&statistics["viewCount"]),
            joined_date: json_string(&snippet["publishedAt"]).map(|ts| date_part(&ts)),
            location: json_string(&snippet["country"]),
            website: json_string(&snippet["customUrl"]),
            video_count: json_string(&statistics["videoCount"]),
            description: json_string(&snippet["description"]),
        }))
    }

    /// Every video of a channel, newest first. Playlists and other non-video hits are skipped.
    pub async fn list_all_videos(&self, channel_id: &str) -> Result<Vec<VideoStub>, ApiError> {
        let mut all_videos = Vec::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            let mut params = vec![
                ("part", "snippet".to_string()),
                ("channelId", channel_id.to_string()),
                ("order", "date".to_string()),
                ("maxResults", SEARCH_PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &next_page_token {
                params.push(("pageToken", token.clone()));
            }

            let response = self.transport.get_json("search", &params).await?;
            pages += 1;

            if let Some(items) = response["items"].as_array() {
                for item in items {
                    if let Some(video_id) = item["id"]["videoId"].as_str() {
                        all_videos.push(VideoStub {
                            video_id: video_id.to_string(),
                            title: item["snippet"]["title"]
                                .as_str()
                                .unwrap_or_default()
                                .to_string(),
                        });
                    }
                }
            }
            debug!(
                "Search page {pages} for channel {channel_id}: {} videos so far",
                all_videos.len()
            );

            match response["nextPageToken"].as_str() {
                Some(token) if !token.is_empty() => next_page_token = Some(token.to_string()),
                _ => break,
            }
        }

        info!(
            "Listed {} videos for channel {channel_id} in {pages} pages",
            all_videos.len()
        );
        Ok(all_videos)
    }

    pub async fn fetch_video_detail(&self, video_id: &str) -> Result<Option<VideoDetail>, ApiError> {
        let response = self
            .transport
            .get_json(
                "videos",
                &[
                    (
                        "part",
                        "statistics,snippet,contentDetails,status,localizations".to_string(),
                    ),
                    ("id", video_id.to_string()),
                ],
            )
            .await?;

        let video = &response["items"][0];
        if video.is_null() {
            return Ok(None);
        }
        let statistics = &video["statistics"];
        let snippet = &video["snippet"];

        // The flag is the string "true", not a JSON boolean.
        let caption_flag = video["status"]["caption"]
            .as_str()
            .or_else(|| video["contentDetails"]["caption"].as_str());

        let localized_titles: Vec<(String, String)> = video["localizations"]
            .as_object()
            .map(|localizations| {
                localizations
                    .iter()
                    .filter_map(|(lang, localization)| {
                        let title = localization["title"].as_str()?;
                        Some((lang.clone(), title.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(VideoDetail {
            view_count: json_string(&statistics["viewCount"]),
            like_count: json_string(&statistics["likeCount"]),
            description: json_string(&snippet["description"]),
            duration: json_string(&video["contentDetails"]["duration"]),
            published_at: json_string(&snippet["publishedAt"]),
            subtitles_available: caption_flag == Some("true"),
            subtitle_languages: self.fetch_caption_languages(video_id).await?,
            default_audio_language: json_string(&snippet["defaultAudioLanguage"]),
            default_language: json_string(&snippet["defaultLanguage"]),
            localized_titles,
        }))
    }

    async fn fetch_caption_languages(&self, video_id: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .transport
            .get_json(
                "captions",
                &[
                    ("part", "snippet".to_string()),
                    ("videoId", video_id.to_string()),
                ],
            )
            .await?;

        Ok(response["items"]
            .as_array()
            .map(|tracks| {
                tracks
                    .iter()
                    .filter_map(|track| track["snippet"]["language"].as_str())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default())
    }
}
