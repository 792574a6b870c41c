//! In-memory stand-in for the Data API used by the service and route tests.

use crate::services::youtube_client::{ApiError, Transport};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Params = HashMap<String, String>;
type Handler = dyn Fn(&str, &Params) -> Result<Value, ApiError> + Send + Sync;

pub struct FakeTransport {
    handler: Box<Handler>,
    calls: Mutex<Vec<(String, Params)>>,
}

impl FakeTransport {
    pub fn new(
        handler: impl Fn(&str, &Params) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls_to(&self, resource: &str) -> Vec<Params> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(r, _)| r == resource)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get_json(&self, resource: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let params: Params = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        self.calls
            .lock()
            .unwrap()
            .push((resource.to_string(), params.clone()));
        (self.handler)(resource, &params)
    }
}

/// A channel `UCfixture` found by any query containing "Fixture", owning `video_count` videos.
///
/// Even-numbered videos carry every field (captions in en+de, fr/de localizations);
/// odd-numbered ones leave the optional fields out. With `with_playlist` the first
/// search page also contains a playlist hit.
pub fn channel_fixture(video_count: usize, with_playlist: bool) -> Arc<FakeTransport> {
    FakeTransport::new(move |resource, params| {
        Ok(match resource {
            "search" if params.get("type").map(String::as_str) == Some("channel") => {
                if params.get("q").is_some_and(|q| q.contains("Fixture")) {
                    json!({"items": [{"id": {"kind": "youtube#channel", "channelId": "UCfixture"}}]})
                } else {
                    json!({"items": []})
                }
            }
            "search" => search_page(video_count, with_playlist, params),
            "channels" if params.get("id").map(String::as_str) == Some("UCfixture") => json!({
                "items": [{
                    "id": "UCfixture",
                    "statistics": {
                        "subscriberCount": "1200",
                        "viewCount": "98765",
                        "videoCount": video_count.to_string()
                    },
                    "snippet": {
                        "title": "Fixture Channel",
                        "publishedAt": "2012-03-04T05:06:07Z",
                        "customUrl": "@fixture"
                    }
                }]
            }),
            "videos" => match video_number(params.get("id"), video_count) {
                Some(n) => json!({"items": [video_item(n)]}),
                None => json!({"items": []}),
            },
            "captions" => match video_number(params.get("videoId"), video_count) {
                Some(n) if n % 2 == 0 => json!({"items": [
                    {"snippet": {"language": "en"}},
                    {"snippet": {"language": "de"}}
                ]}),
                _ => json!({"items": []}),
            },
            _ => json!({"items": []}),
        })
    })
}

fn search_page(video_count: usize, with_playlist: bool, params: &Params) -> Value {
    let page_size: usize = params
        .get("maxResults")
        .and_then(|m| m.parse().ok())
        .unwrap_or(5);
    let page: usize = params
        .get("pageToken")
        .and_then(|t| t.strip_prefix("page-"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(0);

    let start = page * page_size;
    let end = (start + page_size).min(video_count);
    let mut items: Vec<Value> = Vec::new();
    if with_playlist && page == 0 {
        items.push(json!({"id": {"kind": "youtube#playlist", "playlistId": "PLfixture"}, "snippet": {"title": "A playlist"}}));
    }
    items.extend((start..end).map(|n| {
        json!({
            "id": {"kind": "youtube#video", "videoId": format!("vid-{n:03}")},
            "snippet": {"title": format!("Video {n}")}
        })
    }));

    if end < video_count {
        json!({"items": items, "nextPageToken": format!("page-{}", page + 1)})
    } else {
        json!({"items": items})
    }
}

fn video_number(id: Option<&String>, video_count: usize) -> Option<usize> {
    id?.strip_prefix("vid-")?
        .parse()
        .ok()
        .filter(|n| *n < video_count)
}

fn video_item(n: usize) -> Value {
    if n % 2 == 0 {
        json!({
            "id": format!("vid-{n:03}"),
            "statistics": {"viewCount": "100", "likeCount": "10"},
            "snippet": {
                "title": format!("Video {n}"),
                "description": format!("Description {n}"),
                "publishedAt": "2024-01-02T03:04:05Z",
                "defaultAudioLanguage": "en",
                "defaultLanguage": "en"
            },
            "contentDetails": {"duration": "PT4M13S", "caption": "true"},
            "status": {"privacyStatus": "public"},
            "localizations": {
                "fr": {"title": format!("Vidéo {n}")},
                "de": {"title": format!("Video {n} (de)")}
            }
        })
    } else {
        json!({
            "id": format!("vid-{n:03}"),
            "statistics": {"viewCount": "7"},
            "snippet": {"title": format!("Video {n}"), "publishedAt": "2023-12-31T00:00:00Z"},
            "contentDetails": {"duration": "PT30S", "caption": "false"},
            "status": {"privacyStatus": "public"}
        })
    }
}

/// Channel search finds `UCghost`, but the channel lookup itself comes back empty.
pub fn ghost_channel() -> Arc<FakeTransport> {
    FakeTransport::new(|resource, params| {
        Ok(match resource {
            "search" if params.contains_key("q") => {
                json!({"items": [{"id": {"kind": "youtube#channel", "channelId": "UCghost"}}]})
            }
            _ => json!({"items": []}),
        })
    })
}
