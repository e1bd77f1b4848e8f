//! Video search backed by the YouTube Data API v3.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const YOUTUBE_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_SEARCH_RESULTS: u32 = 10;
pub const DEFAULT_PLAYLIST_RESULTS: u32 = 50;
const UNKNOWN_DURATION: &str = "N/A";

#[derive(Debug, Error)]
pub enum VideoSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("YouTube API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One video as shown in the course list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub published_at: String,
    /// ISO-8601 duration such as "PT1H2M", or "N/A" when unknown.
    pub duration: String,
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_courses(&self, query: &str, max_results: u32) -> Result<Vec<Video>, VideoSearchError>;
    async fn playlist_videos(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, VideoSearchError>;
}

#[derive(Debug, Deserialize)]
struct ItemList<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    thumbnails: Thumbnails,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
    resource_id: Option<ResourceId>,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    id: String,
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

impl Snippet {
    fn into_video(self, id: String, duration: String) -> Video {
        Video {
            id,
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnails.high.map(|t| t.url).unwrap_or_default(),
            channel_title: self.channel_title,
            published_at: self.published_at,
            duration,
        }
    }
}

#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, YOUTUBE_API_BASE)
    }

    pub fn with_base_url(api_key: String, api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// The key goes in a header, never in the URL: `reqwest::Error` prints URLs.
    async fn get<T: DeserializeOwned>(
        &self,
        resource: &str,
        params: &[(&str, &str)],
    ) -> Result<T, VideoSearchError> {
        let response = self
            .client
            .get(format!("{}/{resource}", self.api_base))
            .header("x-goog-api-key", &self.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VideoSearchError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    /// Looks up durations for a batch of ids, keyed by id.
    async fn durations(&self, ids: &[String]) -> Result<HashMap<String, String>, VideoSearchError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let joined = ids.join(",");
        let details: ItemList<VideoDetails> = self
            .get("videos", &[("part", "contentDetails,statistics"), ("id", joined.as_str())])
            .await?;

        Ok(details
            .items
            .into_iter()
            .filter_map(|v| {
                let duration = v.content_details?.duration?;
                Some((v.id, duration))
            })
            .collect())
    }
}

#[async_trait]
impl VideoSearch for YouTubeClient {
    async fn search_courses(&self, query: &str, max_results: u32) -> Result<Vec<Video>, VideoSearchError> {
        let q = format!("{query} course tutorial");
        let max = max_results.to_string();
        let found: ItemList<SearchItem> = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("maxResults", max.as_str()),
                    ("q", q.as_str()),
                    ("type", "video"),
                ],
            )
            .await?;

        let hits: Vec<(String, Snippet)> = found
            .items
            .into_iter()
            .filter_map(|item| Some((item.id.video_id?, item.snippet)))
            .collect();

        let ids: Vec<String> = hits.iter().map(|(id, _)| id.clone()).collect();
        let mut durations = self.durations(&ids).await?;
        debug!("YouTube search '{query}' returned {} videos", hits.len());

        Ok(hits
            .into_iter()
            .map(|(id, snippet)| {
                let duration = durations
                    .remove(&id)
                    .unwrap_or_else(|| UNKNOWN_DURATION.to_string());
                snippet.into_video(id, duration)
            })
            .collect())
    }

    async fn playlist_videos(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, VideoSearchError> {
        let max = max_results.to_string();
        let page: ItemList<PlaylistItem> = self
            .get(
                "playlistItems",
                &[
                    ("part", "snippet"),
                    ("maxResults", max.as_str()),
                    ("playlistId", playlist_id),
                ],
            )
            .await?;

        // Playlist listings carry no durations; fetching them costs another call.
        Ok(page
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.snippet.resource_id.as_ref()?.video_id.clone()?;
                Some(item.snippet.into_video(id, UNKNOWN_DURATION.to_string()))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn snippet(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": format!("{title} description"),
            "thumbnails": {"high": {"url": format!("https://img.example/{title}.jpg")}},
            "channelTitle": "LearnCode",
            "publishedAt": "2024-01-02T03:04:05Z"
        })
    }

    #[tokio::test]
    async fn test_search_joins_durations_by_video_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "rust course tutorial"))
            .and(query_param("type", "video"))
            .and(header("x-goog-api-key", "yt-key"))
            .and(query_param_is_missing("key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": {"videoId": "a1"}, "snippet": snippet("Intro")},
                    {"id": {"videoId": "b2"}, "snippet": snippet("Traits")},
                    {"id": {"channelId": "c3"}, "snippet": snippet("Channel")}
                ]
            })))
            .mount(&mock_server)
            .await;

        // Details come back in a different order and without one of the ids.
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "a1,b2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "b2", "contentDetails": {"duration": "PT45M"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = YouTubeClient::with_base_url("yt-key".into(), &mock_server.uri());
        let videos = client.search_courses("rust", 10).await.unwrap();

        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].id, "a1");
        assert_eq!(videos[0].duration, "N/A");
        assert_eq!(videos[1].id, "b2");
        assert_eq!(videos[1].duration, "PT45M");
        assert_eq!(videos[1].thumbnail, "https://img.example/Traits.jpg");
        assert_eq!(videos[1].channel_title, "LearnCode");
    }

    #[tokio::test]
    async fn test_playlist_videos_use_resource_ids() {
        let mock_server = MockServer::start().await;

        let mut item = snippet("Lesson 1");
        item["resourceId"] = json!({"kind": "youtube#video", "videoId": "v1"});

        Mock::given(method("GET"))
            .and(path("/playlistItems"))
            .and(query_param("playlistId", "PL123"))
            .and(query_param("maxResults", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"snippet": item}]})))
            .mount(&mock_server)
            .await;

        let client = YouTubeClient::with_base_url("k".into(), &mock_server.uri());
        let videos = client
            .playlist_videos("PL123", DEFAULT_PLAYLIST_RESULTS)
            .await
            .unwrap();

        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].id, "v1");
        assert_eq!(videos[0].duration, "N/A");
    }

    #[tokio::test]
    async fn test_api_error_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
            .mount(&mock_server)
            .await;

        let client = YouTubeClient::with_base_url("k".into(), &mock_server.uri());
        let err = client.search_courses("rust", 10).await.unwrap_err();
        assert!(matches!(err, VideoSearchError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_transport_error_does_not_expose_api_key() {
        // Nothing listens on the discard port.
        let client = YouTubeClient::with_base_url("SECRET-YT-KEY".into(), "http://127.0.0.1:9");
        let err = client.search_courses("rust", 10).await.unwrap_err();

        assert!(matches!(err, VideoSearchError::Http(_)));
        let logged = crate::errors::AppError::from(err).to_string();
        assert!(!logged.contains("SECRET-YT-KEY"), "{logged}");
    }
}
