//! News and sentiment models.

use serde::{Deserialize, Serialize};

/// A single article from the news/sentiment feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,

    #[serde(default)]
    pub url: String,

    /// Publication timestamp as reported (e.g. "20240107T123000")
    #[serde(default)]
    pub time_published: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub summary: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,

    #[serde(default)]
    pub source: String,

    /// Sentiment bucket (e.g. "Bullish", "Neutral")
    #[serde(default)]
    pub overall_sentiment_label: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_sentiment_score: Option<f64>,
}

/// Result of the news/sentiment operation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFeed {
    pub articles: Vec<NewsArticle>,
}
