use crate::{Movie, Sentiment, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Server-assigned identifier, when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "id_as_string")]
    pub id: Option<String>,
    pub movie: Movie,
    pub review: String,
    #[serde(default = "unknown_sentiment", deserialize_with = "sentiment_or_unknown")]
    pub sentiment: Sentiment,
    #[serde(default, deserialize_with = "timestamp_or_empty")]
    pub timestamp: Timestamp,
}

impl Review {
    pub fn title(&self) -> &str {
        &self.movie.title
    }

    /// Identity of this review: the server id when there is one, otherwise
    /// the composite of timestamp, text and movie title.
    pub fn key(&self) -> ReviewKey {
        ReviewKey {
            id: self.id.clone(),
            timestamp: self.timestamp.raw().to_string(),
            text: self.review.clone(),
            title: self.movie.title.clone(),
        }
    }
}

// the service stores whatever it was sent, so either field may come back null
fn unknown_sentiment() -> Sentiment {
    Sentiment::Other(String::new())
}

fn sentiment_or_unknown<'de, D>(deserializer: D) -> Result<Sentiment, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Sentiment::from)
        .unwrap_or_else(unknown_sentiment))
}

fn timestamp_or_empty<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(Timestamp::parse)
        .unwrap_or_default())
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    }))
}

/// Identity of a review that survives filtering and sorting.
///
/// With a server id, two reviews are the same review iff the ids are equal.
/// Without one, timestamp, text and movie title must all be equal. Derived
/// views copy reviews, so a key taken from any view row matches the cache
/// entry it was copied from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewKey {
    pub id: Option<String>,
    pub timestamp: String,
    pub text: String,
    pub title: String,
}

impl ReviewKey {
    /// Whether two keys name the same review. Keys that both carry an id are
    /// compared by id alone, since the other parts can change under edits.
    pub fn same_review(&self, other: &ReviewKey) -> bool {
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    pub fn matches(&self, review: &Review) -> bool {
        match &self.id {
            Some(id) => review.id.as_ref() == Some(id),
            None => {
                self.timestamp == review.timestamp.raw()
                    && self.text == review.review
                    && self.title == review.movie.title
            }
        }
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.id {
            return write!(f, "{} #{}", self.title, id);
        }
        let preview: String = self.text.chars().take(32).collect();
        write!(f, "{} @ {} ({:?})", self.title, self.timestamp, preview)
    }
}

/// Where an edit or delete is sent: the `{identity}` segment of `/reviews/{identity}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTarget {
    /// Stable server-assigned identifier
    Id(String),
    /// Position in the last fetched review list, for services without identifiers
    Index(usize),
}

impl RemoteTarget {
    pub fn path_segment(&self) -> String {
        match self {
            RemoteTarget::Id(id) => id.clone(),
            RemoteTarget::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteTarget::Id(id) => write!(f, "id {}", id),
            RemoteTarget::Index(index) => write!(f, "index {}", index),
        }
    }
}
