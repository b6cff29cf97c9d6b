use crate::Sentiment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentiment half of the review filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum SentimentFilter {
    #[default]
    All,
    Only(Sentiment),
}

impl FromStr for SentimentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(SentimentFilter::All),
            "positive" => Ok(SentimentFilter::Only(Sentiment::Positive)),
            "negative" => Ok(SentimentFilter::Only(Sentiment::Negative)),
            _ => Err(format!("Invalid sentiment filter: {}. Use 'all', 'positive', or 'negative'", s)),
        }
    }
}

impl fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentimentFilter::All => write!(f, "All"),
            SentimentFilter::Only(sentiment) => write!(f, "{}", sentiment),
        }
    }
}

/// Movie half of the review filter, matched on exact title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum MovieFilter {
    #[default]
    All,
    Title(String),
}

impl MovieFilter {
    /// No title means no filter. Any given title is matched literally, so a
    /// movie called "All" can still be filtered on.
    pub fn from_option(title: Option<String>) -> Self {
        title.map_or(MovieFilter::All, MovieFilter::Title)
    }
}

impl fmt::Display for MovieFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieFilter::All => write!(f, "All"),
            MovieFilter::Title(title) => write!(f, "{}", title),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "latest" => Ok(SortOrder::Latest),
            "oldest" => Ok(SortOrder::Oldest),
            _ => Err(format!("Invalid sort order: {}. Use 'latest' or 'oldest'", s)),
        }
    }
}

/// Active filter and sort settings of the review list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterCriteria {
    pub sentiment: SentimentFilter,
    pub movie: MovieFilter,
    pub sort: SortOrder,
}

impl FilterCriteria {
    pub fn new(sentiment: SentimentFilter, movie: MovieFilter, sort: SortOrder) -> Self {
        Self { sentiment, movie, sort }
    }
}
