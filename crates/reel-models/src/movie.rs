use serde::{Deserialize, Deserializer, Serialize};

/// A movie as listed by the review service.
///
/// The title is the natural key; the service assigns no other identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub img: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
}

impl Movie {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            img: String::new(),
            overview: String::new(),
        }
    }
}

// TMDB hands back `null` for missing posters and overviews
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
