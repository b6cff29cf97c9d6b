pub mod criteria;
pub mod movie;
pub mod review;
pub mod sentiment;
pub mod stats;
pub mod timestamp;

pub use criteria::{FilterCriteria, MovieFilter, SentimentFilter, SortOrder};
pub use movie::Movie;
pub use review::{RemoteTarget, Review, ReviewKey};
pub use sentiment::Sentiment;
pub use stats::ReviewStats;
pub use timestamp::Timestamp;
