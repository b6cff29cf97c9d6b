pub mod board;
pub mod catalog;
pub mod composer;
pub mod editor;
pub mod error;
pub mod stats;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;

pub use board::ReviewBoard;
pub use catalog::MovieCatalog;
pub use composer::{ComposerState, DraftReview, ReviewComposer};
pub use editor::{EditorState, InlineEditor};
pub use error::{AddressResolutionError, ClientError, ValidationError};
pub use stats::{catalog_stats, stats};
pub use store::{LoadState, MutationReport, RefreshOutcome, RefreshTicket, ResolvedReview, ReviewStore};
pub use view::{derive_view, movie_titles};
