use crate::store::LoadState;
use reel_gateway::RemoteGateway;
use reel_models::Movie;
use std::sync::Arc;
use tracing::{info, warn};

/// Movies offered for review, fetched once per session.
pub struct MovieCatalog {
    gateway: Arc<dyn RemoteGateway>,
    movies: Vec<Movie>,
    state: LoadState,
}

impl MovieCatalog {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            movies: Vec::new(),
            state: LoadState::Idle,
        }
    }

    /// Fetch the movie list. On failure the previous list is kept.
    pub async fn load(&mut self) -> LoadState {
        self.state = LoadState::Loading;
        match self.gateway.list_movies().await {
            Ok(movies) => {
                info!("Loaded {} movies", movies.len());
                self.movies = movies;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!("Failed to fetch movies: {}", e);
                self.state = LoadState::Failed("Could not load movie list.".to_string());
            }
        }
        self.state.clone()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn find(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.title == title)
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }
}
