pub mod config;
pub mod context;
pub mod delete;
pub mod edit;
pub mod movies;
pub mod post;
pub mod predict;
pub mod prompts;
pub mod reviews;
pub mod stats;
pub mod ui;
