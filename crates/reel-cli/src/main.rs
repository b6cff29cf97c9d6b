use clap::{ArgAction, Parser, Subcommand};
use commands::reviews::FilterArgs;
use commands::{config, context, delete, edit, movies, post, predict, reviews, stats};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelreview")]
#[command(about = "ReelReview - Write, predict and manage movie reviews")]
#[command(version)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to logging.file, or to the default log file when that is unset
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies with their review counts
    Movies,

    /// List posted reviews
    #[command(long_about = "List posted reviews, newest first unless --sort says otherwise. Row numbers refer to this filtered and sorted view and are what 'edit' and 'delete' expect, given the same filter flags.")]
    Reviews {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show review counts for one movie
    Stats {
        /// Movie title (exact match)
        title: String,
    },

    /// Predict the sentiment of a text without posting anything
    Predict {
        /// Review text
        text: String,
    },

    /// Write, predict and post a review
    #[command(long_about = "Write a review for a movie, have its sentiment predicted, and post it. The text is prompted for when --text is not given, and the prediction is shown for confirmation unless --yes is set.")]
    Post {
        /// Movie title (exact match)
        #[arg(long)]
        movie: String,

        /// Review text (prompted for if omitted)
        #[arg(long)]
        text: Option<String>,

        /// Post without asking for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Replace the text of a posted review
    Edit {
        /// Row number as shown by 'reviews' with the same filter flags
        row: usize,

        #[command(flatten)]
        filter: FilterArgs,

        /// New review text (prompted for if omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// Delete a posted review
    Delete {
        /// Row number as shown by 'reviews' with the same filter flags
        row: usize,

        #[command(flatten)]
        filter: FilterArgs,

        /// Delete without asking for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },

    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config_path = context::config_path(cli.config.clone());
    let loaded = reel_config::Config::load_or_default(&config_path);

    // a broken config file still gets default logging so the error is reported
    let (level, log_file) = match &loaded {
        Ok(config) => (config.logging.level.clone(), config.logging.file.clone()),
        Err(_) => ("info".to_string(), None),
    };
    let log_file = context::log_file(log_file, cli.log_to_file);
    logging::init_logging(cli.verbose, cli.quiet, &level, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    if let Commands::Config { cmd } = cli.command {
        return config::run_config(cmd, &config_path, loaded, &output);
    }

    let ctx = context::AppContext::new(config_path, loaded)?;

    match cli.command {
        Commands::Movies => movies::run_movies(&ctx, &output).await,
        Commands::Reviews { filter } => reviews::run_reviews(&ctx, &filter, &output).await,
        Commands::Stats { title } => stats::run_stats(&ctx, &title, &output).await,
        Commands::Predict { text } => predict::run_predict(&ctx, &text, &output).await,
        Commands::Post { movie, text, yes } => post::run_post(&ctx, &movie, text, yes, &output).await,
        Commands::Edit { row, filter, text } => edit::run_edit(&ctx, row, &filter, text, &output).await,
        Commands::Delete { row, filter, yes } => delete::run_delete(&ctx, row, &filter, yes, &output).await,
        Commands::Config { .. } => Ok(()), // handled before the context is built
    }
}
