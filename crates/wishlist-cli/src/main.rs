use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{account, config, lists, movie, AppContext};
use std::path::PathBuf;
use tracing::debug;
use wishlist_config::{base_path_override, Config, PathManager};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "wishlist")]
#[command(about = "Movie Wishlist - keep track of what to watch and what you've seen")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily rotated file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Editable movie fields shared by `add` and `edit`
#[derive(clap::Args, Debug, Default)]
pub struct MovieFields {
    /// Title (required when adding manually)
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub genre: Option<String>,

    /// Release year
    #[arg(long)]
    pub year: Option<i32>,

    /// Runtime in minutes
    #[arg(long)]
    pub runtime: Option<u32>,

    #[arg(long)]
    pub poster_url: Option<String>,

    /// Rating from 1 to 10
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub rating: Option<u8>,

    #[arg(long)]
    pub review: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Library(LibraryCommands),
    /// View or change settings
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

/// Commands that talk to the backend
#[derive(Subcommand)]
enum LibraryCommands {
    /// List every movie, whatever its status
    All,
    /// List movies on the wishlist
    Wishlist,
    /// List watched movies
    Watched,
    /// Search the metadata provider for movies to add
    #[command(long_about = "Search the external metadata provider. Without a query the configured default search is used. Pass --add with an IMDb id from the results to save it to the wishlist.")]
    Discover {
        /// Search text
        query: Option<String>,

        /// Add the result with this IMDb id to the wishlist
        #[arg(long, value_name = "IMDB_ID")]
        add: Option<String>,
    },
    /// Add a movie, either from explicit fields or an IMDb id
    Add {
        /// Look the movie up by IMDb id instead of using the fields below
        #[arg(long, value_name = "IMDB_ID", conflicts_with = "title")]
        imdb: Option<String>,

        #[command(flatten)]
        fields: MovieFields,
    },
    /// Edit a movie's fields; unspecified fields keep their current value
    Edit {
        id: u64,

        #[command(flatten)]
        fields: MovieFields,
    },
    /// Show a movie with its comments
    Show { id: u64 },
    /// Like or unlike a movie
    Like { id: u64 },
    /// Comment on a movie
    Comment {
        id: u64,
        /// Comment text (prompted for when omitted)
        text: Option<String>,
    },
    /// Mark a movie as watched
    Watch {
        id: u64,

        /// Rating from 1 to 10
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: Option<u8>,

        #[arg(long)]
        review: Option<String>,
    },
    /// Move a watched movie back to the wishlist
    Unwatch { id: u64 },
    /// Delete a movie
    Delete {
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Sign in
    Login {
        #[arg(long)]
        username: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the current user
    Whoami,
    /// Create an account on the backend
    Signup {
        #[arg(long)]
        username: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration and file locations
    Show,
    /// Set the backend base URL
    SetUrl { url: String },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = match base_path_override() {
        Some(base) => PathManager::from_base(base),
        None => PathManager::new().map_err(|e| eyre!("{}", e))?,
    };
    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    logging::init_logging(cli.verbose, cli.quiet, &config.logging, log_file)
        .map_err(|e| eyre!("{}", e))?;

    debug!(
        config_file = %config_file.display(),
        api = %config.api_base_url(),
        "Configuration loaded"
    );

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Config { cmd } => config::run_config(cmd, &paths, config, &output),
        Commands::Library(command) => match config.validate() {
            Ok(()) => {
                let ctx = AppContext::new(paths, config);
                run_command(command, &ctx, &output).await
            }
            Err(e) => Err(eyre!("Invalid configuration: {}", e)),
        },
    };

    // Machine formats get the failure as a JSON record instead of a report
    if let Err(e) = &result {
        if !output.is_human() {
            output.error(e.to_string());
            std::process::exit(1);
        }
    }
    result
}

async fn run_command(command: LibraryCommands, ctx: &AppContext, output: &output::Output) -> color_eyre::Result<()> {
    match command {
        LibraryCommands::All => lists::run_all(ctx, output).await,
        LibraryCommands::Wishlist => lists::run_wishlist(ctx, output).await,
        LibraryCommands::Watched => lists::run_watched(ctx, output).await,
        LibraryCommands::Discover { query, add } => lists::run_discover(ctx, query, add, output).await,
        LibraryCommands::Add { imdb, fields } => movie::run_add(ctx, imdb, fields, output).await,
        LibraryCommands::Edit { id, fields } => movie::run_edit(ctx, id, fields, output).await,
        LibraryCommands::Show { id } => movie::run_show(ctx, id, output).await,
        LibraryCommands::Like { id } => movie::run_like(ctx, id, output).await,
        LibraryCommands::Comment { id, text } => movie::run_comment(ctx, id, text, output).await,
        LibraryCommands::Watch { id, rating, review } => movie::run_watch(ctx, id, rating, review, output).await,
        LibraryCommands::Unwatch { id } => movie::run_unwatch(ctx, id, output).await,
        LibraryCommands::Delete { id, yes } => movie::run_delete(ctx, id, yes, output).await,
        LibraryCommands::Login { username } => account::run_login(ctx, username, output),
        LibraryCommands::Logout => account::run_logout(ctx, output),
        LibraryCommands::Whoami => account::run_whoami(ctx, output),
        LibraryCommands::Signup { username, email } => account::run_signup(ctx, username, email, output).await,
    }
}
