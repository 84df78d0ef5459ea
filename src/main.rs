use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodradio::{cli, config, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Seed the token cache from a Spotify refresh token
    Auth(AuthOptions),

    /// Recommend tracks for a free-form text query
    Recommend(RecommendOptions),

    /// Show the standardized audio features of a track
    Features(FeaturesOptions),

    /// Load the audio-feature dataset and show the fitted scaling
    Dataset,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Refresh token obtained from the Spotify login flow
    #[clap(long)]
    pub refresh_token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Text naming an artist or describing a mood
    pub text: String,

    /// Print the raw response envelope as JSON
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FeaturesOptions {
    /// Spotify track id (exact, case-sensitive)
    pub track_id: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file, using process environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth(opt) => cli::auth(opt.refresh_token).await,
        Command::Recommend(opt) => cli::recommend(opt.text, opt.json).await,
        Command::Features(opt) => cli::features(opt.track_id).await,
        Command::Dataset => cli::dataset().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
