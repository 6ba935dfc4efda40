mod cli;
mod commands;
mod error;
mod output;
mod session_file;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use board_client::{ApiClient, ClientConfig};
use cli::{Cli, Commands};
use commands::Context;
use session_file::SessionFile;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => error::handle_error(err),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let session_file = SessionFile::resolve(cli.session_file);

    let mut config = ClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.base_url = api_url;
    }
    if config.session_token.is_none() {
        config.session_token = session_file.token_for(&config.base_url);
    }

    let client = ApiClient::new(config)?;
    let ctx = Context::new(client, session_file, cli.format);

    match cli.command {
        Commands::Login(args) => commands::auth::login(&ctx, args).await,
        Commands::Register(args) => commands::auth::register(&ctx, args).await,
        Commands::Logout => commands::auth::logout(&ctx).await,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Posts { command } => commands::posts::run(&ctx, command).await,
        Commands::Grants { command } => commands::grants::run(&ctx, command).await,
        Commands::Admin { command } => commands::admin::run(&ctx, command).await,
        Commands::StreamUrl { post_id } => commands::stream::stream_url(&ctx, post_id),
        Commands::Download(args) => commands::stream::download(&ctx, args).await,
    }
}
