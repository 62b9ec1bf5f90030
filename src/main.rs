mod cli;
mod github;
mod languages;
mod pagination;
mod profile;
mod render;
mod results;
mod search;
mod store;

use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::{error, info};

use cli::{Cli, Commands, ProfessionAction};
use github::GitHubClient;
use results::ResultsOutcome;
use search::Criterion;
use store::Store;

pub const USER_AGENT: &str = concat!("prospect/", env!("CARGO_PKG_VERSION"));

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering DNS + connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum redirect hops before aborting.
const MAX_REDIRECTS: usize = 5;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("prospect=info")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;
    let client = GitHubClient::from_env(http);

    let data_dir = cli.data_dir.unwrap_or_else(Store::default_dir);
    let mut store = Store::open(&data_dir)?;

    match cli.command {
        Commands::Search { query, by, page } => {
            let by = Criterion::from_str(&by)?;
            handle_search(&client, &store, &query, by, page).await?;
        }
        Commands::User { login } => {
            let details = profile::fetch_user_details(&client, &mut store, &login).await?;
            print!("{}", render::format_user_details(&details));
        }
        Commands::Languages { reset, update } => {
            handle_languages(&client, &mut store, reset, update).await?;
        }
        Commands::Profession { action } => handle_profession(&mut store, action)?,
    }
    Ok(())
}

async fn handle_search(
    client: &GitHubClient,
    store: &Store,
    query: &str,
    by: Criterion,
    page: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = results::run(client, store, query, by, page).await?;
    let view = match outcome {
        ResultsOutcome::Page(view) => view,
        ResultsOutcome::Redirect { page: target, .. } => {
            // The CLI analog of the HTTP redirect: show page 1 with a notice.
            info!(requested = page, "page out of range, showing page {target}");
            match results::run(client, store, query, by, target).await? {
                ResultsOutcome::Page(view) => view,
                ResultsOutcome::Redirect { .. } => unreachable!("page 1 never redirects"),
            }
        }
    };
    print!("{}", render::format_results(&view));
    Ok(())
}

async fn handle_languages(
    client: &GitHubClient,
    store: &mut Store,
    reset: bool,
    update: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if reset {
        languages::reset_known_languages(store)?;
        println!("Language cache cleared.");
        return Ok(());
    }
    let names = if update {
        languages::update_known_languages(client, store).await?
    } else {
        languages::known_languages(client, store).await?
    };
    print!("{}", render::format_languages(&names));
    Ok(())
}

fn handle_profession(
    store: &mut Store,
    action: ProfessionAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfessionAction::Add { name, skills } => {
            store.add_profession(&name, &skills);
            store.save()?;
            println!("Stored profession '{name}'.");
        }
        ProfessionAction::List => print!("{}", render::format_professions(store.professions())),
    }
    Ok(())
}
