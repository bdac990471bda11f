use anyhow::Result;
use clap::{Parser, Subcommand};
use ladle::api::HttpClient;
use ladle::config::{self, ApiConfig};
use ladle::output;
use ladle::search::{FilterField, SearchSession};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long to wait for one page before giving up
const FETCH_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "ladle")]
#[command(about = "Terminal recipe search with debounced queries and paged results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Search query (when no subcommand is given)
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,

    /// Restrict results to a cuisine (e.g. italian, mexican)
    #[arg(long)]
    cuisine: Option<String>,

    /// Restrict results to a diet (e.g. vegetarian, vegan)
    #[arg(long)]
    diet: Option<String>,

    /// Comma-separated ingredients to leave out
    #[arg(long)]
    exclude_ingredients: Option<String>,

    /// Maximum ready time in minutes
    #[arg(long)]
    max_ready_time: Option<u32>,

    /// Number of result pages to fetch (10 results each)
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search UI
    Tui {
        /// Initial query
        query: Option<String>,
    },
    /// Manage configuration (API key, endpoint)
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the config file location
    Path,
    /// Store the API key in the config file
    SetKey {
        /// Key issued for your account
        key: String,
    },
    /// Show the current configuration (key redacted)
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = ladle::logging::init()?;

    match cli.command {
        Some(Commands::Tui { query }) => run_tui(query),
        Some(Commands::Config { action }) => handle_config_command(action),
        None => {
            if cli.query.is_empty() {
                // Interactive mode
                run_tui(None)
            } else {
                // Direct query mode
                run_one_shot(&cli)
            }
        }
    }
}

#[cfg(feature = "interactive")]
fn run_tui(initial_query: Option<String>) -> Result<()> {
    let config = ApiConfig::load()?;
    let key = config.require_key()?;
    let client = HttpClient::new(config.endpoint.as_str(), key)?;
    ladle::tui::run(Arc::new(client), initial_query)
}

#[cfg(not(feature = "interactive"))]
fn run_tui(_initial_query: Option<String>) -> Result<()> {
    anyhow::bail!(
        "This build does not include the interactive UI; rebuild with the `interactive` feature"
    )
}

/// Fetch the requested pages, print them, and exit
fn run_one_shot(cli: &Cli) -> Result<()> {
    let config = ApiConfig::load()?;
    let key = config.require_key()?;
    let client = HttpClient::new(config.endpoint.as_str(), key)?;
    let mut session = SearchSession::new(Arc::new(client));

    apply_cli_filters(&mut session, cli);
    session.set_query(&cli.query.join(" "));
    session.submit();
    wait_for_page(&mut session)?;

    for _ in 1..cli.pages {
        if !session.load_next_page() {
            break;
        }
        wait_for_page(&mut session)?;
    }

    let snapshot = session.snapshot();
    if let Some(message) = snapshot.error {
        anyhow::bail!(message);
    }
    output::print_results(&snapshot, !cli.no_color)?;
    Ok(())
}

fn apply_cli_filters(session: &mut SearchSession, cli: &Cli) {
    let text_filters = [
        (FilterField::Cuisine, cli.cuisine.as_deref()),
        (FilterField::Diet, cli.diet.as_deref()),
        (
            FilterField::ExcludeIngredients,
            cli.exclude_ingredients.as_deref(),
        ),
    ];
    for (field, value) in text_filters {
        if let Some(value) = value {
            session.set_filter(field, value);
        }
    }
    if let Some(minutes) = cli.max_ready_time {
        session.set_filter(FilterField::MaxReadyTime, &minutes.to_string());
    }
}

/// Drive the session until the in-flight page lands
fn wait_for_page(session: &mut SearchSession) -> Result<()> {
    let start = Instant::now();
    while session.is_loading() {
        if start.elapsed() > FETCH_TIMEOUT {
            anyhow::bail!("Timed out waiting for the search endpoint");
        }
        std::thread::sleep(Duration::from_millis(25));
        session.poll();
    }
    Ok(())
}

fn handle_config_command(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", config::get_config_path()?.display());
        }
        ConfigAction::SetKey { key } => {
            let mut config = ApiConfig::load()?;
            config.api_key = Some(key);
            config.save()?;
            println!("API key saved to {}", config::get_config_path()?.display());
        }
        ConfigAction::Show => {
            let config = ApiConfig::load()?;
            println!("endpoint: {}", config.endpoint);
            match config.resolve_key() {
                Some(key) => println!("api key:  {}", config::redact_key(&key)),
                None => println!("api key:  (not set)"),
            }
        }
    }
    Ok(())
}
