use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use comfy_table::{Table, presets, modifiers, ContentArrangement};
use terminal_size::{Width, terminal_size};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use logsift::api::{self, SearchClient};
use logsift::config::{self, DEFAULT_HOST, DEFAULT_PORT};
use logsift::form::{SearchForm, SectionKind};
use logsift::models::AppState;
use logsift::store::LogJournal;
use logsift::utils::{union_keys, value_to_cell};

/// Lines per `POST /api/logs` request when ingesting a file.
const INGEST_BATCH_LINES: usize = 500;

fn fail(context: &str, err: impl std::fmt::Display) -> ! {
    eprintln!("{}: {}", yansi::Paint::new(context).red(), err);
    process::exit(1);
}

fn client_for(server: Option<String>) -> SearchClient {
    let base = server.unwrap_or_else(|| config::get_search_api_url(DEFAULT_HOST, DEFAULT_PORT));
    match SearchClient::new(&base) {
        Ok(c) => c,
        Err(e) => fail("Failed to create HTTP client", e),
    }
}

async fn build_state(host: &str, port: u16, logfile: Option<String>) -> AppState {
    let path = logfile.map(PathBuf::from).unwrap_or_else(config::get_logfile_path);
    let journal = match LogJournal::open(&path).await {
        Ok(j) => j,
        Err(e) => fail("Failed to open log journal", e),
    };
    let client = client_for(Some(config::get_search_api_url(host, port)));
    match AppState::from_journal(journal, client, config::get_public_base_url()).await {
        Ok(state) => {
            tracing::info!(path = %path.display(), documents = state.store.len(), "Journal replayed");
            state
        }
        Err(e) => fail("Failed to replay log journal", e),
    }
}

async fn start_server(mut state: AppState, host: &str, port: u16, stylesheet: Option<String>) {
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                fail(&format!("Failed to read custom stylesheet at {}", path), e);
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            fail("Invalid host/port format", e);
        }
    };
    let app = logsift::build_app(state);
    tracing::info!(%addr, "Starting logsift server");
    println!("{} {}", yansi::Paint::new("Web server running on").green(), yansi::Paint::new(format!("http://{}", addr)).cyan());
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                fail("Server error", e);
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!("{}: {}\n{}", yansi::Paint::new(format!("Failed to bind to {}", addr)).red(), e, yansi::Paint::new("Please stop any process using this port, or start the server with a different --port value.").yellow());
            process::exit(1);
        }
    }
}

fn print_results(items: &[Value]) {
    if items.is_empty() {
        println!("(no results)");
        return;
    }
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }

    let headers = union_keys(items);
    if headers.is_empty() {
        table.set_header(vec!["Value"]);
        for item in items {
            table.add_row(vec![value_to_cell(item)]);
        }
    } else {
        table.set_header(&headers);
        for item in items {
            let row: Vec<String> = headers
                .iter()
                .map(|k| item.get(k).map(value_to_cell).unwrap_or_default())
                .collect();
            table.add_row(row);
        }
    }
    println!("\n{table}\n");
}

/// Split `name=value`; the value may itself contain `=`.
fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {:?}", raw)),
    }
}

/// Build the request through the same row model the search page uses, so
/// filter coercion matches the browser exactly.
fn build_form(filters: &[String], searches: &[String]) -> Result<SearchForm, String> {
    let mut form = SearchForm::new();
    for (section, raw_pairs) in [(SectionKind::Filters, filters), (SectionKind::Searches, searches)] {
        for raw in raw_pairs {
            let (name, value) = parse_pair(raw)?;
            let id = form.add_row(section);
            form.set_name(&id, &name);
            form.set_value(&id, &value);
        }
    }
    Ok(form)
}

async fn ingest_file(client: &SearchClient, path: &str) {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(c) => c,
        Err(e) => fail(&format!("Failed to read {}", path), e),
    };
    let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();

    let bar = ProgressBar::new(lines.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} lines")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    let mut total = 0usize;
    for chunk in lines.chunks(INGEST_BATCH_LINES) {
        match client.ingest(chunk.join("\n")).await {
            Ok(n) => {
                total += n;
                bar.inc(chunk.len() as u64);
            }
            Err(e) => {
                bar.abandon();
                fail(&format!("Ingest stopped after {} lines", total), e);
            }
        }
    }
    bar.finish_and_clear();
    println!("{} {} {}", yansi::Paint::new("Ingested").green(), total, yansi::Paint::new("log lines").green());
}

#[derive(Parser)]
#[command(
    name = "logsift",
    author,
    version,
    about = "Structured log ingest and key/value search",
    long_about = r#"logsift stores newline-delimited JSON logs and lets you search them by exact-match filters and substring searches, from the browser or the command line.

Examples:
  1) Run the server:
      logsift serve --host 127.0.0.1 --port 8080
  2) Send logs:
      logsift ingest app.ndjson
  3) Search:
      logsift search --filter level=error --search msg=timeout
"#,
    after_help = "Use `logsift <subcommand> --help` to get subcommand specific options."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request/response logging
    #[arg(long, global = true)]
    silent: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to .env file
        #[arg(long)]
        env_file: Option<String>,
        /// Journal file (defaults to $LOGFILE or `logfile` next to the binary)
        #[arg(long)]
        logfile: Option<String>,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Send a newline-delimited JSON file to a running server
    #[command(about = "Ingest a log file", long_about = "POST every non-blank line of FILE to /api/logs. Each line must be a JSON object with an RFC 3339 `timestamp` string. Ingest stops at the first rejected batch.")]
    Ingest {
        file: String,
        /// Server base URL (defaults to $SEARCH_API_URL or the default listen address)
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Search a running server
    #[command(about = "Search stored logs", long_about = "Filters match fields exactly; values that start with an integer are sent as numbers. Searches match string fields by substring.")]
    Search {
        /// Exact-match filter, NAME=VALUE (repeatable)
        #[arg(long = "filter", short = 'f')]
        filters: Vec<String>,
        /// Substring search, NAME=VALUE (repeatable)
        #[arg(long = "search", short = 's')]
        searches: Vec<String>,
        /// Zero-based page of matches
        #[arg(long)]
        page: Option<usize>,
        /// Matches per page (server default 32)
        #[arg(long)]
        limit: Option<usize>,
        /// Print raw JSON lines instead of a table
        #[arg(long)]
        json: bool,
        #[arg(long)]
        server: Option<String>,
        #[arg(long)]
        env_file: Option<String>,
    },
    /// Show resolved configuration and ping the server
    CheckConfig {
        #[arg(long)]
        env_file: Option<String>,
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }

    if cli.silent {
        api::set_silent(true);
    }

    let command = match cli.command {
        Some(c) => c,
        None => {
            config::load_env_file(None);
            let state = build_state(DEFAULT_HOST, DEFAULT_PORT, None).await;
            start_server(state, DEFAULT_HOST, DEFAULT_PORT, None).await;
            return;
        }
    };

    match command {
        Commands::Serve { host, port, env_file, logfile, stylesheet } => {
            config::load_env_file(env_file.as_deref());
            let state = build_state(&host, port, logfile).await;
            start_server(state, &host, port, stylesheet).await;
        }
        Commands::Ingest { file, server, env_file } => {
            config::load_env_file(env_file.as_deref());
            let client = client_for(server);
            ingest_file(&client, &file).await;
        }
        Commands::Search { filters, searches, page, limit, json, server, env_file } => {
            config::load_env_file(env_file.as_deref());
            let form = match build_form(&filters, &searches) {
                Ok(f) => f,
                Err(e) => fail("Invalid argument", e),
            };
            let request = form.to_request().with_page(page, limit);
            let client = client_for(server);
            match client.search(&request).await {
                Ok(items) if json => {
                    for item in &items {
                        println!("{}", value_to_cell(item));
                    }
                }
                Ok(items) => print_results(&items),
                Err(e) => fail("Search failed", e),
            }
        }
        Commands::CheckConfig { env_file, server } => {
            config::load_env_file(env_file.as_deref());
            println!("{:<16} {}", "LOGFILE", config::get_logfile_path().display());
            println!("{:<16} {}", "PUBLIC_BASE_URL", config::get_public_base_url());
            let client = client_for(server);
            println!("{:<16} {}", "SEARCH_API_URL", client.base_url());
            match client.hello().await {
                Ok(_) => println!("{}", yansi::Paint::new("Server reachable").green()),
                Err(e) => fail("Server not reachable", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(parse_pair("q=a=b"), Ok(("q".into(), "a=b".into())));
        assert_eq!(parse_pair("empty="), Ok(("empty".into(), String::new())));
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn cli_requests_use_form_coercion() {
        let form = build_form(&["code=500".into(), "level=error".into()], &["msg=500".into()]).unwrap();
        let body = serde_json::to_value(form.to_request().with_page(Some(1), None)).unwrap();
        assert_eq!(
            body,
            json!({"filters": {"code": 500, "level": "error"}, "searches": {"msg": "500"}, "page": 1})
        );
    }

    #[test]
    fn cli_parses() {
        let cli = Cli::try_parse_from(["logsift", "search", "-f", "a=1", "-s", "b=x", "--limit", "5"]).unwrap();
        match cli.command {
            Some(Commands::Search { filters, searches, limit, .. }) => {
                assert_eq!(filters, vec!["a=1"]);
                assert_eq!(searches, vec!["b=x"]);
                assert_eq!(limit, Some(5));
            }
            _ => panic!("expected search command"),
        }
    }
}
