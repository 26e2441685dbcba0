//! Terminal client for the URL shortener.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode (default)
//! shortener
//!
//! # List short URLs
//! shortener list
//!
//! # Shorten a URL, optionally with a custom alias
//! shortener shorten https://example.com/very/long/url --alias my-alias
//!
//! # Delete an alias (asks for confirmation unless --yes)
//! shortener delete my-alias
//!
//! # Copy a short URL to the clipboard
//! shortener copy my-alias
//! ```
//!
//! # Environment Variables
//!
//! See [`url_shortener_client::config`]. A `.env` file in the working
//! directory is loaded first.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Input, Select};
use tracing_subscriber::EnvFilter;

use url_shortener_client::api::HttpShortenerClient;
use url_shortener_client::config::Config;
use url_shortener_client::domain::delete_flow::DeletePhase;
use url_shortener_client::ui::clipboard::copy_with_notice;
use url_shortener_client::ui::notify::{Notification, Notifier, TerminalNotifier};
use url_shortener_client::ui::prompt::{AutoConfirm, Confirmer, TerminalConfirmer};
use url_shortener_client::ui::{App, ShortenForm, SubmitOutcome, UrlList};

/// Client for a URL shortening service.
#[derive(Parser)]
#[command(name = "shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Service origin (overrides SHORTENER_ORIGIN)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// API base path or URL (overrides SHORTENER_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List short URLs
    List,

    /// Shorten a URL
    Shorten {
        /// The full URL to shorten
        url: String,

        /// Custom alias (optional, assigned by the service if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Delete a short URL by alias
    Delete {
        alias: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Copy a short URL to the clipboard
    Copy { alias: String },

    /// Interactive menu (default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    config.validate().context("Invalid configuration")?;

    init_tracing(&config);
    config.print_summary();

    let client = HttpShortenerClient::new(config.api_base_url()?, config.request_timeout())
        .context("Failed to build HTTP client")?;

    let confirmer: Arc<dyn Confirmer> = match &cli.command {
        Some(Commands::Delete { yes: true, .. }) => Arc::new(AutoConfirm(true)),
        _ => Arc::new(TerminalConfirmer),
    };
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier);
    let app = App::new(Arc::new(client), Arc::clone(&notifier), confirmer)
        .with_display_width(config.url_display_width);

    let code = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::List => {
            app.mount().await;
            print_list(&app.list());
            ExitCode::SUCCESS
        }
        Commands::Shorten { url, alias } => {
            let form = app.form();
            form.set_full_url(url);
            form.set_custom_alias(alias.unwrap_or_default());
            match submit_with_progress(&form).await {
                SubmitOutcome::Created(_) => ExitCode::SUCCESS,
                SubmitOutcome::Skipped | SubmitOutcome::Failed(_) => ExitCode::FAILURE,
            }
        }
        Commands::Delete { alias, .. } => {
            app.mount().await;
            match app.list().delete(&alias).await {
                DeletePhase::Done => ExitCode::SUCCESS,
                DeletePhase::Idle => {
                    println!("{}", "❌ Cancelled".red());
                    ExitCode::SUCCESS
                }
                DeletePhase::Pending | DeletePhase::RolledBack => ExitCode::FAILURE,
            }
        }
        Commands::Copy { alias } => {
            app.mount().await;
            if copy_alias(&app.list(), &alias, notifier.as_ref()) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Interactive => {
            run_interactive(&app, notifier.as_ref()).await?;
            ExitCode::SUCCESS
        }
    };

    app.teardown();
    Ok(code)
}

/// Installs the tracing subscriber on stderr so logs never mix with UI output.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn print_list(list: &UrlList) {
    println!("{}", "🔗 Short URLs".bright_blue().bold());
    println!();
    println!("{}", list.render());
    println!();
}

fn copy_alias(list: &UrlList, alias: &str, notifier: &dyn Notifier) -> bool {
    match list.find(alias) {
        Some(entry) => copy_with_notice(&mut io::stdout(), &entry.short_url, notifier),
        None => {
            notifier.notify(Notification::error(
                "Failed to copy URL",
                Some(format!("Unknown alias: {alias}")),
            ));
            false
        }
    }
}

const ACTIONS: [&str; 6] = [
    "Shorten a URL",
    "Delete a short URL",
    "Copy a short URL",
    "Show details",
    "Refresh",
    "Quit",
];

/// Menu loop: render the list, run one action, repeat.
async fn run_interactive(app: &App, notifier: &dyn Notifier) -> Result<()> {
    app.mount().await;
    let list = app.list();
    // Kept across iterations so a failed submit can be retried without retyping
    let form = app.form();

    loop {
        print_list(&list);

        let Some(choice) = Select::new()
            .with_prompt("Action")
            .items(&ACTIONS)
            .default(0)
            .interact_opt()?
        else {
            break;
        };

        match choice {
            0 => shorten_interactive(&form).await?,
            1 => {
                if let Some(alias) = pick_alias(&list, "Delete which alias?")? {
                    list.delete(&alias).await;
                }
            }
            2 => {
                if let Some(alias) = pick_alias(&list, "Copy which alias?")? {
                    copy_alias(&list, &alias, notifier);
                }
            }
            3 => {
                if let Some(alias) = pick_alias(&list, "Show which alias?")?
                    && let Some(details) = list.render_details(&alias)
                {
                    println!();
                    println!("{details}");
                }
            }
            4 => app.refresh().await,
            _ => break,
        }
    }

    Ok(())
}

async fn shorten_interactive(form: &ShortenForm) -> Result<()> {
    println!();
    println!("{}", "✂️  Shorten URL".bright_blue().bold());

    let full_url: String = Input::new()
        .with_prompt("Full URL")
        .with_initial_text(form.full_url())
        .allow_empty(true)
        .interact_text()?;
    let custom_alias: String = Input::new()
        .with_prompt("Custom alias (optional)")
        .with_initial_text(form.custom_alias())
        .allow_empty(true)
        .interact_text()?;

    form.set_full_url(full_url);
    form.set_custom_alias(custom_alias);

    if !form.can_submit() {
        println!("{}", "⚠️  A URL is required".yellow());
        return Ok(());
    }

    submit_with_progress(form).await;
    Ok(())
}

/// Submits the form, printing the in-flight label once the request is out.
async fn submit_with_progress(form: &ShortenForm) -> SubmitOutcome {
    let submit = form.submit();
    tokio::pin!(submit);

    tokio::select! {
        biased;
        outcome = &mut submit => outcome,
        () = std::future::ready(()) => {
            println!("{}", form.submit_label().bright_black());
            submit.await
        }
    }
}

/// Lets the user pick a row. Pending rows are not offered.
fn pick_alias(list: &UrlList, prompt: &str) -> Result<Option<String>> {
    let rows: Vec<_> = list
        .rows()
        .unwrap_or_default()
        .into_iter()
        .filter(|row| row.delete_enabled())
        .collect();

    if rows.is_empty() {
        println!("{}", "  No short URLs yet".yellow());
        return Ok(None);
    }

    let labels: Vec<String> = rows
        .iter()
        .map(|row| format!("{:<20} {}", row.alias, row.short_url))
        .collect();

    let picked = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(picked.map(|i| rows[i].alias.clone()))
}

