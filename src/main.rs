use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use navshell::config::ShellSettings;
use navshell::console::run_console;
use navshell::menu::routes::RouteTable;
use navshell::nav::startup::{MenuSource, load_menu_config};
use navshell::server::{resolve_path, run_http_server};

#[derive(Debug, Parser)]
#[command(name = "navshell", about = "Navigation shell for an administrative console")]
struct Cli {
    /// Menu configuration file (overrides NAVSHELL_MENU_CONFIG).
    #[arg(long, global = true)]
    menu: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open the desktop console.
    Console,
    /// Print the route table synthesized from the menu.
    Routes {
        #[arg(long)]
        json: bool,
    },
    /// Resolve the active entry and breadcrumb trail for a path.
    Resolve {
        path: String,
        #[arg(long)]
        json: bool,
    },
    /// Serve the route table and resolver over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _file_log_guard = init_tracing()?;

    let cli = Cli::parse();
    let mut settings = ShellSettings::from_env().context("failed to load configuration")?;
    if let Some(menu) = cli.menu {
        settings.menu_config = Some(menu);
    }
    let source = MenuSource::from_path(settings.menu_config.clone());

    match cli.command {
        Commands::Console => run_console(&settings, source)?,
        Commands::Routes { json } => {
            let config = load_menu_config(&source).await?;
            let table = RouteTable::synthesize(&config.tree);
            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                for route in table.routes() {
                    println!("{}\t{}\t{}", route.path, route.key, route.view);
                }
            }
        }
        Commands::Resolve { path, json } => {
            let config = load_menu_config(&source).await?;
            let table = RouteTable::synthesize(&config.tree);
            let home_label = config
                .home_label
                .as_deref()
                .unwrap_or(&settings.home_label);
            let body = resolve_path(&config.tree, &table, home_label, &path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("active: {}", body.selection.active_key.as_deref().unwrap_or("-"));
                println!(
                    "ancestor: {}",
                    body.selection.ancestor_key.as_deref().unwrap_or("-")
                );
                println!("view: {}", body.view.as_deref().unwrap_or("(not found)"));
                let trail = body
                    .breadcrumbs
                    .iter()
                    .map(|crumb| crumb.label.as_str())
                    .collect::<Vec<_>>();
                println!("trail: {}", trail.join(" > "));
            }
        }
        Commands::Serve { bind } => {
            let config = load_menu_config(&source).await?;
            run_http_server(config, settings.home_label.clone(), &bind).await?;
        }
    }

    Ok(())
}

fn init_tracing() -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,navshell=debug"));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    let (file_layer, guard) = match std::env::var("NAVSHELL_LOG_DIR") {
        Ok(dir) if !dir.trim().is_empty() => {
            let directive =
                std::env::var("NAVSHELL_FILE_LOG").unwrap_or_else(|_| "debug".to_owned());
            let file_filter = EnvFilter::try_new(&directive)
                .with_context(|| format!("invalid NAVSHELL_FILE_LOG directive `{directive}`"))?;
            let appender = tracing_appender::rolling::daily(dir.trim(), "navshell.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(file_filter);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(guard)
}
