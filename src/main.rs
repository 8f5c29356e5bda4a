use std::time::Duration;

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};

use musicadvisor::{cli, config, error, info};

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
    /// Accounts service base URL
    #[clap(long)]
    access: Option<String>,

    /// Web API base URL
    #[clap(long)]
    resource: Option<String>,

    /// Items per page
    #[clap(long)]
    page: Option<u32>,

    /// Seconds to wait for the authorization code
    #[clap(long)]
    timeout: Option<u64>,

    /// Open the authorization link in the default browser
    #[clap(long)]
    open_browser: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let mut settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Cannot load settings. Err: {}", e),
    };
    if let Some(access) = cli.access {
        settings.access_server = access;
    }
    if let Some(resource) = cli.resource {
        settings.resource_server = resource;
    }
    if let Some(page) = cli.page {
        settings.page_size = page;
    }
    if let Some(secs) = cli.timeout {
        settings.auth_timeout = Duration::from_secs(secs);
    }
    settings.open_browser = cli.open_browser;

    if let Err(e) = settings.validate() {
        error!("Invalid settings. Err: {}", e);
    }

    info!("Type `auth` to log in, `exit` to quit.");
    if let Err(e) = cli::run(settings).await {
        error!("{}", e);
    }
}
