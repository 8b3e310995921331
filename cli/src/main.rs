mod config;
mod presenter;
mod trigger;

use {
    crate::{config::Config, presenter::TerminalPresenter, trigger::forward_lines},
    clap::Parser,
    hello_host::{GuestSource, Loader, LoaderConfig, Session, channel},
    std::path::PathBuf,
    tokio::io::BufReader,
    tracing_subscriber::EnvFilter,
};

/// Capacity of the request channel between stdin and the session.
const REQUEST_BUFFER: usize = 16;

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// TOML config file [default: built-in defaults and HELLO_* env vars]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Guest module to load; overrides `guest.path` from the config
    #[arg(long)]
    module: Option<PathBuf>,

    /// Exit after the automatic first call instead of reading commands from
    /// stdin
    #[arg(long)]
    once: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Parse the config file, if any, and apply CLI overrides.
    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(module) = cli.module {
        cfg.guest.path = module;
    }

    // Set up tracing. Logs go to stderr so stdout only carries what the
    // presenter prints.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cfg.log_level)?)
        .with_writer(std::io::stderr)
        .init();

    let loader = Loader::new(
        LoaderConfig::new(GuestSource::File(cfg.guest.path))
            .with_entry(cfg.guest.entry)
            .with_memory_limit_pages(cfg.guest.memory_limit_pages),
    );
    let mut session = Session::new(loader, TerminalPresenter::stdout());

    if cli.once {
        session.initialize().await;
        return Ok(());
    }

    eprintln!("{}", trigger::HELP);

    let (trigger, requests) = channel(REQUEST_BUFFER);
    let stdin = tokio::spawn(forward_lines(BufReader::new(tokio::io::stdin()), trigger));

    session.run(requests).await;

    stdin.await?
}
