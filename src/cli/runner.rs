//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::{load_config, AppConfig};
use crate::error::Result;
use crate::pagination::PageSize;
use crate::source::load_dataset;
use crate::view::{render_html, render_text, NavEvent, PageSnapshot, PagedView};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;
        match &self.cli.command {
            Commands::Show { page, format } => self.show(&config, *page, *format).await,
            Commands::Browse => self.browse(&config).await,
            Commands::Serve { port, host } => {
                let mut server = config.server.clone();
                if let Some(port) = port {
                    server.port = *port;
                }
                if let Some(host) = host {
                    server.host.clone_from(host);
                }
                crate::cli::serve(&config, &server).await
            }
        }
    }

    /// Resolve the effective configuration: file (or defaults) plus CLI overrides
    pub fn config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(url) = &self.cli.url {
            config.source.url.clone_from(url);
            config.source.file = None;
        }
        if let Some(file) = &self.cli.file {
            config.source.file = Some(file.clone());
        }
        if let Some(size) = self.cli.page_size {
            config.view.page_size = PageSize::new(size)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Fetch once and print the requested page
    async fn show(&self, config: &AppConfig, page: usize, format: OutputFormat) -> Result<()> {
        let source = config.build_source()?;
        let report = load_dataset(source.as_ref()).await;
        let mut view = PagedView::from_report(config.view.page_size, report);

        while view.state().current_page() < page && view.state().has_next() {
            view.next();
        }
        if view.state().current_page() < page {
            warn!(
                requested = page,
                shown = view.state().current_page(),
                "Requested page is past the end, showing the last page"
            );
        }

        print!("{}", render_snapshot(&view.snapshot(), format)?);
        Ok(())
    }

    /// Interactive navigation on stdin/stdout
    async fn browse(&self, config: &AppConfig) -> Result<()> {
        let source = config.build_source()?;
        let mut view = PagedView::new(config.view.page_size);
        let mut updates = view.subscribe();
        view.reload(source.as_ref()).await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if updates.has_changed().unwrap_or(false) {
                let snapshot = updates.borrow_and_update().clone();
                println!("{}", render_text(&snapshot));
            }

            print!("[n]ext [p]revious [r]eload [q]uit > ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match BrowseCommand::parse(&line) {
                Some(BrowseCommand::Navigate(event)) => {
                    view.handle(event);
                }
                Some(BrowseCommand::Reload) => {
                    let status = view.reload(source.as_ref()).await;
                    info!(?status, "Reloaded");
                }
                Some(BrowseCommand::Quit) => break,
                None if line.trim().is_empty() => {}
                None => println!("Unknown command: {}", line.trim()),
            }
        }

        Ok(())
    }
}

/// Render a snapshot in the requested output format
pub fn render_snapshot(snapshot: &PageSnapshot, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(snapshot),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Html => render_html(snapshot, ".")?,
    })
}

/// One line of input in browse mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseCommand {
    Navigate(NavEvent),
    Reload,
    Quit,
}

impl BrowseCommand {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "reload" => Some(Self::Reload),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Navigate),
        }
    }
}
