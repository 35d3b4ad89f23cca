use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use catalog_client::{
    AutoConfirm, CatalogClient, Confirm, DeleteOutcome, HttpCatalogApi, ProductResource, View,
};
use catalog_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "catalog",
    about = "Product catalog service and client",
    after_help = "Examples:\n  catalog serve\n  catalog list --page 2\n  catalog delete 13 --yes"
)]
pub struct Cli {
    /// Catalog service URL; defaults to `client.base_url` from the settings.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session token sent as the `catalog_session` cookie.
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Serve the catalog HTTP API until Ctrl-C")]
    Serve,
    #[command(about = "Print one page of the product list")]
    List {
        #[arg(long, default_value_t = 1)]
        page: u64,
    },
    #[command(about = "Delete a product after confirmation")]
    Delete {
        id: u64,
        /// Page to load before deleting.
        #[arg(long, default_value_t = 1)]
        page: u64,
        #[arg(long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::load().with_context(|| "failed to load catalog settings")?;
    catalog_telemetry::init(&settings.telemetry)?;

    match cli.command {
        Command::Serve => {
            catalog_app::run(settings).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::List { page } => {
            let mut client = connect(&settings, cli.base_url, cli.session)?;
            load_page(&mut client, page).await;
            println!("{}", client.view());
            Ok(exit_code(&client.view()))
        }
        Command::Delete { id, page, yes } => {
            let mut client = connect(&settings, cli.base_url, cli.session)?;
            load_page(&mut client, page).await;
            if let View::Error(message) = client.view() {
                anyhow::bail!("could not load products: {message}");
            }

            let outcome = if yes {
                client.delete(id, &mut AutoConfirm).await
            } else {
                let stdin = io::stdin();
                let mut confirm = PromptConfirm::new(stdin.lock(), io::stderr());
                client.delete(id, &mut confirm).await
            };

            println!("{}", client.view());
            Ok(match outcome {
                DeleteOutcome::Deleted(_) => ExitCode::SUCCESS,
                DeleteOutcome::Cancelled => {
                    eprintln!("Deletion cancelled.");
                    ExitCode::SUCCESS
                }
                DeleteOutcome::Failed(_) => ExitCode::FAILURE,
            })
        }
    }
}

fn connect(
    settings: &Settings,
    base_url: Option<String>,
    session: Option<String>,
) -> anyhow::Result<CatalogClient<HttpCatalogApi>> {
    let base_url = base_url.unwrap_or_else(|| settings.client.base_url.clone());
    let session = session.or_else(|| settings.client.session_token.clone());

    let api = HttpCatalogApi::new(&base_url, session.as_deref())
        .with_context(|| format!("invalid catalog url '{base_url}'"))?;
    Ok(CatalogClient::new(api))
}

async fn load_page(client: &mut CatalogClient<HttpCatalogApi>, page: u64) {
    client.mount().await;
    if page != 1 {
        client.change_page(page).await;
        if client.state().current_page != page {
            tracing::warn!(page, "requested page is out of range; showing page 1");
        }
    }
}

fn exit_code(view: &View) -> ExitCode {
    match view {
        View::Error(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

/// Confirmation prompt over a line reader.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, id: u64, product: Option<&ProductResource>) -> bool {
        let label = match product {
            Some(product) => format!("\"{}\" (#{id})", product.name),
            None => format!("product #{id}"),
        };
        if write!(self.output, "Are you sure you want to delete {label}? [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}
