use clap::{Parser, Subcommand};
use folio::head::{PageRequest, compose_head};
use folio::metadata::MetadataProvider;
use folio::{config, layout, output, server};
use maud::PreEscaped;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Per-page inputs shared by `render` and `head`.
#[derive(clap::Args, Clone)]
struct PageArgs {
    /// Page title (also used as og:site_name and twitter:title)
    #[arg(long)]
    title: String,
    /// Page description
    #[arg(long)]
    description: Option<String>,
    /// Social preview image: absolute URL or site-relative path.
    /// Defaults to the author photo.
    #[arg(long)]
    social_image: Option<String>,
}

impl PageArgs {
    fn into_request(self) -> PageRequest {
        PageRequest {
            title: self.title,
            description: self.description,
            social_image: self.social_image,
        }
    }
}

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Page metadata and production static server for a personal site")]
#[command(long_about = "\
Page metadata and production static server for a personal site

Site metadata comes from a single TOML file (site.toml by default). It drives
the <head> tags (title, description, Open Graph, Twitter Card) and the sidebar
(author, embed, menu, contacts, copyright) of every rendered page.

Social image resolution:
  https://cdn.example/pic.png  → used as-is
  /photo.jpg                   → url + path_prefix + /photo.jpg
  (none)                       → author.photo, resolved the same way

The server serves a built output directory with security headers and
gzip/brotli compression. Port: --port, else $PORT, else 8080.

Run 'folio gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the built site over HTTP
    Serve {
        /// Build output directory
        #[arg(long, default_value = "public")]
        dir: PathBuf,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = server::DEFAULT_PORT)]
        port: u16,
        /// Path prefix the site is served under (home link of the 404 page)
        #[arg(long, default_value = "/")]
        path_prefix: String,
    },
    /// Validate the site config and print a summary
    Check,
    /// Render a full page document
    Render {
        #[command(flatten)]
        page: PageArgs,
        /// Render the home page variant of the sidebar
        #[arg(long)]
        index: bool,
        /// Pre-rendered HTML fragment to use as the page body
        #[arg(long)]
        body: Option<PathBuf>,
        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the resolved head metadata for a page as JSON
    Head {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            dir,
            port,
            path_prefix,
        } => {
            init_tracing();
            let site = server::StaticSite::open(&dir)?.with_home(&path_prefix);
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::bind_and_serve(&site, port))?;
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.display());
            let provider = MetadataProvider::load(&cli.config)?;
            output::print_check_output(&provider.site_metadata());
            println!("==> Config is valid");
        }
        Command::Render {
            page,
            index,
            body,
            out,
        } => {
            let provider = MetadataProvider::load(&cli.config)?;
            let body = match body {
                Some(path) => std::fs::read_to_string(path)?,
                None => String::new(),
            };
            let document = layout::render_page(
                &provider.site_metadata(),
                &page.into_request(),
                index,
                PreEscaped(body),
            )?
            .into_string();
            match out {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, document)?;
                    println!("Generated {}", path.display());
                }
                None => print!("{document}"),
            }
        }
        Command::Head { page } => {
            let provider = MetadataProvider::load(&cli.config)?;
            let head = compose_head(&provider.site_metadata(), &page.into_request())?;
            println!("{}", serde_json::to_string_pretty(&head)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr, `info` unless `RUST_LOG` says otherwise.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
