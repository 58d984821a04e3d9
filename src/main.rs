use clap::{Parser, Subcommand};
use ppf_site::{config, generate, i18n, output, scan, server};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "ppf-site")]
#[command(about = "Bilingual marketing site and lead-form server for a PPF studio")]
#[command(long_about = "\
Bilingual marketing site and lead-form server for a PPF studio

The content directory is the data source. The site is generated once per
locale: English at /, Arabic under /ar. Lead forms post to the bundled
server, which filters spam and emails the sales inbox for the customer's
country.

Content structure:

  content/
  ├── config.toml                  # Site, forms, mail and server settings (optional)
  ├── i18n/
  │   ├── en.toml                  # UI strings (required, fallback for Arabic)
  │   └── ar.toml
  ├── data/
  │   ├── branches.toml            # [[branch]] with coordinates and phones
  │   ├── services.toml            # [[service]]
  │   ├── testimonials.toml        # [[testimonial]]
  │   ├── brands.toml              # [[brand]] logo strip
  │   └── comparison.toml          # columns + [[row]]
  ├── pages/
  │   ├── 040-about.en.md          # Page (numbered = shown in nav)
  │   ├── 040-about.ar.md          # Same page in Arabic
  │   ├── 060-instagram.md         # Link page (URL-only .md → external nav link)
  │   └── warranty.md              # No number = hidden from nav
  ├── gallery/
  │   ├── 001-porsche-911.jpg      # Ordered by number prefix
  │   ├── 001-porsche-911.txt      # English caption
  │   └── 001-porsche-911.ar.txt   # Arabic caption
  └── assets/                      # Logos, icons → copied to /assets/

Run 'ppf-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".ppf-site-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content and report missing translations
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Serve the form API and the generated site
    Serve(ServeArgs),
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(long)]
    bind: Option<String>,

    /// Only serve the API; leave static files to another server
    #[arg(long)]
    no_static: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report, &cli.output);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report, &cli.output);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            output::print_check_output(&scan::check_content(&manifest));
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Serve(args) => {
            init_tracing();
            let site_config = config::load_config(&cli.source)?;
            let translations = i18n::Translations::load(&cli.source)?;
            let bind = args.bind.unwrap_or_else(|| site_config.server.bind.clone());
            let site_dir = (!args.no_static).then(|| cli.output.clone());
            if let Some(dir) = &site_dir
                && !dir.join("index.html").exists()
            {
                tracing::warn!(dir = %dir.display(), "no generated site found; run 'ppf-site build' first");
            }

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(server::serve(site_config, translations, &bind, site_dir))?;
        }
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(temp_dir.join("manifest.json"), json)?;
    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default: this crate and request traces at info).
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ppf_site=info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
