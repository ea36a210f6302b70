use bookstock::api::BookstockApi;
use bookstock::config::BookstockConfig;
use bookstock::error::Result;
use bookstock::server;
use bookstock::store::fs::FileStore;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bookstock",
    about = "Book inventory tracker with a browser front end",
    version
)]
struct Cli {
    /// Port to listen on (overrides config.json)
    #[arg(long)]
    port: Option<u16>,

    /// Directory the data.json document lives in
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory the front-end assets are served from
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Directory to read config.json from
    #[arg(long, default_value = ".")]
    config_dir: PathBuf,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = BookstockConfig::load(&cli.config_dir).unwrap_or_default();
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }

    let store = FileStore::new(config.data_dir.clone());
    let data_file = store.data_file();
    let api = BookstockApi::new(store);
    let addr = format!("0.0.0.0:{}", config.port);

    println!();
    println!("{}", "Bookstock is running".green().bold());
    println!();
    println!("  {} http://localhost:{}", "Serving at:".cyan(), config.port);
    println!("  {} {}", "Data file: ".cyan(), data_file.display());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    server::serve(api, config.static_dir, &addr, config.workers)
}
