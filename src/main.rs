use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;

use verse_loader::config::DbConfig;
use verse_loader::{db, loader};

#[derive(Parser, Debug)]
#[command(
    name = "verse-loader",
    about = "Bulk-load verses from a CSV file into the verses table"
)]
struct Args {
    /// Path to the CSV file: a header row, then index,reference,verse rows.
    #[arg(long, default_value = "data/verses_with_index.csv")]
    file: PathBuf,

    /// Number of rows per INSERT statement.
    #[arg(long, default_value_t = 100)]
    batch_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if args.batch_size == 0 {
        writeln!(io::stderr(), "error: --batch-size must be at least 1")?;
        std::process::exit(1);
    }

    let config = DbConfig::from_env()?;
    let pool = db::connect(&config).await?;
    db::run_migrations(&pool).await?;

    let stats = loader::load_file(&pool, &args.file, args.batch_size).await?;
    pool.close().await;

    log::info!(
        "loaded {} verses in {} batches from {}",
        stats.rows,
        stats.batches,
        args.file.display()
    );
    Ok(())
}
