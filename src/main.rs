use tillroll::{
    engine::engine::Engine,
    engine::window::TimeWindow,
    storage::{DatasetStore, UploadDir, DEFAULT_UPLOAD_DIR},
    stream_query, upload, validate_file, SheetError,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::stdout;
use std::path::PathBuf;

/// Sums point-of-sale amounts recorded inside a time-of-day window
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Directory holding uploaded sales sheets
    #[arg(long, global = true, env = "TILLROLL_UPLOAD_DIR", default_value = DEFAULT_UPLOAD_DIR)]
    upload_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check a sales sheet and store it as the latest dataset
    Upload { file: PathBuf },

    /// Report whether a sales sheet has the time and amount columns
    Validate { file: PathBuf },

    /// Sum the amounts between two times of day (HH:MM:SS, inclusive)
    Query {
        #[arg(long)]
        start: String,

        #[arg(long)]
        end: String,

        /// Read this file instead of the latest upload
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let engine = Engine::new();
    let store = UploadDir::new(args.upload_dir);

    match args.command {
        Command::Upload { file } => {
            let stored = upload(&engine, &store, &file)
                .with_context(|| format!("Failed to upload '{}'", file.display()))?;
            println!("File uploaded successfully: {}", stored.display());
        }
        Command::Validate { file } => {
            let valid = validate_file(&engine, &file)
                .with_context(|| format!("Failed to read '{}'", file.display()))?;
            if !valid {
                println!("invalid");
                std::process::exit(1);
            }
            println!("valid");
        }
        Command::Query { start, end, file } => {
            let window = TimeWindow::for_query(&start, &end)?;
            let path = match file {
                Some(path) => path,
                None => store.latest()?.ok_or_else(|| SheetError::NoUploadedFile {
                    dir: store.root().to_path_buf(),
                })?,
            };

            let result = stream_query(engine, path, window).await?;
            result.write_csv(stdout())?;
        }
    }

    Ok(())
}
