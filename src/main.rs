use anirec::cli::commands::{Cli, Commands};
use anirec::domain::error::DomainError;
use anirec::AniRec;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct RankedTitle<'a> {
    rank: usize,
    title: &'a str,
    score: f64,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_env("ANIREC_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let app = match AniRec::new() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error initializing anirec: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(&app, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(app: &AniRec, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Recommend { title, k } => match app.recommend(&title, k).await {
            Ok(recs) => {
                let ranked: Vec<RankedTitle> = recs
                    .iter()
                    .enumerate()
                    .map(|(i, r)| RankedTitle { rank: i + 1, title: &r.title, score: r.score })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&ranked)?);
            }
            Err(e @ DomainError::UnknownItem(_)) => {
                let suggestions = app.suggest(&title).await?;
                if !suggestions.is_empty() {
                    eprintln!("Did you mean:");
                    for s in &suggestions {
                        eprintln!("  {s}");
                    }
                }
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Titles { contains, limit } => {
            for t in app.titles(contains.as_deref(), limit).await? {
                println!("{t}");
            }
        }
        Commands::Info => {
            let info = app.info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Commands::Fetch => {
            let path = app.fetch().await?;
            println!("{}", path.display());
        }
        Commands::Pack { json, out } => {
            let count = AniRec::pack(&json, &out)?;
            println!("Packed {count} items into {}", out.display());
        }
    }
    Ok(())
}
