//! Load command implementation.

use crate::cli::LoadArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{Formatter, IngestSummary};
use reelcheck_domain::{Dataset, LoadSummary};
use reelcheck_gatekeeper::{CapRegistry, MovieIngestor, RatingIngestor, UserIngestor};
use reelcheck_store::SqliteStore;
use tracing::info;

/// Everything a load produced.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Per-dataset ingestion counters
    pub ingested: Vec<IngestSummary>,
    /// Rows written to the database
    pub loaded: LoadSummary,
}

/// Execute the load command.
pub fn execute_load(args: LoadArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let outcome = run_load(&args, config)?;

    println!("{}", formatter.format_ingest(&outcome.ingested)?);
    println!("{}", formatter.format_load(&outcome.loaded)?);
    if !formatter.is_quiet() && outcome.loaded.ratings_dropped() > 0 {
        println!(
            "{}",
            formatter.warning(&format!(
                "{} rating(s) referenced a movie or user that was not loaded",
                outcome.loaded.ratings_dropped()
            ))
        );
    }

    Ok(())
}

/// Validate all three files, then replace the database contents with them.
///
/// Nothing is written unless every file ingests without a fatal error, and a
/// failed load leaves the previous contents in place.
pub fn run_load(args: &LoadArgs, config: &Config) -> Result<LoadOutcome> {
    let inputs = &config.inputs;
    let movies_path = args.movies.as_ref().unwrap_or(&inputs.movies);
    let users_path = args.users.as_ref().unwrap_or(&inputs.users);
    let ratings_path = args.ratings.as_ref().unwrap_or(&inputs.ratings);
    let caps_path = args.caps.as_ref().unwrap_or(&inputs.caps);
    let database = args.database.as_ref().unwrap_or(&config.database.path);

    let movies = MovieIngestor::new(config.ingest.clone()).ingest_path(movies_path)?;
    let caps = CapRegistry::from_path(caps_path)?;
    let users = UserIngestor::new(config.ingest.clone(), caps).ingest_path(users_path)?;
    let ratings = RatingIngestor::new(config.ingest.clone()).ingest_path(ratings_path)?;

    let ingested = vec![
        IngestSummary::from_report("movies", &movies, movies.records.len()),
        IngestSummary::from_report("users", &users, users.records.len()),
        IngestSummary::from_report("ratings", &ratings, ratings.records.len()),
    ];

    let dataset = Dataset::new(movies.records, users.records, ratings.records);

    info!(database = %database.display(), "Loading dataset");
    let mut store = SqliteStore::new(database)?;
    let loaded = store.replace(&dataset)?;

    Ok(LoadOutcome { ingested, loaded })
}
