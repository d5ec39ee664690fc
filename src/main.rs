use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use marquee::models::{select_trailer, watch_url};
use marquee::store::{CatalogStore, FetchState};
use marquee::tmdb::TmdbClient;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn check_env() -> Result<()> {
    if env::var("TMDB_API_KEY").is_err() {
        anyhow::bail!("Missing required environment variable: TMDB_API_KEY");
    }
    info!("All required environment variables are set");
    Ok(())
}

fn print_slot(label: &str, state: &FetchState) {
    println!("\n{label}");
    match state {
        FetchState::Ready(movies) if movies.is_empty() => println!("  (no results)"),
        FetchState::Ready(movies) => {
            for movie in movies {
                println!("  {:>4.1}  {}", movie.vote_average, movie.title);
            }
        }
        FetchState::Failed(err) => println!("  fetch failed: {err}"),
        FetchState::Idle | FetchState::Loading => println!("  (no data)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    match dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }
    init_tracing();
    check_env()?;

    let client = Arc::new(TmdbClient::from_env()?);
    let store = CatalogStore::new(client);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("browse") => {
            store.refresh_all().await;
            print_slot("Popular", &store.popular());
            print_slot("Top rated", &store.top_rated());
            print_slot("Upcoming", &store.upcoming());
            print_slot("Now playing", &store.now_playing());
        }
        Some("search") => {
            let query = args.get(1).map(String::as_str).unwrap_or("");
            store.search(query).await;
            print_slot(&format!("Search results for '{query}'"), &store.search_results());
        }
        Some("details") => {
            let id = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("usage: marquee details <movie_id>"))?;
            let movie = store.movie_details(id).await?;
            println!("{} ({:.1}/10)", movie.title, movie.vote_average);
            if !movie.overview.is_empty() {
                println!("\n{}", movie.overview);
            }
            if let Some(url) = movie.poster_url() {
                println!("\nPoster: {url}");
            }
            let trailers = store.movie_trailers(id).await?;
            match select_trailer(&trailers) {
                Some(trailer) => println!("Trailer: {}", watch_url(&trailer.key)),
                None => println!("No trailers available"),
            }
        }
        Some(other) => {
            anyhow::bail!("unknown command '{}' (expected browse, search or details)", other)
        }
    }
    Ok(())
}
