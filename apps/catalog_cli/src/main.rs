use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use catalog_client::{load_config, load_config_from, CatalogApi, CatalogClient};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::domain::{MovieId, MovieSummary, RelatedKind, RelatedOptions, RelatedPayload};
use tracing::info;
use tracing_subscriber::EnvFilter;
use view_state::{
    view::{DetailView, MovieRow},
    BuiltinLists, DetailScreen, ExploreScreen, ListsScreen, PopularScreen, ScreenError,
    ViewState,
};

#[derive(Parser, Debug)]
#[command(about = "Browse the movie catalog from the terminal")]
struct Cli {
    /// Print screen state as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    /// Read settings from this file instead of ./catalog.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Popular,
    Search {
        query: String,
    },
    Detail {
        id: i64,
    },
    Related {
        id: i64,
        /// credits, videos, reviews or similar
        kind: RelatedKind,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Lists,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => load_config(),
    };
    info!(base_url = %config.base_url, language = %config.language, "catalog cli starting");
    let client = Arc::new(CatalogClient::new(config));

    match cli.command {
        Command::Popular => {
            let screen = PopularScreen::popular(client);
            screen.mount().await;
            print_movies(&screen.snapshot(), cli.json)?;
        }
        Command::Search { query } => {
            let screen = ExploreScreen::explore(client);
            screen.query_changed(query).await;
            let snapshot = screen.snapshot();
            if cli.json {
                print_json(&snapshot)?;
            } else {
                print_movies(&snapshot.results, false)?;
            }
        }
        Command::Detail { id } => {
            let screen = DetailScreen::detail(client, MovieId(id));
            screen.mount().await;
            let snapshot = screen.snapshot();
            if cli.json {
                return print_json(&snapshot);
            }
            match &snapshot.detail {
                ViewState::Success(detail) => print_detail(&DetailView::from_detail(detail)),
                other => fail(other)?,
            }
        }
        Command::Related {
            id,
            kind,
            language,
            page,
        } => {
            let options = RelatedOptions {
                language: language.unwrap_or_else(|| client.config().language.clone()),
                page,
            };
            let payload = client
                .get_related(MovieId(id), kind, &options)
                .await
                .with_context(|| format!("failed to load {kind} for movie {id}"))?;
            if cli.json {
                return print_json(&payload);
            }
            print_related(&payload);
        }
        Command::Lists => {
            let screen = ListsScreen::lists(Arc::new(BuiltinLists));
            screen.mount().await;
            let snapshot = screen.snapshot();
            if cli.json {
                return print_json(&snapshot);
            }
            let lists = match &snapshot {
                ViewState::Success(lists) => lists,
                other => return fail(other),
            };
            for list in lists {
                println!("{} ({} movies)", list.name, list.movies.len());
                println!("  {}", list.description);
                for entry in &list.movies {
                    println!("  - [{}] {}", entry.id, entry.title);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail<T>(state: &ViewState<T>) -> Result<()> {
    match state.error() {
        Some(err) => bail!(describe(err)),
        None => bail!("screen ended in state '{}'", state.tag()),
    }
}

fn describe(err: &ScreenError) -> String {
    if err.is_retryable() {
        format!("{} ({:?})", err.message(), err.category())
    } else {
        err.message().to_string()
    }
}

fn print_movies(state: &ViewState<Vec<MovieSummary>>, json: bool) -> Result<()> {
    if json {
        return print_json(state);
    }
    let movies = match state {
        ViewState::Success(movies) => movies,
        other => return fail(other),
    };
    if movies.is_empty() {
        println!("No movies found.");
    }
    for movie in movies {
        let row = MovieRow::from_summary(movie);
        println!(
            "[{:>7}] {}  *{}  {}",
            row.id.0, row.title, row.rating, row.release
        );
    }
    Ok(())
}

fn print_detail(view: &DetailView) {
    println!("{} ({})", view.title, view.year);
    if let Some(tagline) = &view.tagline {
        println!("  \"{tagline}\"");
    }
    println!("  Rating:   {}", view.rating);
    println!("  Released: {}", view.release_date);
    println!("  Runtime:  {}", view.runtime);
    println!("  Budget:   {}", view.budget);
    if !view.genres.is_empty() {
        println!("  Genres:   {}", view.genres.join(", "));
    }
    if !view.languages.is_empty() {
        println!("  Spoken:   {}", view.languages.join(", "));
    }
    for company in &view.companies {
        println!("  Studio:   {}", company.name);
    }
    if let Some(homepage) = &view.homepage {
        println!("  Homepage: {homepage}");
    }
    if let Some(overview) = &view.overview {
        println!();
        println!("{overview}");
    }
}

fn print_related(payload: &RelatedPayload) {
    match payload {
        RelatedPayload::Credits(credits) => {
            for member in &credits.cast {
                println!("{} as {}", member.name, member.character);
            }
            for member in &credits.crew {
                println!("{} ({}, {})", member.name, member.job, member.department);
            }
        }
        RelatedPayload::Videos(videos) => {
            for video in videos {
                println!("{} [{} on {}] {}", video.name, video.kind, video.site, video.key);
            }
        }
        RelatedPayload::Reviews(page) => {
            println!("page {}/{} ({} reviews)", page.page, page.total_pages, page.total_results);
            for review in &page.results {
                println!("- {}: {}", review.author, first_line(&review.content));
            }
        }
        RelatedPayload::Similar(page) => {
            println!("page {}/{} ({} movies)", page.page, page.total_pages, page.total_results);
            for movie in &page.results {
                let row = MovieRow::from_summary(movie);
                println!("[{:>7}] {}  *{}", row.id.0, row.title, row.rating);
            }
        }
    }
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
