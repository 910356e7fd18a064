use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use emotion_client::{EmotionClient, EmotionLabel};
use movie_data::{MovieCatalog, MovieRecord};
use recommender::{
    EmotionGenreMap, MoodOrchestrator, RecommendationEngine, RecommendationResult,
};
use sources::{LocalSource, MovieSource, OmdbSource};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// MoodReel - movies matched to how you feel
#[derive(Parser)]
#[command(name = "moodreel")]
#[command(about = "Tell it how you feel, get a few movies back", long_about = None)]
struct Cli {
    /// OMDb API key (required unless --offline)
    #[arg(long, env = "OMDB_API_KEY")]
    api_key: Option<String>,

    /// Emotion classifier endpoint
    #[arg(
        long,
        env = "MOODREEL_CLASSIFIER_URL",
        default_value = "http://localhost:8080/"
    )]
    classifier_url: String,

    /// OMDb endpoint override
    #[arg(long, default_value = sources::omdb::DEFAULT_BASE_URL)]
    omdb_url: String,

    /// Catalog file replacing the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Confidence below this shows trending picks instead of mood genres
    #[arg(long, default_value = "0.4")]
    threshold: f32,

    /// Seconds before a classifier request is abandoned
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Number of movies to aim for
    #[arg(long, default_value = "3")]
    count: usize,

    /// Skip OMDb entirely and serve from the bundled catalog
    #[arg(long)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies for one piece of text
    Recommend {
        /// How you feel, in your own words
        text: String,

        /// Print the result as JSON instead of the colored list
        #[arg(long)]
        json: bool,
    },

    /// Keep reading moods from stdin until quit
    Interactive,

    /// Show which genres each mood maps to
    Genres,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match &cli.command {
        Commands::Recommend { text, json } => {
            let orchestrator = build_orchestrator(&cli)?;
            handle_recommend(&orchestrator, text, *json).await?;
        }
        Commands::Interactive => {
            let orchestrator = build_orchestrator(&cli)?;
            handle_interactive(&orchestrator).await?;
        }
        Commands::Genres => handle_genres(),
    }

    Ok(())
}

/// Wire catalog, sources, classifier and engine together
fn build_orchestrator(cli: &Cli) -> Result<MoodOrchestrator> {
    let catalog = load_catalog(cli.catalog.as_deref())?;
    let local = Arc::new(LocalSource::new(catalog));
    let padding = local.padding_records();

    let remote: Arc<dyn MovieSource> = if cli.offline {
        local.clone()
    } else {
        let api_key = cli.api_key.clone().context(
            "An OMDb API key is required; pass --api-key, set OMDB_API_KEY, or use --offline",
        )?;
        Arc::new(OmdbSource::new(api_key).with_base_url(cli.omdb_url.as_str()))
    };

    let engine = RecommendationEngine::new(remote, local, EmotionGenreMap::default())?
        .with_padding_pool(padding)
        .with_confidence_threshold(cli.threshold)
        .with_min_results(cli.count);

    let classifier = EmotionClient::with_timeout(
        cli.classifier_url.as_str(),
        Duration::from_secs(cli.timeout_secs),
    )
    .context("Building the classifier client")?;

    Ok(MoodOrchestrator::new(classifier, engine))
}

fn load_catalog(path: Option<&std::path::Path>) -> Result<Arc<MovieCatalog>> {
    let catalog = match path {
        Some(path) => MovieCatalog::load_from_file(path)
            .with_context(|| format!("Loading catalog from {}", path.display()))?,
        None => MovieCatalog::builtin().context("Loading the bundled catalog")?,
    };
    Ok(Arc::new(catalog))
}

/// Handle the 'recommend' command
async fn handle_recommend(orchestrator: &MoodOrchestrator, text: &str, json: bool) -> Result<()> {
    let result = orchestrator.recommend_for_text(text).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }
    Ok(())
}

/// Handle the 'interactive' command
async fn handle_interactive(orchestrator: &MoodOrchestrator) -> Result<()> {
    println!(
        "{}",
        "How are you feeling? (quit to exit)".bold().blue()
    );

    loop {
        print!("{} ", ">".green());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            // stdin closed
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text.to_lowercase().as_str(), "quit" | "exit" | "bye" | "q") {
            println!("Enjoy the movie!");
            break;
        }

        let result = orchestrator.recommend_for_text(text).await;
        print_result(&result);
        println!();
    }
    Ok(())
}

/// Handle the 'genres' command
fn handle_genres() {
    let mapping = EmotionGenreMap::default();

    println!("{}", "Mood to genre mapping:".bold().blue());
    for &label in EmotionLabel::all() {
        let genres = mapping
            .queries_for(label)
            .iter()
            .map(|query| query.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}{}: {}", "• ".green(), label, genres);
    }
}

/// Format one result for the terminal
fn print_result(result: &RecommendationResult) {
    if result.low_confidence {
        println!(
            "{}",
            format!(
                "Mood unclear (confidence {:.0}%), showing trending picks instead",
                result.confidence * 100.0
            )
            .yellow()
        );
    } else {
        println!(
            "{}",
            format!(
                "Detected mood: {} (confidence {:.0}%)",
                result.emotion,
                result.confidence * 100.0
            )
            .bold()
            .blue()
        );
    }

    for (rank, movie) in result.movies.iter().enumerate() {
        println!("{}", format_movie(rank + 1, movie));
    }

    if result.partial {
        println!(
            "{}",
            format!(
                "Only {} pick(s) available right now, try again in a bit",
                result.movies.len()
            )
            .yellow()
        );
    }
}

/// One movie as a multi-line block: header, link, then whatever
/// enrichment the source delivered
fn format_movie(rank: usize, movie: &MovieRecord) -> String {
    let genre = movie.genre.map(|g| g.as_str()).unwrap_or("Trending");
    let mut lines = vec![
        format!(
            "{}. {} ({}) [{}]",
            rank.to_string().green(),
            movie.title.bold(),
            movie.year_label(),
            genre
        ),
        format!("   {}", movie.link.dimmed()),
    ];
    if let Some(director) = &movie.director {
        lines.push(format!("   Directed by {}", director));
    }
    if let Some(rating) = &movie.imdb_rating {
        lines.push(format!("   IMDb rating: {}", rating));
    }
    if let Some(poster) = &movie.poster {
        lines.push(format!("   Poster: {}", poster.dimmed()));
    }
    if let Some(plot) = &movie.plot {
        lines.push(format!("   {}", plot.italic()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_data::Genre;

    fn enriched_movie() -> MovieRecord {
        let mut movie = MovieRecord::new(
            "Duck Soup",
            Some(1933),
            "https://www.imdb.com/title/tt0023969/",
        )
        .with_genre(Genre::Comedy);
        movie.director = Some("Leo McCarey".to_string());
        movie.imdb_rating = Some("7.8".to_string());
        movie.poster = Some("https://example.com/posters/duck-soup.jpg".to_string());
        movie.plot = Some("Freedonia goes to war over a loan.".to_string());
        movie
    }

    #[test]
    fn test_format_movie_shows_every_enrichment_field() {
        let block = format_movie(1, &enriched_movie());

        assert!(block.contains("Duck Soup"));
        assert!(block.contains("[Comedy]"));
        assert!(block.contains("Directed by Leo McCarey"));
        assert!(block.contains("IMDb rating: 7.8"));
        assert!(block.contains("Poster: "));
        assert!(block.contains("duck-soup.jpg"));
        assert!(block.contains("Freedonia goes to war"));
    }

    #[test]
    fn test_format_movie_bare_record_is_two_lines() {
        let movie = MovieRecord::new("Metropolis", Some(1927), "https://example.com/metropolis");

        let block = format_movie(2, &movie);

        assert!(block.contains("[Trending]"));
        assert_eq!(block.lines().count(), 2, "Header and link only");
    }
}
