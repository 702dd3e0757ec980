use clap::{Parser, Subcommand};
use tunegraph::graph::{ask, GraphView, Layer, ViewFormat};
use tunegraph::ingest::build_graph_from_source;
use tunegraph::{recommend_artists, recommend_users, Config, PatternExtractor, Shell};
use std::path::PathBuf;
use anyhow::Result;

#[derive(Parser, Debug)]
#[command(name = "tunegraph")]
#[command(about = "Build a people/artists/genres graph from text and query it")]
struct Args {
    /// Statement file or directory (overrides `source` in config.toml)
    #[arg(short, long)]
    source: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive shell (default)
    Shell,
    /// Recommend artists to a person
    RecommendArtists {
        person: String,
        /// Also follow genre derivations one hop away
        #[arg(short, long)]
        enhance: bool,
    },
    /// Recommend people to follow
    RecommendUsers { person: String },
    /// Answer a yes/no relation question, e.g. "Does Ana listen to Queen?"
    Ask { question: String },
    /// Show a node's type and outgoing edges
    Info { node: String },
    /// Print a layer: all, artists-genres, artists-users, genres, users
    View {
        #[arg(default_value = "all")]
        layer: String,
        /// dot or json (defaults to [view] format in config.toml)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load_with_source(args.source)?;

    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", config.log_level())
    ).init();

    log::info!("Starting TuneGraph v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Source: {}", config.source().display());

    let extractor = PatternExtractor::with_verbs(&config.extraction.verbs)?;
    let graph = build_graph_from_source(config.source(), &extractor)?;

    match args.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let mut shell = Shell::new(graph, extractor)
                .with_enhance_default(config.recommend.enhance);
            shell.run().await?;
        }
        Command::RecommendArtists { person, enhance } => {
            let enhance = enhance || config.recommend.enhance;
            print_recommendations(&person, recommend_artists(&graph, &person, enhance));
        }
        Command::RecommendUsers { person } => {
            print_recommendations(&person, recommend_users(&graph, &person));
        }
        Command::Ask { question } => {
            println!("{}", ask(&graph, &extractor, &question));
        }
        Command::Info { node } => match graph.node(&node) {
            Some(node) => println!("{}", serde_json::to_string_pretty(node)?),
            None => {
                log::warn!("Node not found: {}", node);
                println!("null");
            }
        },
        Command::View { layer, format } => {
            let layer: Layer = layer.parse()?;
            let format = match format {
                Some(f) => f.parse::<ViewFormat>()?,
                None => config.view.format,
            };
            print!("{}", GraphView::of(&graph, layer).render(format)?);
        }
    }

    Ok(())
}

/// Print one recommendation per line; nothing for a non-person.
fn print_recommendations(person: &str, recommendations: Option<Vec<String>>) {
    match recommendations {
        Some(recs) => {
            log::info!("{} recommendation(s) for {}", recs.len(), person);
            for rec in recs {
                println!("{}", rec);
            }
        }
        None => log::warn!("'{}' is not a person in the graph", person),
    }
}
