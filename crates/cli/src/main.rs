use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{
    classify_candidate_columns, load_inputs, InputFiles, Network, NodeData, PersonIndex, Table,
};
use rayon::prelude::*;
use session::{PersonView, RecommendationSession, SessionConfig};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

/// friend-recs - recommend items chosen by a person's friends
#[derive(Parser)]
#[command(name = "friend-recs")]
#[command(about = "Recommends items based on the choices of a person's friends", long_about = None)]
struct Cli {
    /// Pajek network of persons (.net)
    #[arg(short, long)]
    network: PathBuf,

    /// Node table with one row per person; its attributes are the items
    #[arg(long)]
    nodes: Option<PathBuf>,

    /// Item table with one row per item and one column per person
    #[arg(long)]
    items: Option<PathBuf>,

    /// Node table column with person names
    #[arg(long)]
    person_column: Option<String>,

    /// Item table column with item names
    #[arg(long)]
    item_column: Option<String>,

    /// Take the first candidate column when several qualify
    #[arg(long)]
    default_to_first: bool,

    /// JSON session configuration; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all persons in alphabetical order
    People,

    /// Show a person's items, friends and recommendations
    Show {
        /// Name of the person
        #[arg(long)]
        person: String,

        /// Number of recommendations to return
        #[arg(long)]
        limit: Option<usize>,

        /// Print the view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which table columns can name persons, items and images
    Columns,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let start = Instant::now();
    let files = InputFiles {
        network: &cli.network,
        node_table: cli.nodes.as_deref(),
        item_table: cli.items.as_deref(),
    };
    let (network, item_table) = load_inputs(files)
        .with_context(|| format!("Failed to load network {}", cli.network.display()))?;
    eprintln!("{} Loaded inputs in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::People => handle_people(&open_session(network, item_table, config)),
        Commands::Show {
            person,
            limit,
            json,
        } => handle_show(open_session(network, item_table, config), &person, limit, json)?,
        Commands::Columns => handle_columns(&network.nodes, item_table.as_ref()),
        Commands::Benchmark { requests } => {
            handle_benchmark(&open_session(network, item_table, config), requests)?
        }
    }

    Ok(())
}

/// Align the inputs, reporting why the session is not ready if it is not
fn open_session(
    network: Network,
    item_table: Option<Table>,
    config: SessionConfig,
) -> RecommendationSession {
    let session = RecommendationSession::new(network, item_table, config);
    if let Some(reason) = session.not_ready_reason() {
        eprintln!("{} {}", "Not ready:".yellow().bold(), reason);
    }
    session
}

/// Config file first, then command line overrides
fn build_config(cli: &Cli) -> Result<SessionConfig> {
    let config = match &cli.config {
        Some(path) => SessionConfig::from_json_file(path)?,
        None => SessionConfig::default(),
    };
    let mut columns = config.columns.clone();
    if let Some(column) = &cli.person_column {
        columns = columns.with_person_column(column.as_str());
    }
    if let Some(column) = &cli.item_column {
        columns = columns.with_item_column(column.as_str());
    }
    if cli.default_to_first {
        columns = columns.with_default_to_first_candidate(true);
    }
    Ok(config.with_columns(columns))
}

/// Handle the 'people' command
fn handle_people(session: &RecommendationSession) {
    let Some(dataset) = session.dataset() else {
        return;
    };
    print!("{}", "Persons:\n".bold().blue());
    for index in session.display_order() {
        if let Ok(person) = dataset.roster.get(index) {
            let chosen = dataset.choices.chosen_items(index).map(|items| items.len()).unwrap_or(0);
            println!("  {} ({} items)", person.display_name(), chosen);
        }
    }
}

/// Handle the 'show' command
fn handle_show(
    mut session: RecommendationSession,
    person: &str,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    if let Some(limit) = limit {
        session.set_limit(limit);
    }
    let selected = if session.is_ready() {
        Some(
            session
                .person_index(person)
                .ok_or_else(|| anyhow!("Person '{}' not found", person))?,
        )
    } else {
        None
    };

    let view = session.view(selected).context("Failed to build view")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

/// Handle the 'columns' command
fn handle_columns(nodes: &NodeData, item_table: Option<&Table>) {
    if let NodeData::Table(table) = nodes {
        print_candidates("Node table", table);
    }
    if let Some(table) = item_table {
        print_candidates("Item table", table);
    }
}

fn print_candidates(title: &str, table: &Table) {
    println!("{}", format!("{}:", title).bold().blue());
    let tagged = classify_candidate_columns(&table.metas).tagged();
    if tagged.is_empty() {
        println!("  {}", "No candidate columns".dimmed());
    }
    for (role, column) in tagged {
        println!("  {}: {}", role, table.metas[column].name);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(session: &RecommendationSession, requests: usize) -> Result<()> {
    let num_persons = session.dataset().map(|dataset| dataset.roster.len()).unwrap_or(0);
    if num_persons == 0 || requests == 0 {
        return Err(anyhow!("Nothing to benchmark"));
    }

    let persons: Vec<PersonIndex> = (0..requests)
        .map(|_| rand::random_range(0..num_persons))
        .collect();
    info!("Running {} requests over {} persons", requests, num_persons);

    let wall = Instant::now();
    let mut timings = persons
        .par_iter()
        .map(|&person| {
            let start = Instant::now();
            session.view(Some(person))?;
            Ok::<_, anyhow::Error>(start.elapsed())
        })
        .collect::<Result<Vec<Duration>>>()?;
    let wall_time = wall.elapsed();

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[(timings.len() as f32 * 0.95) as usize];
    let p99 = timings[(timings.len() as f32 * 0.99) as usize];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Print the three lists of a person view
fn print_view(view: &PersonView) {
    if let Some(name) = &view.name {
        println!("{}", name.bold().blue());
    }

    print!("{}", "Items: ".bold());
    if view.items.is_empty() {
        println!("{}", "No items".dimmed());
    } else {
        println!("{}", view.items.join(", "));
    }

    print!("{}", "Friends: ".bold());
    if view.friends.is_empty() {
        println!("{}", "No friends".dimmed());
    } else {
        let friends: Vec<&str> = view.friends.iter().map(|f| f.name.as_str()).collect();
        println!("{}", friends.join(", "));
    }

    println!("{}", "Recommendations:".bold());
    if view.recommendations.is_empty() {
        println!("  {}", "No recommendations".dimmed());
    }
    for (rank, recommendation) in view.recommendations.iter().enumerate() {
        println!(
            "  {}. {} - recommended by {}",
            (rank + 1).to_string().green(),
            recommendation.name,
            recommendation.recommenders.join(", ")
        );
        if let Some(image) = &recommendation.image {
            println!("     {}", image.dimmed());
        }
    }
}
