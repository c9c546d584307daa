use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod instances;
mod model;
mod stats;
mod symmetry;

use instances::{
    BatchConfig, ElecInstance, KissingNumberInstance, MaxCutInstance, PackingInstance,
    run_batch, write_instance,
};
use stats::{aggregated_row, detailed_rows, extract_from_file};
use symmetry::Variant;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "symcuts")]
#[command(about = "symcuts - symmetry handling inequalities and symmetry statistics")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// CLI problem selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliProblem {
    /// Fekete points on the unit sphere
    Elec,
    /// Kissing number problem
    Kissing,
    /// l1-ball packing in a hypercube
    Packing,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the symmetry structures of a test set from a solver log
    Evaluate {
        /// File containing the solver results for a test set
        results: PathBuf,
        /// Name of the test set
        tname: String,
        /// Print one row per instance instead of the aggregated row
        #[arg(long)]
        full: bool,
    },
    /// Generate a single point-based instance
    Instance {
        /// Problem to generate
        #[arg(value_enum)]
        problem: CliProblem,
        /// Number of points
        #[arg(short = 'n', long)]
        points: usize,
        /// Dimension of the points
        #[arg(short = 'd', long)]
        dimension: usize,
        /// Symmetry handling variant (0-6)
        #[arg(long, default_value = "0")]
        variant: Variant,
        /// Target directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Kissing number only: keep the plain squared distances
        #[arg(long)]
        no_reformulation: bool,
    },
    /// Generate a max-cut instance from a DIMACS graph
    Maxcut {
        /// Graph file in DIMACS format
        graph: PathBuf,
        /// Target directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Draw random edge weights in {-1, 1}
        #[arg(long)]
        weighted: bool,
        /// Random seed for the edge weights
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Expected extension of the graph file
        #[arg(long, default_value = ".col")]
        filetype: String,
    },
    /// Generate the full benchmark test sets
    Batch {
        /// Target directory
        #[arg(long, default_value = "instances")]
        out_dir: PathBuf,
        #[arg(long, default_value = "3")]
        min_points: usize,
        #[arg(long, default_value = "14")]
        max_points: usize,
        #[arg(long, default_value = "2")]
        min_dim: usize,
        #[arg(long, default_value = "3")]
        max_dim: usize,
        /// Comma-separated symmetry handling variants
        #[arg(long, value_delimiter = ',', default_value = "0,1,2,3,4,5,6")]
        variants: Vec<Variant>,
        /// Directory with the DIMACS Color02 graphs for max-cut instances
        #[arg(long)]
        color02: Option<PathBuf>,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

// --- Commands ---

fn evaluate(results: &Path, tname: &str, full: bool) -> CliResult {
    let extracted = extract_from_file(results)?;

    if full {
        for row in detailed_rows(&extracted.statistics) {
            println!("{}", row);
        }
    } else {
        println!("{}", aggregated_row(&extracted.statistics, tname));
    }

    Ok(())
}

fn generate_instance(
    problem: CliProblem,
    points: usize,
    dimension: usize,
    variant: Variant,
    out_dir: &Path,
    reformulate: bool,
) -> CliResult {
    let path = match problem {
        CliProblem::Elec => write_instance(&ElecInstance::new(points, dimension, variant), out_dir)?,
        CliProblem::Kissing => write_instance(
            &KissingNumberInstance::new(points, dimension, reformulate, variant),
            out_dir,
        )?,
        CliProblem::Packing => {
            write_instance(&PackingInstance::new(points, dimension, variant), out_dir)?
        }
    };
    println!("{}", path.display());
    Ok(())
}

fn generate_maxcut(
    graph: &Path,
    out_dir: &Path,
    weighted: bool,
    seed: u64,
    filetype: &str,
) -> CliResult {
    let mut instance = MaxCutInstance::from_file(graph, filetype)?;
    if weighted {
        instance = instance.with_weights(seed);
    }
    let path = write_instance(&instance, out_dir)?;
    println!("{}", path.display());
    Ok(())
}

fn generate_batch(config: &BatchConfig) -> CliResult {
    let summary = run_batch(config)?;
    println!(
        "Generated {} instances in {} ({} elec, {} kissing number, {} packing, {} max-cut)",
        summary.total(),
        config.output_dir.display(),
        summary.elec.len(),
        summary.kissing.len(),
        summary.packing.len(),
        summary.maxcut.len()
    );
    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let (context, result) = match args.command {
        Commands::Evaluate {
            results,
            tname,
            full,
        } => ("evaluating results", evaluate(&results, &tname, full)),
        Commands::Instance {
            problem,
            points,
            dimension,
            variant,
            out_dir,
            no_reformulation,
        } => (
            "generating instance",
            generate_instance(
                problem,
                points,
                dimension,
                variant,
                &out_dir,
                !no_reformulation,
            ),
        ),
        Commands::Maxcut {
            graph,
            out_dir,
            weighted,
            seed,
            filetype,
        } => (
            "generating max-cut instance",
            generate_maxcut(&graph, &out_dir, weighted, seed, &filetype),
        ),
        Commands::Batch {
            out_dir,
            min_points,
            max_points,
            min_dim,
            max_dim,
            variants,
            color02,
        } => {
            let config = BatchConfig::default()
                .with_points(min_points..=max_points)
                .with_dimensions(min_dim..=max_dim)
                .with_variants(variants)
                .with_output_dir(out_dir)
                .with_color02_option(color02);
            ("generating batch", generate_batch(&config))
        }
    };

    if let Err(e) = result {
        eprintln!("Error {}: {}", context, e);
        std::process::exit(1);
    }
}
