use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::info;

use stemma::algorithm::network::NetworkGraph;
use stemma::utils::logging::console::{print_lineage, print_load_summary, print_period_summary};
use stemma::utils::logging::{create_spinner, finish_progress_bar, log_written};
use stemma::{
    AncestryEngine, CertaintyModel, DatasetPaths, DescendantForest, FamilyTreeBuilder,
    LineageAggregator, NetworkBuilder, NetworkScope, PersonId, StemmaConfig, load_dataset,
    write_family_tree_files, write_funeral_data_file, write_json_file,
};

/// Reconstruct Roman Republican lineages and generate visualization data
#[derive(Parser, Debug)]
#[command(name = "stemma")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Person records (JSON array)
    #[arg(long, global = true, default_value = "data/people.json")]
    people: PathBuf,

    /// Relation records (JSON array)
    #[arg(long, global = true)]
    relations: Option<PathBuf>,

    /// Manual overrides of person fields (JSON array)
    #[arg(long, global = true)]
    overrides: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Worker threads for lineage resolution
    #[arg(long, global = true, default_value_t = num_cpus::get())]
    threads: usize,

    /// Draw progress bars
    #[arg(long, global = true)]
    progress: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the funeral data file for all certainty models
    Funerals {
        #[arg(long, default_value = "funeralData.js")]
        out: PathBuf,
    },

    /// Print the lineage of one person, or of every deceased person
    Lineage {
        /// Person identifier; all deceased persons when omitted
        #[arg(long)]
        id: Option<i64>,
        #[arg(long, default_value = "conservative")]
        model: CertaintyModel,
        /// Print names and guess markers
        #[arg(long)]
        verbose: bool,
    },

    /// Write relationship network graphs as JSON
    Network {
        /// ancestors, children or spouses
        #[arg(long, default_value = "children")]
        scope: NetworkScope,
        /// Start person; one graph per component when omitted
        #[arg(long)]
        id: Option<i64>,
        #[arg(long, default_value = "network.json")]
        out: PathBuf,
    },

    /// Write union family trees, one data file per tree
    FamilyTrees {
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },

    /// Write descendant trees as JSON
    Descendants {
        #[arg(long, default_value = "conservative")]
        model: CertaintyModel,
        /// Skip trees with fewer levels
        #[arg(long, default_value_t = 1)]
        min_height: usize,
        #[arg(long, default_value = "descendants.json")]
        out: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<StemmaConfig> {
    let mut config = match &cli.config {
        Some(path) => StemmaConfig::from_json_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => StemmaConfig::new(),
    };
    config.show_progress |= cli.progress;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads.max(1))
        .build_global()
        .context("Failed to configure the thread pool")?;

    let config = load_config(&cli)?;

    let start = Instant::now();
    let paths = DatasetPaths::new(&cli.people)
        .with_relations(cli.relations.as_deref())
        .with_overrides(cli.overrides.as_deref());
    let spinner = config
        .show_progress
        .then(|| create_spinner(Some("Loading dataset")));
    let (mut registry, report) = load_dataset(paths)
        .with_context(|| format!("Failed to load dataset from {}", cli.people.display()))?;
    if let Some(spinner) = &spinner {
        finish_progress_bar(spinner, Some("loaded"));
    }
    print_load_summary(&report, start.elapsed());

    match cli.command {
        Command::Funerals { out } => {
            let engine = AncestryEngine::new(&registry, config.inference.clone());
            let reports = LineageAggregator::new(&engine, config.periods)
                .with_progress(config.show_progress)
                .aggregate_all();
            for report in &reports {
                print_period_summary(report);
            }
            write_funeral_data_file(&out, &reports, &registry)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            log_written("funeral data", &out);
        }

        Command::Lineage { id, model, verbose } => {
            let engine = AncestryEngine::new(&registry, config.inference.clone());
            match id {
                Some(id) => {
                    let id = PersonId(id);
                    if !registry.contains(id) {
                        bail!("Unknown person {id}");
                    }
                    print_lineage(&registry, &engine.resolve_ancestry(model, id), verbose);
                }
                None => {
                    let aggregator = LineageAggregator::new(&engine, config.periods);
                    for person in aggregator.deceased() {
                        print_lineage(&registry, &engine.resolve_ancestry(model, person.id), verbose);
                    }
                }
            }
        }

        Command::Network { scope, id, out } => {
            let builder = NetworkBuilder::new(&registry);
            let graphs: Vec<NetworkGraph> = match id {
                Some(id) => {
                    let Some(graph) = builder.graph(PersonId(id), scope) else {
                        bail!("Unknown person {id}");
                    };
                    vec![graph]
                }
                None => builder.components(scope),
            };
            write_output(&out, &graphs)?;
        }

        Command::FamilyTrees { out } => {
            let forest = FamilyTreeBuilder::new(&mut registry, config.family_tree).build();
            let written = write_family_tree_files(&out, &forest)
                .with_context(|| format!("Failed to write family trees to {}", out.display()))?;
            info!("Wrote {written} family tree files to {}", out.display());
        }

        Command::Descendants {
            model,
            min_height,
            out,
        } => {
            let engine = AncestryEngine::new(&registry, config.inference.clone());
            let forest = DescendantForest::build(&engine, model);
            let trees: Vec<_> = forest.branching(min_height).collect();
            info!("{} of {} {model} trees have at least {min_height} levels", trees.len(), forest.len());
            write_output(&out, &trees)?;
        }
    }

    Ok(())
}

fn write_output<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    write_json_file(path, value).with_context(|| format!("Failed to write {}", path.display()))?;
    log_written("graph data", path);
    Ok(())
}
