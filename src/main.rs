use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use klpart::algorithms::KernighanLin;
use klpart::balance::imbalance;
use klpart::gen::gen_connected_graph;
use klpart::io::{read_graph, write_graph, write_partition_result};
use klpart::Partition;
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Partition a graph file and store the resulting parts
    Partition {
        /// Path of the graph file
        graph_file: PathBuf,

        /// Number of parts
        num_of_parts: usize,

        /// Allowed part-size slack in percent
        margin: f64,

        /// Filename where the partitioning result is stored
        result_file: PathBuf,

        /// Seed for the initial random assignment
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum number of refinement passes
        #[arg(short, long, default_value_t = 10)]
        passes: u32,

        /// Also reject parts smaller than the ideal size rounded down
        #[arg(long)]
        enforce_min_size: bool,
    },

    /// Generate a random connected graph and store it as a graph file
    Generate {
        /// Number of vertices
        num_of_vertices: usize,

        /// Number of edges on top of the connecting spanning tree
        extra_edges: usize,

        /// Filename where the graph is stored
        graph_file: PathBuf,

        /// Seed for the generator
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    match Args::parse().command {
        Command::Partition {
            graph_file,
            num_of_parts,
            margin,
            result_file,
            seed,
            passes,
            enforce_min_size,
        } => {
            let graph = read_graph(&graph_file)?;
            let mut partition = vec![0; graph.len()];
            let start = Instant::now();
            let report = KernighanLin {
                part_count: num_of_parts,
                margin,
                seed,
                max_passes: passes,
                enforce_min_size,
                record_swaps: false,
            }
            .partition(&mut partition, &graph)?;
            let elapsed_time = start.elapsed();
            write_partition_result(&result_file, report.cut_edges, &report.parts)?;
            println!("Cut edges {:?}", report.cut_edges);
            println!("Imbalance {:?}", imbalance(num_of_parts, &partition));
            println!("Execution time {:?}", elapsed_time);
        }
        Command::Generate {
            num_of_vertices,
            extra_edges,
            graph_file,
            seed,
        } => {
            let mut rng = match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_entropy(),
            };
            let graph = gen_connected_graph(&mut rng, num_of_vertices, extra_edges);
            write_graph(&graph, &graph_file)?;
            println!("Vertices {:?}", graph.len());
            println!("Edges {:?}", graph.edge_count());
        }
    }
    Ok(())
}
