//! graphrank CLI
//!
//! Rank nodes of a directed graph from the command line. Wraps the three
//! ranking engines and the post-processing utilities, reads graphs as JSON
//! from a file or stdin, and can generate reproducible test graphs.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;

use rapid_graphrank::analysis::{community, compare};
use rapid_graphrank::generate;
use rapid_graphrank::{
    ComparisonMetrics, CsrGraph, GraphInput, PersonalizedPageRank, PushPageRank, PushResult,
    RankResult, StandardPageRank,
};

#[derive(Parser)]
#[command(name = "graphrank")]
#[command(
    author,
    version,
    about = "Node-importance ranking for directed graphs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Graph JSON file ({"nodes": [...], "edges": [[from, to], ...]});
    /// read from stdin when omitted
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging (debug-level engine traces)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Global PageRank over the whole graph
    Pagerank(PagerankArgs),

    /// Personalized PageRank restarting at seed nodes
    Ppr(PprArgs),

    /// Local push approximation of personalized PageRank
    Push(PushArgs),

    /// Run PPR and push on the same seeds and compare the rankings
    Compare(CompareArgs),

    /// Extract the seed community from a personalized ranking
    Community(CommunityArgs),

    /// Sweep push epsilon values against a PPR baseline
    Sweep(SweepArgs),

    /// Generate a graph and write it as JSON
    Generate(GenerateArgs),
}

#[derive(Args)]
struct IterOpts {
    /// Damping factor in (0, 1]
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Maximum power iterations
    #[arg(long, default_value_t = 1000)]
    max_iter: usize,

    /// L1 convergence tolerance
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
}

#[derive(Args)]
struct PagerankArgs {
    #[command(flatten)]
    iter: IterOpts,

    /// Show only the N best-ranked nodes
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Args)]
struct PprArgs {
    /// Seed node identifiers
    #[arg(long, value_delimiter = ',', required = true)]
    seeds: Vec<i64>,

    #[command(flatten)]
    iter: IterOpts,

    /// Show only the N best-ranked nodes
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Args)]
struct PushArgs {
    /// Seed node identifiers
    #[arg(long, value_delimiter = ',', required = true)]
    seeds: Vec<i64>,

    /// Damping factor in (0, 1]
    #[arg(long, default_value_t = 0.85)]
    damping: f64,

    /// Residual threshold
    #[arg(long, default_value_t = 1e-4)]
    epsilon: f64,

    /// Show only the N best-ranked nodes
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[derive(Args)]
struct CompareArgs {
    /// Seed node identifiers
    #[arg(long, value_delimiter = ',', required = true)]
    seeds: Vec<i64>,

    #[command(flatten)]
    iter: IterOpts,

    /// Residual threshold for the push run
    #[arg(long, default_value_t = 1e-4)]
    epsilon: f64,
}

#[derive(Args)]
struct CommunityArgs {
    /// Seed node identifiers
    #[arg(long, value_delimiter = ',', required = true)]
    seeds: Vec<i64>,

    #[command(flatten)]
    iter: IterOpts,

    /// Minimum score for community membership
    #[arg(long)]
    threshold: f64,
}

#[derive(Args)]
struct SweepArgs {
    /// Seed node identifiers
    #[arg(long, value_delimiter = ',', required = true)]
    seeds: Vec<i64>,

    #[command(flatten)]
    iter: IterOpts,

    /// Residual thresholds to sweep
    #[arg(long, value_delimiter = ',', default_values_t = [1e-2, 1e-3, 1e-4, 1e-5, 1e-6])]
    epsilons: Vec<f64>,
}

#[derive(Args)]
struct GenerateArgs {
    /// Graph family to generate
    #[arg(long, value_enum)]
    kind: GraphKind,

    /// Number of nodes
    #[arg(long)]
    nodes: usize,

    /// Edge probability (random graphs)
    #[arg(long, default_value_t = 0.05)]
    prob: f64,

    /// Out-edges per new node (scale-free graphs)
    #[arg(long, default_value_t = 3)]
    edges: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GraphKind {
    Chain,
    Cycle,
    Complete,
    Star,
    Random,
    ScaleFree,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CompareReport {
    ppr: RankResult,
    push: PushResult,
    metrics: ComparisonMetrics,
    speedup_factor_total: f64,
    speedup_factor_algorithm_only: f64,
}

#[derive(Serialize)]
struct CommunityEntry {
    node: i64,
    score: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CommunityReport {
    threshold: f64,
    community_size: usize,
    members: Vec<CommunityEntry>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepRow {
    epsilon: f64,
    push_operations: usize,
    nodes_processed: usize,
    metrics: ComparisonMetrics,
    speedup_factor_total: f64,
    speedup_factor_algorithm_only: f64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    match &cli.command {
        Commands::Pagerank(args) => run_pagerank(&cli, args),
        Commands::Ppr(args) => run_ppr(&cli, args),
        Commands::Push(args) => run_push(&cli, args),
        Commands::Compare(args) => run_compare(&cli, args),
        Commands::Community(args) => run_community(&cli, args),
        Commands::Sweep(args) => run_sweep(&cli, args),
        Commands::Generate(args) => run_generate(args),
    }
}

fn load_graph(path: Option<&Path>) -> Result<GraphInput> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading graph from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading graph from stdin")?;
            buf
        }
    };
    Ok(GraphInput::from_json_str(&raw)?)
}

/// Ratio guarded against a zero denominator from sub-resolution timings.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

fn ppr_engine(opts: &IterOpts) -> PersonalizedPageRank {
    PersonalizedPageRank::new()
        .with_damping(opts.damping)
        .with_max_iterations(opts.max_iter)
        .with_tolerance(opts.tolerance)
}

fn print_top(graph: &CsrGraph, top: &[(u32, f64)]) {
    for &(pos, score) in top {
        println!("{:>12}  {:.6}", graph.node_id(pos), score);
    }
}

fn run_pagerank(cli: &Cli, args: &PagerankArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;
    let result = StandardPageRank::new()
        .with_damping(args.iter.damping)
        .with_max_iterations(args.iter.max_iter)
        .with_tolerance(args.iter.tolerance)
        .run(&graph)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "pagerank: {} nodes, {} edges, {} iterations, converged: {}, final diff: {:.3e}, {:.3} ms",
            graph.num_nodes(),
            graph.num_edges(),
            result.iterations,
            result.converged,
            result.final_diff,
            result.execution_time_ms
        );
        print_top(&graph, &result.top_n(args.top));
    }
    Ok(())
}

fn run_ppr(cli: &Cli, args: &PprArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;
    let result = ppr_engine(&args.iter).run(&graph, &args.seeds)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "ppr from {:?}: {} iterations, converged: {}, final diff: {:.3e}, {:.3} ms",
            args.seeds, result.iterations, result.converged, result.final_diff,
            result.execution_time_ms
        );
        print_top(&graph, &result.top_n(args.top));
    }
    Ok(())
}

fn run_push(cli: &Cli, args: &PushArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;
    let result = PushPageRank::new()
        .with_damping(args.damping)
        .with_epsilon(args.epsilon)
        .run(&graph, &args.seeds)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "push from {:?}: {} pushes over {} nodes, settled mass {:.6}, {:.3} ms ({:.3} preprocessing, {:.3} algorithm)",
            args.seeds,
            result.push_operations,
            result.nodes_processed,
            result.total_mass(),
            result.execution_time_ms,
            result.preprocessing_time_ms,
            result.algorithm_time_ms
        );
        print_top(&graph, &result.top_n(args.top));
    }
    Ok(())
}

fn run_compare(cli: &Cli, args: &CompareArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;

    let ppr = ppr_engine(&args.iter).run(&graph, &args.seeds)?;
    let push = PushPageRank::new()
        .with_damping(args.iter.damping)
        .with_epsilon(args.epsilon)
        .run(&graph, &args.seeds)?;

    let metrics = compare::compare_rankings(&push.ranks, &ppr.ranks)?;
    let report = CompareReport {
        speedup_factor_total: ratio(ppr.execution_time_ms, push.execution_time_ms),
        speedup_factor_algorithm_only: ratio(ppr.execution_time_ms, push.algorithm_time_ms),
        ppr,
        push,
        metrics,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "ppr:  {} iterations in {:.3} ms",
            report.ppr.iterations, report.ppr.execution_time_ms
        );
        println!(
            "push: {} pushes in {:.3} ms ({:.3} algorithm)",
            report.push.push_operations,
            report.push.execution_time_ms,
            report.push.algorithm_time_ms
        );
        println!("l1 distance:    {:.6e}", report.metrics.l1_distance);
        println!("l2 distance:    {:.6e}", report.metrics.l2_distance);
        println!("max difference: {:.6e}", report.metrics.max_difference);
        println!("correlation:    {:.6}", report.metrics.correlation);
        println!(
            "speedup: {:.2}x total, {:.2}x algorithm-only",
            report.speedup_factor_total, report.speedup_factor_algorithm_only
        );
    }
    Ok(())
}

fn run_community(cli: &Cli, args: &CommunityArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;
    let ranking = ppr_engine(&args.iter).run(&graph, &args.seeds)?;

    let members: Vec<CommunityEntry> = community::extract(&ranking.ranks, args.threshold)
        .into_iter()
        .map(|m| CommunityEntry {
            node: graph.node_id(m.node),
            score: m.score,
        })
        .collect();

    if cli.json {
        let report = CommunityReport {
            threshold: args.threshold,
            community_size: members.len(),
            members,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "community at threshold {:e}: {} members",
            args.threshold,
            members.len()
        );
        for member in &members {
            println!("{:>12}  {:.6}", member.node, member.score);
        }
    }
    Ok(())
}

fn run_sweep(cli: &Cli, args: &SweepArgs) -> Result<()> {
    let input = load_graph(cli.graph.as_deref())?;
    let graph = CsrGraph::from_input(&input)?;
    let baseline = ppr_engine(&args.iter).run(&graph, &args.seeds)?;

    // Runs are independent (each owns its vectors), so sweep them in
    // parallel; collect preserves the input epsilon order.
    let rows: Vec<SweepRow> = args
        .epsilons
        .par_iter()
        .map(|&epsilon| -> Result<SweepRow> {
            let push = PushPageRank::new()
                .with_damping(args.iter.damping)
                .with_epsilon(epsilon)
                .run(&graph, &args.seeds)?;
            let metrics = compare::compare_rankings(&push.ranks, &baseline.ranks)?;
            Ok(SweepRow {
                epsilon,
                push_operations: push.push_operations,
                nodes_processed: push.nodes_processed,
                metrics,
                speedup_factor_total: ratio(baseline.execution_time_ms, push.execution_time_ms),
                speedup_factor_algorithm_only: ratio(
                    baseline.execution_time_ms,
                    push.algorithm_time_ms,
                ),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!(
            "{:>10}  {:>13}  {:>13}  {:>8}  {:>7}  {:>12}",
            "epsilon", "l1-distance", "correlation", "pushes", "nodes", "speedup(alg)"
        );
        for row in &rows {
            println!(
                "{:>10e}  {:>13.6e}  {:>13.6}  {:>8}  {:>7}  {:>12.2}",
                row.epsilon,
                row.metrics.l1_distance,
                row.metrics.correlation,
                row.push_operations,
                row.nodes_processed,
                row.speedup_factor_algorithm_only
            );
        }
    }
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let input = match args.kind {
        GraphKind::Chain => generate::chain(args.nodes),
        GraphKind::Cycle => generate::cycle(args.nodes),
        GraphKind::Complete => generate::complete(args.nodes),
        GraphKind::Star => generate::star(args.nodes),
        GraphKind::Random => generate::erdos_renyi(args.nodes, args.prob, args.seed)?,
        GraphKind::ScaleFree => {
            generate::preferential_attachment(args.nodes, args.edges, args.seed)?
        }
    };

    let json = input.to_json_string();
    match &args.output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "wrote {} nodes, {} edges to {}",
                input.node_count(),
                input.edge_count(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
