use cascade_cli::cli::{run_experiment_command, run_spreadability_command, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Experiment {
            graph,
            nodes,
            edge_prob,
            policy,
            p,
            k,
            trials,
            iterations,
            threads,
            seed,
            no_eval,
            out,
        } => {
            run_experiment_command(
                graph, nodes, edge_prob, policy, p, k, trials, iterations, threads, seed, no_eval,
                out,
            )?;
        }
        Commands::Spreadability {
            graph,
            nodes,
            edge_prob,
            samples,
            seed,
        } => {
            run_spreadability_command(graph, nodes, edge_prob, samples, seed)?;
        }
    }

    Ok(())
}
