use clap::{CommandFactory, Parser};
use scoutbench::cli::{self, Cli, Commands};
use scoutbench::prelude::*;
use tracing::span;

fn main() -> miette::Result<()> {
    init();

    let args = Cli::parse();
    if args.verbose > 0 {
        set_log_level(cli::verbosity(args.verbose))?;
    }
    if args.log_file {
        toggle_file_logging(true)?;
    }

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();
    match args.command {
        Some(cmd) => match cmd {
            Commands::Pv {
                algorithm,
                tt,
                depth,
                positions,
                config,
                save_config,
            } => {
                let config = cli::resolve_config(algorithm, tt, depth, config.as_ref())?;
                trace!("Running PV with {config:?}");
                if let Some(path) = save_config {
                    config
                        .save_to_file(&path)
                        .with_context(|| format!("Saving config to {}", path.display()))?;
                }
                run_pv(&config, positions)?;
            }
            Commands::Verify {
                depth,
                positions,
                tt,
            } => {
                trace!("Verifying {positions} positions at depth {depth}, tt: {tt}");
                let summary = verify(depth, positions, tt)?;
                println!(
                    "All algorithms agree on {} positions ({} checks)",
                    summary.positions, summary.checks
                );
            }
            Commands::Show { position } => {
                let pv = principal_variation(&PV)?;
                let board = pv.get(position).ok_or_else(|| {
                    miette::miette!("Position {position} is out of range 0..={}", PV.len())
                })?;
                let mover = Side::from_color(color_for_index(position));
                println!("{board}");
                println!("{mover} to move, value at the end of the game: {}", pv[0].value());
            }
        },
        None => {
            Cli::command().print_help().into_diagnostic()?;
        }
    }
    Ok(())
}
