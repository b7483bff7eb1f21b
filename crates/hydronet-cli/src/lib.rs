// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `hydronet` command-line tool.
//!
//! Thin shell over `hydronet-topo`, `hydronet-inp` and `hydronet-landxml`:
//! reads lines, points and networks from JSON/WKT/LandXML files, runs one
//! operation, and writes JSON, tables, TGF or `.inp` text. Settings come from (highest first) flags, `--config`,
//! the user config directory, then defaults.

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod fs_store;
pub mod input;
pub mod report;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use hydronet_geom::check_tolerance;
use hydronet_inp::{network_from_sections, sections_from_network, PipeTable, Sections};
use hydronet_landxml::{networks_from_landxml, tin_from_landxml};
use hydronet_topo::{
    assemble, assign_elevations, degrees, merge, split_lines_at_points, to_tgf, validate, Graph,
};
use tracing::{info, warn, Level};

use crate::cli::{AssembleArgs, Cli, Command, ConfigCommand};
use crate::config::{ConfigService, HydronetConfig, CONFIG_KEY};
use crate::fs_store::FsConfigStore;
use crate::input::{
    read_lines, read_network, read_points, read_text, write_json, write_lines, write_text,
};

/// Parses the process arguments, installs logging and runs the command.
pub fn entrypoint() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolves settings: an explicit file wins, then the user config dir.
///
/// An unreadable user config is logged and ignored; an unreadable explicit
/// file is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<HydronetConfig> {
    if let Some(path) = explicit {
        return HydronetConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()));
    }
    let loaded = FsConfigStore::new()
        .and_then(|store| HydronetConfig::from_store(&ConfigService::new(store)));
    match loaded {
        Ok(cfg) => Ok(cfg),
        Err(err) => {
            warn!(%err, "user config ignored");
            Ok(HydronetConfig::default())
        }
    }
}

/// Runs one parsed command; `ExitCode::FAILURE` when `validate` finds problems.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Assemble(args) => run_assemble(&args, &config)?,
        Command::Validate { network, json } => {
            let net = read_network(&network)?;
            let problems = validate(&net.nodes, &net.links);
            if json {
                write_json(None, &problems)?;
            } else {
                write_text(None, &report::problems(&problems).to_string())?;
            }
            if !problems.is_valid() {
                info!(problems = problems.problem_count(), "network is inconsistent");
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Classify { network, json } => {
            let net = read_network(&network)?;
            let classes = Graph::from_links(&net.links)?.classify();
            if json {
                write_json(None, &classes)?;
            } else {
                write_text(None, &report::classification(&classes).to_string())?;
            }
        }
        Command::Degrees { network, json } => {
            let net = read_network(&network)?;
            let degree = degrees(&net.nodes, &net.links)?;
            if json {
                write_json(None, &degree)?;
            } else {
                write_text(None, &report::degrees(&degree).to_string())?;
            }
        }
        Command::Split {
            lines,
            points,
            tolerance,
            out,
        } => {
            let tolerance = check_tolerance(tolerance.unwrap_or(config.split_tolerance))?;
            let result = split_lines_at_points(&read_lines(&lines)?, &read_points(&points)?, tolerance);
            info!(
                split = result.lines.iter().filter(|l| l.was_split()).count(),
                discarded_points = result.discarded_points,
                "lines split"
            );
            write_lines(out.as_deref(), result.fragments())?;
        }
        Command::Merge {
            primary,
            secondary,
            out,
        } => {
            let merged = merge(&read_network(&primary)?, &read_network(&secondary)?);
            info!(shared = merged.shared_nodes, "networks merged");
            write_json(out.as_deref(), &merged.network)?;
        }
        Command::Tgf { network, out } => {
            let text = to_tgf(&read_network(&network)?)?;
            write_text(out.as_deref(), &text)?;
        }
        Command::ToInp {
            network,
            template,
            pipes,
            out,
        } => {
            let net = read_network(&network)?;
            let template = match template {
                Some(path) => {
                    let text = read_text(&path)?;
                    Sections::parse(&text).with_context(|| format!("in {}", path.display()))?
                }
                None => Sections::new(),
            };
            let pipes: PipeTable = match pipes {
                Some(path) => input::read_json(&path)?,
                None => PipeTable::new(),
            };
            write_text(out.as_deref(), &sections_from_network(&net, &pipes, template).render())?;
        }
        Command::FromInp { inp, out, pipes } => {
            let text = read_text(&inp)?;
            let model = Sections::parse(&text)
                .and_then(|s| network_from_sections(&s))
                .with_context(|| format!("in {}", inp.display()))?;
            if let Some(path) = pipes {
                write_json(Some(&path), &model.pipes)?;
            }
            write_json(out.as_deref(), &model.network)?;
        }
        Command::Elevations {
            network,
            tin,
            surface,
            out,
        } => {
            let mut net = read_network(&network)?;
            let text = read_text(&tin)?;
            let surface = tin_from_landxml(&text, surface.as_deref())
                .with_context(|| format!("in {}", tin.display()))?;
            let report = assign_elevations(&mut net, &surface);
            info!(
                assigned = report.assigned,
                outside = report.outside.len(),
                "elevations assigned"
            );
            write_json(out.as_deref(), &net)?;
        }
        Command::FromLandxml {
            landxml,
            name,
            out,
            details,
        } => {
            let read = networks_from_landxml(&read_text(&landxml)?)
                .with_context(|| format!("in {}", landxml.display()))?;
            let available: Vec<&str> = read.networks.iter().map(|n| n.name.as_str()).collect();
            let chosen = read
                .networks
                .iter()
                .find(|n| name.as_deref().is_none_or(|wanted| n.name == wanted))
                .ok_or_else(|| {
                    let wanted = name.as_deref().map_or_else(String::new, |n| format!(" named {n:?}"));
                    anyhow!(
                        "no pipe network{wanted} in {} (found: {available:?})",
                        landxml.display()
                    )
                })?;
            info!(network = %chosen.name, crs = ?read.crs, "pipe network read");
            if let Some(path) = details {
                let tables = serde_json::json!({
                    "name": chosen.name,
                    "kind": chosen.kind,
                    "crs": read.crs,
                    "structures": chosen.structures,
                    "pipes": chosen.pipes,
                });
                write_json(Some(&path), &tables)?;
            }
            write_json(out.as_deref(), &chosen.network)?;
        }
        Command::Config(action) => run_config(action, config)?,
    }
    std::io::stdout().lock().flush()?;
    Ok(ExitCode::SUCCESS)
}

fn run_assemble(args: &AssembleArgs, config: &HydronetConfig) -> Result<()> {
    let mut options = config.assemble.clone();
    if let Some(t) = args.tolerance {
        options.tolerance = t;
    }
    options.nodes = args.node_policy(options.nodes);
    options.links = args.link_policy(options.links);

    let lines = read_lines(&args.lines)?;
    let network = assemble(&lines, &options)
        .with_context(|| format!("cannot assemble {}", args.lines.display()))?;
    info!(
        nodes = network.nodes.len(),
        links = network.links.len(),
        "network assembled"
    );
    write_json(args.out.as_deref(), &network)
}

fn run_config(action: ConfigCommand, mut config: HydronetConfig) -> Result<()> {
    match action {
        ConfigCommand::Show => write_json(None, &config),
        ConfigCommand::Path => {
            let path = FsConfigStore::new()?.path_for(CONFIG_KEY);
            write_text(None, &path.display().to_string())
        }
        ConfigCommand::Save {
            tolerance,
            split_tolerance,
        } => {
            if let Some(t) = tolerance {
                config.assemble.tolerance = check_tolerance(t)?;
            }
            if let Some(t) = split_tolerance {
                config.split_tolerance = check_tolerance(t)?;
            }
            let store = FsConfigStore::new()?;
            let path = store.path_for(CONFIG_KEY);
            ConfigService::new(store)
                .save(CONFIG_KEY, &config)
                .with_context(|| format!("failed to save {}", path.display()))?;
            info!(path = %path.display(), "config saved");
            Ok(())
        }
    }
}
