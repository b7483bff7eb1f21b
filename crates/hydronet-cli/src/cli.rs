// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use hydronet_topo::IdPolicy;

/// Builds and checks pipe networks from free-form line geometry.
#[derive(Parser, Debug)]
#[command(name = "hydronet", author, version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Explicit config file (JSON); replaces the user config.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble lines (JSON or WKT) into a network (JSON).
    Assemble(AssembleArgs),
    /// Report orphan nodes, duplicate ids, undefined endpoints and loops.
    Validate {
        /// Network JSON.
        network: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Classify links as branched or meshed, with subzones.
    Classify {
        /// Network JSON.
        network: PathBuf,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Print the degree of every node.
    Degrees {
        /// Network JSON.
        network: PathBuf,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Split lines at points lying on them.
    Split {
        /// Lines file (JSON or WKT).
        #[arg(long)]
        lines: PathBuf,
        /// Points file (JSON or WKT).
        #[arg(long)]
        points: PathBuf,
        /// Split tolerance [default: from config].
        #[arg(long)]
        tolerance: Option<f64>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Merge two networks; shared node ids keep the first network's position.
    Merge {
        /// Primary network JSON.
        primary: PathBuf,
        /// Secondary network JSON.
        secondary: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Export a network in Trivial Graph Format.
    Tgf {
        /// Network JSON.
        network: PathBuf,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write a network as an EPANET .inp file.
    ToInp {
        /// Network JSON.
        network: PathBuf,
        /// Template .inp whose other sections are kept.
        #[arg(long)]
        template: Option<PathBuf>,
        /// Pipe attribute table (JSON, keyed by link id).
        #[arg(long)]
        pipes: Option<PathBuf>,
        /// Output file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read an EPANET .inp file into a network.
    FromInp {
        /// Input .inp file.
        inp: PathBuf,
        /// Output network file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write the pipe attribute table here.
        #[arg(long)]
        pipes: Option<PathBuf>,
    },
    /// Set node elevations from a LandXML TIN surface.
    Elevations {
        /// Network JSON.
        network: PathBuf,
        /// LandXML file holding the surface.
        #[arg(long)]
        tin: PathBuf,
        /// Surface name; the first TIN surface when omitted.
        #[arg(long)]
        surface: Option<String>,
        /// Output network file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Read a gravity pipe network from a LandXML file.
    FromLandxml {
        /// Input LandXML file.
        landxml: PathBuf,
        /// Network name; the first network when omitted.
        #[arg(long)]
        name: Option<String>,
        /// Output network file; stdout when omitted.
        #[arg(long)]
        out: Option<PathBuf>,
        /// Also write structure and pipe tables (JSON) here.
        #[arg(long)]
        details: Option<PathBuf>,
    },
    /// Show or persist the resolved settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Actions of `config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved settings as JSON.
    Show,
    /// Print the path of the user config file.
    Path,
    /// Write the resolved settings, with overrides, to the user config file.
    Save {
        /// Assembly tolerance to store.
        #[arg(long)]
        tolerance: Option<f64>,
        /// Split tolerance to store.
        #[arg(long)]
        split_tolerance: Option<f64>,
    },
}

/// Arguments of `assemble`.
#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Lines file: JSON array of vertex arrays, or WKT (`.wkt`/`.txt`).
    #[arg(long)]
    pub lines: PathBuf,
    /// Endpoint merge tolerance [default: from config].
    #[arg(long)]
    pub tolerance: Option<f64>,
    /// Node id prefix.
    #[arg(long, conflicts_with = "node_mask")]
    pub node_prefix: Option<String>,
    /// Node id mask; the longest `$` run receives the number.
    #[arg(long)]
    pub node_mask: Option<String>,
    /// First node number.
    #[arg(long, allow_hyphen_values = true)]
    pub node_start: Option<i64>,
    /// Node number step.
    #[arg(long, allow_hyphen_values = true)]
    pub node_increment: Option<i64>,
    /// Link id prefix.
    #[arg(long, conflicts_with = "link_mask")]
    pub link_prefix: Option<String>,
    /// Link id mask; the longest `$` run receives the number.
    #[arg(long)]
    pub link_mask: Option<String>,
    /// First link number.
    #[arg(long, allow_hyphen_values = true)]
    pub link_start: Option<i64>,
    /// Link number step.
    #[arg(long, allow_hyphen_values = true)]
    pub link_increment: Option<i64>,
    /// Output file; stdout when omitted.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

impl AssembleArgs {
    /// Node policy after applying the node flags to `base`.
    pub fn node_policy(&self, base: IdPolicy) -> IdPolicy {
        override_policy(
            base,
            self.node_prefix.as_deref(),
            self.node_mask.as_deref(),
            self.node_start,
            self.node_increment,
        )
    }

    /// Link policy after applying the link flags to `base`.
    pub fn link_policy(&self, base: IdPolicy) -> IdPolicy {
        override_policy(
            base,
            self.link_prefix.as_deref(),
            self.link_mask.as_deref(),
            self.link_start,
            self.link_increment,
        )
    }
}

fn override_policy(
    base: IdPolicy,
    prefix: Option<&str>,
    mask: Option<&str>,
    start: Option<i64>,
    increment: Option<i64>,
) -> IdPolicy {
    let (IdPolicy::Prefix {
        start: s,
        increment: i,
        ..
    }
    | IdPolicy::Mask {
        start: s,
        increment: i,
        ..
    }) = &base;
    let start = start.unwrap_or(*s);
    let increment = increment.unwrap_or(*i);
    match (prefix, mask, base) {
        (Some(p), _, _) => IdPolicy::prefix(p, start, increment),
        (None, Some(m), _) => IdPolicy::mask(m, start, increment),
        (None, None, IdPolicy::Prefix { prefix, .. }) => IdPolicy::prefix(prefix, start, increment),
        (None, None, IdPolicy::Mask { mask, .. }) => IdPolicy::mask(mask, start, increment),
    }
}
