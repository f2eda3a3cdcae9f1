// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Carepath-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Carepath and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Carepath CLI entrypoint.
//!
//! Every command reads one JSON document (`-` reads stdin) and writes to stdout unless `--output`
//! names a file. Logs go to stderr; `RUST_LOG` overrides the level picked with `-v`.

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use carepath::config::{ConfigError, RenderConfig};
use carepath::format::Orientation;
use carepath::layout::{diagnose, synthesize_with, RegionPolicy};
use carepath::model::fixtures::demo_pathway;
use carepath::model::NodeList;
use carepath::{convert, render, schema, store};

/// Clinical pathway graphs: edge synthesis and diagram rendering
#[derive(Parser, Debug)]
#[command(name = "carepath")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON render config file
    #[arg(long, global = true, env = "CAREPATH_CONFIG")]
    config: Option<PathBuf>,

    /// Digraph orientation: vertical (TD/TB) or horizontal (LR)
    #[arg(long, global = true, env = "CAREPATH_ORIENTATION")]
    orientation: Option<Orientation>,

    /// Omit flowchart style classes
    #[arg(long, global = true)]
    no_styling: bool,

    /// How overlapping branch regions are resolved: innermost_wins, first_wins or reject
    #[arg(long, global = true)]
    region_policy: Option<RegionPolicy>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a node list as diagram text
    Render {
        /// Node list JSON (`-` for stdin)
        input: PathBuf,
        #[arg(long, value_enum, default_value_t = OutputFormat::Mermaid)]
        format: OutputFormat,
        /// Read a pathway record instead of a node list
        #[arg(long)]
        from_pathway: bool,
        /// Output file; with `--format both`, the `.mmd` and `.dot` extensions are applied
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the synthesized edges as JSON
    Edges {
        input: PathBuf,
        #[arg(long)]
        from_pathway: bool,
    },

    /// Report dropped targets, overlapping regions and other findings
    Check {
        input: PathBuf,
        /// Exit with status 1 when anything is reported
        #[arg(long)]
        strict: bool,
    },

    /// Convert a pathway record into a node list
    Pathway {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rebuild a pathway record from a node list
    Reconstruct {
        input: PathBuf,
        #[arg(long, default_value = "Imported Pathway")]
        condition: String,
        #[arg(long, default_value = "ED")]
        setting: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a JSON Schema
    Schema {
        #[arg(value_enum)]
        document: SchemaDocument,
    },

    /// Print the built-in chest pain pathway
    Demo {
        /// Print its node list instead of the pathway record
        #[arg(long)]
        nodes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Mermaid,
    Dot,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SchemaDocument {
    Nodes,
    Pathway,
}

impl Cli {
    /// Config file first, then flags.
    fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let mut config = RenderConfig::load_or_default(self.config.as_deref())?;
        if let Some(orientation) = self.orientation {
            config.orientation = orientation;
        }
        if self.no_styling {
            config.include_styling = false;
        }
        if let Some(policy) = self.region_policy {
            config.region_policy = policy;
        }
        Ok(config)
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

fn read_nodes(input: &Path, from_pathway: bool) -> Result<NodeList, store::StoreError> {
    if from_pathway {
        let pathway = store::read_pathway(input)?;
        Ok(convert::pathway_to_nodes(&pathway))
    } else {
        store::read_node_list(input)
    }
}

fn emit(output: Option<&Path>, text: &str) -> Result<(), Box<dyn Error>> {
    match output {
        Some(path) => {
            store::write_text(path, text)?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn emit_json(output: Option<&Path>, mut json: String) -> Result<(), Box<dyn Error>> {
    json.push('\n');
    emit(output, &json)
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn Error>> {
    let config = cli.render_config()?;

    match &cli.command {
        Command::Render {
            input,
            format,
            from_pathway,
            output,
        } => {
            let nodes = read_nodes(input, *from_pathway)?;
            let rendered = render::render_nodes(&nodes, &config)?;
            tracing::info!(nodes = nodes.len(), edges = rendered.edges.len(), "rendered pathway");
            match (format, output) {
                (OutputFormat::Mermaid, output) => emit(output.as_deref(), &rendered.flowchart)?,
                (OutputFormat::Dot, output) => emit(output.as_deref(), &rendered.dot)?,
                (OutputFormat::Both, Some(output)) => {
                    emit(Some(output.with_extension("mmd").as_path()), &rendered.flowchart)?;
                    emit(Some(output.with_extension("dot").as_path()), &rendered.dot)?;
                }
                (OutputFormat::Both, None) => {
                    emit(None, &rendered.flowchart)?;
                    emit(None, "\n")?;
                    emit(None, &rendered.dot)?;
                }
            }
        }
        Command::Edges {
            input,
            from_pathway,
        } => {
            let nodes = read_nodes(input, *from_pathway)?;
            let synthesis = synthesize_with(&nodes, &config.synthesis())?;
            emit_json(None, serde_json::to_string_pretty(&synthesis.edges)?)?;
        }
        Command::Check { input, strict } => {
            let nodes = store::read_node_list(input)?;
            let diagnostics = diagnose(&nodes);
            let mut out = String::new();
            for diagnostic in &diagnostics {
                out.push_str(&diagnostic.to_string());
                out.push('\n');
            }
            if diagnostics.is_empty() {
                out.push_str("ok\n");
            }
            emit(None, &out)?;
            if *strict && !diagnostics.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Pathway { input, output } => {
            let pathway = store::read_pathway(input)?;
            let nodes = convert::pathway_to_nodes(&pathway);
            match output {
                Some(path) => store::write_node_list(path, &nodes)?,
                None => emit_json(None, store::node_list_to_json(&nodes)?)?,
            }
        }
        Command::Reconstruct {
            input,
            condition,
            setting,
            output,
        } => {
            let nodes = store::read_node_list(input)?;
            let reconstruction = convert::nodes_to_pathway(&nodes, condition, setting);
            for warning in &reconstruction.warnings {
                tracing::warn!("{warning}");
            }
            match output {
                Some(path) => store::write_pathway(path, &reconstruction.pathway)?,
                None => emit_json(None, store::pathway_to_json(&reconstruction.pathway)?)?,
            }
        }
        Command::Schema { document } => {
            let schema = match document {
                SchemaDocument::Nodes => schema::node_list_schema(),
                SchemaDocument::Pathway => schema::pathway_schema(),
            };
            emit_json(None, serde_json::to_string_pretty(&schema)?)?;
        }
        Command::Demo { nodes } => {
            let pathway = demo_pathway();
            let json = if *nodes {
                store::node_list_to_json(&convert::pathway_to_nodes(&pathway))?
            } else {
                store::pathway_to_json(&pathway)?
            };
            emit_json(None, json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("carepath: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Command, OutputFormat};
    use carepath::format::Orientation;
    use carepath::layout::RegionPolicy;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_with_global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "carepath",
            "render",
            "nodes.json",
            "--format",
            "both",
            "--orientation",
            "LR",
            "--no-styling",
            "--region-policy",
            "first-wins",
            "-vv",
        ])
        .expect("parse");

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.orientation, Some(Orientation::Horizontal));
        assert_eq!(cli.region_policy, Some(RegionPolicy::FirstWins));
        assert!(matches!(
            cli.command,
            Command::Render { format: OutputFormat::Both, from_pathway: false, .. }
        ));
    }

    #[test]
    fn flags_override_config_defaults() {
        let cli = Cli::try_parse_from([
            "carepath",
            "--orientation",
            "horizontal",
            "--no-styling",
            "edges",
            "-",
        ])
        .expect("parse");
        let config = cli.render_config().expect("config");

        assert_eq!(config.orientation, Orientation::Horizontal);
        assert!(!config.include_styling);
        assert_eq!(config.region_policy, RegionPolicy::InnermostWins);
    }

    #[test]
    fn rejects_unknown_orientation() {
        Cli::try_parse_from(["carepath", "--orientation", "diagonal", "demo"]).unwrap_err();
    }

    #[test]
    fn reconstruct_has_defaults() {
        let cli = Cli::try_parse_from(["carepath", "reconstruct", "nodes.json"]).expect("parse");
        let Command::Reconstruct { condition, setting, output, .. } = cli.command else {
            panic!("expected reconstruct");
        };
        assert_eq!(condition, "Imported Pathway");
        assert_eq!(setting, "ED");
        assert!(output.is_none());
    }
}
