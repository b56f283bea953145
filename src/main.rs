// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Relgraph-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Relgraph and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Relgraph CLI entrypoint.
//!
//! Loads a stored diagram and, with `--review`, reconciles its relations against the backend
//! snapshot and prints how each one was classified.

use std::error::Error;

use relgraph::editor::Editor;
use relgraph::model::DiagramId;
use relgraph::store::{DiagramFolder, WriteDurability};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RELGRAPH_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<diagram-dir>] --diagram <id> [--backend <file>] [--review] [--accept-all] [--durable-writes]\n  {program} --schema\n\nIf diagram-dir is omitted, the current working directory is used.\nThe backend snapshot defaults to <diagram-dir>/backend.json.\n\n--review enables relation mode and prints the classification of every relation.\n--accept-all additionally enables every suggested relation and saves the diagram.\n--durable-writes opts into slower, best-effort durable persistence (fsync/sync where supported).\n--schema prints the JSON schema of the diagram file.\n\nLogging is configured through {LOG_ENV} (default `warn`)."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    dir: Option<String>,
    diagram: Option<String>,
    backend: Option<String>,
    review: bool,
    accept_all: bool,
    durable_writes: bool,
    schema: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--diagram" => {
                if options.diagram.is_some() {
                    return Err(());
                }
                options.diagram = Some(args.next().ok_or(())?);
            }
            "--backend" => {
                if options.backend.is_some() {
                    return Err(());
                }
                options.backend = Some(args.next().ok_or(())?);
            }
            "--review" => {
                if options.review {
                    return Err(());
                }
                options.review = true;
            }
            "--accept-all" => {
                if options.accept_all {
                    return Err(());
                }
                options.accept_all = true;
            }
            "--durable-writes" => {
                if options.durable_writes {
                    return Err(());
                }
                options.durable_writes = true;
            }
            "--schema" => {
                if options.schema {
                    return Err(());
                }
                options.schema = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.dir.is_some() {
                    return Err(());
                }
                options.dir = Some(arg);
            }
        }
    }

    if options.schema {
        let others = CliOptions {
            schema: true,
            ..CliOptions::default()
        };
        return if options == others { Ok(options) } else { Err(()) };
    }

    if options.diagram.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(options: CliOptions) -> Result<(), Box<dyn Error>> {
    let dir = options.dir.unwrap_or_else(|| ".".to_owned());
    let mut folder = DiagramFolder::new(dir);
    if let Some(backend) = options.backend {
        folder = folder.with_backend_path(backend);
    }
    if options.durable_writes {
        folder = folder.with_durability(WriteDurability::Durable);
    }
    let diagram_id = DiagramId::new(options.diagram.unwrap_or_default())?;
    let mut editor = Editor::open(folder, diagram_id)?;

    if !(options.review || options.accept_all) {
        let summary = serde_json::json!({
            "diagram": editor.diagram_id().as_str(),
            "nodes": editor.graph().diagram().nodes().len(),
            "relations": editor.graph().relation_summary(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let reconcile = editor.enable_relation_mode().await;
    let relations = editor.graph().relation_summary();
    let accepted = if options.accept_all {
        editor.accept_faint_relations().await
    } else {
        0
    };
    let disable = editor.disable_relation_mode();
    if options.accept_all {
        editor.persist().await?;
    }

    let report = serde_json::json!({
        "diagram": editor.diagram_id().as_str(),
        "reconcile": reconcile,
        "relations": relations,
        "accepted": accepted,
        "disable": disable,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "relgraph".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        if options.schema {
            println!(
                "{}",
                serde_json::to_string_pretty(&relgraph::serial::graph_schema())?
            );
            return Ok(());
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(run(options))?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn args(values: &[&str]) -> impl Iterator<Item = String> {
        values
            .iter()
            .map(|value| (*value).to_owned())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn parses_minimal_invocation() {
        let options = parse_options(args(&["--diagram", "main"])).expect("parse options");
        assert_eq!(
            options,
            CliOptions {
                diagram: Some("main".to_owned()),
                ..CliOptions::default()
            }
        );
    }

    #[test]
    fn parses_everything() {
        let options = parse_options(args(&[
            "some/dir",
            "--diagram",
            "main",
            "--backend",
            "graph.json",
            "--review",
            "--accept-all",
            "--durable-writes",
        ]))
        .expect("parse options");
        assert_eq!(options.dir.as_deref(), Some("some/dir"));
        assert_eq!(options.backend.as_deref(), Some("graph.json"));
        assert!(options.review);
        assert!(options.accept_all);
        assert!(options.durable_writes);
        assert!(!options.schema);
    }

    #[test]
    fn parses_schema_alone() {
        let options = parse_options(args(&["--schema"])).expect("parse options");
        assert!(options.schema);
    }

    #[test]
    fn rejects_schema_with_other_flags() {
        parse_options(args(&["--schema", "--diagram", "main"])).unwrap_err();
        parse_options(args(&["dir", "--schema"])).unwrap_err();
    }

    #[test]
    fn requires_diagram() {
        parse_options(std::iter::empty()).unwrap_err();
        parse_options(args(&["dir", "--review"])).unwrap_err();
    }

    #[test]
    fn rejects_missing_values() {
        parse_options(args(&["--diagram"])).unwrap_err();
        parse_options(args(&["--diagram", "main", "--backend"])).unwrap_err();
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(args(&["--diagram", "main", "--nope"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--diagram", "a", "--diagram", "b"])).unwrap_err();
        parse_options(args(&["--diagram", "a", "--review", "--review"])).unwrap_err();
        parse_options(args(&["one", "two", "--diagram", "a"])).unwrap_err();
    }
}
