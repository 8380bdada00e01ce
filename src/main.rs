// src/main.rs
// =============================================================================
// This is the entry point of the gist-embed CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Load the config and switch on the requested debug logs
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = all rendered, 1 = some references failed,
//    2 = setup error)
// =============================================================================

mod cli;

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use gist_embed::{logging, scan, CodeblockOptions, Config, RenderReport, Widgets};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.enable_debug(cli.debug);
    logging::init(&config.debug);

    let widgets = Widgets::from_config(&config)?;
    let concurrency = config.http.max_connections;

    match cli.command {
        Commands::Codeblock {
            references,
            indent,
            ext,
            json,
        } => {
            let options = CodeblockOptions { indent, ext };
            let reports = widgets
                .render_codeblocks(references, &options, concurrency)
                .await;
            print_reports(&reports, json)
        }
        Commands::Svg { reference } => match widgets.try_svg_gist(&reference).await {
            Ok(svg) => {
                println!("{}", svg);
                Ok(0)
            }
            Err(e) => {
                println!("Error: {}", e);
                Ok(1)
            }
        },
        Commands::Scan {
            markdown_file,
            indent,
            json,
        } => {
            let markdown = fs::read_to_string(&markdown_file)
                .with_context(|| format!("Failed to read {}", markdown_file.display()))?;

            let references =
                scan::extract_gist_references(&markdown, widgets.resolver().parser());
            if references.is_empty() {
                eprintln!("No gist references found in {}", markdown_file.display());
                return Ok(0);
            }
            eprintln!("Rendering {} gist reference(s)...", references.len());

            let options = CodeblockOptions { indent, ext: None };
            let reports = widgets
                .render_codeblocks(references, &options, concurrency)
                .await;
            print_reports(&reports, json)
        }
    }
}

// Prints the rendered blocks (or JSON) and picks the exit code
fn print_reports(reports: &[RenderReport], json: bool) -> Result<i32> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
    } else {
        for report in reports {
            if reports.len() > 1 {
                println!("<!-- {} -->", report.reference);
            }
            println!("{}", report.output);
        }
    }

    let failed = reports.iter().filter(|r| !r.ok).count();
    if failed > 0 {
        eprintln!("{} of {} reference(s) failed", failed, reports.len());
        Ok(1)
    } else {
        Ok(0)
    }
}
