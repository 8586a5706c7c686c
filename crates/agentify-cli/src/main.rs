//! agentify CLI entrypoint
//! Parses command-line arguments and dispatches to the core analyzer and
//! generator.

// Internal imports (std, crate)
use std::path::PathBuf;
use std::str::FromStr;

// External imports (alphabetized)
use agentify_core::{analyze, generate, GenerationAction, McpConfig, ProjectType, TemplateResolver};
use anyhow::Context;
use clap::Parser;
use tokio::fs;

#[derive(Parser)]
#[command(name = "agentify")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Analyze a project and print its discovered HTTP surface as JSON
    Analyze {
        /// Path to the project to analyze
        #[arg(long)]
        project_path: PathBuf,
        /// Extraction mode: auto, rest-api, nodejs or openapi
        #[arg(long, default_value = "auto")]
        project_type: String,
        /// Write the ProjectInfo JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Analyze a project and generate an MCP server from it
    Generate {
        /// Path to the project to analyze
        #[arg(long)]
        project_path: PathBuf,
        /// Extraction mode: auto, rest-api, nodejs or openapi
        #[arg(long, default_value = "auto")]
        project_type: String,
        /// Path to an agentify.config.json (defaults to one in the project root)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output directory for the generated server
        #[arg(long)]
        output_dir: PathBuf,
        /// Report intended writes without touching the filesystem
        #[arg(long)]
        dry_run: bool,
        /// Custom template directory (overrides built-in templates by name)
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
}

/// `auto` means detection; anything else must name a supported mode.
fn parse_project_type(value: &str) -> anyhow::Result<Option<ProjectType>> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    ProjectType::from_str(value)
        .map(Some)
        .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match &cli.command {
        Commands::Analyze {
            project_path,
            project_type,
            output,
        } => {
            let project_type = parse_project_type(project_type)?;
            let info = analyze(project_path, project_type)
                .await
                .context("Analysis failed")?;

            let json = serde_json::to_string_pretty(&info)?;
            match output {
                Some(path) => {
                    fs::write(path, &json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "Wrote {} endpoint(s) to {}",
                        info.endpoints.len(),
                        path.display()
                    );
                }
                None => println!("{}", json),
            }
        }
        Commands::Generate {
            project_path,
            project_type,
            config,
            output_dir,
            dry_run,
            template_dir,
        } => {
            let project_type = parse_project_type(project_type)?;

            let config = match config {
                Some(path) => McpConfig::from_file(path)
                    .await
                    .with_context(|| format!("Failed to load configuration {}", path.display()))?,
                None => {
                    let default_path = project_path.join("agentify.config.json");
                    McpConfig::load_or_default(Some(default_path.as_path()))
                        .await
                        .context("Failed to load configuration")?
                }
            };

            let resolver = match template_dir {
                Some(dir) => TemplateResolver::new(Some(dir))
                    .context("Failed to load custom templates")?,
                None => TemplateResolver::with_discovered_overrides()
                    .context("Failed to load templates")?,
            };

            let info = analyze(project_path, project_type)
                .await
                .context("Analysis failed")?;
            println!(
                "Discovered {} endpoint(s) in {}",
                info.endpoints.len(),
                project_path.display()
            );

            let report = generate(&info, &config, output_dir, *dry_run, &resolver)
                .await
                .context("Generation failed")?;

            if *dry_run {
                println!("Dry run - no files were written. Planned actions:");
                for action in &report.actions {
                    match action {
                        GenerationAction::CreateDir(path) => {
                            println!("  mkdir {}", path.display())
                        }
                        GenerationAction::WriteFile(path) => {
                            println!("  write {}", path.display())
                        }
                    }
                }
            } else {
                println!(
                    "Successfully generated {} file(s) in: {}",
                    report.written_files().len(),
                    output_dir.display()
                );
            }
        }
    }
    Ok(())
}
