use clap::{Parser, Subcommand};
use gitporter::events::TracingReporter;
use gitporter::export_project;
use gitporter::logger::initialize_logger;
use gitporter::settings::Settings;
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    cmd: SubCommands,
}

#[derive(Subcommand, Debug, Clone)]
enum SubCommands {
    Export(ExportArgs),
    SetDefault(SetDefaultArgs),
}

#[derive(Parser, Debug, Clone)]
struct ExportArgs {
    #[arg(help = "Project root to export; defaults to the remembered path, then the current directory")]
    root: Option<PathBuf>,
    #[arg(long, help = "Do not remember this root as the default for later runs")]
    no_remember: bool,
}

#[derive(Parser, Debug, Clone)]
struct SetDefaultArgs {
    #[arg(required = true)]
    path: PathBuf,
}

#[tokio::main]
async fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let settings_path = Settings::default_location();

    match cli_args.cmd {
        SubCommands::Export(args) => {
            let mut settings = match Settings::load(&settings_path).await {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("Ignoring unreadable settings file: {}", e);
                    Settings::default()
                }
            };

            let root = args
                .root
                .or_else(|| settings.default_path.clone().filter(|p| p.exists()))
                .unwrap_or_else(|| PathBuf::from("."));

            match export_project(&root, TracingReporter).await {
                Ok(outcome) => {
                    info!(
                        "Exported {} files to {}",
                        outcome.copied,
                        outcome.output_dir.display()
                    );
                    if !args.no_remember {
                        settings.default_path = Some(root);
                        if let Err(e) = settings.store(&settings_path).await {
                            warn!("Failed to remember export root: {}", e);
                        }
                    }
                }
                Err(e) => {
                    error!("Export failed: {}", e);
                    std::process::exit(1);
                }
            }
        }
        SubCommands::SetDefault(args) => {
            if !args.path.is_dir() {
                error!("{} is not a directory", args.path.display());
                std::process::exit(1);
            }
            let mut settings = Settings::load(&settings_path)
                .await
                .unwrap_or_default();
            settings.default_path = Some(args.path.clone());
            if let Err(e) = settings.store(&settings_path).await {
                error!("Failed to store settings: {}", e);
                std::process::exit(1);
            }
            info!("Default export root set to {}", args.path.display());
        }
    }
}
