//! Resume portal: submit and search resumes on a remote resume service

use clap::Parser;
use log::{error, info};
use resume_portal::api::{HttpResumeService, ResumeService};
use resume_portal::browser::open_in_browser;
use resume_portal::cli::{Cli, Commands, ConfigAction};
use resume_portal::config::{Config, OutputFormat};
use resume_portal::notify::NotificationCenter;
use resume_portal::output::formatter::{resolve_save_path, save_output_to_file, ConsoleFormatter, ViewRenderer};
use resume_portal::output::progress::{with_spinner, SEARCHING, UPLOADING};
use resume_portal::router::Route;
use resume_portal::screens::{SearchOutcome, SearchScreen, SubmitOutcome, SubmitScreen};
use resume_portal::shell::Shell;
use resume_portal::{PortalError, Result};
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let mut config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Some(base_url) = cli.base_url {
        config.service.base_url = base_url;
    }
    if cli.no_color {
        config.output.color_output = false;
    }

    let command = cli.command.unwrap_or(Commands::Shell {
        path: "/".to_string(),
    });

    if let Err(e) = run_command(command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Shell { path } => {
            let route = Route::resolve(&path)?;
            let service: Arc<dyn ResumeService> = Arc::new(HttpResumeService::new(&config.service.base_url)?);
            info!("Resume service at {}", config.service.base_url);

            let mut shell = Shell::new(service, &config, route, std::io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell.run(stdin).await?;
        }

        Commands::Submit { file } => {
            let service: Arc<dyn ResumeService> = Arc::new(HttpResumeService::new(&config.service.base_url)?);
            let console = ConsoleFormatter::new(config.output.color_output);
            let (notifier, mut center) = NotificationCenter::channel();
            let mut screen = SubmitScreen::new(service, notifier);

            let selected = screen.select_file(&file);
            let outcome = match selected {
                Ok(()) => Some(with_spinner(config.output.show_spinner, UPLOADING, screen.submit()).await),
                Err(_) => None,
            };

            for notification in center.drain() {
                println!("{}", console.format_notification(&notification));
            }

            selected?;
            match outcome {
                Some(SubmitOutcome::Succeeded(_)) => {}
                Some(SubmitOutcome::Rejected(message)) => return Err(PortalError::ActionFailed(message)),
                _ => return Err(PortalError::ActionFailed(format!("Upload of {} failed", file.display()))),
            }
        }

        Commands::Search { query, output, save } => {
            let format = match output {
                Some(format) => format.parse()?,
                None => config.output.format,
            };

            let service: Arc<dyn ResumeService> = Arc::new(HttpResumeService::new(&config.service.base_url)?);
            let renderer = ViewRenderer::new(config.output.color_output && save.is_none());
            let (notifier, mut center) = NotificationCenter::channel();
            let mut screen = SearchScreen::new(service, notifier);

            screen.set_query(query);
            let outcome = with_spinner(config.output.show_spinner, SEARCHING, screen.search()).await;

            // Notices go to stderr so JSON/HTML on stdout stays clean.
            for notification in center.drain() {
                eprintln!("{}", renderer.console().format_notification(&notification));
            }

            match outcome {
                SearchOutcome::Rendered(count) => info!("Rendered {} results", count),
                SearchOutcome::EmptyQuery => {
                    return Err(PortalError::InvalidInput("Search query is empty".to_string()))
                }
                SearchOutcome::Failed => return Err(PortalError::ActionFailed("Search failed".to_string())),
            }

            let rendered = renderer.render_search(&screen, format)?;
            match save {
                Some(path) => {
                    let path = resolve_save_path(&path, format, screen.query());
                    save_output_to_file(&rendered, &path)?;
                    println!("💾 Saved results to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Link { pdf_file_id } => {
            let service = HttpResumeService::new(&config.service.base_url)?;
            println!("{}", service.resume_url(&pdf_file_id));
        }

        Commands::Open { pdf_file_id } => {
            let service = HttpResumeService::new(&config.service.base_url)?;
            open_in_browser(&service.resume_url(&pdf_file_id))?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| PortalError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Set { key, value }) => {
                // Start from the file so --base-url and --no-color are not persisted.
                let mut stored = Config::load_from(config_path)?;
                stored.set(&key, &value)?;
                stored.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
            }
        },
    }

    Ok(())
}
