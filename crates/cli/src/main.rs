use clap::{Parser, Subcommand};
use showcase_core::{
    config::{asset_dir_from_env_value, build_mode_from_env_value},
    constants::{ASSET_DIR_ENV_VAR, MODE_ENV_VAR},
    integrity::check_dataset,
    render::copy::required_labels,
    session::parse_event_script,
    DatasetStore, PageQuery, Showcase, ShowcaseConfig, ViewMode,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "showcase")]
#[command(about = "Clinical nutrition showcase CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the compiled-in dataset invariants (runs in every build mode)
    Validate,
    /// List demonstration cases
    Cases,
    /// Print one case as JSON
    Show {
        /// Case id
        id: String,
        /// View mode: primary, structured or raw
        #[arg(long, default_value = "primary")]
        view: String,
    },
    /// Render the page to HTML
    Render {
        /// Active section id
        #[arg(long)]
        section: Option<String>,
        /// Selected case id
        #[arg(long)]
        case: Option<String>,
        /// View mode: primary, structured or raw
        #[arg(long)]
        view: Option<String>,
        /// Asset directory checked for images (defaults to SHOWCASE_ASSET_DIR or ./assets)
        #[arg(long)]
        assets: Option<PathBuf>,
        /// Output file (stdout if omitted)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Replay a YAML or JSON event script and print the state after each event
    Simulate {
        /// Path to the event script
        script: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("showcase_core=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate) => {
            let store = DatasetStore::builtin()?;
            match check_dataset(&store, &required_labels()) {
                Ok(()) => println!(
                    "Dataset OK: {} sections, {} cases",
                    store.nav_items().len(),
                    store.cases().len()
                ),
                Err(e) => {
                    eprintln!("Dataset invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Cases) => {
            let showcase = start(None)?;
            for case in showcase.store().cases() {
                println!(
                    "{}: {} [{}]",
                    case.id,
                    case.title,
                    case.tags.join(", ")
                );
            }
        }
        Some(Commands::Show { id, view }) => {
            let showcase = start(None)?;
            let mode: ViewMode = view.parse()?;
            match showcase.store().case(&id) {
                Some(case) => {
                    let projection = showcase_core::project_case(case, mode)?;
                    println!("{}", serde_json::to_string_pretty(&projection)?);
                }
                None => {
                    eprintln!("No case with id '{}'", id);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Render {
            section,
            case,
            view,
            assets,
            out,
        }) => {
            let showcase = start(assets)?;
            let html = showcase.render(&PageQuery {
                section,
                case,
                view,
                link: None,
            })?;
            match out {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Some(Commands::Simulate { script }) => {
            let showcase = start(None)?;
            let text = std::fs::read_to_string(&script)?;
            let events = parse_event_script(&text)?;
            let mut session = showcase.new_session();
            println!("initial: {}", serde_json::to_string(&session.snapshot())?);
            for (i, event) in events.iter().enumerate() {
                session.dispatch(event);
                println!(
                    "{:>3} {}: {}",
                    i + 1,
                    serde_json::to_string(event)?,
                    serde_json::to_string(&session.snapshot())?
                );
            }
        }
        None => {
            println!("Use 'showcase --help' for commands");
        }
    }

    Ok(())
}

/// Starts the showcase with configuration from the environment.
fn start(asset_override: Option<PathBuf>) -> Result<Showcase, Box<dyn std::error::Error>> {
    let mode = build_mode_from_env_value(std::env::var(MODE_ENV_VAR).ok())?;
    let asset_dir = asset_override
        .unwrap_or_else(|| asset_dir_from_env_value(std::env::var(ASSET_DIR_ENV_VAR).ok()));
    tracing::debug!("assets from {}", asset_dir.display());
    Ok(Showcase::start(ShowcaseConfig::new(mode, asset_dir))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_flags() {
        let cli = Cli::parse_from([
            "showcase", "render", "--case", "case-2", "--view", "raw", "-o", "page.html",
        ]);
        match cli.command {
            Some(Commands::Render {
                case, view, out, ..
            }) => {
                assert_eq!(case.as_deref(), Some("case-2"));
                assert_eq!(view.as_deref(), Some("raw"));
                assert_eq!(out, Some(PathBuf::from("page.html")));
            }
            _ => panic!("expected render command"),
        }
    }
}
