use std::fs::File;
use std::path::PathBuf;

use blogdeck::core::config::{self, CliOverrides};
use blogdeck::hardware;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "blogdeck", about = "Posts, pages, comments and stats for your blogs")]
struct Args {
    /// Blog to open (id from the [[blogs]] config table)
    #[arg(short, long)]
    blog: Option<String>,

    /// Directory for saved tab state
    #[arg(long)]
    state_dir: Option<PathBuf>,

    /// Keep tab state in memory only
    #[arg(long)]
    no_persist: bool,

    /// Forget the saved tab state before starting
    #[arg(long)]
    reset_state: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (config::BlogdeckConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            blog: args.blog,
            state_dir: args.state_dir,
            no_persist: args.no_persist,
        },
    );

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Ignoring config file, using defaults: {}", e);
    }
    log::info!(
        "Blogdeck starting on {} with {} blog(s)",
        hardware::platform_display_name(),
        resolved.blogs.len()
    );

    blogdeck::tui::run(resolved, args.reset_state)
}
