use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use texplorer::core::config::Cli;
use texplorer::core::telemetry::logging::init_logging;
use texplorer::pages::explorer::Explorer;
use texplorer::ui::menu::run_menu;

fn main() -> Result<ExitCode> {
    let (config, action) = Cli::parse().into_config();
    init_logging(&config.log_filter);

    let mut explorer = Explorer::open(config.start_dir.as_deref())
        .context("failed to open starting directory")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let ok = match action {
        Some(action) => explorer.execute(&action, &mut out, config.output)?,
        None => {
            let stdin = io::stdin();
            run_menu(&mut explorer, stdin.lock(), &mut out)?;
            true
        }
    };
    out.flush()?;

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
