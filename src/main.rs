// SPDX-License-Identifier: MPL-2.0
use std::process::ExitCode;

use ts_lens::{cli, config, logging, paths};

fn main() -> ExitCode {
    match try_run() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("ts_lens: {err}");
            ExitCode::from(2)
        }
    }
}

fn try_run() -> ts_lens::Result<u8> {
    let cli = cli::parse_env()?;
    paths::init_cli_overrides(cli.config_dir.clone());

    let (config, warning) = config::load();
    logging::init(cli.verbose, &config.logging.level);
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    cli::run(&cli.command, &config, &mut out)
}
