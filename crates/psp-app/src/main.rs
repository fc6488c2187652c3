mod app_state;
mod cli;
mod diagnostics;
mod driver;
mod logging;
mod positioning;
mod registry;
mod store;
mod window;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use psp_common::WindowKind;

use crate::app_state::PspApp;
use crate::driver::Driver;

/// Banner printed on a crash. Names the log file only when one is open.
fn crash_banner(log_path: Option<&Path>) -> String {
    let mut banner = String::from("\n--- psp crashed ---\n");
    if let Some(path) = log_path {
        banner.push_str(&format!(
            "The log file has the events leading up to it: {}\n",
            path.display()
        ));
    }
    banner.push_str("-------------------\n");
    banner
}

fn install_panic_hook(log_path: Option<PathBuf>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        eprintln!("{}", crash_banner(log_path.as_deref()));
        default_hook(info);
    }));
}

fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so its [logging] section applies.
    let loaded = psp_config::load_config(args.config.as_deref());
    let logging_config = loaded
        .as_ref()
        .map(|l| l.config.logging.clone())
        .unwrap_or_default();
    let log_path = logging::init(args.log_level.as_deref(), &logging_config);
    install_panic_hook(log_path.clone());

    tracing::info!("psp v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = log_path {
        tracing::info!(path = %path.display(), "Logging to file");
    }

    let config = match loaded {
        Ok(loaded) => {
            match loaded.source {
                psp_config::ConfigSource::File(ref path) => {
                    tracing::info!(path = %path.display(), "Loaded config");
                }
                psp_config::ConfigSource::Created(ref path) => {
                    tracing::info!(path = %path.display(), "No config found, wrote default");
                }
            }
            loaded.config
        }
        Err(e) if args.config.is_some() => {
            tracing::error!("Config load failed: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            psp_config::PspConfig::default()
        }
    };
    tracing::info!(
        settings = config.settings.catalog.len(),
        "Config ready"
    );
    tracing::debug!("Effective config:\n{}", psp_config::config_to_json(&config));

    let app = PspApp::new(config, args.screen);

    if args.diagnose || app.config().diagnostics.enabled {
        match tokio::runtime::Runtime::new() {
            Ok(rt) => {
                rt.block_on(diagnostics::run(&app.config().diagnostics, app.session()));
            }
            Err(e) => tracing::warn!("Failed to start runtime for diagnostics: {e}"),
        }
    }

    let mut driver = Driver::new(app);
    for kind in [WindowKind::Psp, WindowKind::Qss] {
        if let Err(e) = driver.open(kind, None) {
            tracing::error!(kind = %kind, error = %e, "Failed to open window");
        }
    }

    tracing::info!("Reading actions");
    let result = match args.actions {
        Some(ref path) => match File::open(path) {
            Ok(file) => driver.run(BufReader::new(file)),
            Err(e) => {
                tracing::error!(path = %path.display(), "Cannot open actions file: {e}");
                Ok(0)
            }
        },
        None => driver.run(std::io::stdin().lock()),
    };
    match result {
        Ok(applied) => tracing::info!(applied, "Actions processed"),
        Err(e) => tracing::error!("Reading actions failed: {e}"),
    }

    match serde_json::to_string_pretty(&driver.report()) {
        Ok(report) => println!("{report}"),
        Err(e) => tracing::error!("Failed to render report: {e}"),
    }

    tracing::info!(windows = driver.app().window_count(), "Shutting down");
    driver.shutdown();
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
