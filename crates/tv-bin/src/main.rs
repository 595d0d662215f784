//! `traceview`: colour-grouped terminal viewer for strace-style trace files.
//!
//! Startup order matters: arguments, configuration, logging and the panic
//! hook are set up and the document is fully loaded before the terminal is
//! touched, so load failures are reported on an untouched screen.

mod session;

use clap::Parser;
use core_input::CrosstermKeySource;
use core_terminal::{CrosstermBackend, TerminalCapabilities};
use session::Failure;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(
    name = "traceview",
    version,
    about = "Colour-grouped trace file viewer",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// Trace file to view. Any other number of arguments does nothing.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    paths: Vec<PathBuf>,
}

fn configure_logging(log_path: &Path) -> Option<WorkerGuard> {
    if log_path.exists() {
        let _ = std::fs::remove_file(log_path);
    }
    let dir = match log_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = log_path.file_name()?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let restored = core_terminal::restore_terminal();
            tracing::error!(target: "runtime.panic", ?info, restored, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> ExitCode {
    let args = Args::parse();
    let [path] = args.paths.as_slice() else {
        return ExitCode::SUCCESS;
    };

    let config = match core_config::load_from(None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("traceview: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    let _log_guard = configure_logging(config.log_file());
    install_panic_hook();
    info!(
        target: "runtime.startup",
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        "startup"
    );

    let mut backend = CrosstermBackend::new();
    let mut keys = CrosstermKeySource::new();
    let caps = TerminalCapabilities::detect();
    let result = session::run(
        path,
        &config,
        &mut backend,
        &mut keys,
        std::io::stdout(),
        caps,
    );
    match result {
        Ok(reason) => {
            info!(target: "runtime", reason = reason.as_str(), "exit");
            ExitCode::SUCCESS
        }
        Err(Failure::Startup(e)) => {
            eprintln!("traceview: {e:#}");
            ExitCode::FAILURE
        }
        Err(Failure::Render(e)) => {
            tracing::error!(target: "runtime", error = %e, "render_failure");
            eprintln!("traceview: {e:?}");
            ExitCode::FAILURE
        }
    }
}
