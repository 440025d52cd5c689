//! Logging bootstrap for the embedding shell.
//!
//! The console writes its traces to a file under the platform data
//! directory rather than to the terminal the shell was launched from.
//! Call [`init_logging`] once, before constructing any other part of the
//! crate; it is a no-op error to call it twice.

use tracing_subscriber::prelude::*;

/// Initialize file-based logging under the platform data directory
/// (`~/.local/share/jobdash/logs/jobdash.log` on Linux).
///
/// The filter honors `RUST_LOG` when set and otherwise defaults to info
/// for this crate with HTTP internals quieted. Events emitted through the
/// `log` facade are bridged into tracing.
///
/// Returns false when logging could not be set up (no home directory,
/// unwritable log file, or a subscriber already installed); the console
/// keeps running without file logs in that case.
pub fn init_logging() -> bool {
    let proj_dirs = match directories::ProjectDirs::from("com", "", "jobdash") {
        Some(dirs) => dirs,
        None => {
            eprintln!("No home directory found, file logging disabled");
            return false;
        }
    };

    let log_dir = proj_dirs.data_dir().join("logs");
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create log directory {:?}: {}", log_dir, e);
        return false;
    }

    let log_path = log_dir.join("jobdash.log");
    let file = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return false;
        }
    };

    // Set restrictive permissions (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = file.metadata() {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&log_path, perms) {
                eprintln!("Failed to set log file permissions: {}", e);
            }
        }
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::builder()
                .parse("jobdash=info,reqwest=warn,hyper=warn")
        })
        .unwrap_or_default();

    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(move || file.try_clone().expect("Failed to clone file handle"))
            .with_ansi(false), // No ANSI colors in file
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A tracing subscriber is already installed, keeping it");
        return false;
    }

    // Bridge log crate events to tracing. Must happen AFTER the subscriber
    // is installed.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    tracing::info!("Logging initialized to: {:?}", log_path);
    true
}
