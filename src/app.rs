//! Entry composition: settings, credentials, then the probe.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::credentials::Credentials;
use crate::error::ProbeError;
use crate::probe::{Probe, ProbeOptions, ProbeReport};
use crate::rest::{DEFAULT_TIMEOUT, RestClient, RestConfig};
use crate::settings::{DEFAULT_SETTINGS_FILE, Settings};

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub settings_path: PathBuf,
    pub timeout: Duration,
    pub probe: ProbeOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            timeout: DEFAULT_TIMEOUT,
            probe: ProbeOptions::default(),
        }
    }
}

/// Load settings, resolve credentials and run the probe.
///
/// Errors come back untouched; [`report`] turns them into output and an exit code.
pub async fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<ProbeReport, ProbeError> {
    let settings = Settings::load(&config.settings_path)?;
    let credentials = Credentials::resolve(&settings)?;
    tracing::debug!("Resolved {:?}", credentials);

    let client = RestClient::with_config(
        &credentials,
        RestConfig {
            timeout: config.timeout,
        },
    )?;

    let report = Probe::new(&client, config.probe.clone()).run(out).await?;
    tracing::info!(
        "Probe finished: {} game(s), {} team listing(s)",
        report.games.len(),
        report.teams.len()
    );
    Ok(report)
}

/// Run and print any diagnostic to `out`, returning the process exit status.
pub async fn run_and_report<W: Write>(config: &RunConfig, out: &mut W) -> u8 {
    let result = run(config, out).await;
    report(result, out)
}

/// Map a run result to its exit status, printing the diagnostic for failures.
pub fn report<W: Write>(result: Result<ProbeReport, ProbeError>, out: &mut W) -> u8 {
    match result {
        Ok(_) => 0,
        Err(err) => {
            if let ProbeError::Query(ref cause) = err {
                tracing::warn!("Query phase abandoned: {}", cause);
            }
            // Nothing more to do if stdout itself is gone.
            let _ = writeln!(out, "{}", err);
            err.exit_code()
        }
    }
}
