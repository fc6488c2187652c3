//! Reachability check against the preferences service.

use std::time::{Duration, Instant};

use psp_common::{PspError, SessionId};
use psp_config::schema::DiagnosticsConfig;

/// Header carrying the session id on diagnostic requests.
pub const SESSION_HEADER: &str = "X-Psp-Session";

/// Outcome of one diagnostics request.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticReport {
    pub url: String,
    pub status: u16,
    pub elapsed: Duration,
}

impl DiagnosticReport {
    pub fn is_healthy(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issue a single GET to the preferences service. No retries.
pub async fn check_preferences(
    config: &DiagnosticsConfig,
    session: &SessionId,
) -> Result<DiagnosticReport, PspError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| PspError::Network(e.to_string()))?;

    let started = Instant::now();
    let response = client
        .get(&config.preferences_url)
        .header("User-Agent", concat!("psp/", env!("CARGO_PKG_VERSION")))
        .header(SESSION_HEADER, session.as_str())
        .send()
        .await
        .map_err(|e| PspError::Network(e.to_string()))?;

    Ok(DiagnosticReport {
        url: config.preferences_url.clone(),
        status: response.status().as_u16(),
        elapsed: started.elapsed(),
    })
}

/// Run the check and log the outcome. Failures never stop the app.
pub async fn run(config: &DiagnosticsConfig, session: &SessionId) -> Option<DiagnosticReport> {
    match check_preferences(config, session).await {
        Ok(report) if report.is_healthy() => {
            tracing::info!(
                url = %report.url,
                status = report.status,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "Preferences service reachable"
            );
            Some(report)
        }
        Ok(report) => {
            tracing::warn!(
                url = %report.url,
                status = report.status,
                "Preferences service answered with an error"
            );
            Some(report)
        }
        Err(e) => {
            tracing::warn!(url = %config.preferences_url, error = %e, "Preferences service unreachable");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_status_range() {
        let report = |status| DiagnosticReport {
            url: "http://localhost".into(),
            status,
            elapsed: Duration::ZERO,
        };
        assert!(report(200).is_healthy());
        assert!(report(204).is_healthy());
        assert!(!report(404).is_healthy());
        assert!(!report(503).is_healthy());
    }

    #[tokio::test]
    async fn unreachable_service_is_network_error() {
        let config = DiagnosticsConfig {
            enabled: true,
            // Port 9 (discard) on loopback is not expected to serve HTTP.
            preferences_url: "http://127.0.0.1:9/preferences".into(),
            timeout_secs: 2,
        };
        let err = check_preferences(&config, &SessionId::new()).await.unwrap_err();
        assert!(matches!(err, PspError::Network(_)));
    }

    #[tokio::test]
    async fn run_swallows_failures() {
        let config = DiagnosticsConfig {
            enabled: true,
            preferences_url: "http://127.0.0.1:9/preferences".into(),
            timeout_secs: 1,
        };
        assert!(run(&config, &SessionId::new()).await.is_none());
    }
}
