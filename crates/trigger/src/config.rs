//! Per-invocation configuration.
//!
//! The three trigger settings are read fresh from the environment on every
//! invocation. They are free-form strings: a missing variable becomes an empty
//! string and is interpolated into the target URL as-is.

/// Base URL of the Airflow web server.
pub const AIRFLOW_URI_VAR: &str = "AIRFLOW_URI";

/// Identifier of the DAG to trigger.
pub const DAG_ID_VAR: &str = "DAG_ID";

/// Enables verbose diagnostics when set to `TRUE` (trimmed, any case).
pub const VERBOSE_VAR: &str = "VERBOSE";

/// Settings for one trigger invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerConfig {
    /// Base URL of the Airflow web server, e.g. `https://abc-dot-europe-west1.composer.googleusercontent.com`.
    pub airflow_uri: String,
    /// DAG to trigger.
    pub dag_id: String,
    /// Whether verbose diagnostics are logged.
    pub verbose: bool,
}

impl TriggerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` if it is unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            airflow_uri: lookup(AIRFLOW_URI_VAR).unwrap_or_default(),
            dag_id: lookup(DAG_ID_VAR).unwrap_or_default(),
            verbose: lookup(VERBOSE_VAR)
                .map(|raw| parse_verbose(&raw))
                .unwrap_or(false),
        }
    }

    /// Returns the DAG run collection endpoint of the stable Airflow 2 REST API.
    pub fn target_url(&self) -> String {
        format!("{}/api/v1/dags/{}/dagRuns", self.airflow_uri, self.dag_id)
    }
}

/// Returns `true` only for `TRUE` in any case, ignoring surrounding whitespace.
pub fn parse_verbose(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}
