use thiserror::Error;

/// Top-level failure of a sync run.
#[derive(Debug, Error)]
pub(crate) enum SyncError {
    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("request for {url} failed: {reason}")]
    Transfer { url: String, reason: String },

    #[error("unable to retrieve {url} within {timeout_secs} seconds")]
    Timeout { url: String, timeout_secs: u64 },
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("carto request failed: {0}")]
    Request(#[from] ureq::Error),

    #[error("carto error response ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected carto response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("missing required environment variable {name}")]
    MissingEnv { name: &'static str },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_timeout() {
        let e = FetchError::Timeout {
            url: "https://example.org/data.txt".to_string(),
            timeout_secs: 300,
        };
        assert_eq!(
            e.to_string(),
            "unable to retrieve https://example.org/data.txt within 300 seconds"
        );
    }

    #[test]
    fn fetch_error_display_transfer() {
        let e = FetchError::Transfer {
            url: "https://example.org/".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "request for https://example.org/ failed: connection refused"
        );
    }

    #[test]
    fn store_error_display_api() {
        let e = StoreError::Api {
            status: 401,
            body: "{\"error\":[\"unauthorized\"]}".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "carto error response (401): {\"error\":[\"unauthorized\"]}"
        );
    }

    #[test]
    fn config_error_display_missing_env() {
        let e = ConfigError::MissingEnv { name: "CARTO_KEY" };
        assert_eq!(
            e.to_string(),
            "missing required environment variable CARTO_KEY"
        );
    }

    #[test]
    fn sync_error_from_fetch_error() {
        let fetch = FetchError::Timeout {
            url: "x".to_string(),
            timeout_secs: 5,
        };
        let sync: SyncError = fetch.into();
        assert_eq!(sync.to_string(), "unable to retrieve x within 5 seconds");
    }
}
