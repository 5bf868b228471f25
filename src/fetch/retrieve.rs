//! Resilient retrieval: keep re-requesting a URL until it answers or a
//! wall-clock deadline passes.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::error::FetchError;
use crate::fetch::transport::Transport;

/// Join a base URL and a filename with exactly one separating slash.
pub(crate) fn join_url(base: &str, filename: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), filename)
}

/// Fetch `url` as lines of text, retrying every `retry_delay` until `timeout`
/// of wall-clock time has elapsed.
///
/// On deadline expiry the outcome depends on `strict`: an error in strict
/// mode, an empty line set otherwise so the caller can finish the run with
/// nothing to do.
pub(crate) fn fetch_with_retry(
    transport: &dyn Transport,
    url: &str,
    timeout: Duration,
    retry_delay: Duration,
    strict: bool,
) -> Result<Vec<String>, FetchError> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        match transport.fetch_text(url) {
            Ok(text) => {
                info!("fetched {url}");
                return Ok(text.lines().map(str::to_string).collect());
            }
            Err(err) => {
                error!("fetch attempt failed: {err}");
                thread::sleep(retry_delay);
            }
        }
    }

    error!("unable to retrieve {url} within {} seconds", timeout.as_secs());
    if strict {
        Err(FetchError::Timeout {
            url: url.to_string(),
            timeout_secs: timeout.as_secs(),
        })
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct OkTransport;

    impl Transport for OkTransport {
        fn fetch_text(&self, _url: &str) -> Result<String, FetchError> {
            Ok("first\nsecond\n".to_string())
        }
    }

    struct FailingTransport {
        attempts: Cell<u32>,
    }

    impl Transport for FailingTransport {
        fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
            self.attempts.set(self.attempts.get() + 1);
            Err(FetchError::Transfer {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    #[test]
    fn joins_base_and_filename() {
        assert_eq!(join_url("http://host/data", "f.txt"), "http://host/data/f.txt");
        assert_eq!(join_url("http://host/data/", "f.txt"), "http://host/data/f.txt");
        assert_eq!(join_url("http://host/data", ""), "http://host/data/");
    }

    #[test]
    fn returns_lines_on_first_success() {
        let lines = fetch_with_retry(
            &OkTransport,
            "http://example/data.txt",
            Duration::from_secs(1),
            Duration::from_millis(5),
            false,
        )
        .unwrap();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn retries_until_deadline_then_returns_empty() {
        let transport = FailingTransport { attempts: Cell::new(0) };
        let lines = fetch_with_retry(
            &transport,
            "http://example/data.txt",
            Duration::from_millis(100),
            Duration::from_millis(20),
            false,
        )
        .unwrap();
        assert!(lines.is_empty());
        let attempts = transport.attempts.get();
        assert!((1..=6).contains(&attempts), "attempts = {attempts}");
    }

    #[test]
    fn strict_mode_turns_deadline_into_error() {
        let transport = FailingTransport { attempts: Cell::new(0) };
        let result = fetch_with_retry(
            &transport,
            "http://example/data.txt",
            Duration::from_millis(50),
            Duration::from_millis(10),
            true,
        );
        assert!(matches!(result, Err(FetchError::Timeout { .. })));
    }
}
