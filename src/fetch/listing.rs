//! Selection of the dataset filename from a remote directory listing.
//!
//! Listings arrive as plaintext, one entry per line, with the filename as
//! the last whitespace token (the format FTP-era data servers still emit).

use tracing::{debug, info, warn};

/// Pick the dataset filename out of `lines`: the last-listed entry ending in
/// `suffix` and containing `marker`.
///
/// Zero matches yield an empty string and a warning; the caller is expected
/// to check for emptiness. Multiple matches keep the most recently listed
/// entry and warn.
pub(crate) fn select_data_filename<'a, I>(lines: I, suffix: &str, marker: &str) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut filename = String::new();
    let mut already_found = false;

    for line in lines {
        let Some(candidate) = line.split_whitespace().last() else {
            continue;
        };
        debug!("listing entry: {candidate}");
        if candidate.ends_with(suffix) && candidate.contains(marker) {
            if already_found {
                warn!("multiple filenames match the source criteria, keeping the most recent");
            }
            filename = candidate.to_string();
            already_found = true;
        }
    }

    info!("selected filename: {filename:?}");
    if !already_found {
        warn!("no matching filename found in source listing");
    }
    filename
}
