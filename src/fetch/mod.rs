//! Remote-source access: listing selection and resilient retrieval.

pub(crate) mod listing;
pub(crate) mod retrieve;
pub(crate) mod transport;

pub(crate) use listing::select_data_filename;
pub(crate) use retrieve::{fetch_with_retry, join_url};
pub(crate) use transport::{HttpTransport, Transport};
