//! Terminal, user-facing rendering of classified failures.
//!
//! Exactly one message per failed request. Quota, malformed-request, and
//! rate-limit failures are operationally indistinguishable to the end user
//! (wait, then re-trigger), so all three render the same message; anything
//! unclassified passes its text through for diagnosis. Nothing here retries.

use tendenza_core::{ErrorKind, TendenzaError};

/// Message for the quota/billing/throttling failure class.
pub const QUOTA_MESSAGE: &str = "Warehouse quota or credits exceeded. Please try again later.";

/// Message for an empty reference country set.
pub const NO_DATA_MESSAGE: &str = "No countries available from the dataset.";

/// Render the single user-facing message for a failed request.
#[must_use]
pub fn user_message(err: &TendenzaError) -> String {
    match err {
        TendenzaError::NoReferenceData => NO_DATA_MESSAGE.to_owned(),
        e => match e.kind() {
            ErrorKind::QuotaExceeded | ErrorKind::MalformedRequest | ErrorKind::RateLimited => {
                QUOTA_MESSAGE.to_owned()
            }
            ErrorKind::Unknown => format!("Unexpected error: {e}"),
        },
    }
}
