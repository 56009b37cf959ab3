// In crates/web-server/src/types.rs

use serde::Deserialize;

/// Query parameters of the snapshot endpoints (e.g. `?symbol=RELIANCE.NS`).
#[derive(Debug, Default, Deserialize)]
pub struct SnapshotParams {
    /// Falls back to the configured default symbol when absent.
    pub symbol: Option<String>,
}
