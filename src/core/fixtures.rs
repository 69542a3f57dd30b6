//! Recording helpers for persisting HTTP fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn fixture_dir() -> PathBuf {
    env::var("IEX_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Batch labels are comma-joined symbol lists; keep file names portable.
fn sanitize(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '-' })
        .collect()
}

pub(crate) fn record_fixture(
    endpoint: &str,
    label: &str,
    ext: &str,
    body: &str,
) -> Result<(), std::io::Error> {
    let dir = fixture_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    let path = dir.join(format!("{}_{}.{}", endpoint, sanitize(label), ext));
    fs::write(&path, body)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = %path.display(), "IEX_RECORD: wrote fixture");
    Ok(())
}
