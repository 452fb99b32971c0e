//! Rasterization collaborator: converts PDF pages into PNG images by driving
//! the Poppler `pdftoppm` tool, one sequential invocation per page.
//!
//! The input bytes are bridged to the path-oriented tool through a temporary
//! directory that is removed on every exit path. Pages are attempted in order
//! and later pages are still tried when earlier ones fail; per-page failures
//! accumulate instead of aborting the loop.

use std::io::ErrorKind;
use std::path::Path;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::types::PageImage;

const PDFTOPPM_BIN: &str = "pdftoppm";
const RASTER_DPI: &str = "150";

#[derive(Debug, Error)]
pub enum RasterizeError {
    /// The external rasterization tool is not installed on this host.
    #[error("rasterization backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("rasterization failed: {0}")]
    Failed(String),
}

/// A page that could not be rasterized, with its cause.
#[derive(Debug, Clone)]
pub struct PageFailure {
    pub page_number: u32,
    pub reason: String,
}

/// Successfully rasterized pages plus the recorded per-page failures.
#[derive(Debug, Default)]
pub struct RasterizedPages {
    pub pages: Vec<PageImage>,
    pub failures: Vec<PageFailure>,
}

/// Rasterizes every page of the document to PNG bytes.
///
/// Returns [`RasterizeError::BackendUnavailable`] only when the `pdftoppm`
/// binary itself cannot be spawned; any other failure is recorded per page in
/// the returned [`RasterizedPages`].
pub async fn rasterize(bytes: &[u8], page_count: u32) -> Result<RasterizedPages, RasterizeError> {
    let workdir = tempfile::tempdir()
        .map_err(|e| RasterizeError::Failed(format!("failed to create temp dir: {e}")))?;

    let input_path = workdir.path().join(format!("{}.pdf", Uuid::new_v4()));
    tokio::fs::write(&input_path, bytes)
        .await
        .map_err(|e| RasterizeError::Failed(format!("failed to stage PDF bytes: {e}")))?;

    let mut outcomes = Vec::with_capacity(page_count as usize);
    for page_number in 1..=page_count {
        match rasterize_page(workdir.path(), &input_path, page_number).await {
            Ok(image) => outcomes.push(Ok(image)),
            Err(RasterizeError::BackendUnavailable(reason)) => {
                // Tool missing: no page can ever succeed, stop probing.
                cleanup(workdir);
                return Err(RasterizeError::BackendUnavailable(reason));
            }
            Err(RasterizeError::Failed(reason)) => outcomes.push(Err(PageFailure {
                page_number,
                reason,
            })),
        }
    }

    cleanup(workdir);
    Ok(split_outcomes(outcomes))
}

async fn rasterize_page(
    workdir: &Path,
    input: &Path,
    page_number: u32,
) -> Result<PageImage, RasterizeError> {
    let page_arg = page_number.to_string();
    let out_prefix = workdir.join(format!("page-{page_number}"));

    let output = Command::new(PDFTOPPM_BIN)
        .arg("-png")
        .arg("-singlefile")
        .args(["-r", RASTER_DPI])
        .args(["-f", page_arg.as_str()])
        .args(["-l", page_arg.as_str()])
        .arg(input)
        .arg(&out_prefix)
        .output()
        .await
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                RasterizeError::BackendUnavailable(format!("{PDFTOPPM_BIN} not found: {e}"))
            } else {
                RasterizeError::Failed(format!("failed to run {PDFTOPPM_BIN}: {e}"))
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RasterizeError::Failed(format!(
            "{PDFTOPPM_BIN} exited with {} on page {page_number}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let png_path = out_prefix.with_extension("png");
    let image_bytes = tokio::fs::read(&png_path).await.map_err(|e| {
        RasterizeError::Failed(format!("page {page_number} produced no image: {e}"))
    })?;

    debug!(page = page_number, bytes = image_bytes.len(), "rasterized page");
    Ok(PageImage {
        page_number,
        image_bytes,
    })
}

/// Splits per-page outcomes into successes and recorded failures, preserving
/// page order.
fn split_outcomes(outcomes: Vec<Result<PageImage, PageFailure>>) -> RasterizedPages {
    let mut result = RasterizedPages::default();
    for outcome in outcomes {
        match outcome {
            Ok(image) => result.pages.push(image),
            Err(failure) => result.failures.push(failure),
        }
    }
    result
}

fn cleanup(workdir: tempfile::TempDir) {
    // Removal failure must never mask the primary result.
    if let Err(e) = workdir.close() {
        warn!("failed to remove rasterization temp dir: {e}");
    }
}
