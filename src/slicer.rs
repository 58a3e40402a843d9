//! Slicing the source image into per-cell PNG files.
//!
//! Everything here works in source-image pixels. Cell boundaries use
//! integer division, so remainder pixels fall off the grid's right and
//! bottom edges instead of being spread across cells.

use std::path::Path;

use image::DynamicImage;
use log::debug;

/// Prefix used when the user leaves the filename field empty.
pub const DEFAULT_PREFIX: &str = "sprite";

/// How the output files are numbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NamingScheme {
    /// `{prefix}_r{row:02}_c{col:02}.png`
    #[default]
    RowCol,
    /// `{prefix}_{index:0N}.png`, numbered in row-major order with just
    /// enough digits for the total cell count.
    Sequential,
}

#[derive(Debug, thiserror::Error)]
pub enum SliceError {
    #[error("output path is not a directory")]
    OutputNotADirectory,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// One grid cell in source pixels, clipped to the image bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputCell {
    pub row: u32,
    pub col: u32,
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl OutputCell {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// A slicing job: the grid rectangle mapped into source pixels, plus the
/// grid dimensions. `rows` and `cols` must be at least 1.
#[derive(Clone, Copy, Debug)]
pub struct SliceJob {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub cols: u32,
}

impl SliceJob {
    /// Source-pixel size of one cell. Remainder pixels are dropped, not
    /// distributed. A grid smaller than its row or column count yields
    /// zero-size cells; that case is left to the caller.
    pub fn cell_size(&self) -> (u32, u32) {
        (self.width / self.cols, self.height / self.rows)
    }

    /// Cells in row-major order. A cell starting at or past the image
    /// edge is skipped; one merely reaching past it is clipped.
    pub fn cells(&self, image_width: u32, image_height: u32) -> Vec<OutputCell> {
        let (cell_w, cell_h) = self.cell_size();
        let mut cells = Vec::new();

        for row in 0..self.rows {
            for col in 0..self.cols {
                let left = self.x + col * cell_w;
                let top = self.y + row * cell_h;
                if left >= image_width || top >= image_height {
                    continue;
                }
                cells.push(OutputCell {
                    row,
                    col,
                    left,
                    top,
                    right: (left + cell_w).min(image_width),
                    bottom: (top + cell_h).min(image_height),
                });
            }
        }

        cells
    }
}

/// Digits needed to number `total` cells: 12 cells pad to 2, 100 to 3.
pub fn index_digits(total: u32) -> usize {
    total.to_string().len()
}

/// Filename for one cell. `index` is 1-based and counts only cells that
/// survived the boundary check.
pub fn cell_filename(
    scheme: NamingScheme,
    prefix: &str,
    cell: &OutputCell,
    index: usize,
    digits: usize,
) -> String {
    match scheme {
        NamingScheme::RowCol => format!("{prefix}_r{:02}_c{:02}.png", cell.row, cell.col),
        NamingScheme::Sequential => format!("{prefix}_{index:0digits$}.png"),
    }
}

/// The prefix actually used at save time: trimmed, or the default when
/// the field was left empty.
pub fn resolve_prefix(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_PREFIX
    } else {
        trimmed
    }
}

/// Prefix to adopt when a new image is loaded: the file stem, but only
/// if the user hasn't typed a custom prefix yet.
pub fn prefix_for_loaded_file(current: &str, path: &Path) -> Option<String> {
    let current = current.trim();
    if !current.is_empty() && current != DEFAULT_PREFIX {
        return None;
    }
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Crop and save every cell into `out_dir`, sequentially. The first
/// failed write aborts the loop; files already written stay on disk.
/// Returns the number of files saved.
pub fn save_cells(
    image: &DynamicImage,
    job: &SliceJob,
    scheme: NamingScheme,
    prefix: &str,
    out_dir: &Path,
) -> Result<usize, SliceError> {
    if !out_dir.is_dir() {
        return Err(SliceError::OutputNotADirectory);
    }

    let digits = index_digits(job.rows * job.cols);
    let mut saved = 0;

    for (i, cell) in job.cells(image.width(), image.height()).iter().enumerate() {
        let name = cell_filename(scheme, prefix, cell, i + 1, digits);
        let cropped = image.crop_imm(cell.left, cell.top, cell.width(), cell.height());
        cropped.save(out_dir.join(&name))?;
        debug!("saved {name} ({}x{})", cell.width(), cell.height());
        saved += 1;
    }

    Ok(saved)
}
