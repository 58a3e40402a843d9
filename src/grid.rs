//! Grid-rectangle geometry in display space.
//!
//! The grid is a user-controlled rectangle subdivided into rows and
//! columns. All coordinates here are display pixels relative to the
//! top-left corner of the displayed image; [`crate::slicer`] works in
//! source pixels.

use eframe::egui;

/// Smallest grid edge the user can resize down to, in display pixels.
pub const MIN_GRID_SIZE: f32 = 50.0;

/// Hit-test tolerance around handles and edges, in display pixels.
const HANDLE_TOLERANCE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Center, // Moving
}

impl ResizeHandle {
    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }

    fn touches_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    fn touches_bottom(&self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }

    fn touches_left(&self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    fn touches_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    pub fn cursor_icon(&self) -> egui::CursorIcon {
        match self {
            Self::TopLeft | Self::BottomRight => egui::CursorIcon::ResizeNwSe,
            Self::TopRight | Self::BottomLeft => egui::CursorIcon::ResizeNeSw,
            Self::Top | Self::Bottom => egui::CursorIcon::ResizeVertical,
            Self::Left | Self::Right => egui::CursorIcon::ResizeHorizontal,
            Self::Center => egui::CursorIcon::Move,
        }
    }
}

/// Row and column counts of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    pub rows: u32,
    pub cols: u32,
}

impl Default for GridDims {
    fn default() -> Self {
        Self { rows: 2, cols: 2 }
    }
}

impl GridDims {
    pub fn total(&self) -> u32 {
        self.rows * self.cols
    }
}

/// The grid rectangle, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for GridRect {
    fn default() -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: 200.0,
            height: 200.0,
        }
    }
}

impl GridRect {
    /// Starting rectangle for a freshly displayed image.
    pub fn initial_for_display(display_width: f32, display_height: f32) -> Self {
        Self {
            x: 50.0,
            y: 50.0,
            width: (display_width - 100.0).min(200.0).max(MIN_GRID_SIZE),
            height: (display_height - 100.0).min(200.0).max(MIN_GRID_SIZE),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn to_rect(&self) -> egui::Rect {
        egui::Rect::from_min_size(
            egui::pos2(self.x, self.y),
            egui::vec2(self.width, self.height),
        )
    }

    /// Adjust the edges touched by `handle` by the drag delta. An axis
    /// whose dimension would drop below [`MIN_GRID_SIZE`] reverts,
    /// independently of the other axis.
    pub fn resize(&mut self, handle: ResizeHandle, dx: f32, dy: f32) {
        let (old_x, old_y) = (self.x, self.y);
        let (old_w, old_h) = (self.width, self.height);

        if handle.touches_top() {
            self.y += dy;
            self.height -= dy;
        }
        if handle.touches_bottom() {
            self.height += dy;
        }
        if handle.touches_left() {
            self.x += dx;
            self.width -= dx;
        }
        if handle.touches_right() {
            self.width += dx;
        }

        if self.width < MIN_GRID_SIZE {
            self.x = old_x;
            self.width = old_w;
        }
        if self.height < MIN_GRID_SIZE {
            self.y = old_y;
            self.height = old_h;
        }
    }

    /// Re-derive the dependent dimension from `ratio` (cell height over
    /// cell width) after a corner resize. Whichever axis the pointer
    /// moved more along drives the other.
    pub fn apply_aspect_lock(&mut self, handle: ResizeHandle, dx: f32, dy: f32, ratio: f32) {
        if ratio <= 0.0 || !handle.is_corner() {
            return;
        }
        if dx.abs() > dy.abs() {
            self.height = self.width * ratio;
        } else {
            self.width = self.height / ratio;
        }
    }

    /// Translate the rectangle, keeping it inside the displayed image.
    /// When the grid is larger than the image the origin pins to 0.
    pub fn translate_clamped(&mut self, dx: f32, dy: f32, display_width: f32, display_height: f32) {
        self.x = (self.x + dx).min(display_width - self.width).max(0.0);
        self.y = (self.y + dy).min(display_height - self.height).max(0.0);
    }

    /// Scale the rectangle in place when the display scale changes, so it
    /// keeps covering the same part of the image.
    pub fn rescale(&mut self, factor: f32) {
        if factor <= 0.0 {
            return;
        }
        self.x *= factor;
        self.y *= factor;
        self.width = (self.width * factor).max(MIN_GRID_SIZE);
        self.height = (self.height * factor).max(MIN_GRID_SIZE);
    }

    /// Display rectangle of one cell, by even subdivision. Used for
    /// drawing only; slicing boundaries are integer math in
    /// [`crate::slicer`].
    pub fn cell_rect(&self, row: u32, col: u32, dims: GridDims) -> egui::Rect {
        let cols = dims.cols as f32;
        let rows = dims.rows as f32;
        egui::Rect::from_min_max(
            egui::pos2(
                self.x + col as f32 * self.width / cols,
                self.y + row as f32 * self.height / rows,
            ),
            egui::pos2(
                self.x + (col + 1) as f32 * self.width / cols,
                self.y + (row + 1) as f32 * self.height / rows,
            ),
        )
    }

    /// Which handle (if any) a pointer position grabs. Corners win over
    /// edges, the interior means moving.
    pub fn hit_test(&self, pos: egui::Pos2) -> Option<ResizeHandle> {
        let min = egui::pos2(self.x, self.y);
        let max = egui::pos2(self.right(), self.bottom());

        if pos.distance(min) < HANDLE_TOLERANCE {
            return Some(ResizeHandle::TopLeft);
        }
        if pos.distance(egui::pos2(max.x, min.y)) < HANDLE_TOLERANCE {
            return Some(ResizeHandle::TopRight);
        }
        if pos.distance(egui::pos2(min.x, max.y)) < HANDLE_TOLERANCE {
            return Some(ResizeHandle::BottomLeft);
        }
        if pos.distance(max) < HANDLE_TOLERANCE {
            return Some(ResizeHandle::BottomRight);
        }

        if (pos.x - min.x).abs() < HANDLE_TOLERANCE && pos.y > min.y && pos.y < max.y {
            return Some(ResizeHandle::Left);
        }
        if (pos.x - max.x).abs() < HANDLE_TOLERANCE && pos.y > min.y && pos.y < max.y {
            return Some(ResizeHandle::Right);
        }
        if (pos.y - min.y).abs() < HANDLE_TOLERANCE && pos.x > min.x && pos.x < max.x {
            return Some(ResizeHandle::Top);
        }
        if (pos.y - max.y).abs() < HANDLE_TOLERANCE && pos.x > min.x && pos.x < max.x {
            return Some(ResizeHandle::Bottom);
        }

        if self.to_rect().contains(pos) {
            return Some(ResizeHandle::Center);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(x: f32, y: f32, w: f32, h: f32) -> GridRect {
        GridRect {
            x,
            y,
            width: w,
            height: h,
        }
    }

    #[test]
    fn resize_east_grows_width() {
        let mut g = grid(10.0, 10.0, 100.0, 100.0);
        g.resize(ResizeHandle::Right, 30.0, 0.0);
        assert_eq!(g.width, 130.0);
        assert_eq!(g.x, 10.0);
        assert_eq!(g.height, 100.0);
    }

    #[test]
    fn resize_west_moves_origin() {
        let mut g = grid(50.0, 50.0, 100.0, 100.0);
        g.resize(ResizeHandle::Left, -20.0, 0.0);
        assert_eq!(g.x, 30.0);
        assert_eq!(g.width, 120.0);
    }

    #[test]
    fn resize_below_minimum_reverts_that_axis_only() {
        let mut g = grid(50.0, 50.0, 60.0, 200.0);
        // Width would drop to 10, height to 150. Only width reverts.
        g.resize(ResizeHandle::BottomRight, -50.0, -50.0);
        assert_eq!(g.x, 50.0);
        assert_eq!(g.width, 60.0);
        assert_eq!(g.height, 150.0);
    }

    #[test]
    fn resize_keeps_minimum_size_invariant() {
        let mut g = grid(0.0, 0.0, 55.0, 55.0);
        g.resize(ResizeHandle::TopLeft, 40.0, 40.0);
        assert!(g.width >= MIN_GRID_SIZE);
        assert!(g.height >= MIN_GRID_SIZE);
    }

    #[test]
    fn aspect_lock_width_drives_height() {
        let mut g = grid(0.0, 0.0, 200.0, 100.0);
        g.apply_aspect_lock(ResizeHandle::BottomRight, 10.0, 2.0, 0.5);
        assert!((g.height / g.width - 0.5).abs() < 1e-5);
        assert_eq!(g.width, 200.0);
    }

    #[test]
    fn aspect_lock_height_drives_width() {
        let mut g = grid(0.0, 0.0, 200.0, 120.0);
        g.apply_aspect_lock(ResizeHandle::TopLeft, 2.0, 10.0, 0.75);
        assert!((g.height / g.width - 0.75).abs() < 1e-5);
        assert_eq!(g.height, 120.0);
    }

    #[test]
    fn aspect_lock_ignores_edge_handles() {
        let mut g = grid(0.0, 0.0, 200.0, 100.0);
        g.apply_aspect_lock(ResizeHandle::Right, 10.0, 0.0, 2.0);
        assert_eq!(g.width, 200.0);
        assert_eq!(g.height, 100.0);
    }

    #[test]
    fn aspect_lock_ignores_nonpositive_ratio() {
        let mut g = grid(0.0, 0.0, 200.0, 100.0);
        g.apply_aspect_lock(ResizeHandle::BottomRight, 10.0, 0.0, 0.0);
        assert_eq!(g.height, 100.0);
    }

    #[test]
    fn translate_clamps_to_display_bounds() {
        let mut g = grid(10.0, 10.0, 100.0, 100.0);
        g.translate_clamped(-50.0, 500.0, 400.0, 300.0);
        assert_eq!(g.x, 0.0);
        assert_eq!(g.y, 200.0);
    }

    #[test]
    fn translate_pins_origin_when_grid_larger_than_display() {
        let mut g = grid(10.0, 10.0, 500.0, 100.0);
        g.translate_clamped(30.0, 0.0, 400.0, 300.0);
        assert_eq!(g.x, 0.0);
    }

    #[test]
    fn cell_rects_tile_the_grid_evenly() {
        let g = grid(10.0, 20.0, 300.0, 150.0);
        let dims = GridDims { rows: 3, cols: 4 };

        let first = g.cell_rect(0, 0, dims);
        assert_eq!(first.min, egui::pos2(10.0, 20.0));

        let last = g.cell_rect(2, 3, dims);
        assert!((last.max.x - g.right()).abs() < 1e-4);
        assert!((last.max.y - g.bottom()).abs() < 1e-4);

        // Shared boundary between neighbors comes out identical because
        // each line is an independent division, not accumulated widths.
        let a = g.cell_rect(1, 1, dims);
        let b = g.cell_rect(1, 2, dims);
        assert_eq!(a.max.x, b.min.x);
    }

    #[test]
    fn hit_test_prefers_corners_then_edges() {
        let g = grid(100.0, 100.0, 200.0, 200.0);
        assert_eq!(
            g.hit_test(egui::pos2(102.0, 98.0)),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(
            g.hit_test(egui::pos2(300.0, 200.0)),
            Some(ResizeHandle::Right)
        );
        assert_eq!(
            g.hit_test(egui::pos2(200.0, 200.0)),
            Some(ResizeHandle::Center)
        );
        assert_eq!(g.hit_test(egui::pos2(500.0, 500.0)), None);
    }

    #[test]
    fn rescale_tracks_scale_change() {
        let mut g = grid(100.0, 50.0, 200.0, 100.0);
        g.rescale(0.5);
        assert_eq!(g.x, 50.0);
        assert_eq!(g.y, 25.0);
        assert_eq!(g.width, 100.0);
        assert_eq!(g.height, MIN_GRID_SIZE);
    }

    #[test]
    fn initial_rect_fits_small_displays() {
        let g = GridRect::initial_for_display(180.0, 800.0);
        assert_eq!(g.width, 80.0);
        assert_eq!(g.height, 200.0);

        let tiny = GridRect::initial_for_display(60.0, 60.0);
        assert_eq!(tiny.width, MIN_GRID_SIZE);
        assert_eq!(tiny.height, MIN_GRID_SIZE);
    }
}
