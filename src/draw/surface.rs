//! Raster pixel surfaces and immutable full-buffer snapshots.
//!
//! A [`Surface`] is a fixed-size grid of ARGB8888 pixels. The engine owns two
//! of them: the committed layer (finalized strokes) and the working layer
//! (in-progress preview). [`Snapshot`] is a frozen copy of a surface's
//! content, used both as undo history entries and as the preview base that
//! rectangle/circle previews are redrawn from.

use std::sync::Arc;

use thiserror::Error;

/// Upper bound on total pixels per surface (8192 x 8192).
const MAX_SURFACE_AREA: u64 = 8192 * 8192;

/// Errors raised when a drawing surface cannot be created.
///
/// Surface creation failure is fatal to the engine instance that requested
/// it: no drawing or recording is possible without the buffer pair. Callers
/// surface this as a disabled state rather than crashing.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface dimensions {width}x{height} are not drawable")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("surface dimensions {width}x{height} exceed the maximum supported area")]
    TooLarge { width: u32, height: u32 },
}

/// A width x height grid of ARGB8888 pixels.
///
/// Dimensions are fixed for the lifetime of the surface. Pixel value 0 is
/// fully transparent and is the cleared state.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// Allocates a cleared surface.
    ///
    /// # Errors
    /// Returns [`SurfaceError::InvalidDimensions`] when either dimension is
    /// zero and [`SurfaceError::TooLarge`] when the total area exceeds the
    /// supported maximum.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        let area = u64::from(width) * u64::from(height);
        if area > MAX_SURFACE_AREA {
            return Err(SurfaceError::TooLarge { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; area as usize],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel row-major view, for display blitting and frame encoding.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Resets every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    /// Takes an immutable full-buffer copy of the current content.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            pixels: Arc::from(self.pixels.as_slice()),
        }
    }

    /// Overwrites the full buffer from a snapshot.
    ///
    /// Snapshots only ever come from a surface of the same dimensions; a
    /// mismatch indicates a logic error and is ignored with a warning rather
    /// than corrupting the buffer.
    pub fn restore(&mut self, snapshot: &Snapshot) {
        if snapshot.width != self.width || snapshot.height != self.height {
            debug_assert!(false, "snapshot dimensions do not match surface");
            log::warn!(
                "Ignoring restore from {}x{} snapshot onto {}x{} surface",
                snapshot.width,
                snapshot.height,
                self.width,
                self.height
            );
            return;
        }
        self.pixels.copy_from_slice(&snapshot.pixels);
    }

    /// Overwrites the full buffer from another surface of the same size.
    pub fn copy_from(&mut self, other: &Surface) {
        if other.width != self.width || other.height != self.height {
            debug_assert!(false, "surface dimensions do not match");
            log::warn!(
                "Ignoring copy from {}x{} surface onto {}x{} surface",
                other.width,
                other.height,
                self.width,
                self.height
            );
            return;
        }
        self.pixels.copy_from_slice(&other.pixels);
    }

    /// Clamps a point to the surface interior.
    ///
    /// Pointer coordinates arriving from outside `[0, width) x [0, height)`
    /// are pulled to the nearest edge rather than rejected.
    pub fn clamp_point(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(0, self.width as i32 - 1),
            y.clamp(0, self.height as i32 - 1),
        )
    }

    /// Reads one pixel, or `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Writes one pixel; writes outside the surface are dropped.
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: u32) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = pixel;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }
}

/// Immutable copy of a surface's full pixel content at a point in time.
///
/// Cloning a snapshot is cheap: the pixel buffer is shared, never mutated.
#[derive(Debug, Clone)]
pub struct Snapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u32]>,
}

impl Snapshot {
    /// Snapshot width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Snapshot height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixel view of the frozen content.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            Surface::new(0, 64),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Surface::new(64, 0),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn new_rejects_oversized_area() {
        assert!(matches!(
            Surface::new(100_000, 100_000),
            Err(SurfaceError::TooLarge { .. })
        ));
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut surface = Surface::new(8, 8).unwrap();
        surface.set_pixel(3, 4, 0xFFFF_0000);
        let snapshot = surface.snapshot();

        surface.set_pixel(3, 4, 0xFF00_FF00);
        surface.set_pixel(0, 0, 0xFF00_00FF);
        surface.restore(&snapshot);

        assert_eq!(surface.pixel(3, 4), Some(0xFFFF_0000));
        assert_eq!(surface.pixel(0, 0), Some(0));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_edits() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.set_pixel(1, 1, 7);
        let snapshot = surface.snapshot();

        surface.set_pixel(1, 1, 9);
        assert_eq!(snapshot.pixels()[5], 7);
    }

    #[test]
    fn clear_resets_all_pixels() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.set_pixel(2, 2, 0xFFFF_FFFF);
        surface.clear();
        assert!(surface.pixels().iter().all(|&px| px == 0));
    }

    #[test]
    fn clamp_point_pulls_to_edges() {
        let surface = Surface::new(100, 50).unwrap();
        assert_eq!(surface.clamp_point(-5, -5), (0, 0));
        assert_eq!(surface.clamp_point(150, 75), (99, 49));
        assert_eq!(surface.clamp_point(10, 20), (10, 20));
    }

    #[test]
    fn out_of_bounds_pixel_access_is_harmless() {
        let mut surface = Surface::new(4, 4).unwrap();
        surface.set_pixel(-1, 0, 1);
        surface.set_pixel(0, 10, 1);
        assert_eq!(surface.pixel(-1, 0), None);
        assert_eq!(surface.pixel(0, 10), None);
        assert!(surface.pixels().iter().all(|&px| px == 0));
    }
}
