use scrawl_image::ImageSize;

use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;

/// Interpolation mode for the resize and resampling operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `plane` - The row-major pixel data of a single-channel image.
/// * `size` - The size of the plane.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel value. Coordinates outside the plane are clamped to
/// the border.
pub fn interpolate_pixel(
    plane: &[f32],
    size: ImageSize,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
) -> f32 {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(plane, size, u, v),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(plane, size, u, v),
    }
}
