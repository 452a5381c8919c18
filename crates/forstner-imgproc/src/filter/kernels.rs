/// A 3x3 convolution kernel indexed as `[row][col]`.
pub type Kernel3 = [[f64; 3]; 3];

/// Sobel kernel for the horizontal derivative.
pub const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];

/// Sobel kernel for the vertical derivative.
pub const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Correlate a 3x3 neighborhood with the two Sobel kernels at once.
///
/// `read(ky, kx)` returns the intensity at kernel position `(ky, kx)`, `ky, kx` in `0..3`.
///
/// Returns the `(dx, dy)` pair.
#[inline]
pub fn sobel_3x3(read: impl Fn(usize, usize) -> f64) -> (f64, f64) {
    let mut dx = 0.0;
    let mut dy = 0.0;
    for ky in 0..3 {
        for kx in 0..3 {
            let v = read(ky, kx);
            dx += SOBEL_X[ky][kx] * v;
            dy += SOBEL_Y[ky][kx] * v;
        }
    }
    (dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sobel_kernels_are_transposed() {
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(SOBEL_X[i][j], SOBEL_Y[j][i]);
            }
        }
        // zero response on a constant patch
        assert_eq!(sobel_3x3(|_, _| 7.0), (0.0, 0.0));
    }

    #[test]
    fn test_sobel_3x3_ramp() {
        // intensity increasing by one per column
        let (dx, dy) = sobel_3x3(|_, kx| kx as f64);
        assert_eq!(dx, 8.0);
        assert_eq!(dy, 0.0);

        // intensity increasing by one per row
        let (dx, dy) = sobel_3x3(|ky, _| ky as f64);
        assert_eq!(dx, 0.0);
        assert_eq!(dy, 8.0);
    }
}
