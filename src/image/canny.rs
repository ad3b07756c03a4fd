extern crate nalgebra as na;

use std::collections::VecDeque;
use na::DMatrix;

use crate::Float;
use super::Image;
use super::filter::{gaussian_2_d_convolution, sobel_gradients, gauss_kernel::GaussKernel1D};

#[derive(Debug,Clone,Copy)]
pub struct CannyDetector {
    pub sigma: Float,
    pub low_threshold: Float,
    pub high_threshold: Float
}

/// Binary edge map with the same shape as the input image.
#[derive(Debug,Clone)]
pub struct EdgeMask {
    pub mask: DMatrix<bool>
}

impl EdgeMask {
    pub fn edge_count(&self) -> usize {
        self.mask.iter().filter(|&&v| v).count()
    }

    /// Fraction of pixels marked as edges.
    pub fn density(&self) -> Float {
        match self.mask.len() {
            0 => 0.0,
            len => self.edge_count() as Float / len as Float
        }
    }
}

impl CannyDetector {

    pub fn new(sigma: Float, low_threshold: Float, high_threshold: Float) -> CannyDetector {
        assert!(low_threshold <= high_threshold);
        CannyDetector { sigma, low_threshold, high_threshold }
    }

    pub fn detect(&self, image: &Image) -> EdgeMask {
        let height = image.height();
        let width = image.width();

        let smoothed = gaussian_2_d_convolution(image, &GaussKernel1D::from_sigma(self.sigma));
        let (x_gradient, y_gradient) = sobel_gradients(&smoothed);
        let magnitude = x_gradient.buffer.zip_map(&y_gradient.buffer, |gx,gy| gx.hypot(gy));

        let maxima = non_maximum_suppression(&magnitude, &x_gradient.buffer, &y_gradient.buffer, self.low_threshold);

        let mut mask = DMatrix::<bool>::from_element(height, width, false);
        let mut queue = VecDeque::<(usize,usize)>::new();
        for c in 0..width {
            for r in 0..height {
                if maxima[(r,c)] && magnitude[(r,c)] >= self.high_threshold {
                    mask[(r,c)] = true;
                    queue.push_back((r,c));
                }
            }
        }

        // hysteresis: grow strong edges through 8-connected weak maxima
        while let Some((r,c)) = queue.pop_front() {
            for (nr,nc) in neighbours_8(r, c, height, width) {
                if maxima[(nr,nc)] && !mask[(nr,nc)] {
                    mask[(nr,nc)] = true;
                    queue.push_back((nr,nc));
                }
            }
        }

        EdgeMask { mask }
    }
}

/// Marks interior pixels whose magnitude is at least `low_threshold` and not smaller than
/// the two values interpolated along the gradient direction. The one pixel border is never kept.
fn non_maximum_suppression(magnitude: &DMatrix<Float>, x_gradient: &DMatrix<Float>, y_gradient: &DMatrix<Float>, low_threshold: Float) -> DMatrix<bool> {
    let (height, width) = magnitude.shape();
    let mut maxima = DMatrix::<bool>::from_element(height, width, false);
    if height < 3 || width < 3 {
        return maxima;
    }

    for c in 1..width-1 {
        for r in 1..height-1 {
            let m = magnitude[(r,c)];
            if m <= 0.0 || m < low_threshold {
                continue;
            }

            let gx = x_gradient[(r,c)];
            let gy = y_gradient[(r,c)];
            let step_c: isize = if gx >= 0.0 {1} else {-1};
            let step_r: isize = if gy >= 0.0 {1} else {-1};
            let at = |dr: isize, dc: isize| magnitude[((r as isize + dr) as usize, (c as isize + dc) as usize)];

            let (forward, backward) = match gx.abs() >= gy.abs() {
                true => {
                    let w = gy.abs()/gx.abs();
                    ((1.0-w)*at(0,step_c) + w*at(step_r,step_c),
                     (1.0-w)*at(0,-step_c) + w*at(-step_r,-step_c))
                },
                false => {
                    let w = gx.abs()/gy.abs();
                    ((1.0-w)*at(step_r,0) + w*at(step_r,step_c),
                     (1.0-w)*at(-step_r,0) + w*at(-step_r,-step_c))
                }
            };

            maxima[(r,c)] = m >= forward && m >= backward;
        }
    }

    maxima
}

fn neighbours_8(r: usize, c: usize, height: usize, width: usize) -> impl Iterator<Item=(usize,usize)> {
    let r = r as isize;
    let c = c as isize;
    (-1isize..=1).flat_map(move |dr| (-1isize..=1).map(move |dc| (r+dr,c+dc)))
        .filter(move |&(nr,nc)| (nr,nc) != (r,c) && nr >= 0 && nc >= 0 && nr < height as isize && nc < width as isize)
        .map(|(nr,nc)| (nr as usize, nc as usize))
}
