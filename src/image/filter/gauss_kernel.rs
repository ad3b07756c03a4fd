extern crate nalgebra as na;

use na::DMatrix;
use crate::{Float,float};
use float::consts::PI;
use super::kernel::Kernel;

/// Number of standard deviations covered on each side of the center tap.
pub const TRUNCATE: Float = 4.0;

pub struct GaussKernel1D {
    kernel: DMatrix<Float>,
    step: usize,
}

impl GaussKernel1D {
    fn sample(mean: Float, std: Float, x:Float) -> Float {
        let exponent = (-0.5*((x-mean)/std).powi(2)).exp();
        let factor = 1.0/(std*(2.0*PI).sqrt());
        factor*exponent
    }

    pub fn new(mean: Float, std: Float, step: usize , radius: Float ) -> GaussKernel1D {
        let radius_usize = radius.trunc() as usize;
        assert_eq!(radius_usize%step,0);

        let start = -(radius_usize as isize);
        let end_exclusive = (radius_usize as isize) + 1;
        let samples = (start..end_exclusive).step_by(step).map(|x| GaussKernel1D::sample(mean,std,x as Float)).collect::<Vec<Float>>();
        let sum: Float = samples.iter().sum();
        let cols = samples.len();
        GaussKernel1D {
            kernel: DMatrix::from_vec(1,cols,samples.into_iter().map(|v| v/sum).collect()),
            step
        }
    }

    /// Zero mean kernel truncated at `TRUNCATE` standard deviations, taps summing to one.
    pub fn from_sigma(sigma: Float) -> GaussKernel1D {
        assert!(sigma > 0.0);
        let radius = (TRUNCATE*sigma + 0.5).trunc();
        GaussKernel1D::new(0.0, sigma, 1, radius)
    }
}

impl Kernel for GaussKernel1D {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        self.step
    }

    fn normalizing_constant(&self) -> Float{
        1.0
    }
}
