extern crate nalgebra as na;

use na::DMatrix;
use crate::Float;
use super::kernel::Kernel;

/// `[1,2,1]` smoothing half of the separable Sobel operator.
pub struct BinomialKernel {
    kernel: DMatrix<Float>
}

impl BinomialKernel {

    pub fn new() -> BinomialKernel {
        BinomialKernel {
            kernel: DMatrix::from_vec(1,3,vec![1.0,2.0,1.0])
        }
    }
}

impl Kernel for BinomialKernel {
    fn kernel(&self) -> &DMatrix<Float> {
        &self.kernel
    }

    fn step(&self) -> usize {
        1
    }

    fn normalizing_constant(&self) -> Float{
        1.0
    }
}
