use crate::image::Image;
use crate::GradientDirection;
use self::{kernel::Kernel,gauss_kernel::GaussKernel1D,prewitt_kernel::PrewittKernel,binomial_kernel::BinomialKernel};

pub mod gauss_kernel;
pub mod prewitt_kernel;
pub mod binomial_kernel;
pub mod kernel;

/// Correlates `source` with `filter_kernel` along one axis. Samples outside the
/// image repeat the nearest border pixel.
pub fn filter_1d_convolution(source: &Image, filter_direction: GradientDirection, filter_kernel: &dyn Kernel) -> Image {
    let kernel = filter_kernel.kernel();
    let step = filter_kernel.step();
    let kernel_radius = filter_kernel.radius();
    let kernel_radius_signed = kernel_radius as isize;
    let normalizing_constant = filter_kernel.normalizing_constant();

    let buffer = &source.buffer;
    let width = buffer.ncols();
    let height = buffer.nrows();
    let mut target = Image::empty(width, height);

    for y in 0..height {
        for x in 0..width {
            let mut acc = 0.0;
            for kenel_idx in (-kernel_radius_signed..kernel_radius_signed+1).step_by(step) {
                let sample_value = match filter_direction {
                    GradientDirection::HORIZINTAL => {
                        let sample_idx = (x as isize)+kenel_idx;
                        match sample_idx {
                            sample_idx if sample_idx < 0 => buffer[(y,0)],
                            sample_idx if sample_idx >= width as isize => buffer[(y,width-1)],
                            _ => buffer[(y,sample_idx as usize)]
                        }
                    },
                    GradientDirection::VERTICAL => {
                        let sample_idx = (y as isize)+kenel_idx;
                        match sample_idx {
                            sample_idx if sample_idx < 0 => buffer[(0,x)],
                            sample_idx if sample_idx >= height as isize => buffer[(height-1,x)],
                            _ => buffer[(sample_idx as usize,x)]
                        }
                    }
                };

                let kenel_value = kernel[(0,(kenel_idx + kernel_radius_signed) as usize)];
                acc += sample_value*kenel_value;
            }

            target.buffer[(y,x)] = acc/normalizing_constant;
        }
    }

    target
}

pub fn gaussian_2_d_convolution(image: &Image, filter_kernel: &GaussKernel1D) -> Image {
    let blur_hor = filter_1d_convolution(image,GradientDirection::HORIZINTAL, filter_kernel);
    filter_1d_convolution(&blur_hor,GradientDirection::VERTICAL, filter_kernel)
}

/// Returns the (horizontal, vertical) Sobel responses.
pub fn sobel_gradients(image: &Image) -> (Image,Image) {
    let derivative = PrewittKernel::new();
    let smoothing = BinomialKernel::new();

    let x_derivative = filter_1d_convolution(image, GradientDirection::HORIZINTAL, &derivative);
    let x_gradient = filter_1d_convolution(&x_derivative, GradientDirection::VERTICAL, &smoothing);

    let y_derivative = filter_1d_convolution(image, GradientDirection::VERTICAL, &derivative);
    let y_gradient = filter_1d_convolution(&y_derivative, GradientDirection::HORIZINTAL, &smoothing);

    (x_gradient,y_gradient)
}
