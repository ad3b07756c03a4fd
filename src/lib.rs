pub mod error;
pub mod image;
pub mod io;
pub mod descriptor;
pub mod embedding;
pub mod pipeline;

pub use self::error::{AtlasError, Result};

macro_rules! define_float {
    ($f:tt) => {
        pub use std::$f as float;
        pub type Float = $f;
    }
}

define_float!(f64);

pub const FEATURE_LENGTH: usize = 17;

#[repr(u8)]
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum GradientDirection {
    HORIZINTAL,
    VERTICAL
}
