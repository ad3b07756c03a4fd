use crate::Float;

/// Equal width histogram over a closed range, read out as a probability density.
#[derive(Debug,Clone)]
pub struct DensityHistogram {
    pub range: (Float,Float),
    pub bin_width: Float,
    pub counts: Vec<usize>,
    total: usize
}

impl DensityHistogram {

    pub fn new(bin_len: usize, range: (Float,Float)) -> DensityHistogram {
        assert!(bin_len > 0);
        assert!(range.1 > range.0);
        DensityHistogram {
            range,
            bin_width: (range.1 - range.0)/(bin_len as Float),
            counts: vec![0;bin_len],
            total: 0
        }
    }

    /// Values outside the range are clamped onto the outer bins. The upper bound falls into the last bin.
    pub fn add_measurement(&mut self, value: Float) -> () {
        let clamped = value.clamp(self.range.0, self.range.1);
        let last = self.counts.len() - 1;
        let index = (((clamped - self.range.0)/self.bin_width).floor() as usize).min(last);
        self.counts[index] += 1;
        self.total += 1;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// `count / (total * bin_width)` per bin, so the histogram integrates to one.
    /// An empty histogram yields zeros.
    pub fn densities(&self) -> Vec<Float> {
        match self.total {
            0 => vec![0.0;self.counts.len()],
            total => {
                let area = total as Float * self.bin_width;
                self.counts.iter().map(|&count| count as Float / area).collect()
            }
        }
    }
}
