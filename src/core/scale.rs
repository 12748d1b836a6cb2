use crate::error::{ChartError, ChartResult};

/// Continuous mapping from a value domain onto a pixel interval.
///
/// The pixel interval may be reversed (`start > end`), which is how the Y
/// axis maps larger values to smaller pixel rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, range: (f64, f64)) -> ChartResult<f64> {
        validate_range(range)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(range.0 + normalized * (range.1 - range.0))
    }

    pub fn pixel_to_domain(self, pixel: f64, range: (f64, f64)) -> ChartResult<f64> {
        validate_range(range)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (pixel - range.0) / (range.1 - range.0);
        Ok(self.domain_start + normalized * span)
    }

    /// Evenly spaced tick values covering the domain, both ends included.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        if count < 2 {
            return vec![self.domain_start];
        }
        let step = (self.domain_end - self.domain_start) / (count - 1) as f64;
        (0..count)
            .map(|index| self.domain_start + step * index as f64)
            .collect()
    }
}

/// Discrete mapping of ordered categories onto equal horizontal bands.
///
/// Each category is drawn at the center of its band, and any pixel inside a
/// band resolves back to that category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScale {
    count: usize,
    range: (f64, f64),
}

impl CategoryScale {
    pub fn new(count: usize, range: (f64, f64)) -> ChartResult<Self> {
        validate_range(range)?;
        if range.1 < range.0 {
            return Err(ChartError::InvalidData(
                "category range must be ascending".to_owned(),
            ));
        }
        Ok(Self { count, range })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn band_width(self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / self.count as f64
    }

    /// Center pixel of the category at `index`, if it exists.
    #[must_use]
    pub fn position(self, index: usize) -> Option<f64> {
        (index < self.count).then(|| self.range.0 + self.band_width() * (index as f64 + 0.5))
    }

    /// Category whose band contains `pixel`, or `None` outside the range.
    #[must_use]
    pub fn index_at(self, pixel: f64) -> Option<usize> {
        if self.count == 0 || !pixel.is_finite() || pixel < self.range.0 || pixel > self.range.1
        {
            return None;
        }
        let index = ((pixel - self.range.0) / self.band_width()).floor() as usize;
        Some(index.min(self.count - 1))
    }
}

fn validate_range(range: (f64, f64)) -> ChartResult<()> {
    if !range.0.is_finite() || !range.1.is_finite() || range.0 == range.1 {
        return Err(ChartError::InvalidData(
            "pixel range must be finite and non-empty".to_owned(),
        ));
    }
    Ok(())
}
