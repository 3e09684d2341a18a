use serde::{Deserialize, Serialize};

use crate::error::ChartwellScaleError;

/// Blank space around and between categories, as fractions of the axis length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryMargins {
    pub lower: f64,
    pub upper: f64,
    /// Total gap shared between adjacent categories
    pub category: f64,
}

impl Default for CategoryMargins {
    fn default() -> Self {
        Self {
            lower: 0.05,
            upper: 0.05,
            category: 0.2,
        }
    }
}

/// Positions categories along a pixel range.
///
/// Each category gets a band of equal size. Bands are separated by equal gaps
/// which together take `margins.category` of the range, and the lower and upper
/// margins are left empty at either end. A range whose end is below its start
/// lays categories out from the end instead.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: Vec<String>,
    range: (f64, f64),
    margins: CategoryMargins,
}

impl BandScale {
    pub fn try_new(domain: Vec<String>) -> Result<Self, ChartwellScaleError> {
        if domain.is_empty() {
            return Err(ChartwellScaleError::EmptyDomain);
        }
        Ok(Self {
            domain,
            range: (0.0, 1.0),
            margins: CategoryMargins::default(),
        })
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range = range;
        self
    }

    pub fn with_margins(mut self, margins: CategoryMargins) -> Self {
        self.margins = margins;
        self
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    pub fn margins(&self) -> &CategoryMargins {
        &self.margins
    }

    pub fn count(&self) -> usize {
        self.domain.len()
    }

    fn length(&self) -> f64 {
        (self.range.1 - self.range.0).abs()
    }

    fn direction(&self) -> f64 {
        if self.range.1 < self.range.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Width of each category band
    pub fn band_size(&self) -> f64 {
        let n = self.count() as f64;
        let category = if self.count() > 1 {
            self.margins.category
        } else {
            0.0
        };
        self.length() * (1.0 - self.margins.lower - self.margins.upper - category) / n
    }

    /// Space between adjacent bands
    pub fn gap(&self) -> f64 {
        if self.count() > 1 {
            self.length() * self.margins.category / (self.count() as f64 - 1.0)
        } else {
            0.0
        }
    }

    /// Lower edge of category `index`, in the direction of the range
    pub fn start(&self, index: usize) -> f64 {
        let offset =
            self.margins.lower * self.length() + index as f64 * (self.band_size() + self.gap());
        self.range.0 + self.direction() * offset
    }

    pub fn middle(&self, index: usize) -> f64 {
        self.start(index) + self.direction() * self.band_size() / 2.0
    }

    pub fn end(&self, index: usize) -> f64 {
        self.start(index) + self.direction() * self.band_size()
    }

    pub fn index_of(&self, key: &str) -> Result<usize, ChartwellScaleError> {
        self.domain
            .iter()
            .position(|k| k == key)
            .ok_or_else(|| ChartwellScaleError::DomainValueNotFound(key.to_string()))
    }

    /// Position of `index` within its band: 0 at the start, 1 at the end
    pub fn position(&self, index: usize, fraction: f64) -> f64 {
        self.start(index) + self.direction() * self.band_size() * fraction
    }

    /// Index of the band containing `pixel`, if any
    pub fn invert(&self, pixel: f64) -> Option<usize> {
        (0..self.count()).find(|i| {
            let (a, b) = (self.start(*i), self.end(*i));
            pixel >= a.min(b) && pixel <= a.max(b)
        })
    }
}
