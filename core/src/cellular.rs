use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::kdtree::{Point, PointIndex};
use crate::raster::{self, Cell, FillOptions, RasterTarget};
use crate::rng::Prng;

pub const DEFAULT_FEATURES: usize = 10;
// Most feature points a seed or fill frequency may ask for
pub const MAX_FEATURES: usize = 1 << 16;

// Cellular (Worley) noise: distance to the nearest random feature point.
// Feature points are uniform in the unit cube and indexed in a PointIndex;
// `seed(n)` throws the old set away and draws `n` new points.
pub struct Cellular<R = StdRng> {
    rng: R,
    index: PointIndex,
}

impl Cellular {
    pub fn new(features: usize) -> Self {
        Self::with_rng(StdRng::from_entropy(), features)
    }
}

impl Default for Cellular {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURES)
    }
}

impl<R: Prng> Cellular<R> {
    pub fn with_rng(rng: R, features: usize) -> Self {
        let mut cellular = Self {
            rng,
            index: PointIndex::default(),
        };
        cellular.regenerate(features);
        cellular
    }

    pub fn features(&self) -> &PointIndex {
        &self.index
    }

    // Euclidean distance from (x, y, z) to the nearest feature point,
    // infinite when there are none
    pub fn distance(&self, x: f64, y: f64, z: f64) -> f64 {
        self.index
            .nearest_neighbor(&[x, y, z])
            .map_or(f64::INFINITY, |n| n.distance)
    }

    fn regenerate(&mut self, features: usize) {
        let rng = &mut self.rng;
        let points: Vec<Point> = (0..features)
            .map(|_| (0..3).map(|_| rng.next_unit()).collect())
            .collect();
        self.index = PointIndex::from_trusted(points, 3);
        debug!(features, "regenerated cellular feature points");
    }
}

impl<R: Prng> NoiseGenerator for Cellular<R> {
    // The seed is the number of feature points
    fn seed(&mut self, seed: f64) {
        // saturating cast: negative and NaN give no features
        let requested = seed.floor() as usize;
        if requested > MAX_FEATURES {
            warn!(
                seed,
                max = MAX_FEATURES,
                "cellular seed clamped to feature limit"
            );
        }
        self.regenerate(requested.min(MAX_FEATURES));
    }

    fn xy(&mut self, x: f64, y: f64) -> f64 {
        self.distance(x, y, 0.0)
    }

    fn xyz(&mut self, x: f64, y: f64, z: f64) -> f64 {
        self.distance(x, y, z)
    }

    // Frequency sets feature density: the field holds freq + 1 points,
    // reseeding whenever that count changes. Cells sample the unit square
    // and the clamped distance maps to brightness (0 on a feature point,
    // 255 at distance 1 or more).
    fn fill(
        &mut self,
        target: RasterTarget<'_>,
        options: &FillOptions,
        set: Option<&mut dyn FnMut(Cell)>,
    ) -> Result<(), NoiseError> {
        options.validate()?;
        if options.freq.fract() != 0.0 {
            warn!(
                freq = options.freq,
                "cellular fill floors fractional frequency"
            );
        }
        let features = feature_count(options.freq)
            .ok_or(NoiseError::InvalidFrequency(options.freq))?;
        if features != self.index.len() {
            self.regenerate(features);
        }

        let z = options.z.unwrap_or(0.0);
        raster::fill_scalar(target, options, set, |x, y| {
            2.0 * self.distance(x, y, z).min(1.0) - 1.0
        })
    }
}

// floor(freq) + 1, or None past MAX_FEATURES
fn feature_count(freq: f64) -> Option<usize> {
    let count = (freq.floor() as usize).checked_add(1)?;
    (count <= MAX_FEATURES).then_some(count)
}
