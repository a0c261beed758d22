use rand::{RngCore, SeedableRng, rngs::OsRng, rngs::StdRng};
use tracing::trace;

use crate::NoiseGenerator;
use crate::error::NoiseError;
use crate::raster::{Cell, FillOptions, RasterTarget};
use crate::rng::Prng;

// Largest request handed to the OS entropy source at once
pub const MAX_ENTROPY_CHUNK: usize = 65536;

// Raw random ("color") noise. Stateless: seeds are ignored and every
// sample is a fresh draw.
pub struct Color<R = StdRng> {
    rng: R,
}

impl Color {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Prng> Color<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    #[inline]
    fn draw(&mut self) -> f64 {
        self.rng.next_unit() * 2.0 - 1.0
    }
}

impl<R: Prng> NoiseGenerator for Color<R> {
    fn seed(&mut self, seed: f64) {
        trace!(seed, "color noise ignores seeds");
    }

    fn xy(&mut self, _x: f64, _y: f64) -> f64 {
        self.draw()
    }

    fn xyz(&mut self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.draw()
    }

    // Byte targets are overwritten with OS entropy, alpha included.
    // `set` then sees each cell's first byte. Nested grids have no byte
    // buffer to fill and are rejected.
    fn fill(
        &mut self,
        target: RasterTarget<'_>,
        options: &FillOptions,
        set: Option<&mut dyn FnMut(Cell)>,
    ) -> Result<(), NoiseError> {
        options.validate()?;
        let extent = target.extent()?;
        let (data, stride): (&mut [u8], usize) = match target {
            RasterTarget::Pixels(img) => (&mut **img, 4),
            RasterTarget::Strided { stride, data, .. } => (data, stride),
            RasterTarget::Grid(_) => {
                return Err(NoiseError::Unsupported("color noise fill on a nested grid"));
            }
        };

        fill_entropy(data)?;

        if let Some(set) = set {
            let z = options.z.unwrap_or(0.0);
            for y in 0..extent.height {
                for x in 0..extent.width {
                    let v = data[(x + y * extent.width) * stride] as f64;
                    set(Cell { x, y, z, v });
                }
            }
        }
        Ok(())
    }
}

fn fill_entropy(data: &mut [u8]) -> Result<(), NoiseError> {
    for chunk in data.chunks_mut(MAX_ENTROPY_CHUNK) {
        OsRng.try_fill_bytes(chunk)?;
    }
    trace!(
        bytes = data.len(),
        chunks = data.len().div_ceil(MAX_ENTROPY_CHUNK),
        "filled raster with entropy"
    );
    Ok(())
}
