// numkit holds the spatial index and the noise generators
pub mod cellular;
pub mod color;
pub mod error;
pub mod fbm;
pub mod gradient;
pub mod kdtree;
pub mod perlin;
pub mod raster;
pub mod rng;
pub mod simplex;
pub mod utils;

pub use cellular::Cellular;
pub use color::Color;
pub use error::{IndexError, NoiseError};
pub use fbm::Fbm;
pub use gradient::GradientTable;
pub use kdtree::{Neighbor, Point, PointIndex};
pub use perlin::{Easing, Perlin};
pub use raster::{Cell, Extent, FillOptions, RasterTarget};
pub use rng::Prng;
pub use simplex::Simplex;
pub use utils::{HeightMap2D, flatten2};

// Noise generator that can be reseeded, sampled at 2D or 3D points,
// and rendered into a raster target.
pub trait NoiseGenerator {
    // Rebuild internal state from `seed`.
    fn seed(&mut self, seed: f64);

    // Sample 2D noise at (x, y).
    fn xy(&mut self, x: f64, y: f64) -> f64;

    // Sample 3D noise at (x, y, z).
    fn xyz(&mut self, x: f64, y: f64, z: f64) -> f64;

    // Fill every cell of `target` in row-major order.
    // Cell (x, y) samples at (x, y) * freq / min(width, height), through `xyz`
    // when `options.z` is set, and the [−1, 1] result is scaled to [0, 255].
    // `set`, when given, receives each cell instead of the target's default writer.
    fn fill(
        &mut self,
        target: RasterTarget<'_>,
        options: &FillOptions,
        set: Option<&mut dyn FnMut(Cell)>,
    ) -> Result<(), NoiseError> {
        let freq = options.freq;
        let z = options.z;
        raster::fill_scalar(target, options, set, |x, y| match z {
            Some(z) => self.xyz(x * freq, y * freq, z),
            None => self.xy(x * freq, y * freq),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const SIZE: usize = 24;

    fn generators() -> Vec<Box<dyn NoiseGenerator>> {
        vec![Box::new(Perlin::new(42.0)), Box::new(Simplex::new(42.0))]
    }

    #[test]
    fn fill_shapes_agree() {
        for mut generator in generators() {
            let opts = FillOptions::default().with_freq(3.0);

            let mut grid: HeightMap2D = vec![vec![0.0; SIZE]; SIZE];
            generator.fill(RasterTarget::Grid(&mut grid), &opts, None).unwrap();

            let mut img = RgbaImage::new(SIZE as u32, SIZE as u32);
            generator.fill(RasterTarget::Pixels(&mut img), &opts, None).unwrap();

            let mut data = vec![0u8; SIZE * SIZE * 4];
            let strided = RasterTarget::Strided {
                width: SIZE,
                stride: 4,
                data: &mut data,
            };
            generator.fill(strided, &opts, None).unwrap();

            // bytes are the grid's f32 values rounded to the nearest integer
            for (i, &v) in flatten2(&grid).iter().enumerate() {
                assert!((img.as_raw()[i * 4] as f64 - v as f64).abs() <= 0.5 + 1e-3);
                assert!((data[i * 4] as f64 - v as f64).abs() <= 0.5 + 1e-3);
                assert_eq!(data[i * 4 + 3], 255);
            }
            assert_eq!(img.as_raw(), &data);
        }
    }

    #[test]
    fn fill_matches_point_samples() {
        let mut perlin = Perlin::new(3.0);
        let opts = FillOptions::default().with_freq(2.0).with_z(0.4);
        let mut grid: HeightMap2D = vec![vec![0.0; 8]; 4];
        perlin.fill(RasterTarget::Grid(&mut grid), &opts, None).unwrap();

        // d = min(8, 4)
        let v = perlin.xyz(5.0 / 4.0 * 2.0, 3.0 / 4.0 * 2.0, 0.4);
        assert_eq!(grid[3][5], ((v + 1.0) / 2.0 * 255.0) as f32);
    }

    #[test]
    fn fill_is_idempotent() {
        let mut simplex = Simplex::new(8.0);
        let opts = FillOptions::default().with_freq(5.0);
        let mut a: HeightMap2D = vec![vec![0.0; 16]; 16];
        let mut b = a.clone();
        simplex.fill(RasterTarget::Grid(&mut a), &opts, None).unwrap();
        simplex.fill(RasterTarget::Grid(&mut b), &opts, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn fill_callback_gets_scaled_values() {
        let mut perlin = Perlin::new(1.0);
        let mut grid: HeightMap2D = vec![vec![0.0; 10]; 10];
        let mut count = 0;
        let mut set = |cell: Cell| {
            assert!((0.0..=255.0).contains(&cell.v));
            assert_eq!(cell.z, 0.0);
            count += 1;
        };
        perlin
            .fill(RasterTarget::Grid(&mut grid), &FillOptions::default(), Some(&mut set))
            .unwrap();
        assert_eq!(count, 100);
    }
}
