// Output targets for `fill`.
//
// A `RasterTarget` is resolved to its `Extent` once per fill, then the
// raster loop runs against a per-shape writer (or the caller's callback)
// chosen up front, so the per-cell path never re-inspects the target.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::error::NoiseError;
use crate::utils::{to_byte, to_channel};

// Options shared by every generator's `fill`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillOptions {
    // Noise periods across the shorter side of the raster.
    pub freq: f64,
    // Samples a 3D slice at this depth instead of the 2D plane.
    pub z: Option<f64>,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self { freq: 1.0, z: None }
    }
}

impl FillOptions {
    pub fn with_freq(mut self, freq: f64) -> Self {
        self.freq = freq;
        self
    }

    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.freq.is_finite() && self.freq > 0.0 {
            Ok(())
        } else {
            Err(NoiseError::InvalidFrequency(self.freq))
        }
    }
}

// One computed cell, as handed to a `set` callback.
//
// `v` is already scaled to [0, 255].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub z: f64,
    pub v: f64,
}

// The supported output buffers.
pub enum RasterTarget<'a> {
    // RGBA pixels; the value goes to R, G and B, alpha is set opaque.
    Pixels(&'a mut RgbaImage),
    // Row-major nested grid, written as `grid[y][x] = v`.
    Grid(&'a mut [Vec<f32>]),
    // Flat bytes with `stride` slots per cell.
    // The value fills the first three slots, a fourth is set to 255.
    Strided {
        width: usize,
        stride: usize,
        data: &'a mut [u8],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
}

impl RasterTarget<'_> {
    pub fn extent(&self) -> Result<Extent, NoiseError> {
        match self {
            RasterTarget::Pixels(img) => Ok(Extent {
                width: img.width() as usize,
                height: img.height() as usize,
            }),
            RasterTarget::Grid(rows) => {
                let width = rows.first().map_or(0, Vec::len);
                if let Some(y) = rows.iter().position(|row| row.len() != width) {
                    return Err(NoiseError::InvalidTarget(format!(
                        "row {y} has {} cells, expected {width}",
                        rows[y].len()
                    )));
                }
                Ok(Extent {
                    width,
                    height: rows.len(),
                })
            }
            RasterTarget::Strided {
                width,
                stride,
                data,
            } => {
                if *width == 0 || *stride == 0 {
                    return Err(NoiseError::InvalidTarget(format!(
                        "strided buffer needs non-zero width and stride, got {width}x{stride}"
                    )));
                }
                Ok(Extent {
                    width: *width,
                    height: data.len() / width / stride,
                })
            }
        }
    }
}

// Per-shape write strategy
trait CellWriter {
    fn write(&mut self, cell: Cell);
}

struct PixelWriter<'a> {
    data: &'a mut [u8],
    width: usize,
}

impl CellWriter for PixelWriter<'_> {
    #[inline]
    fn write(&mut self, cell: Cell) {
        let offset = (cell.x + cell.y * self.width) * 4;
        let b = to_byte(cell.v);
        self.data[offset..offset + 4].copy_from_slice(&[b, b, b, 255]);
    }
}

struct GridWriter<'a> {
    rows: &'a mut [Vec<f32>],
}

impl CellWriter for GridWriter<'_> {
    #[inline]
    fn write(&mut self, cell: Cell) {
        self.rows[cell.y][cell.x] = cell.v as f32;
    }
}

struct StridedWriter<'a> {
    data: &'a mut [u8],
    width: usize,
    stride: usize,
}

impl CellWriter for StridedWriter<'_> {
    #[inline]
    fn write(&mut self, cell: Cell) {
        let offset = (cell.x + cell.y * self.width) * self.stride;
        let slots = &mut self.data[offset..offset + self.stride];
        let b = to_byte(cell.v);
        for (i, slot) in slots.iter_mut().take(4).enumerate() {
            *slot = if i < 3 { b } else { 255 };
        }
    }
}

struct CallbackWriter<'a> {
    set: &'a mut dyn FnMut(Cell),
}

impl CellWriter for CallbackWriter<'_> {
    #[inline]
    fn write(&mut self, cell: Cell) {
        (self.set)(cell);
    }
}

// Runs the raster loop shared by the scalar generators.
//
// `sample` receives unit coordinates `(x / d, y / d)` with `d` the shorter
// side, and returns a value in [−1, 1] that is rescaled to [0, 255].
pub fn fill_scalar<F>(
    target: RasterTarget<'_>,
    options: &FillOptions,
    set: Option<&mut dyn FnMut(Cell)>,
    mut sample: F,
) -> Result<(), NoiseError>
where
    F: FnMut(f64, f64) -> f64,
{
    options.validate()?;
    let extent = target.extent()?;
    let z = options.z.unwrap_or(0.0);

    match (set, target) {
        (Some(set), _) => drive(extent, z, &mut CallbackWriter { set }, &mut sample),
        (None, RasterTarget::Pixels(img)) => {
            let width = extent.width;
            let data: &mut [u8] = &mut **img;
            drive(extent, z, &mut PixelWriter { data, width }, &mut sample)
        }
        (None, RasterTarget::Grid(rows)) => drive(extent, z, &mut GridWriter { rows }, &mut sample),
        (None, RasterTarget::Strided {
            width,
            stride,
            data,
        }) => drive(
            extent,
            z,
            &mut StridedWriter {
                data,
                width,
                stride,
            },
            &mut sample,
        ),
    }
    Ok(())
}

fn drive<W, F>(extent: Extent, z: f64, writer: &mut W, sample: &mut F)
where
    W: CellWriter,
    F: FnMut(f64, f64) -> f64,
{
    let d = extent.width.min(extent.height) as f64;
    for y in 0..extent.height {
        for x in 0..extent.width {
            let v = to_channel(sample(x as f64 / d, y as f64 / d));
            writer.write(Cell { x, y, z, v });
        }
    }
}
