use criterion::{Criterion, criterion_group, criterion_main};
use image::RgbaImage;
use numkit::{
    Cellular, Color, Fbm, FillOptions, NoiseGenerator, Perlin, Point, PointIndex, RasterTarget,
    Simplex, utils::HeightMap2D,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

const SIZE: usize = 257;
const SEED: f64 = 2025.0;
const POINTS: usize = 10_000;

fn random_points(rng: &mut StdRng, n: usize, dims: usize) -> Vec<Point> {
    (0..n)
        .map(|_| (0..dims).map(|_| rng.gen_range(0.0..1.0)).collect())
        .collect()
}

fn bench_index_build(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let points = random_points(&mut rng, POINTS, 3);
    c.bench_function("PointIndex build (10k, 3D)", |b| {
        b.iter(|| PointIndex::new(&points).unwrap())
    });
}

fn bench_index_query(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(2);
    let index = PointIndex::from_vec(random_points(&mut rng, POINTS, 3)).unwrap();
    let queries = random_points(&mut rng, 1_000, 3);
    c.bench_function("PointIndex nearest x1000 (10k, 3D)", |b| {
        b.iter(|| {
            queries
                .iter()
                .map(|q| index.nearest_neighbor(q).unwrap().distance)
                .sum::<f64>()
        })
    });
}

fn bench_perlin_fill(c: &mut Criterion) {
    c.bench_function("Perlin fill RGBA", |b| {
        let mut perlin = Perlin::new(SEED);
        let mut img = RgbaImage::new(SIZE as u32, SIZE as u32);
        let opts = FillOptions::default().with_freq(4.0);
        b.iter(|| {
            perlin
                .fill(RasterTarget::Pixels(&mut img), &opts, None)
                .unwrap()
        })
    });
}

fn bench_perlin_fbm_grid(c: &mut Criterion) {
    c.bench_function("Perlin fBm (4 octaves) fill grid", |b| {
        let mut fbm = Fbm::new(Perlin::new(SEED), 4, 0.5).unwrap();
        let mut grid: HeightMap2D = vec![vec![0.0; SIZE]; SIZE];
        let opts = FillOptions::default().with_freq(4.0);
        b.iter(|| fbm.fill(RasterTarget::Grid(&mut grid), &opts, None).unwrap())
    });
}

fn bench_simplex_fill(c: &mut Criterion) {
    c.bench_function("Simplex 3D slice fill RGBA", |b| {
        let mut simplex = Simplex::new(SEED);
        let mut img = RgbaImage::new(SIZE as u32, SIZE as u32);
        let opts = FillOptions::default().with_freq(4.0).with_z(0.5);
        b.iter(|| {
            simplex
                .fill(RasterTarget::Pixels(&mut img), &opts, None)
                .unwrap()
        })
    });
}

fn bench_cellular_fill(c: &mut Criterion) {
    c.bench_function("Cellular fill strided (freq 32)", |b| {
        let mut cellular = Cellular::with_rng(StdRng::seed_from_u64(3), 33);
        let mut data = vec![0u8; SIZE * SIZE * 4];
        let opts = FillOptions::default().with_freq(32.0);
        b.iter(|| {
            let target = RasterTarget::Strided {
                width: SIZE,
                stride: 4,
                data: &mut data,
            };
            cellular.fill(target, &opts, None).unwrap()
        })
    });
}

fn bench_color_fill(c: &mut Criterion) {
    c.bench_function("Color fill RGBA", |b| {
        let mut color = Color::new();
        let mut img = RgbaImage::new(SIZE as u32, SIZE as u32);
        let opts = FillOptions::default();
        b.iter(|| {
            color
                .fill(RasterTarget::Pixels(&mut img), &opts, None)
                .unwrap()
        })
    });
}

criterion_group!(
    numkit_benchmarks,
    bench_index_build,
    bench_index_query,
    bench_perlin_fill,
    bench_perlin_fbm_grid,
    bench_simplex_fill,
    bench_cellular_fill,
    bench_color_fill
);
criterion_main!(numkit_benchmarks);
