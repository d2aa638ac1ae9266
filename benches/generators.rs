use criterion::{criterion_group, criterion_main, Criterion};
use mazegen::{
    cells::Cartesian2DCoordinate,
    generators,
    grid::MazeGrid,
    units::{Length, Width},
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_recursive_backtracker_maze(c: &mut Criterion, size: usize) {
    let grid = MazeGrid::new(Width(size), Length(size), Cartesian2DCoordinate::new(0, 0)).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function(&format!("recursive_backtracker_maze_{}", size), move |b| {
        b.iter(|| {
            let mut g = grid.clone();
            generators::recursive_backtracker(&mut g, &mut rng).unwrap()
        })
    });
}

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    bench_recursive_backtracker_maze(c, 32);
}

fn bench_recursive_backtracker_maze_200(c: &mut Criterion) {
    bench_recursive_backtracker_maze(c, 200);
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_200
);
criterion_main!(benches);
