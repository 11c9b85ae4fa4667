use criterion::{black_box, criterion_group, criterion_main, Criterion};
use woodpile_core::{Point, Rect, ScalingInfo};
use woodpile_grid::{
    DetectionBox, GridDescription, GridLine, GridLineSet, GridResolver, ImageDimensions,
    ResolverMode,
};

fn dense_grid(cols: usize, rows: usize) -> GridDescription {
    let (w, h) = (4000.0_f32, 3000.0_f32);
    GridDescription {
        image_dimensions: ImageDimensions {
            width: w as u32,
            height: h as u32,
        },
        px_per_meter: 400.0,
        segmentation_line: None,
        detection_box: DetectionBox {
            label: "pile".into(),
            top_left: [0.0, 0.0],
            bottom_right: [w, h],
        },
        grid_lines: GridLineSet {
            vertical: (1..cols)
                .map(|i| {
                    // slightly irregular spacing, as the detector produces
                    let x = i as f32 * w / cols as f32 + (i % 3) as f32 * 4.0;
                    GridLine {
                        p1: [x, 0.0],
                        p2: [x, h],
                    }
                })
                .collect(),
            horizontal: (1..rows)
                .map(|j| {
                    let y = j as f32 * h / rows as f32;
                    GridLine {
                        p1: [0.0, y],
                        p2: [w, y],
                    }
                })
                .collect(),
        },
    }
}

fn bench_resolve(c: &mut Criterion) {
    let grid = dense_grid(40, 30);
    let scaling = ScalingInfo::fit_width(4000, 3000, 1080).expect("scaling");
    let resolver = GridResolver::new(&grid, scaling);
    let crop = Rect::new(100.0, 80.0, 900.0, 700.0);
    let taps: Vec<Point> = (0..256)
        .map(|k| Point::new((k * 37 % 1080) as f32, (k * 53 % 810) as f32))
        .collect();

    for (name, mode) in [
        ("explicit_lines", ResolverMode::ExplicitLines),
        ("uniform_box", ResolverMode::UniformBox),
        ("crop_relative", ResolverMode::CropRelative),
    ] {
        c.bench_function(name, |b| {
            b.iter(|| {
                taps.iter()
                    .filter_map(|&tap| resolver.resolve(black_box(tap), mode, Some(&crop)))
                    .count()
            })
        });
    }
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
