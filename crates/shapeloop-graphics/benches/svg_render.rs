use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shapeloop_core::ShapeRenderer;
use shapeloop_graphics::{Nest, Rotate, Scale, Shape, SquareRenderer, SvgCanvas, Transformation};

fn bench_square_renderer(c: &mut Criterion) {
    let renderer = SquareRenderer::rotating();
    c.bench_function("square_renderer_rotate_frame", |b| {
        let mut angle = 0.0f32;
        b.iter(|| {
            angle += 2.0;
            black_box(renderer.render(100.0, black_box(angle)).unwrap());
        });
    });
}

fn bench_nested_shape(c: &mut Criterion) {
    let canvas = SvgCanvas::default();
    let nest = Nest::default().then(Rotate::degrees(15.0)).then(Scale::new(0.9));
    c.bench_function("nested_square_to_svg", |b| {
        b.iter(|| {
            let shape = nest.apply(Shape::square(black_box(100.0)));
            black_box(canvas.render(&shape));
        });
    });
}

criterion_group!(benches, bench_square_renderer, bench_nested_shape);
criterion_main!(benches);
