//! Canvas, shape and animation benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

mod recorder {
    use termux2d::{Color, Driver, KeyEvent, PairIndex, Result};

    /// Driver that only counts writes.
    #[derive(Default)]
    pub struct CountingDriver {
        pub writes: usize,
    }

    impl Driver for CountingDriver {
        fn enter(&mut self) -> Result<()> {
            Ok(())
        }

        fn exit(&mut self) -> Result<()> {
            Ok(())
        }

        fn write_cell(&mut self, _: u16, _: u16, _: char, _: PairIndex) -> Result<()> {
            self.writes += 1;
            Ok(())
        }

        fn refresh(&mut self) -> Result<()> {
            Ok(())
        }

        fn poll_key(&mut self) -> Result<Option<KeyEvent>> {
            Ok(None)
        }

        fn register_color_pair(&mut self, _: PairIndex, _: Color, _: Color) -> Result<()> {
            Ok(())
        }

        fn supports_color_remap(&self) -> bool {
            true
        }

        fn size(&self) -> Result<(u16, u16)> {
            Ok((200, 50))
        }
    }
}

use criterion::{Criterion, criterion_group, criterion_main};
use recorder::CountingDriver;
use std::hint::black_box;
use termux2d::{
    AnimationOptions, Bounds, Canvas, Color, Palette, Session, SubCellMode, animate, line, polygon,
};

fn filled(mode: SubCellMode, width: i64, height: i64) -> Canvas {
    let mut canvas = Canvas::with_mode(mode);
    for y in 0..height {
        for x in (0..width).filter(|x| (x + y) % 3 == 0) {
            canvas.set(x, y).unwrap();
        }
    }
    canvas
}

fn canvas_mutation(c: &mut Criterion) {
    c.bench_function("canvas_set_400x200", |b| {
        b.iter(|| filled(SubCellMode::Quadrant, black_box(400), black_box(200)))
    });

    let mut canvas = filled(SubCellMode::Quadrant, 400, 200);
    c.bench_function("canvas_toggle", |b| {
        b.iter(|| canvas.toggle(black_box(123), black_box(77)).unwrap())
    });

    let mut background = Canvas::new();
    background
        .set_static((0..400).map(|x| (x, 100, Color::WHITE)))
        .unwrap();
    c.bench_function("canvas_scribble_and_clear", |b| {
        b.iter(|| {
            for x in 0..100 {
                background.set(x, black_box(50)).unwrap();
            }
            background.clear();
        })
    });
}

fn canvas_render(c: &mut Criterion) {
    let quadrant = filled(SubCellMode::Quadrant, 400, 200);
    c.bench_function("render_quadrant_400x200", |b| {
        b.iter(|| quadrant.frame(black_box(&Bounds::default())))
    });

    let braille = filled(SubCellMode::Braille, 400, 200);
    c.bench_function("render_braille_400x200", |b| {
        b.iter(|| braille.frame(black_box(&Bounds::default())))
    });
}

fn shapes(c: &mut Criterion) {
    c.bench_function("line_1000", |b| {
        b.iter(|| line(black_box(0), black_box(0), 1000, 377).unwrap().count())
    });

    c.bench_function("polygon_64_sides", |b| {
        b.iter(|| polygon(100.0, 100.0, black_box(64), 80.0).unwrap().count())
    });
}

fn animation(c: &mut Criterion) {
    let palette = Palette::new();
    c.bench_function("animate_rotating_polygon_60_frames", |b| {
        b.iter(|| {
            let mut canvas = Canvas::new();
            let mut driver = CountingDriver::default();
            let mut session = Session::begin(&mut driver).unwrap();
            let frames = (0..60).map(|i| {
                polygon(80.0, 80.0, 3 + i % 5, 60.0)
                    .unwrap()
                    .map(|(x, y)| (x, y, Color::GREEN))
            });
            animate(
                &mut canvas,
                &palette,
                &mut session,
                frames,
                AnimationOptions::unthrottled(),
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, canvas_mutation, canvas_render, shapes, animation);
criterion_main!(benches);
