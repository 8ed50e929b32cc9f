//! Per-frame cost of the stage: scroll mapping, reveal tweening, parallax
//! and entrance sampling.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tourview::scene::{DecodedImage, LoadOutcome};
use tourview::scroll::RegionRect;
use tourview::util::easing::EasingFunction;
use tourview::{Options, PageElements, ScrollSnapshot, Stage};

fn loaded_stage() -> Stage {
    let page = PageElements {
        tour_region: true,
        hero_children: Some(4),
        about_content_children: Some(3),
        about_visual: true,
        ..PageElements::default()
    };
    let mut stage = Stage::new(Options::default(), page, 1280.0, 800.0, 2.0);
    let sender = stage.load_sender();
    for (index, uri) in stage.image_uris().to_vec().into_iter().enumerate() {
        sender.complete(LoadOutcome {
            index,
            uri,
            result: Ok(DecodedImage::solid(4, 4, [200, 200, 200, 255]).into()),
        });
    }
    let _ = stage.frame(0.0);
    stage.page_loaded();
    stage
}

fn snapshot(scroll_y: f32) -> ScrollSnapshot {
    ScrollSnapshot {
        scroll_y,
        viewport_height: 800.0,
        tour: Some(RegionRect::from_page(1600.0, 1200.0, scroll_y)),
        about_content: Some(RegionRect::from_page(900.0, 400.0, scroll_y)),
        about_visual: Some(RegionRect::from_page(900.0, 500.0, scroll_y)),
    }
}

fn easing_benchmark(c: &mut Criterion) {
    let ease = EasingFunction::QuarticOut;
    c.bench_function("quartic_out_easing", |b| {
        b.iter(|| black_box(ease.evaluate(black_box(0.5))));
    });
}

fn scroll_benchmark(c: &mut Criterion) {
    let mut stage = loaded_stage();
    let mut y = 0.0_f32;
    c.bench_function("stage_scroll", |b| {
        b.iter(|| {
            y = (y + 7.0) % 3200.0;
            black_box(stage.scroll(&snapshot(black_box(y))))
        });
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let mut stage = loaded_stage();
    let _ = stage.scroll(&snapshot(1500.0));
    stage.pointer_moved(900.0, 200.0);
    c.bench_function("stage_frame", |b| {
        b.iter(|| black_box(stage.frame(black_box(1.0 / 60.0))));
    });
}

criterion_group!(benches, easing_benchmark, scroll_benchmark, frame_benchmark);
criterion_main!(benches);
