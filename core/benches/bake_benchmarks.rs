use criterion::{Criterion, black_box, criterion_group, criterion_main};

use vatbake_core::bake::{BakeSettings, PackStrategy, TexturePacker, bake};
use vatbake_core::mesh::generators::generate_column;
use vatbake_core::rig::demo_target;
use vatbake_core::texture::TextureFormat;

// ---------------------------------------------------------------------------
// Texture packing
// ---------------------------------------------------------------------------

fn pack_rows(settings: &BakeSettings, vertices: &[[f32; 3]], frames: u32) {
    let mut packer = TexturePacker::new(vertices.len() as u32, frames, true, settings);
    for frame in 0..frames {
        packer.write_row(frame, black_box(vertices)).unwrap();
    }
    black_box(packer.finish().unwrap());
}

fn bench_pack_half(c: &mut Criterion) {
    let vertices: Vec<[f32; 3]> = generate_column(0.5, 2.0, 64, 32, 4)
        .into_iter()
        .map(|v| v.position)
        .collect();
    let settings = BakeSettings::new();
    c.bench_function("pack_2145v_x_61f_half", |b| {
        b.iter(|| pack_rows(&settings, &vertices, 61));
    });
}

fn bench_pack_full(c: &mut Criterion) {
    let vertices: Vec<[f32; 3]> = generate_column(0.5, 2.0, 64, 32, 4)
        .into_iter()
        .map(|v| v.position)
        .collect();
    let settings = BakeSettings::new().with_format(TextureFormat::Rgba32Float);
    c.bench_function("pack_2145v_x_61f_full", |b| {
        b.iter(|| pack_rows(&settings, &vertices, 61));
    });
}

// ---------------------------------------------------------------------------
// Full bake of the demo rig
// ---------------------------------------------------------------------------

fn bench_bake_demo(c: &mut Criterion) {
    let mut target = demo_target().unwrap();
    let clip = target.clip("twist").cloned().unwrap();
    let settings = BakeSettings::new();
    c.bench_function("bake_demo_twist", |b| {
        b.iter(|| black_box(bake(&mut target, &clip, &settings).unwrap()));
    });
}

fn bench_bake_demo_merged(c: &mut Criterion) {
    let mut target = demo_target().unwrap();
    let mut clip = target.clip("bend").cloned().unwrap();
    clip.frame_rate = 60.0;
    let settings = BakeSettings::new().with_pack_strategy(PackStrategy::MergeByMaterial);
    c.bench_function("bake_demo_bend_60fps_merged", |b| {
        b.iter(|| black_box(bake(&mut target, &clip, &settings).unwrap()));
    });
}

criterion_group!(packing, bench_pack_half, bench_pack_full);
criterion_group!(baking, bench_bake_demo, bench_bake_demo_merged);
criterion_main!(packing, baking);
