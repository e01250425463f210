use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dendrogram_renderer::config::Config;
use dendrogram_renderer::hierarchy::build_hierarchy;
use dendrogram_renderer::ir::FlatRecord;
use dendrogram_renderer::layout::compute_layout;
use dendrogram_renderer::render::render_svg;
use std::hint::black_box;

/// Balanced tree of the given fanout and depth, one record per node.
fn balanced_records(fanout: usize, depth: usize) -> Vec<FlatRecord> {
    let mut records = vec![FlatRecord::new("root", 0.0)];
    let mut frontier = vec!["root".to_string()];
    for level in 0..depth {
        let mut next = Vec::new();
        for parent in &frontier {
            for child in 0..fanout {
                let id = format!("{parent}|n{level}{child}");
                records.push(FlatRecord::new(id.clone(), 1.0));
                next.push(id);
            }
        }
        frontier = next;
    }
    records
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("dendrogram");
    for (name, fanout, depth) in [("small", 3, 3), ("medium", 4, 4), ("large", 6, 4)] {
        let records = balanced_records(fanout, depth);
        let config = Config::default();

        group.bench_with_input(
            BenchmarkId::new("build", name),
            &records,
            |bencher, records| {
                bencher.iter(|| build_hierarchy(black_box(records), "|").unwrap());
            },
        );

        let tree = build_hierarchy(&records, "|").unwrap();
        group.bench_with_input(BenchmarkId::new("layout", name), &tree, |bencher, tree| {
            bencher.iter(|| compute_layout(black_box(tree.as_ref()), &config.layout, &config.render));
        });

        let layout = compute_layout(tree.as_ref(), &config.layout, &config.render);
        group.bench_with_input(
            BenchmarkId::new("render", name),
            &layout,
            |bencher, layout| {
                bencher.iter(|| render_svg(black_box(layout), &config.theme, &config.layout));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
