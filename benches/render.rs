use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

use headerorder::config::HeadersConfig;
use headerorder::model::header::DisplayStyle;
use headerorder::render::view::HeaderView;
use headerorder::store::reader::MessageStore;

fn fixture_store() -> MessageStore {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("simple.mbox");
    MessageStore::open(&fixture_path).unwrap()
}

fn bench_reorder(c: &mut Criterion) {
    let store = fixture_store();
    let view = HeaderView::from_config(&HeadersConfig::default());
    let region = store.region(1).unwrap();

    c.bench_function("reorder_default_order", |b| {
        b.iter(|| {
            view.render(store.text(), region, DisplayStyle::Normal, None)
                .unwrap()
        })
    });
}

fn bench_legacy(c: &mut Criterion) {
    let store = fixture_store();
    let mut view = HeaderView::from_config(&HeadersConfig::default());
    view.remove_reorder();
    let region = store.region(1).unwrap();

    c.bench_function("legacy_ignore_filter", |b| {
        b.iter(|| {
            view.render(store.text(), region, DisplayStyle::Normal, None)
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_reorder, bench_legacy);
criterion_main!(benches);
