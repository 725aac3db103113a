use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_editor::{History, PageBuilderStore, Snapshot, TemplateMode};
use pagecraft_model::{Page, SectionKind};

fn large_page() -> Page {
    let mut store = PageBuilderStore::new(Page::new("home", "Home"));
    for template in ["landing", "saas", "ecommerce-store", "portfolio", "about"] {
        store
            .apply_template_by_id(template, TemplateMode::Append)
            .unwrap();
    }
    store.page().clone()
}

fn snapshot_capture(c: &mut Criterion) {
    let page = large_page();

    c.bench_function("snapshot_capture", |b| {
        b.iter(|| Snapshot::capture(black_box(&page)).unwrap())
    });
}

fn snapshot_restore(c: &mut Criterion) {
    let page = large_page();
    let snapshot = Snapshot::capture(&page).unwrap();

    c.bench_function("snapshot_restore", |b| {
        let mut target = Page::new("home", "Home");
        b.iter(|| snapshot.restore(black_box(&mut target)).unwrap())
    });
}

fn undo_redo_cycle(c: &mut Criterion) {
    let page = large_page();

    c.bench_function("undo_redo_cycle", |b| {
        let mut store = PageBuilderStore::new(page.clone());
        for _ in 0..20 {
            store.add_section(SectionKind::Faq, None).unwrap();
        }
        b.iter(|| {
            store.undo().unwrap();
            store.redo().unwrap();
        })
    });
}

fn history_at_limit(c: &mut Criterion) {
    let page = large_page();
    let snapshot = Snapshot::capture(&page).unwrap();

    c.bench_function("history_record_at_limit", |b| {
        let mut history = History::with_max_levels(50);
        b.iter(|| history.record(black_box(snapshot.clone()), Some("Edit")))
    });
}

criterion_group!(
    benches,
    snapshot_capture,
    snapshot_restore,
    undo_redo_cycle,
    history_at_limit
);
criterion_main!(benches);
