use criterion::{Criterion, black_box, criterion_group, criterion_main};
use bento_grid::{Cell, GridConfig, ItemStore, Position, Size, SizePreset};

fn populated_store() -> ItemStore {
    let config = GridConfig::new(12, 8).with_growth_step(4);
    let mut store = ItemStore::new(config).expect("store");
    for (index, preset) in SizePreset::ALL.iter().cycle().take(120).enumerate() {
        store
            .add_at_first_free(preset.size(), format!("card {index}"))
            .expect("add");
    }
    store
}

fn is_valid_scan(c: &mut Criterion) {
    let store = populated_store();
    let probes: Vec<Position> = store
        .grid()
        .cells()
        .map(|cell: Cell| store.grid().to_pixels(cell))
        .collect();
    c.bench_function("is_valid_full_grid_scan", |b| {
        b.iter(|| {
            probes
                .iter()
                .filter(|position| store.is_valid(**position, black_box(Size::new(2, 2)), None))
                .count()
        });
    });
}

fn add_at_first_free(c: &mut Criterion) {
    c.bench_function("add_at_first_free_with_growth", |b| {
        b.iter(|| {
            let mut store = populated_store();
            store
                .add_at_first_free(black_box(Size::new(3, 2)), "late")
                .expect("add");
            store
        });
    });
}

fn drag_round_trip(c: &mut Criterion) {
    c.bench_function("drag_drop_rollback", |b| {
        let mut store = populated_store();
        let id = store.items()[0].id;
        b.iter(|| {
            let session = store.begin_drag(id).expect("drag");
            store.drop_by_offset(session, black_box(270), black_box(0)).expect("drop")
        });
    });
}

criterion_group!(benches, is_valid_scan, add_at_first_free, drag_round_trip);
criterion_main!(benches);
