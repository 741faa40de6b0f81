//! Combine three point datasets, translate a selection, then remove a source.

use pointmerge::prelude::*;

fn names(n: u32) -> Vec<String> {
    (0..n).map(|d| format!("dim{d}")).collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut store: DatasetStore = DatasetStore::new();
    let a = store.insert_points("a", vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5], 2, names(2))?;
    let empty = store.insert_points("empty", Vec::new(), 2, names(2))?;
    let c = store.insert_points("c", vec![9.0, 9.5, 8.0, 8.5], 2, names(2))?;

    let (sink, events) = ChannelSink::new();

    // Declined: only one input.
    let outcome = combine_datasets(&mut store, &sink, &[a], &CombineConfig::default())?;
    if let Some(rejection) = outcome.rejection() {
        println!("declined: {rejection}");
    }

    let outcome = combine_datasets(
        &mut store,
        &sink,
        &[a, empty, c],
        &CombineConfig::named("quickstart"),
    )?;
    let Some(combined) = outcome.combined() else {
        return Ok(());
    };
    println!(
        "combined {} points into dataset {} (offsets {:?})",
        combined.num_points, combined.id, combined.offsets
    );
    for event in events.try_iter() {
        println!("event: {event:?}");
    }

    let selection = [1, 3, 4];
    for &source in &combined.source_ids {
        let local = store
            .translate_selection(combined.id, source, &selection)
            .unwrap_or_default();
        println!("selection {selection:?} in dataset {source}: {local:?}");
    }

    store.remove_dataset(c)?;
    println!(
        "after removing {c}, combined links to {:?}",
        store.linked_targets(combined.id)
    );
    Ok(())
}
