use gtm_directory::{RegionCatalog, RegionKey, Selection};
use proptest::prelude::*;

fn all_keys(catalog: &RegionCatalog) -> Vec<RegionKey> {
    catalog.keys().collect()
}

/// Replays a sequence of toggles from an empty selection.
fn replay(catalog: &RegionCatalog, picks: &[usize]) -> Selection {
    let keys = all_keys(catalog);
    picks.iter().fold(Selection::new(), |selection, pick| {
        catalog.toggle(&selection, keys[pick % keys.len()])
    })
}

fn members_of_other_groups(selection: &Selection, group: usize) -> Vec<RegionKey> {
    selection.keys().filter(|k| k.group_index() != group).collect()
}

proptest! {
    #[test]
    fn invariant_holds_after_every_toggle(picks in prop::collection::vec(0usize..64, 0..40)) {
        let catalog = RegionCatalog::builtin();
        let keys = all_keys(&catalog);

        let mut selection = Selection::new();
        for pick in picks {
            selection = catalog.toggle(&selection, keys[pick % keys.len()]);
            prop_assert!(catalog.is_consistent(&selection));
        }
    }

    #[test]
    fn country_toggle_is_self_inverse(
        picks in prop::collection::vec(0usize..64, 0..30),
        target in 0usize..64,
    ) {
        let catalog = RegionCatalog::builtin();
        let keys: Vec<RegionKey> = all_keys(&catalog).into_iter().filter(|k| !k.is_aggregate()).collect();
        let key = keys[target % keys.len()];

        let start = replay(&catalog, &picks);
        let round_trip = catalog.toggle(&catalog.toggle(&start, key), key);
        prop_assert_eq!(round_trip, start);
    }

    #[test]
    fn aggregate_toggle_is_self_inverse_on_settled_groups(
        picks in prop::collection::vec(0usize..64, 0..30),
        group in 0usize..2,
        full in any::<bool>(),
    ) {
        let catalog = RegionCatalog::builtin();
        let aggregate = catalog.lookup(&catalog.groups()[group].aggregate.value).unwrap();

        // an aggregate toggle always ends fully selected or fully cleared
        let mut start = catalog.toggle(&replay(&catalog, &picks), aggregate);
        if catalog.is_fully_selected(&start, group) != full {
            start = catalog.toggle(&start, aggregate);
        }

        let round_trip = catalog.toggle(&catalog.toggle(&start, aggregate), aggregate);
        prop_assert_eq!(round_trip, start);
    }

    #[test]
    fn toggle_never_touches_other_groups(
        picks in prop::collection::vec(0usize..64, 0..30),
        target in 0usize..64,
    ) {
        let catalog = RegionCatalog::builtin();
        let keys = all_keys(&catalog);
        let key = keys[target % keys.len()];

        let before = replay(&catalog, &picks);
        let after = catalog.toggle(&before, key);
        prop_assert_eq!(
            members_of_other_groups(&before, key.group_index()),
            members_of_other_groups(&after, key.group_index())
        );
    }
}

#[test]
fn selecting_every_country_one_by_one_selects_latam() {
    let catalog = RegionCatalog::builtin();
    let countries: Vec<&str> = catalog.groups()[0]
        .countries
        .iter()
        .map(|c| c.value.as_str())
        .collect();

    let (last, rest) = countries.split_last().unwrap();
    let almost = catalog.selection_from_identifiers(rest).unwrap();
    assert!(!catalog.is_fully_selected(&almost, 0));

    let full = catalog.toggle_identifier(&almost, last).unwrap();
    assert!(catalog.is_fully_selected(&full, 0));
    assert_eq!(full.identifiers(&catalog)[0], "latam");
    assert_eq!(full.len(), countries.len() + 1);
}

#[test]
fn labels_follow_catalog_order() {
    let catalog = RegionCatalog::builtin();
    let selection = catalog
        .selection_from_identifiers(["portugal", "brazil", "uk"])
        .unwrap();
    assert_eq!(selection.labels(&catalog), vec!["Brazil", "United Kingdom", "Portugal"]);
}
