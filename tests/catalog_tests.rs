// Integration tests for the activity catalog through the public API

use vair::demo_data::demo_activities;
use vair::{
    list_visible, reserve, Activity, ActivityCatalog, ActivityKind, Availability, CatalogError,
    FilterState, SortKey,
};

fn activity(id: &str, kind: ActivityKind, rating: f64, capacity: u32, booked: u32) -> Activity {
    Activity::new(id, id, "Riyadh", "Saudi Arabia", kind, rating, capacity, booked)
}

fn mixed_catalog() -> Vec<Activity> {
    vec![
        activity("desert-safari", ActivityKind::Group, 4.2, 10, 4),
        activity("old-town-walk", ActivityKind::Solo, 3.8, 2, 2),
        activity("souq-tour", ActivityKind::Group, 4.6, 8, 8),
        activity("stargazing", ActivityKind::Solo, 4.9, 4, 1),
        activity("dune-bashing", ActivityKind::Group, 4.6, 6, 1),
        activity("museum", ActivityKind::Solo, 2.5, 30, 0),
    ]
}

fn every_filter_combination() -> Vec<FilterState> {
    let mut combos = Vec::new();
    for availability in [Availability::Any, Availability::Available, Availability::Full] {
        for min_rating in [None, Some(0.0), Some(4.2), Some(4.6), Some(5.0)] {
            for kind in [None, Some(ActivityKind::Solo), Some(ActivityKind::Group)] {
                for sort in [SortKey::Recommended, SortKey::RatingAscending, SortKey::RatingDescending] {
                    combos.push(FilterState {
                        availability,
                        min_rating,
                        kind,
                        sort,
                    });
                }
            }
        }
    }
    combos
}

#[test]
fn test_visible_is_subset_without_duplicates() {
    let activities = mixed_catalog();
    for filters in every_filter_combination() {
        let visible = list_visible(&activities, &filters);
        let mut ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
        for v in &visible {
            assert!(activities.contains(v), "fabricated {:?} for {:?}", v.id, filters);
        }
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicates for {:?}", filters);
    }
}

#[test]
fn test_filter_predicates_hold_for_every_combination() {
    let activities = mixed_catalog();
    for filters in every_filter_combination() {
        for a in list_visible(&activities, &filters) {
            match filters.availability {
                Availability::Available => assert!(a.spots_left() > 0),
                Availability::Full => assert_eq!(a.spots_left(), 0),
                Availability::Any => {}
            }
            if let Some(r) = filters.min_rating {
                assert!(a.rating >= r);
            }
            if let Some(k) = filters.kind {
                assert_eq!(a.kind, k);
            }
        }
    }
}

#[test]
fn test_filters_exclude_nothing_that_should_pass() {
    let activities = mixed_catalog();
    for filters in every_filter_combination() {
        let expected = activities.iter().filter(|a| filters.matches(a)).count();
        assert_eq!(list_visible(&activities, &filters).len(), expected);
    }
}

#[test]
fn test_descending_is_reverse_of_ascending_without_ties() {
    let activities: Vec<Activity> = mixed_catalog()
        .into_iter()
        .filter(|a| a.id != "dune-bashing")
        .collect();

    let mut filters = FilterState {
        sort: SortKey::RatingDescending,
        ..Default::default()
    };
    let desc: Vec<String> = list_visible(&activities, &filters).into_iter().map(|a| a.id).collect();
    filters.sort = SortKey::RatingAscending;
    let mut asc: Vec<String> = list_visible(&activities, &filters).into_iter().map(|a| a.id).collect();
    asc.reverse();
    assert_eq!(desc, asc);
}

#[test]
fn test_recommended_breaks_rating_ties_by_spots_left() {
    let visible = list_visible(&mixed_catalog(), &FilterState::default());
    let ids: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
    // dune-bashing (5 left) outranks souq-tour (0 left) at equal 4.6 rating
    assert_eq!(
        ids,
        vec!["stargazing", "dune-bashing", "souq-tour", "desert-safari", "old-town-walk", "museum"]
    );
}

#[test]
fn test_scenario_open_activity_is_listed() {
    let activities = vec![activity("a1", ActivityKind::Group, 5.0, 6, 0)];
    let visible = list_visible(&activities, &FilterState::default());
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "a1");
    assert_eq!(visible[0].spots_left(), 6);
}

#[test]
fn test_scenario_full_activity_hidden_when_filtering_available() {
    let activities = vec![activity("a1", ActivityKind::Group, 5.0, 6, 6)];
    let filters = FilterState {
        availability: Availability::Available,
        ..Default::default()
    };
    assert!(list_visible(&activities, &filters).is_empty());
}

#[test]
fn test_scenario_reserve_last_spot_then_full() {
    let mut activities = vec![activity("a2", ActivityKind::Solo, 4.9, 3, 2)];

    let updated = reserve(&mut activities, "a2").unwrap();
    assert_eq!(updated.booked, 3);
    assert_eq!(updated.spots_left(), 0);

    assert_eq!(
        reserve(&mut activities, "a2").unwrap_err(),
        CatalogError::CapacityExceeded("a2".to_string())
    );
    assert_eq!(activities[0].booked, 3);
}

#[test]
fn test_reserve_drives_spots_to_zero_exactly() {
    let mut catalog = ActivityCatalog::new(mixed_catalog()).unwrap();
    let start = catalog.get("desert-safari").unwrap().clone();

    for i in 1..=start.spots_left() {
        let updated = catalog.reserve("desert-safari").unwrap();
        assert_eq!(updated.booked, start.booked + i);
    }
    assert_eq!(catalog.get("desert-safari").unwrap().spots_left(), 0);

    for _ in 0..3 {
        assert!(matches!(
            catalog.reserve("desert-safari"),
            Err(CatalogError::CapacityExceeded(_))
        ));
    }
    assert_eq!(catalog.get("desert-safari").unwrap().booked, start.capacity);
}

#[test]
fn test_reserve_unknown_id_leaves_catalog_unchanged() {
    let mut catalog = ActivityCatalog::new(mixed_catalog()).unwrap();
    let before = catalog.activities().to_vec();
    let before_json = serde_json::to_string(&before).unwrap();

    assert_eq!(
        catalog.reserve("camel-race").unwrap_err(),
        CatalogError::NotFound("camel-race".to_string())
    );
    assert_eq!(catalog.activities(), before.as_slice());
    assert_eq!(serde_json::to_string(catalog.activities()).unwrap(), before_json);
}

#[test]
fn test_reservation_shows_up_in_next_listing() {
    let mut catalog = ActivityCatalog::new(demo_activities()).unwrap();
    let filters = FilterState {
        availability: Availability::Available,
        ..Default::default()
    };
    assert_eq!(catalog.visible(&filters).len(), 2);

    catalog.reserve("osaka-matcha").unwrap();
    let ids: Vec<String> = catalog.visible(&filters).into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["tokyo-teamlab".to_string()]);

    let full = FilterState {
        availability: Availability::Full,
        ..Default::default()
    };
    assert_eq!(catalog.visible(&full).len(), 2);
}
