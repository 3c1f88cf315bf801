use herbarium::catalog::{Catalog, Plant, UNASSIGNED};
use herbarium::engine::Engine;
use herbarium::persist::PersistenceMode;

fn setup() -> Catalog {
    let catalog = Catalog::open(PersistenceMode::InMemory).expect("catalog");
    let seed = [
        ("Rosa chinensis", "China rose", 3, 0, 1.5, true, false),
        ("Rosa rugosa", "beach rose", 5, 1, 1.8, false, false),
        ("Monstera deliciosa", "Swiss cheese plant", 2, 1, 2.5, true, true),
        ("Ficus lyrata", "fiddle leaf fig", 4, 2, 3.0, true, true),
    ];
    for (botanical, common, sun, difficulty, size, air, toxic) in seed {
        catalog
            .upsert_plant(Plant::new(
                UNASSIGNED,
                botanical.to_string(),
                common.to_string(),
                sun,
                difficulty,
                size,
                air,
                toxic,
            ))
            .expect("seed");
    }
    catalog
}

#[test]
fn prefix_matching_ignores_case() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    for fragment in ["rosa", "ROSA", "RoSa", "Rosa"] {
        let names = engine.plants_by_name(fragment).expect("search");
        assert_eq!(names.len(), 2, "fragment {fragment} should match both roses");
    }
}

#[test]
fn the_fragment_must_be_a_prefix() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    // both appear inside botanical names, neither at the start
    assert!(engine.plants_by_name("chinensis").expect("search").is_empty());
    assert!(engine.plants_by_name("osa").expect("search").is_empty());
}

#[test]
fn an_empty_fragment_matches_every_record() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    // every botanical name starts with the empty string
    assert_eq!(engine.plants_by_name("").expect("search").len(), 4);
    assert_eq!(engine.full_plants_by_name("").expect("search").len(), 4);
}

#[test]
fn unmatched_fragments_yield_empty_results() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    let names = engine.plants_by_name("zzz").expect("search");
    assert!(names.is_empty());
}

#[test]
fn projected_and_full_searches_agree() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    let full = engine.full_plants_by_name("rosa").expect("full search");
    let names = engine.plants_by_name("rosa").expect("projected search");
    assert_eq!(full.len(), names.len());
    for (plant, name) in full.iter().zip(names.iter()) {
        assert_eq!(plant.botanical_name(), name.botanical_name());
        assert_eq!(plant.common_name(), name.common_name());
    }
}

#[test]
fn full_search_returns_complete_records() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    let plants = engine.full_plants_by_name("ficus").expect("search");
    assert_eq!(plants.len(), 1);
    assert_eq!(plants[0].botanical_name(), "Ficus lyrata");
    assert_eq!(plants[0].common_name(), "fiddle leaf fig");
    assert_eq!(plants[0].sun(), 4);
    assert_eq!(plants[0].care_difficulty(), 2);
    assert_eq!(plants[0].mature_size(), 3.0);
    assert!(plants[0].air_purifying());
    assert!(plants[0].toxicity());
}

#[test]
fn results_keep_store_order() {
    let catalog = setup();
    let engine = Engine::new(&catalog);
    let names = engine.plants_by_name("rosa").expect("search");
    assert_eq!(names[0].botanical_name(), "Rosa chinensis");
    assert_eq!(names[1].botanical_name(), "Rosa rugosa");
}
