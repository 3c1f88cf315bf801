use herbarium::catalog::{Catalog, Plant, UNASSIGNED, project};
use herbarium::engine::Engine;
use herbarium::persist::PersistenceMode;
use serde_json::json;

#[test]
fn records_serialize_with_snake_case_fields() {
    let plant = Plant::new(
        7,
        "Monstera deliciosa".to_string(),
        "Swiss cheese plant".to_string(),
        2,
        1,
        2.5,
        true,
        true,
    );
    assert_eq!(
        serde_json::to_value(&plant).expect("serialize"),
        json!({
            "id": 7,
            "botanical_name": "Monstera deliciosa",
            "common_name": "Swiss cheese plant",
            "sun": 2,
            "care_difficulty": 1,
            "mature_size": 2.5,
            "air_purifying": true,
            "toxicity": true
        })
    );
}

#[test]
fn partial_payloads_default_the_absent_fields() {
    // a replace body does not have to spell out every attribute
    let payload = json!({ "botanical_name": "Rosa chinensis" });
    let plant: Plant = serde_json::from_value(payload).expect("deserialize");
    assert_eq!(plant.id(), UNASSIGNED);
    assert_eq!(plant.botanical_name(), "Rosa chinensis");
    assert_eq!(plant.common_name(), "");
    assert_eq!(plant.sun(), 0);
    assert_eq!(plant.care_difficulty(), 0);
    assert_eq!(plant.mature_size(), 0.0);
    assert!(!plant.air_purifying());
    assert!(!plant.toxicity());
}

#[test]
fn shared_records_serialize_straight_through() {
    let catalog = Catalog::open(PersistenceMode::InMemory).expect("catalog");
    let engine = Engine::new(&catalog);
    engine
        .add_plant(Plant::new(
            UNASSIGNED,
            "Ficus lyrata".to_string(),
            "fiddle leaf fig".to_string(),
            4,
            2,
            3.0,
            true,
            true,
        ))
        .expect("add");
    // records go out as kept, shared handles included
    let served = engine.all_plants().expect("list");
    assert_eq!(
        serde_json::to_value(&served).expect("serialize"),
        json!([{
            "id": 1,
            "botanical_name": "Ficus lyrata",
            "common_name": "fiddle leaf fig",
            "sun": 4,
            "care_difficulty": 2,
            "mature_size": 3.0,
            "air_purifying": true,
            "toxicity": true
        }])
    );
    let names = project(&served);
    assert_eq!(
        serde_json::to_value(&names).expect("serialize"),
        json!([{
            "botanical_name": "Ficus lyrata",
            "common_name": "fiddle leaf fig"
        }])
    );
}
