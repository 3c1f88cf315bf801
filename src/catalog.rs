use std::sync::{Arc, Mutex, MutexGuard};

// records are kept sorted by identifier so full scans are deterministic
use std::collections::BTreeMap;

// used to print out readable forms of a record
use std::fmt;

use serde::{Deserialize, Serialize};

// our own stuff that we need
use crate::error::{HerbariumError, Result};
use crate::persist::{PersistenceMode, Persistor};

// ------------- PlantId -------------
pub type PlantId = i64;

/// The identifier carried by records that have not been stored yet.
/// Storing such a record assigns it the next free identifier.
pub const UNASSIGNED: PlantId = 0;

#[derive(Debug)]
pub struct IdGenerator {
    lower_bound: PlantId,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            lower_bound: UNASSIGNED,
        }
    }
    // Identifiers may arrive from the outside, either when an existing
    // catalog is restored or when a caller supplies its own identifier.
    // The generator must never hand out anything at or below what it
    // has already seen.
    pub fn retain(&mut self, id: PlantId) {
        if id > self.lower_bound {
            self.lower_bound = id;
        }
    }
    pub fn generate(&mut self) -> PlantId {
        self.lower_bound += 1;
        self.lower_bound
    }
    pub fn lower_bound(&self) -> PlantId {
        self.lower_bound
    }
}

// ------------- Plant -------------
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plant {
    id: PlantId,
    botanical_name: String,
    common_name: String,
    sun: i32,
    care_difficulty: i32,
    mature_size: f64,
    air_purifying: bool,
    toxicity: bool,
}

impl Plant {
    pub fn new(
        id: PlantId,
        botanical_name: String,
        common_name: String,
        sun: i32,
        care_difficulty: i32,
        mature_size: f64,
        air_purifying: bool,
        toxicity: bool,
    ) -> Self {
        Self {
            id,
            botanical_name,
            common_name,
            sun,
            care_difficulty,
            mature_size,
            air_purifying,
            toxicity,
        }
    }
    // It's intentional to encapsulate the attributes in the struct
    // and only expose them using "getters", because this yields
    // true immutability for records once they are kept.
    pub fn id(&self) -> PlantId {
        self.id
    }
    pub fn botanical_name(&self) -> &str {
        &self.botanical_name
    }
    pub fn common_name(&self) -> &str {
        &self.common_name
    }
    pub fn sun(&self) -> i32 {
        self.sun
    }
    pub fn care_difficulty(&self) -> i32 {
        self.care_difficulty
    }
    pub fn mature_size(&self) -> f64 {
        self.mature_size
    }
    pub fn air_purifying(&self) -> bool {
        self.air_purifying
    }
    pub fn toxicity(&self) -> bool {
        self.toxicity
    }
    /// The same record under another identifier, whatever the
    /// payload itself carried.
    pub fn with_id(mut self, id: PlantId) -> Self {
        self.id = id;
        self
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{} ({})]",
            self.id, self.botanical_name, self.common_name
        )
    }
}

// ------------- PlantName -------------
/// The name-oriented projection of a record, all other
/// attributes stripped away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlantName {
    botanical_name: String,
    common_name: String,
}

impl PlantName {
    pub fn botanical_name(&self) -> &str {
        &self.botanical_name
    }
    pub fn common_name(&self) -> &str {
        &self.common_name
    }
}

impl From<&Plant> for PlantName {
    fn from(plant: &Plant) -> Self {
        Self {
            botanical_name: plant.botanical_name.clone(),
            common_name: plant.common_name.clone(),
        }
    }
}

/// Projects records onto their names, preserving both order and
/// multiplicity of the input.
pub fn project(plants: &[Arc<Plant>]) -> Vec<PlantName> {
    plants.iter().map(|p| PlantName::from(p.as_ref())).collect()
}

// ------------- PlantKeeper -------------
#[derive(Debug)]
pub struct PlantKeeper {
    kept: BTreeMap<PlantId, Arc<Plant>>,
}

impl PlantKeeper {
    pub fn new() -> Self {
        Self {
            kept: BTreeMap::new(),
        }
    }
    pub fn keep(&mut self, plant: Plant) -> (Arc<Plant>, bool) {
        let keepsake = Arc::new(plant);
        let previously_kept = self
            .kept
            .insert(keepsake.id(), Arc::clone(&keepsake))
            .is_some();
        (keepsake, previously_kept)
    }
    pub fn get(&self, id: &PlantId) -> Option<Arc<Plant>> {
        self.kept.get(id).map(Arc::clone)
    }
    pub fn remove(&mut self, id: &PlantId) -> Option<Arc<Plant>> {
        self.kept.remove(id)
    }
    // ascending identifier order
    pub fn all(&self) -> Vec<Arc<Plant>> {
        self.kept.values().map(Arc::clone).collect()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}

// ------------- Catalog -------------
// This sets up the catalog with the necessary structures
pub struct Catalog {
    // owns an identifier generator
    pub id_generator: Arc<Mutex<IdGenerator>>,
    // owns the keeper for the records
    pub plant_keeper: Arc<Mutex<PlantKeeper>>,
    // responsible for the persistence layer
    pub persistor: Arc<Mutex<Persistor>>,
}

impl Catalog {
    pub fn open(mode: PersistenceMode) -> Result<Catalog> {
        // Create all the stuff that goes into a catalog
        let id_generator = IdGenerator::new();
        let plant_keeper = PlantKeeper::new();
        let persistor = Persistor::new(mode)?;

        // Create the catalog so that we can prime it before returning it
        let catalog = Catalog {
            id_generator: Arc::new(Mutex::new(id_generator)),
            plant_keeper: Arc::new(Mutex::new(plant_keeper)),
            persistor: Arc::new(Mutex::new(persistor)),
        };

        // Restore the existing records
        catalog.lock_persistor()?.restore_plants(&catalog)?;

        Ok(catalog)
    }
    // functions to access the owned generator, keeper and persistor
    pub fn id_generator(&self) -> Arc<Mutex<IdGenerator>> {
        Arc::clone(&self.id_generator)
    }
    pub fn plant_keeper(&self) -> Arc<Mutex<PlantKeeper>> {
        Arc::clone(&self.plant_keeper)
    }
    pub fn persistor(&self) -> Arc<Mutex<Persistor>> {
        Arc::clone(&self.persistor)
    }
    fn lock_id_generator(&self) -> Result<MutexGuard<'_, IdGenerator>> {
        self.id_generator
            .lock()
            .map_err(|e| HerbariumError::Lock(e.to_string()))
    }
    fn lock_plant_keeper(&self) -> Result<MutexGuard<'_, PlantKeeper>> {
        self.plant_keeper
            .lock()
            .map_err(|e| HerbariumError::Lock(e.to_string()))
    }
    fn lock_persistor(&self) -> Result<MutexGuard<'_, Persistor>> {
        self.persistor
            .lock()
            .map_err(|e| HerbariumError::Lock(e.to_string()))
    }
    /// Keeps a record in memory only, advancing the generator past its
    /// identifier. Used when records come back from the persistence layer.
    pub fn keep_plant(&self, plant: Plant) -> Result<(Arc<Plant>, bool)> {
        self.lock_id_generator()?.retain(plant.id());
        Ok(self.lock_plant_keeper()?.keep(plant))
    }
    /// Persists and keeps a record. A record still carrying [UNASSIGNED]
    /// is assigned the next free identifier, anything else overwrites
    /// whatever was kept under that identifier before. The keeper is only
    /// touched once the durable write has succeeded, so a failed write
    /// never changes what queries serve.
    pub fn upsert_plant(&self, mut plant: Plant) -> Result<Arc<Plant>> {
        if plant.id() == UNASSIGNED {
            plant = plant.with_id(self.lock_id_generator()?.generate());
        }
        self.lock_persistor()?.persist_plant(&plant)?;
        let (kept_plant, _previously_kept) = self.keep_plant(plant)?;
        Ok(kept_plant)
    }
    pub fn plant(&self, id: PlantId) -> Result<Option<Arc<Plant>>> {
        Ok(self.lock_plant_keeper()?.get(&id))
    }
    pub fn plants(&self) -> Result<Vec<Arc<Plant>>> {
        Ok(self.lock_plant_keeper()?.all())
    }
    /// Removes a record from the persistence layer and the keeper.
    /// Unknown identifiers are a no-op, so removal is idempotent. The
    /// keeper is only touched once the durable removal has succeeded.
    pub fn remove_plant(&self, id: PlantId) -> Result<()> {
        self.lock_persistor()?.remove_plant(id)?;
        self.lock_plant_keeper()?.remove(&id);
        Ok(())
    }
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock_plant_keeper()?.len())
    }
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock_plant_keeper()?.is_empty())
    }
}
