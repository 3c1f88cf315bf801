use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{Catalog, Plant, PlantId, PlantName, project};
use crate::error::Result;

/// Care difficulty code that the recommendation fallback treats as easiest.
/// This is a fixed code, not the minimum present in the catalog.
pub const EASIEST_DIFFICULTY: i32 = 0;
/// Upper bound on the number of records the fallback recommends.
pub const RECOMMENDATION_LIMIT: usize = 5;

// ------------- QuizAnswers -------------
/// One answer per care-quiz question. A record must match all five
/// exactly to count as a recommendation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizAnswers {
    pub toxicity: bool,
    pub sun: i32,
    pub air_purifying: bool,
    pub mature_size: f64,
    pub care_difficulty: i32,
}

// ------------- Engine -------------
/// Runs queries against a [Catalog]. The engine holds no state of its
/// own, so every call sees whatever the catalog holds at that moment.
pub struct Engine<'en> {
    catalog: &'en Catalog,
}

impl<'en> Engine<'en> {
    pub fn new(catalog: &'en Catalog) -> Self {
        Self { catalog }
    }
    /// Every record in the catalog, in ascending identifier order.
    pub fn all_plants(&self) -> Result<Vec<Arc<Plant>>> {
        self.catalog.plants()
    }
    /// The record kept under the identifier, if any.
    pub fn plant_by_id(&self, id: PlantId) -> Result<Option<Arc<Plant>>> {
        self.catalog.plant(id)
    }
    /// Botanical-name prefix search, projected onto names.
    pub fn plants_by_name(&self, name: &str) -> Result<Vec<PlantName>> {
        Ok(project(&self.full_plants_by_name(name)?))
    }
    /// Botanical-name prefix search returning full records. Matching is
    /// case insensitive, and an empty fragment is a prefix of every name.
    pub fn full_plants_by_name(&self, name: &str) -> Result<Vec<Arc<Plant>>> {
        let prefix = name.to_lowercase();
        Ok(self
            .catalog
            .plants()?
            .into_iter()
            .filter(|plant| plant.botanical_name().to_lowercase().starts_with(&prefix))
            .collect())
    }
    /// Stores a record. Payloads without an identifier are assigned the
    /// next free one, payloads carrying an identifier overwrite.
    pub fn add_plant(&self, plant: Plant) -> Result<Arc<Plant>> {
        self.catalog.upsert_plant(plant)
    }
    /// Removes a record. Unknown identifiers are a no-op.
    pub fn remove_plant_by_id(&self, id: PlantId) -> Result<()> {
        self.catalog.remove_plant(id)
    }
    /// Overwrites whatever is kept under the given identifier with the
    /// payload. The identifier inside the payload is ignored.
    pub fn replace_plant_by_id(&self, id: PlantId, plant: Plant) -> Result<Arc<Plant>> {
        self.catalog.upsert_plant(plant.with_id(id))
    }
    /// Records whose botanical name starts with the fragment, whose
    /// common name contains it, and whose sun tolerance matches the code.
    pub fn plants_by_sun_intensity(&self, sun: i32, name: &str) -> Result<Vec<PlantName>> {
        let plants: Vec<Arc<Plant>> = self
            .full_plants_by_name(name)?
            .into_iter()
            .filter(|plant| plant.sun() == sun && plant.common_name().contains(name))
            .collect();
        Ok(project(&plants))
    }
    /// Records whose botanical name starts with the fragment, whose
    /// common name contains it, and whose care difficulty matches the code.
    pub fn plants_by_difficulty(&self, difficulty: i32, name: &str) -> Result<Vec<PlantName>> {
        let plants: Vec<Arc<Plant>> = self
            .full_plants_by_name(name)?
            .into_iter()
            .filter(|plant| {
                plant.care_difficulty() == difficulty && plant.common_name().contains(name)
            })
            .collect();
        Ok(project(&plants))
    }
    /// Air-purifying records whose botanical name starts with the
    /// fragment and whose common name contains it.
    pub fn air_purifying_plants(&self, name: &str) -> Result<Vec<PlantName>> {
        let candidates = self.full_plants_by_name(name)?;
        debug!(candidates = candidates.len(), "air purifying scan");
        let plants: Vec<Arc<Plant>> = candidates
            .into_iter()
            .filter(|plant| plant.air_purifying() && plant.common_name().contains(name))
            .collect();
        Ok(project(&plants))
    }
    /// Non-toxic records whose botanical name starts with the fragment
    /// and whose common name contains it.
    pub fn non_toxic_plants(&self, name: &str) -> Result<Vec<PlantName>> {
        let plants: Vec<Arc<Plant>> = self
            .full_plants_by_name(name)?
            .into_iter()
            .filter(|plant| !plant.toxicity() && plant.common_name().contains(name))
            .collect();
        Ok(project(&plants))
    }
    /// Recommends records matching all five quiz answers exactly. When
    /// nothing matches, degrades to the first few non-toxic records of
    /// the easiest care difficulty rather than recommending nothing.
    pub fn plants_by_quiz(&self, answers: &QuizAnswers) -> Result<Vec<PlantName>> {
        let all = self.catalog.plants()?;
        let exact: Vec<Arc<Plant>> = all
            .iter()
            .filter(|plant| {
                plant.toxicity() == answers.toxicity
                    && plant.sun() == answers.sun
                    && plant.air_purifying() == answers.air_purifying
                    && plant.mature_size() == answers.mature_size
                    && plant.care_difficulty() == answers.care_difficulty
            })
            .map(Arc::clone)
            .collect();
        if exact.is_empty() {
            let fallback: Vec<Arc<Plant>> = all
                .iter()
                .filter(|plant| {
                    !plant.toxicity() && plant.care_difficulty() == EASIEST_DIFFICULTY
                })
                .take(RECOMMENDATION_LIMIT)
                .map(Arc::clone)
                .collect();
            return Ok(project(&fallback));
        }
        Ok(project(&exact))
    }
}
