// used for persistence
use rusqlite::{Connection, params};

use crate::catalog::{Catalog, Plant, PlantId};
use crate::error::Result;

// ------------- PersistenceMode -------------
/// Selects where the catalog keeps its records between runs.
/// [PersistenceMode::InMemory] lives and dies with the process, while
/// [PersistenceMode::File] survives restarts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

// ------------- Persistence -------------
pub struct Persistor {
    db: Connection,
}

impl Persistor {
    pub fn new(mode: PersistenceMode) -> Result<Persistor> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        // The "STRICT" keyword introduced in 3.37.0 breaks JDBC connections, which makes
        // debugging using an external tool like DBeaver impossible
        connection.execute_batch(
            "
            create table if not exists Plant (
                Plant_Identity integer not null,
                BotanicalName text not null,
                CommonName text not null,
                Sun integer not null,
                CareDifficulty integer not null,
                MatureSize real not null,
                AirPurifying integer not null,
                Toxicity integer not null,
                constraint unique_and_referenceable_Plant_Identity primary key (
                    Plant_Identity
                )
            );-- STRICT;
            ",
        )?;
        Ok(Persistor { db: connection })
    }
    /// Writes a record under its identifier, overwriting any record
    /// already persisted under it.
    pub fn persist_plant(&mut self, plant: &Plant) -> Result<()> {
        let mut add_plant = self.db.prepare_cached(
            "
            insert or replace into Plant (
                Plant_Identity,
                BotanicalName,
                CommonName,
                Sun,
                CareDifficulty,
                MatureSize,
                AirPurifying,
                Toxicity
            ) values (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )?;
        add_plant.execute(params![
            &plant.id(),
            &plant.botanical_name(),
            &plant.common_name(),
            &plant.sun(),
            &plant.care_difficulty(),
            &plant.mature_size(),
            &plant.air_purifying(),
            &plant.toxicity()
        ])?;
        Ok(())
    }
    /// Removes the record persisted under the identifier, if any.
    pub fn remove_plant(&mut self, id: PlantId) -> Result<()> {
        let mut remove_plant = self.db.prepare_cached(
            "
            delete from Plant
                where Plant_Identity = ?
            ",
        )?;
        remove_plant.execute(params![&id])?;
        Ok(())
    }
    /// Reads every persisted record back into the catalog, returning
    /// how many were restored.
    pub fn restore_plants(&mut self, catalog: &Catalog) -> Result<usize> {
        let mut all_plants = self.db.prepare_cached(
            "
            select Plant_Identity,
                   BotanicalName,
                   CommonName,
                   Sun,
                   CareDifficulty,
                   MatureSize,
                   AirPurifying,
                   Toxicity
                from Plant
            ",
        )?;
        let plant_iter = all_plants.query_map([], |row| {
            Ok(Plant::new(
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
            ))
        })?;
        let mut restored = 0;
        for plant in plant_iter {
            catalog.keep_plant(plant?)?;
            restored += 1;
        }
        Ok(restored)
    }
}
