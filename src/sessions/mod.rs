use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

use bincode;
use rocksdb::{Options, DB};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Builder;

use crate::error::SessionStoreError;
use crate::model::PricePrediction;
use crate::recommend::RecommendationResult;

/// A result handed to the caller together with the record it was computed for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Interaction<T> {
    pub input_data: BTreeMap<String, f64>,
    pub outcome: T,
}

/// What one session last saw, kept for a single feedback round-trip.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub last_price: Option<Interaction<PricePrediction>>,
    pub last_recommendations: Option<Interaction<RecommendationResult>>,
}

#[derive(Serialize, Deserialize, Debug)]
struct DBValue<T> {
    interaction: Interaction<T>,
    epoch_secs: u64,
}

/// Each kind of result lives under its own key, so storing a price never
/// rewrites the recommendations of the same session and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Price = 0,
    Recommendations = 1,
}

/// Derives the storage key of a caller supplied session id.
pub fn session_key(session_id: &str) -> u128 {
    let session_id_digest = md5::compute(session_id);
    Builder::from_bytes(session_id_digest.0).build().as_u128()
}

fn slot_key(session_key: &u128, slot: Slot) -> Result<Vec<u8>, SessionStoreError> {
    let mut serialized_session_key = bincode::serialize(session_key)?;
    serialized_session_key.push(slot as u8);
    Ok(serialized_session_key)
}

pub struct RocksDBSessionStore {
    rocks_db: DB,
    max_session_idle_duration_in_seconds: u64,
}

impl RocksDBSessionStore {
    /// Entries are compacted away after `ttl` and ignored once idle for longer
    /// than `ttl`.
    pub fn new(database_file: &str, ttl: Duration) -> Result<Self, SessionStoreError> {
        let mut options = Options::default();
        options.create_if_missing(true);
        options.optimize_for_point_lookup(5000);
        options.set_allow_mmap_reads(true);
        options.set_allow_mmap_writes(true);

        let rocks_db = DB::open_with_ttl(&options, database_file, ttl)?;
        tracing::info!("opened session store {} with ttl {:?}", database_file, ttl);

        Ok(Self {
            rocks_db,
            max_session_idle_duration_in_seconds: ttl.as_secs(),
        })
    }

    pub fn get_session_state(&self, session_key: &u128) -> Result<SessionState, SessionStoreError> {
        Ok(SessionState {
            last_price: self.get(session_key, Slot::Price)?,
            last_recommendations: self.get(session_key, Slot::Recommendations)?,
        })
    }

    pub fn store_price(
        &self,
        session_key: &u128,
        interaction: Interaction<PricePrediction>,
    ) -> Result<(), SessionStoreError> {
        self.put(session_key, Slot::Price, interaction)
    }

    pub fn store_recommendations(
        &self,
        session_key: &u128,
        interaction: Interaction<RecommendationResult>,
    ) -> Result<(), SessionStoreError> {
        self.put(session_key, Slot::Recommendations, interaction)
    }

    fn get<T: DeserializeOwned>(
        &self,
        session_key: &u128,
        slot: Slot,
    ) -> Result<Option<Interaction<T>>, SessionStoreError> {
        let bytes = match self.rocks_db.get(slot_key(session_key, slot)?)? {
            Some(bytes) => bytes,
            None => return Ok(None),
        };
        let payload: DBValue<T> = bincode::deserialize(&bytes)?;
        let seconds_since_last_event = seconds_since_epoch().saturating_sub(payload.epoch_secs);
        if seconds_since_last_event <= self.max_session_idle_duration_in_seconds {
            Ok(Some(payload.interaction))
        } else {
            Ok(None)
        }
    }

    fn put<T: Serialize>(
        &self,
        session_key: &u128,
        slot: Slot,
        interaction: Interaction<T>,
    ) -> Result<(), SessionStoreError> {
        let payload = DBValue {
            interaction,
            epoch_secs: seconds_since_epoch(),
        };
        let bytes = bincode::serialize(&payload)?;

        self.rocks_db.put(slot_key(session_key, slot)?, bytes)?;
        Ok(())
    }
}

fn seconds_since_epoch() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
