use serde::{Deserialize, Serialize};

use crate::core::StoryTables;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::{EngineSnapshot, StoryEngine};

pub const ENGINE_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;
pub const STORY_TABLES_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: EngineSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryTablesJsonContractV1 {
    pub schema_version: u32,
    pub tables: StoryTables,
}

impl EngineSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = EngineSnapshotJsonContractV1 {
            schema_version: ENGINE_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<EngineSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: EngineSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != ENGINE_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl StoryTables {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = StoryTablesJsonContractV1 {
            schema_version: STORY_TABLES_JSON_SCHEMA_V1,
            tables: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize tables contract v1: {e}"))
        })
    }

    /// Parses a versioned tables document.
    ///
    /// Dataset and zone invariants are checked while deserializing; the seed
    /// index is checked afterwards.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: StoryTablesJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse tables json payload: {e}"))
        })?;
        if payload.schema_version != STORY_TABLES_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported tables schema version: {}",
                payload.schema_version
            )));
        }
        payload.tables.validate()
    }

    /// Like [`StoryTables::from_json_str`], but also accepts bare tables
    /// without a schema envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(tables) = serde_json::from_str::<StoryTables>(input) {
            return tables.validate();
        }
        Self::from_json_str(input)
    }
}

impl<R: Renderer> StoryEngine<R> {
    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot().to_json_contract_v1_pretty()
    }
}
