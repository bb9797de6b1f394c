// models/records.rs - typed rows for the civic data tables
//
// The store schema is open-ended; each row type keeps its known columns and
// carries the rest in a flattened map so unknown columns survive a round trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Top-level structural subfactor row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subfactor {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Harm/risk row, owned by a structural subfactor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmRisk {
    pub id: Uuid,
    pub structural_sub_factor_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Join row linking a harm/risk to a nonprofit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonprofitLink {
    pub harm_risk_id: Uuid,
    pub nonprofit_id: Uuid,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Nonprofit row; `entity_id` points at the resolved organization record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nonprofit {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resolved organization record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expert {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Litigation {
    pub id: Uuid,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
