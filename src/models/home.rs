// models/home.rs - homepage aggregate document
//
// The nested lists are attached only when non-empty: a subfactor with no
// harms has no `harms_and_risks` field at all, and likewise for `nonprofits`
// on a harm/risk. Clients branch on field presence, not on empty lists.

use serde::{Deserialize, Serialize};

use super::records::{Entity, HarmRisk, Subfactor};

/// A harm/risk with its resolved nonprofit entities attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmRiskNode {
    #[serde(flatten)]
    pub harm_risk: HarmRisk,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonprofits: Option<Vec<Entity>>,
}

/// A structural subfactor with its harm/risk children attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubfactorNode {
    #[serde(flatten)]
    pub subfactor: Subfactor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harms_and_risks: Option<Vec<HarmRiskNode>>,
}

/// Root homepage document. Built once per request and discarded after the
/// response is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePageData {
    pub subfactors: Vec<SubfactorNode>,
}
