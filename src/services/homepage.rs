// services/homepage.rs - composite homepage aggregation
//
// Assembles the nested homepage document from four levels of dependent
// queries: subfactors, their harms and risks, the nonprofit join rows for
// each harm/risk, and the entity record behind each join row. Fetches run
// sequentially in nested-loop order; output order matches store order at
// every level.

use tracing::{error, warn};
use uuid::Uuid;

use crate::models::{HarmRiskNode, HomePageData, SubfactorNode};
use crate::store::repository::Repository;
use crate::store::StoreError;

/// How a fetch failure at a given level is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// The failure aborts the whole build.
    AbortOnFetchFailure,
    /// The failing item is dropped and the build continues.
    SkipOnResolutionFailure,
}

/// Discriminated result of a homepage build.
///
/// `Empty` and `Failed` are distinct outcomes, not error-shaped documents;
/// the HTTP boundary decides how each maps onto the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum HomepageOutcome {
    Document(HomePageData),
    Empty,
    Failed(String),
}

/// Builds the composite homepage document.
///
/// Constructed per request with an injected repository; holds no other
/// state and performs no writes.
pub struct HomepageAggregator {
    repository: Repository,
}

impl HomepageAggregator {
    /// Failure policy for the subfactor, harm/risk, and link-page fetches.
    pub const LEVEL_FETCH_POLICY: FetchPolicy = FetchPolicy::AbortOnFetchFailure;

    /// Failure policy for per-link entity resolution.
    pub const ENTITY_RESOLUTION_POLICY: FetchPolicy = FetchPolicy::SkipOnResolutionFailure;

    /// Nonprofit link queries always read the first page of four; callers
    /// cannot page deeper through the homepage document.
    pub const LINK_PAGE_NUMBER: u32 = 1;
    pub const LINK_PAGE_SIZE: u32 = 4;

    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Build the homepage document.
    ///
    /// Any fetch failure at the subfactor, harm/risk, or link level aborts
    /// the whole build and yields `Failed`; a failed entity resolution only
    /// drops that one entry (see the policy constants).
    pub async fn build(&self) -> HomepageOutcome {
        match self.assemble().await {
            Ok(Some(document)) => HomepageOutcome::Document(document),
            Ok(None) => HomepageOutcome::Empty,
            Err(err) => {
                error!("error fetching home page data: {}", err);
                HomepageOutcome::Failed(err.to_string())
            }
        }
    }

    async fn assemble(&self) -> Result<Option<HomePageData>, StoreError> {
        let subfactors = self.repository.get_structural_subfactors().await?;
        if subfactors.is_empty() {
            return Ok(None);
        }

        let mut nodes = Vec::with_capacity(subfactors.len());
        for subfactor in subfactors {
            let harms = self
                .repository
                .get_harms_and_risks_by_subfactor(subfactor.id)
                .await?;

            // A subfactor without harms keeps the field absent and is never
            // descended into.
            if harms.is_empty() {
                nodes.push(SubfactorNode { subfactor, harms_and_risks: None });
                continue;
            }

            let mut harm_nodes = Vec::with_capacity(harms.len());
            for harm_risk in harms {
                let links = self
                    .repository
                    .get_nonprofit_links_by_harm_risk(
                        harm_risk.id,
                        Self::LINK_PAGE_NUMBER,
                        Self::LINK_PAGE_SIZE,
                    )
                    .await?;

                let mut entities = Vec::with_capacity(links.len());
                for link in &links {
                    if let Some(entity) = self.resolve_entity(link.nonprofit_id).await {
                        entities.push(entity);
                    }
                }

                harm_nodes.push(HarmRiskNode {
                    harm_risk,
                    nonprofits: if entities.is_empty() { None } else { Some(entities) },
                });
            }

            nodes.push(SubfactorNode {
                subfactor,
                harms_and_risks: Some(harm_nodes),
            });
        }

        Ok(Some(HomePageData { subfactors: nodes }))
    }

    /// Per-link entity resolution; failures are recovered locally and drop
    /// the single entry rather than aborting the build.
    async fn resolve_entity(&self, nonprofit_id: Uuid) -> Option<crate::models::Entity> {
        match self.repository.resolve_entity_by_nonprofit_id(nonprofit_id).await {
            Ok(entity) => entity,
            Err(err) => {
                warn!(%nonprofit_id, "skipping unresolvable nonprofit link: {}", err);
                None
            }
        }
    }
}
