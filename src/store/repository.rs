// store/repository.rs - typed domain queries over the table store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::models::{Entity, Expert, HarmRisk, Litigation, Nonprofit, NonprofitLink, Subfactor, User};

use super::{ListQuery, Row, StoreError, TableStore};

// Table names in the store schema
const USERS: &str = "users";
const LITIGATIONS: &str = "Litigation"; // the store schema capitalizes this table
const SUBFACTORS: &str = "structural_sub_factors";
const HARMS_AND_RISKS: &str = "harms_and_risks";
const NONPROFIT_LINKS: &str = "nonprofits_and_harmrisks";
const NONPROFITS: &str = "nonprofits";
const ENTITIES: &str = "entities";
const EXPERTS: &str = "experts";

/// Typed queries over an injected [`TableStore`].
///
/// Cloning is cheap; every clone shares the same store client.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn TableStore>,
}

impl Repository {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// One-row read against the store, used by the health endpoint.
    pub async fn probe(&self) -> Result<(), StoreError> {
        self.store
            .list(SUBFACTORS, ListQuery::new().page(1, 1))
            .await?;
        Ok(())
    }

    /// Whether an active user with this username exists.
    pub async fn user_exists(&self, username: &str) -> Result<bool, StoreError> {
        let users: Vec<User> = self
            .typed_list(USERS, ListQuery::new().eq("username", username.to_lowercase()))
            .await?;
        Ok(users.first().map(|user| user.active == 1).unwrap_or(false))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users: Vec<User> = self
            .typed_list(USERS, ListQuery::new().eq("username", username.to_lowercase()))
            .await?;
        Ok(users.into_iter().next())
    }

    pub async fn insert_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Option<User>, StoreError> {
        let rows = self
            .store
            .insert(
                USERS,
                json!({ "username": username.to_lowercase(), "password": password_hash }),
            )
            .await?;
        Ok(rows_into::<User>(rows)?.into_iter().next())
    }

    pub async fn get_litigations(&self) -> Result<Vec<Litigation>, StoreError> {
        self.typed_list(LITIGATIONS, ListQuery::new()).await
    }

    pub async fn get_structural_subfactors(&self) -> Result<Vec<Subfactor>, StoreError> {
        self.typed_list(SUBFACTORS, ListQuery::new()).await
    }

    pub async fn get_harms_and_risks_by_subfactor(
        &self,
        subfactor_id: Uuid,
    ) -> Result<Vec<HarmRisk>, StoreError> {
        self.typed_list(
            HARMS_AND_RISKS,
            ListQuery::new().eq("structural_sub_factor_id", subfactor_id),
        )
        .await
    }

    pub async fn get_nonprofit_links_by_harm_risk(
        &self,
        harm_risk_id: Uuid,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<NonprofitLink>, StoreError> {
        self.typed_list(
            NONPROFIT_LINKS,
            ListQuery::new()
                .eq("harm_risk_id", harm_risk_id)
                .page(page_number, page_size),
        )
        .await
    }

    /// Resolve the entity record behind a nonprofit.
    ///
    /// Two sequential reads: the nonprofit row yields `entity_id`, then the
    /// entity row is fetched by that id. A missing nonprofit, a null
    /// `entity_id`, or a missing entity all resolve to `None`.
    pub async fn resolve_entity_by_nonprofit_id(
        &self,
        nonprofit_id: Uuid,
    ) -> Result<Option<Entity>, StoreError> {
        // Narrow row: the query selects only the entity_id column
        #[derive(serde::Deserialize)]
        struct EntityRef {
            entity_id: Option<Uuid>,
        }

        let refs: Vec<EntityRef> = self
            .typed_list(
                NONPROFITS,
                ListQuery::new().select("entity_id").eq("id", nonprofit_id),
            )
            .await?;

        let Some(entity_id) = refs.into_iter().next().and_then(|r| r.entity_id) else {
            return Ok(None);
        };

        let entities: Vec<Entity> = self
            .typed_list(ENTITIES, ListQuery::new().eq("id", entity_id))
            .await?;
        Ok(entities.into_iter().next())
    }

    pub async fn get_nonprofits(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<Nonprofit>, StoreError> {
        self.typed_list(NONPROFITS, ListQuery::new().page(page_number, page_size))
            .await
    }

    pub async fn get_experts(
        &self,
        page_number: u32,
        page_size: u32,
    ) -> Result<Vec<Expert>, StoreError> {
        self.typed_list(EXPERTS, ListQuery::new().page(page_number, page_size))
            .await
    }

    pub async fn get_expert_by_id(&self, expert_id: Uuid) -> Result<Option<Expert>, StoreError> {
        let experts: Vec<Expert> = self
            .typed_list(EXPERTS, ListQuery::new().eq("id", expert_id))
            .await?;
        Ok(experts.into_iter().next())
    }

    async fn typed_list<T: DeserializeOwned>(
        &self,
        table: &str,
        query: ListQuery,
    ) -> Result<Vec<T>, StoreError> {
        let rows = self.store.list(table, query).await?;
        rows_into(rows)
    }
}

fn rows_into<T: DeserializeOwned>(rows: Vec<Row>) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| serde_json::from_value(Value::Object(row)).map_err(StoreError::from))
        .collect()
}
