use std::sync::Arc;

use models::luggage::validate_tag_id;
use models::{CheckInInput, LuggageItem, TransitionPolicy};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

use super::context::CallContext;
use super::store::LuggageStore;
use crate::errors::ServiceError;

/// Business rules the service enforces on top of the state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecyclePolicy {
    pub transitions: TransitionPolicy,
    /// Only the owner may delete a record when set.
    pub owner_only_removal: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckInOutcome {
    Ok,
    IdAlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollectOutcome {
    Collected,
    InvalidOwner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemoveOutcome {
    Removed,
    NotPresent,
    InvalidOwner,
}

/// Application service for the luggage lifecycle.
///
/// Every mutation is a read-modify-write against the store, serialised through
/// `write_gate` so two operations never interleave. Rejected preconditions
/// return before anything is written.
pub struct LuggageService<S: LuggageStore + ?Sized> {
    store: Arc<S>,
    policy: LifecyclePolicy,
    write_gate: Mutex<()>,
}

impl<S: LuggageStore + ?Sized> LuggageService<S> {
    pub fn new(store: Arc<S>) -> Self { Self::with_policy(store, LifecyclePolicy::default()) }

    pub fn with_policy(store: Arc<S>, policy: LifecyclePolicy) -> Self {
        Self { store, policy, write_gate: Mutex::new(()) }
    }

    async fn load(&self, id: &str) -> Result<LuggageItem, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("luggage", id))
    }

    /// Register a new bag owned by the caller. An existing id is reported, never overwritten.
    #[instrument(skip(self, ctx, input), fields(id = %input.id, caller = %ctx.caller_identity()))]
    pub async fn check_in(&self, ctx: &dyn CallContext, input: CheckInInput) -> Result<CheckInOutcome, ServiceError> {
        validate_tag_id(&input.id)?;
        let _guard = self.write_gate.lock().await;
        if self.store.contains(&input.id).await? {
            warn!("luggage_id_already_exists");
            return Ok(CheckInOutcome::IdAlreadyExists);
        }
        let item = LuggageItem::check_in(input, ctx.caller_identity(), ctx.timestamp())?;
        let id = item.id.clone();
        self.store.set(&id, item).await?;
        info!(checked_in_at = ctx.timestamp(), "luggage_checked_in");
        Ok(CheckInOutcome::Ok)
    }

    pub async fn get(&self, id: &str) -> Result<Option<LuggageItem>, ServiceError> {
        self.store.get(id).await
    }

    #[instrument(skip(self, ctx), fields(caller = %ctx.caller_identity()))]
    pub async fn remove(&self, ctx: &dyn CallContext, id: &str) -> Result<RemoveOutcome, ServiceError> {
        let _guard = self.write_gate.lock().await;
        if self.policy.owner_only_removal {
            match self.store.get(id).await? {
                None => return Ok(RemoveOutcome::NotPresent),
                Some(item) if !item.is_owned_by(ctx.caller_identity()) => {
                    warn!(owner = %item.owner_identity, "luggage_remove_denied");
                    return Ok(RemoveOutcome::InvalidOwner);
                }
                Some(_) => {}
            }
        }
        if self.store.delete(id).await? {
            info!("luggage_removed");
            Ok(RemoveOutcome::Removed)
        } else {
            Ok(RemoveOutcome::NotPresent)
        }
    }

    #[instrument(skip(self))]
    pub async fn en_route(&self, id: &str) -> Result<LuggageItem, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut item = self.load(id).await?;
        item.mark_en_route(self.policy.transitions)?;
        self.store.set(id, item.clone()).await?;
        info!("luggage_en_route");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn ready_for_collection(&self, id: &str, collection_point: &str) -> Result<LuggageItem, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut item = self.load(id).await?;
        item.mark_ready(collection_point, self.policy.transitions)?;
        self.store.set(id, item.clone()).await?;
        info!("luggage_ready_for_collection");
        Ok(item)
    }

    /// Hand the bag to its owner. Any other caller gets `InvalidOwner` and nothing changes.
    #[instrument(skip(self, ctx), fields(caller = %ctx.caller_identity()))]
    pub async fn collect(&self, ctx: &dyn CallContext, id: &str) -> Result<CollectOutcome, ServiceError> {
        let _guard = self.write_gate.lock().await;
        let mut item = self.load(id).await?;
        if !item.is_owned_by(ctx.caller_identity()) {
            warn!(owner = %item.owner_identity, "luggage_collect_invalid_owner");
            return Ok(CollectOutcome::InvalidOwner);
        }
        item.mark_collected(ctx.timestamp(), self.policy.transitions)?;
        self.store.set(id, item).await?;
        info!(checked_out_at = ctx.timestamp(), "luggage_collected");
        Ok(CollectOutcome::Collected)
    }

    pub async fn verify_owner(&self, ctx: &dyn CallContext, id: &str) -> Result<bool, ServiceError> {
        let item = self.load(id).await?;
        Ok(item.is_owned_by(ctx.caller_identity()))
    }

    /// All records ordered by check-in time, then id.
    pub async fn list(&self) -> Result<Vec<LuggageItem>, ServiceError> {
        let mut items = self.store.values().await?;
        items.sort_by(|a, b| a.check_in_time.cmp(&b.check_in_time).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    pub async fn count(&self) -> Result<usize, ServiceError> {
        self.store.count().await
    }

    #[instrument(skip(self))]
    pub async fn clear_all(&self) -> Result<(), ServiceError> {
        let _guard = self.write_gate.lock().await;
        self.store.clear().await?;
        warn!("luggage_records_cleared");
        Ok(())
    }
}
