// src/application/audit/hooks.rs
use crate::application::audit::writer::AuditWriter;
use crate::application::context::RequestContext;
use crate::domain::audit::diff::diff;
use crate::domain::audit::entity::AuditAction;
use crate::domain::product::entity::Product;
use crate::domain::product::repository::ProductReadRepository;
use crate::domain::product::value_objects::{Category, DocumentId, ProductId};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, warn};

const ENTITY_TYPE: &str = "product";

/// Parameter bag for one mutation. The before-phase hooks stash the
/// pre-image here so it survives into the after-phase of the same mutation.
#[derive(Debug, Default)]
pub struct MutationParams {
    pub where_document_id: Option<DocumentId>,
    pub where_id: Option<ProductId>,
    pub existing: Option<Product>,
}

impl MutationParams {
    pub fn for_document(document_id: DocumentId) -> Self {
        Self {
            where_document_id: Some(document_id),
            ..Self::default()
        }
    }

    pub fn for_id(id: ProductId) -> Self {
        Self {
            where_id: Some(id),
            ..Self::default()
        }
    }
}

/// Lifecycle hooks for the product entity. Each mutation walks
/// pending -> snapshot-fetched -> diffed (update only) -> audited, and every
/// internal failure downgrades to a coarser audit entry instead of an error.
pub struct ProductAuditHooks {
    read_repo: Arc<dyn ProductReadRepository>,
    writer: Arc<AuditWriter>,
}

impl ProductAuditHooks {
    pub fn new(read_repo: Arc<dyn ProductReadRepository>, writer: Arc<AuditWriter>) -> Self {
        Self { read_repo, writer }
    }

    /// After-create: re-fetch the persisted product so component structures
    /// are populated, falling back to the raw creation result.
    pub async fn after_create(&self, ctx: &RequestContext, result: &Product) {
        let snapshot = match self.fetch_by_document(&result.document_id).await {
            Some(product) => product,
            None => {
                warn!(
                    document_id = %result.document_id,
                    "post-create fetch failed, auditing the raw creation result"
                );
                result.clone()
            }
        };

        let changes = create_changes(&snapshot);
        self.writer
            .record(
                ctx,
                AuditAction::Create,
                ENTITY_TYPE,
                snapshot.id.into(),
                snapshot.document_id.as_str(),
                changes,
                Map::new(),
            )
            .await;
    }

    pub async fn before_update(&self, params: &mut MutationParams) {
        self.stash_existing(params, "update").await;
    }

    pub async fn after_update(&self, ctx: &RequestContext, result: &Product, params: &MutationParams) {
        let current = self.fetch_by_document(&result.document_id).await;

        if let (Some(existing), Some(updated)) = (&params.existing, &current) {
            let set = diff(&existing.snapshot(), &updated.snapshot());
            if set.is_empty() {
                debug!(
                    document_id = %updated.document_id,
                    "no changes detected, skipping audit entry"
                );
                return;
            }
            self.writer
                .record(
                    ctx,
                    AuditAction::Update,
                    ENTITY_TYPE,
                    updated.id.into(),
                    updated.document_id.as_str(),
                    set.changes,
                    set.previous,
                )
                .await;
            return;
        }

        // No pre-image to diff against: record the full current state as
        // changes rather than dropping the event.
        warn!(
            document_id = %result.document_id,
            "missing snapshot for comparison, auditing full current state"
        );
        let current = current.unwrap_or_else(|| result.clone());
        self.writer
            .record(
                ctx,
                AuditAction::Update,
                ENTITY_TYPE,
                current.id.into(),
                current.document_id.as_str(),
                create_changes(&current),
                Map::new(),
            )
            .await;
    }

    pub async fn before_delete(&self, params: &mut MutationParams) {
        self.stash_existing(params, "delete").await;
    }

    pub async fn after_delete(&self, ctx: &RequestContext, result: &Product, params: &MutationParams) {
        let snapshot = params.existing.as_ref().unwrap_or(result);
        let previous_values = previous_values(snapshot);

        self.writer
            .record(
                ctx,
                AuditAction::Delete,
                ENTITY_TYPE,
                snapshot.id.into(),
                snapshot.document_id.as_str(),
                Map::new(),
                previous_values,
            )
            .await;
    }

    /// Fetch the pre-image by document id when present, else by numeric id,
    /// and stash it on the parameter bag. Missing keys and fetch failures
    /// are logged and leave the bag empty.
    async fn stash_existing(&self, params: &mut MutationParams, phase: &str) {
        let fetched = if let Some(document_id) = &params.where_document_id {
            self.read_repo.find_by_document_id(document_id).await
        } else if let Some(id) = params.where_id {
            self.read_repo.find_by_id(id).await
        } else {
            warn!(phase, "no id or document id in mutation params, skipping audit");
            return;
        };

        match fetched {
            Ok(Some(product)) => {
                debug!(
                    phase,
                    document_id = %product.document_id,
                    "stashed pre-mutation snapshot"
                );
                params.existing = Some(product);
            }
            Ok(None) => warn!(phase, "no existing product found for mutation params"),
            Err(err) => warn!(phase, error = %err, "failed to fetch pre-mutation snapshot"),
        }
    }

    async fn fetch_by_document(&self, document_id: &DocumentId) -> Option<Product> {
        match self.read_repo.find_by_document_id(document_id).await {
            Ok(found) => found,
            Err(err) => {
                warn!(%document_id, error = %err, "snapshot fetch failed");
                None
            }
        }
    }
}

/// Changes map for the create path: the fixed top-level scalar fields plus
/// the populated category-matching component. Deliberately not derived from
/// the schema; new top-level fields do not widen this set.
fn create_changes(product: &Product) -> Map<String, Value> {
    let mut changes = scalar_fields(product);

    match product.category {
        Category::Proprietary => {
            if let Some(fields) = &product.proprietary_fields {
                insert_json(&mut changes, "proprietary_fields", fields);
            }
        }
        Category::Classical => {
            if let Some(fields) = &product.classical_fields {
                insert_json(&mut changes, "classical_fields", fields);
            }
        }
    }

    changes
}

/// Previous-values map for the delete path: scalar fields plus whichever
/// component structure is present, regardless of the category tag.
fn previous_values(product: &Product) -> Map<String, Value> {
    let mut previous = scalar_fields(product);

    if let Some(fields) = &product.proprietary_fields {
        insert_json(&mut previous, "proprietary_fields", fields);
    }
    if let Some(fields) = &product.classical_fields {
        insert_json(&mut previous, "classical_fields", fields);
    }

    previous
}

fn scalar_fields(product: &Product) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(product.name.clone()));
    map.insert(
        "category".into(),
        Value::String(product.category.as_str().to_owned()),
    );
    map.insert(
        "description".into(),
        Value::String(product.description.clone()),
    );
    map
}

fn insert_json<T: serde::Serialize>(map: &mut Map<String, Value>, key: &str, value: &T) {
    if let Ok(json) = serde_json::to_value(value) {
        map.insert(key.to_owned(), json);
    }
}
