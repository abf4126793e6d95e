// tests/lifecycle_audit_tests.rs
mod support;

use std::sync::Arc;

use aushadhi_core::application::audit::{AuditWriter, ProductAuditHooks};
use aushadhi_core::application::commands::products::{
    CreateProductCommand, DeleteProductCommand, ProductCommandService, UpdateProductCommand,
};
use aushadhi_core::application::context::{RequestContext, ResolvedUser};
use aushadhi_core::application::identity::IdentityResolver;
use aushadhi_core::domain::audit::entity::AuditAction;
use aushadhi_core::domain::product::entity::{ClassicalFields, PriceEntry, ProprietaryFields};
use aushadhi_core::domain::product::value_objects::Category;
use serde_json::Value;
use support::{
    FixedClock, InMemoryProductRepo, InMemoryUserRepo, RecordingAuditRepo, StaticTokenVerifier,
};

struct Harness {
    products: Arc<InMemoryProductRepo>,
    audits: Arc<RecordingAuditRepo>,
    service: ProductCommandService,
}

fn harness() -> Harness {
    harness_with_audit_repo(Arc::new(RecordingAuditRepo::new()))
}

fn harness_with_audit_repo(audits: Arc<RecordingAuditRepo>) -> Harness {
    let products = Arc::new(InMemoryProductRepo::new());
    let resolver = Arc::new(IdentityResolver::new(
        Arc::new(StaticTokenVerifier::rejecting_all()),
        Arc::new(InMemoryUserRepo::default()),
    ));
    let clock = Arc::new(FixedClock::default());
    let writer = Arc::new(AuditWriter::new(audits.clone(), resolver, clock.clone()));
    let hooks = Arc::new(ProductAuditHooks::new(products.clone(), writer));
    let service = ProductCommandService::new(products.clone(), hooks, clock);
    Harness {
        products,
        audits,
        service,
    }
}

fn session_ctx(user_id: i64) -> RequestContext {
    RequestContext::new().with_session_user(ResolvedUser::minimal(user_id))
}

fn proprietary_command(name: &str) -> CreateProductCommand {
    CreateProductCommand {
        name: name.to_owned(),
        category: Category::Proprietary,
        description: "tonic for daily use".to_owned(),
        proprietary_fields: Some(ProprietaryFields {
            usage: Some("twice daily after meals".to_owned()),
            ingredients: Some("ashwagandha, brahmi".to_owned()),
            dosage: Some("two teaspoons".to_owned()),
            price_list: Some(vec![PriceEntry {
                id: None,
                sr_no: 1,
                qty: "200ml".to_owned(),
                price: "180".to_owned(),
            }]),
        }),
        classical_fields: None,
        created_by: None,
    }
}

fn classical_command(name: &str) -> CreateProductCommand {
    CreateProductCommand {
        name: name.to_owned(),
        category: Category::Classical,
        description: "classical preparation".to_owned(),
        proprietary_fields: None,
        classical_fields: Some(ClassicalFields {
            sub_category: Some("churna".to_owned()),
            usage: Some("digestive".to_owned()),
            ingredients: Some("triphala".to_owned()),
            dosage_anupan: Some("with warm water".to_owned()),
            reference: Some("Bhaishajya Ratnavali".to_owned()),
            price_list: None,
        }),
        created_by: None,
    }
}

fn update_from_create(document_id: &str, command: CreateProductCommand) -> UpdateProductCommand {
    UpdateProductCommand {
        document_id: document_id.to_owned(),
        name: command.name,
        category: command.category,
        description: command.description,
        proprietary_fields: command.proprietary_fields,
        classical_fields: command.classical_fields,
        created_by: None,
    }
}

#[tokio::test]
async fn create_records_initial_values_with_empty_previous() {
    let h = harness();
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, proprietary_command("Chyawanprash Special"))
        .await
        .expect("create should succeed");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.action, AuditAction::Create);
    assert_eq!(log.user_id, Some(7));
    assert_eq!(log.entity_type, "product");
    assert_eq!(log.entity_id, created.id);
    assert_eq!(log.entity_document_id, created.document_id);
    assert!(log.previous_values.is_empty());

    assert_eq!(
        log.changes.get("name"),
        Some(&Value::String("Chyawanprash Special".to_owned()))
    );
    assert_eq!(
        log.changes.get("category"),
        Some(&Value::String("proprietary".to_owned()))
    );
    assert!(log.changes.contains_key("description"));
    let fields = log
        .changes
        .get("proprietary_fields")
        .expect("component fields recorded");
    assert_eq!(fields["price_list"][0]["sr_no"], Value::from(1));
    assert_eq!(fields["price_list"][0]["qty"], Value::from("200ml"));
    assert!(!log.changes.contains_key("classical_fields"));
}

#[tokio::test]
async fn update_of_one_field_records_only_that_field() {
    let h = harness();
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, proprietary_command("Chyawanprash Special"))
        .await
        .expect("create should succeed");

    let mut command = update_from_create(&created.document_id, proprietary_command("Chyawanprash Special"));
    command.description = "improved recipe".to_owned();
    h.service
        .update_product(&ctx, command)
        .await
        .expect("update should succeed");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 2);
    let log = &logs[1];
    assert_eq!(log.action, AuditAction::Update);
    assert_eq!(log.changes.len(), 1);
    assert_eq!(
        log.changes.get("description"),
        Some(&Value::String("improved recipe".to_owned()))
    );
    assert_eq!(log.previous_values.len(), 1);
    assert_eq!(
        log.previous_values.get("description"),
        Some(&Value::String("tonic for daily use".to_owned()))
    );
}

#[tokio::test]
async fn update_with_no_changes_writes_no_entry() {
    let h = harness();
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, proprietary_command("Chyawanprash Special"))
        .await
        .expect("create should succeed");

    let command = update_from_create(&created.document_id, proprietary_command("Chyawanprash Special"));
    h.service
        .update_product(&ctx, command)
        .await
        .expect("update should succeed");

    assert_eq!(h.audits.logs().len(), 1);
}

#[tokio::test]
async fn delete_records_previous_values_with_empty_changes() {
    let h = harness();
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, classical_command("Triphala Churna"))
        .await
        .expect("create should succeed");

    h.service
        .delete_product(
            &ctx,
            DeleteProductCommand {
                document_id: created.document_id.clone(),
            },
        )
        .await
        .expect("delete should succeed");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 2);
    let log = &logs[1];
    assert_eq!(log.action, AuditAction::Delete);
    assert_eq!(log.entity_document_id, created.document_id);
    assert!(log.changes.is_empty());
    assert_eq!(
        log.previous_values.get("name"),
        Some(&Value::String("Triphala Churna".to_owned()))
    );
    assert_eq!(
        log.previous_values.get("category"),
        Some(&Value::String("classical".to_owned()))
    );
    let fields = log
        .previous_values
        .get("classical_fields")
        .expect("component fields recorded");
    assert_eq!(fields["dosage_anupan"], Value::from("with warm water"));
}

#[tokio::test]
async fn update_without_snapshot_records_full_current_state() {
    let h = harness();
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, proprietary_command("Chyawanprash Special"))
        .await
        .expect("create should succeed");

    // Snapshot fetches fail from here on; the write path is untouched.
    h.products.set_fail_finds(true);

    let mut command = update_from_create(&created.document_id, proprietary_command("Chyawanprash Special"));
    command.description = "improved recipe".to_owned();
    h.service
        .update_product(&ctx, command)
        .await
        .expect("update should succeed despite snapshot failures");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 2);
    let log = &logs[1];
    assert_eq!(log.action, AuditAction::Update);
    assert!(log.previous_values.is_empty());
    assert_eq!(
        log.changes.get("description"),
        Some(&Value::String("improved recipe".to_owned()))
    );
    assert!(log.changes.contains_key("name"));
    assert!(log.changes.contains_key("category"));
    assert!(log.changes.contains_key("proprietary_fields"));
}

#[tokio::test]
async fn audit_insert_failure_does_not_fail_the_mutation() {
    let h = harness_with_audit_repo(Arc::new(RecordingAuditRepo::failing()));
    let ctx = session_ctx(7);

    let created = h
        .service
        .create_product(&ctx, proprietary_command("Chyawanprash Special"))
        .await;

    assert!(created.is_ok());
    assert!(h.audits.logs().is_empty());
}

#[tokio::test]
async fn payload_created_by_is_used_when_no_user_is_attached() {
    let h = harness();
    let ctx = RequestContext::new();

    let mut command = proprietary_command("Chyawanprash Special");
    command.created_by = Some(42);
    h.service
        .create_product(&ctx, command)
        .await
        .expect("create should succeed");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, Some(42));
}

#[tokio::test]
async fn anonymous_mutation_carries_a_null_user() {
    let h = harness();
    let ctx = RequestContext::new();

    h.service
        .create_product(&ctx, classical_command("Triphala Churna"))
        .await
        .expect("create should succeed");

    let logs = h.audits.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].user_id, None);
}
