// tests/support/mocks.rs
use async_trait::async_trait;
use aushadhi_core::application::error::ApplicationError;
use aushadhi_core::application::ports::security::{TokenVerifier, VerifiedToken};
use aushadhi_core::application::ports::time::Clock;
use aushadhi_core::domain::audit::cursor::AuditLogCursor;
use aushadhi_core::domain::audit::entity::AuditLog;
use aushadhi_core::domain::audit::repository::AuditLogRepository;
use aushadhi_core::domain::errors::{DomainError, DomainResult};
use aushadhi_core::domain::product::entity::{NewProduct, Product, ProductUpdate};
use aushadhi_core::domain::product::repository::{ProductReadRepository, ProductWriteRepository};
use aushadhi_core::domain::product::value_objects::{DocumentId, ProductId};
use aushadhi_core::domain::user::{User, UserId, UserRepository};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering},
};

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn default_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).single().expect("valid timestamp")
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(Self::default_time())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Product store backed by a Vec. `fail_finds` simulates snapshot-fetch
/// failures without touching the write path.
#[derive(Default)]
pub struct InMemoryProductRepo {
    products: Mutex<Vec<Product>>,
    next_id: AtomicI64,
    pub fail_finds: AtomicBool,
}

impl InMemoryProductRepo {
    pub fn new() -> Self {
        Self {
            products: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_finds: AtomicBool::new(false),
        }
    }

    pub fn set_fail_finds(&self, fail: bool) {
        self.fail_finds.store(fail, Ordering::SeqCst);
    }

    fn guard_finds(&self) -> DomainResult<()> {
        if self.fail_finds.load(Ordering::SeqCst) {
            Err(DomainError::Persistence("simulated read failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductReadRepository for InMemoryProductRepo {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        self.guard_finds()?;
        let products = self.products.lock().expect("lock poisoned");
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_document_id(&self, document_id: &DocumentId) -> DomainResult<Option<Product>> {
        self.guard_finds()?;
        let products = self.products.lock().expect("lock poisoned");
        Ok(products.iter().find(|p| &p.document_id == document_id).cloned())
    }

    async fn list(&self, limit: u32) -> DomainResult<Vec<Product>> {
        self.guard_finds()?;
        let products = self.products.lock().expect("lock poisoned");
        Ok(products.iter().take(limit as usize).cloned().collect())
    }
}

#[async_trait]
impl ProductWriteRepository for InMemoryProductRepo {
    async fn insert(&self, new_product: NewProduct) -> DomainResult<Product> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product {
            id: ProductId::new(id)?,
            document_id: new_product.document_id,
            name: new_product.content.name,
            category: new_product.content.category,
            description: new_product.content.description,
            proprietary_fields: new_product.content.proprietary_fields,
            classical_fields: new_product.content.classical_fields,
            created_at: new_product.created_at,
            updated_at: new_product.updated_at,
            published_at: None,
            locale: None,
        };
        self.products.lock().expect("lock poisoned").push(product.clone());
        Ok(product)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let mut products = self.products.lock().expect("lock poisoned");
        let product = products
            .iter_mut()
            .find(|p| p.document_id == update.document_id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        product.name = update.content.name;
        product.category = update.content.category;
        product.description = update.content.description;
        product.proprietary_fields = update.content.proprietary_fields;
        product.classical_fields = update.content.classical_fields;
        product.updated_at = update.updated_at;
        Ok(product.clone())
    }

    async fn delete(&self, document_id: &DocumentId) -> DomainResult<Product> {
        let mut products = self.products.lock().expect("lock poisoned");
        let position = products
            .iter()
            .position(|p| &p.document_id == document_id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        Ok(products.remove(position))
    }
}

/// Audit store that records inserts in memory. `fail_inserts` simulates a
/// broken trail so tests can assert the mutation still succeeds.
#[derive(Default)]
pub struct RecordingAuditRepo {
    logs: Mutex<Vec<AuditLog>>,
    pub fail_inserts: AtomicBool,
    pub last_limit: Mutex<Option<u32>>,
}

impl RecordingAuditRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let repo = Self::default();
        repo.fail_inserts.store(true, Ordering::SeqCst);
        repo
    }

    pub fn logs(&self) -> Vec<AuditLog> {
        self.logs.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl AuditLogRepository for RecordingAuditRepo {
    async fn insert(&self, log: AuditLog) -> DomainResult<()> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("simulated insert failure".into()));
        }
        self.logs.lock().expect("lock poisoned").push(log);
        Ok(())
    }

    async fn list(
        &self,
        limit: u32,
        _cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        *self.last_limit.lock().expect("lock poisoned") = Some(limit);
        let mut logs = self.logs();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        logs.truncate(limit as usize);
        Ok((logs, None))
    }

    async fn find_by_entity(
        &self,
        key: &str,
        limit: u32,
        _cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        *self.last_limit.lock().expect("lock poisoned") = Some(limit);
        let mut logs: Vec<AuditLog> = self
            .logs()
            .into_iter()
            .filter(|log| {
                log.entity_id.to_string() == key || log.entity_document_id == key
            })
            .collect();
        logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        logs.truncate(limit as usize);
        Ok((logs, None))
    }
}

/// Accepts exactly one token string and counts verification attempts so
/// tests can assert the resolver short-circuits before token decoding.
pub struct StaticTokenVerifier {
    valid_token: Option<(String, i64)>,
    pub calls: AtomicUsize,
}

impl StaticTokenVerifier {
    pub fn accepting(token: impl Into<String>, user_id: i64) -> Self {
        Self {
            valid_token: Some((token.into(), user_id)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting_all() -> Self {
        Self {
            valid_token: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<VerifiedToken, ApplicationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.valid_token {
            Some((valid, user_id)) if valid == token => Ok(VerifiedToken { user_id: *user_id }),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

#[derive(Default)]
pub struct InMemoryUserRepo {
    users: Mutex<HashMap<i64, User>>,
    pub fail_finds: AtomicBool,
}

impl InMemoryUserRepo {
    pub fn with_user(id: i64, username: &str, email: &str) -> Self {
        let repo = Self::default();
        repo.users.lock().expect("lock poisoned").insert(
            id,
            User {
                id: UserId::new(id).expect("positive id"),
                username: username.to_owned(),
                email: email.to_owned(),
            },
        );
        repo
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        if self.fail_finds.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence("simulated lookup failure".into()));
        }
        let users = self.users.lock().expect("lock poisoned");
        Ok(users.get(&i64::from(id)).cloned())
    }
}
