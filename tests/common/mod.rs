//! Shared test doubles for the action and router tests.
#![allow(dead_code)]

use async_trait::async_trait;
use invoice_actions::actions::auth::{AuthErrorKind, CredentialsPayload, SignIn, SignInError};
use invoice_actions::actions::invoice::{InvoiceFormPayload, InvoiceStore, ViewCache};
use invoice_actions::error::AppError;
use invoice_actions::models::{Invoice, NewInvoice};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// Store statements observed by the mock, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert,
    Update(Uuid),
    Delete(Uuid),
}

/// In-memory invoice store that records every statement it is asked to
/// issue. Flip `fail` to make every statement report a store failure.
#[derive(Default)]
pub struct MockStore {
    rows: Mutex<HashMap<Uuid, Invoice>>,
    statements: Mutex<Vec<Statement>>,
    fail: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::default();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn seed(&self, invoice: Invoice) {
        self.rows.lock().unwrap().insert(invoice.id, invoice);
    }

    pub fn statements(&self) -> Vec<Statement> {
        self.statements.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<Invoice> {
        let mut rows: Vec<Invoice> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by_key(|r| r.id);
        rows
    }

    fn check_fail(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(AppError::DatabaseError(anyhow::anyhow!("connection reset")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl InvoiceStore for MockStore {
    async fn health_check(&self) -> Result<(), AppError> {
        self.check_fail()
    }

    async fn insert_invoice(&self, input: &NewInvoice) -> Result<Invoice, AppError> {
        self.statements.lock().unwrap().push(Statement::Insert);
        self.check_fail()?;

        let invoice = Invoice {
            id: Uuid::new_v4(),
            customer_id: input.customer_id.clone(),
            amount: input.amount_cents,
            status: input.status.as_str().to_string(),
            date: input.date,
        };
        self.rows
            .lock()
            .unwrap()
            .insert(invoice.id, invoice.clone());
        Ok(invoice)
    }

    async fn update_invoice(
        &self,
        id: Uuid,
        input: &NewInvoice,
    ) -> Result<Option<Invoice>, AppError> {
        self.statements.lock().unwrap().push(Statement::Update(id));
        self.check_fail()?;

        let mut rows = self.rows.lock().unwrap();
        Ok(rows.get_mut(&id).map(|row| {
            row.customer_id = input.customer_id.clone();
            row.amount = input.amount_cents;
            row.status = input.status.as_str().to_string();
            row.clone()
        }))
    }

    async fn delete_invoice(&self, id: Uuid) -> Result<bool, AppError> {
        self.statements.lock().unwrap().push(Statement::Delete(id));
        self.check_fail()?;

        Ok(self.rows.lock().unwrap().remove(&id).is_some())
    }

    async fn list_invoices(&self, _limit: i64) -> Result<Vec<Invoice>, AppError> {
        self.check_fail()?;
        Ok(self.rows())
    }
}

/// View cache that records invalidated paths alongside normal behavior.
#[derive(Default)]
pub struct RecordingViewCache {
    views: Mutex<HashMap<String, String>>,
    invalidated: Mutex<Vec<String>>,
}

impl RecordingViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidated(&self) -> Vec<String> {
        self.invalidated.lock().unwrap().clone()
    }
}

#[async_trait]
impl ViewCache for RecordingViewCache {
    async fn read(&self, path: &str) -> Option<String> {
        self.views.lock().unwrap().get(path).cloned()
    }

    async fn store(&self, path: &str, body: String) {
        self.views.lock().unwrap().insert(path.to_string(), body);
    }

    async fn invalidate(&self, path: &str) {
        self.views.lock().unwrap().remove(path);
        self.invalidated.lock().unwrap().push(path.to_string());
    }
}

/// Scripted sign-in collaborator.
pub enum SignInScript {
    Succeed,
    RejectWith(AuthErrorKind),
    FailFatally,
}

pub struct MockSignIn {
    script: SignInScript,
    providers_seen: Mutex<Vec<String>>,
}

impl MockSignIn {
    pub fn new(script: SignInScript) -> Self {
        Self {
            script,
            providers_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(SignInScript::Succeed)
    }

    pub fn providers_seen(&self) -> Vec<String> {
        self.providers_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl SignIn for MockSignIn {
    async fn sign_in(
        &self,
        provider: &str,
        _payload: &CredentialsPayload,
    ) -> Result<(), SignInError> {
        self.providers_seen
            .lock()
            .unwrap()
            .push(provider.to_string());
        match &self.script {
            SignInScript::Succeed => Ok(()),
            SignInScript::RejectWith(kind) => Err(SignInError::Auth(*kind)),
            SignInScript::FailFatally => {
                Err(SignInError::Fatal(anyhow::anyhow!("listener vanished")))
            }
        }
    }
}

/// Form payload with every field present.
pub fn payload(customer: &str, amount: &str, status: &str) -> InvoiceFormPayload {
    InvoiceFormPayload {
        customer_id: Some(customer.to_string()),
        amount: Some(amount.to_string()),
        status: Some(status.to_string()),
    }
}
