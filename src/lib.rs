pub mod actions;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod services;
pub mod startup;

use actions::auth::{AuthActions, SignIn};
use actions::invoice::{InvoiceActions, InvoiceStore, Navigator, ViewCache};
use std::sync::Arc;

/// Shared application state handed to the router.
#[derive(Clone)]
pub struct AppState {
    pub invoices: InvoiceActions,
    pub auth: AuthActions,
    pub store: Arc<dyn InvoiceStore>,
    pub views: Arc<dyn ViewCache>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn InvoiceStore>,
        views: Arc<dyn ViewCache>,
        navigator: Arc<dyn Navigator>,
        signin: Arc<dyn SignIn>,
    ) -> Self {
        Self {
            invoices: InvoiceActions::new(store.clone(), views.clone(), navigator),
            auth: AuthActions::new(signin),
            store,
            views,
        }
    }
}
