//! Session stores shared between pages
//!
//! Each store wraps a [`tokio::sync::watch`] channel, so any page can read the
//! latest value or subscribe to changes. Stores are handed to pages explicitly
//! through [`AppState`].

pub mod form;

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::BirthDetails;

pub use form::{BirthForm, FormDraft, FormError, FormField};

/// Observable single-value store
#[derive(Debug)]
pub struct Store<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Clone> Store<T> {
    pub fn new(value: T) -> Self {
        let (tx, _rx) = watch::channel(value);
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        self.tx.send_modify(f);
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Raw field values of the birth form, kept while the user moves between pages
pub type FormStore = Store<FormDraft>;

/// Normalized birth details of the current user, if they have submitted the form
pub type UserDataStore = Store<Option<BirthDetails>>;

/// Everything pages share within one session
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub form: FormStore,
    pub user: UserDataStore,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn birth_details(&self) -> Option<BirthDetails> {
        self.user.get()
    }
}
