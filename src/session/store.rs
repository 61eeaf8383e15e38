//! Single source of truth for "who is logged in right now".
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` constructs one `SessionStore` at startup and provides it through
//! context. Pages and guards read it via the mirrored `RwSignal<SessionState>`
//! that `subscribe` keeps current.
//!
//! DESIGN
//! ======
//! The browser runs one thread, so the handle is `Rc<RefCell<..>>` and no
//! borrow is held across an `.await`. Every `refresh` takes a generation
//! number; only the newest generation may write the result or clear
//! `is_loading`, so overlapping refreshes settle on the latest answer rather
//! than whichever response lands last.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::net::api::AccountService;
use crate::net::types::User;
use crate::state::session::SessionState;

type Observer = Rc<dyn Fn(&SessionState)>;

/// Cloneable handle to the shared session.
pub struct SessionStore<A> {
    inner: Rc<Inner<A>>,
}

struct Inner<A> {
    accounts: A,
    state: RefCell<SessionState>,
    generation: Cell<u64>,
    closed: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
}

impl<A> Clone for SessionStore<A> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<A> SessionStore<A> {
    pub fn new(accounts: A) -> Self {
        Self {
            inner: Rc::new(Inner {
                accounts,
                state: RefCell::new(SessionState::default()),
                generation: Cell::new(0),
                closed: Cell::new(false),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn user(&self) -> User {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Call `observer` with the current state now and after every change.
    pub fn subscribe<F>(&self, observer: F)
    where
        F: Fn(&SessionState) + 'static,
    {
        let observer: Observer = Rc::new(observer);
        observer(&self.state());
        self.inner.observers.borrow_mut().push(observer);
    }

    /// Replace the user after an out-of-band change such as a profile edit.
    pub fn set_user(&self, user: User) {
        self.update(|state| state.user = user);
    }

    pub fn set_is_authenticated(&self, authenticated: bool) {
        self.update(|state| state.is_authenticated = authenticated);
    }

    /// Tear the handle down. Refreshes still in flight are discarded when
    /// they resolve, and new ones return `false` without a backend call.
    pub fn close(&self) {
        if self.inner.closed.replace(true) {
            return;
        }
        self.supersede();
        self.inner.observers.borrow_mut().clear();
        log::debug!("session store closed");
    }

    fn update(&self, apply: impl FnOnce(&mut SessionState)) {
        if self.is_closed() {
            return;
        }
        apply(&mut self.inner.state.borrow_mut());
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.state();
        let observers: Vec<Observer> = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&snapshot);
        }
    }

    /// Invalidate every refresh currently in flight.
    fn supersede(&self) -> u64 {
        let next = self.inner.generation.get() + 1;
        self.inner.generation.set(next);
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        !self.is_closed() && self.inner.generation.get() == generation
    }

    fn settle(&self, generation: u64, found: Option<User>) {
        if !self.is_current(generation) {
            log::debug!("discarding superseded session refresh #{generation}");
            return;
        }
        self.update(|state| {
            state.resolve(found);
            state.is_loading = false;
        });
    }

    fn abandon(&self, generation: u64) {
        if self.is_current(generation) {
            self.update(|state| state.is_loading = false);
        }
    }
}

impl<A: AccountService> SessionStore<A> {
    /// Ask the backend who is signed in and record the answer.
    ///
    /// Returns `true` when a valid account was found. Backend failures are
    /// logged and reported as `false`; they never reach the caller. A refresh
    /// overtaken by a newer one (or by `sign_out`/`close`) still returns what
    /// it found but leaves the state to the newer call.
    pub async fn refresh(&self) -> bool {
        if self.is_closed() {
            log::debug!("refresh skipped: session store closed");
            return false;
        }
        let generation = self.supersede();
        self.update(|state| state.is_loading = true);
        let mut pending = PendingRefresh { store: self, generation, settled: false };

        let found = match self.inner.accounts.current_account().await {
            Ok(Some(account)) => Some(User::from(account)),
            Ok(None) => {
                log::debug!("no active account");
                None
            }
            Err(e) => {
                log::error!("session refresh failed: {e}");
                None
            }
        };
        let authenticated = found.is_some();
        if self.is_closed() {
            pending.settled = true;
            return false;
        }
        self.settle(generation, found);
        pending.settled = true;
        authenticated
    }

    /// Delete the backend session and return to the anonymous state.
    ///
    /// Local state is cleared even when the backend call fails, unless a
    /// refresh started after this call has already settled a newer answer.
    pub async fn sign_out(&self) {
        let generation = self.supersede();
        if let Err(e) = self.inner.accounts.delete_session().await {
            log::warn!("sign-out request failed: {e}");
        }
        if !self.is_current(generation) {
            log::debug!("sign-out overtaken by a newer refresh; keeping its result");
            return;
        }
        self.update(SessionState::clear);
    }
}

/// Clears `is_loading` if a refresh future is dropped before it resolves.
struct PendingRefresh<'a, A> {
    store: &'a SessionStore<A>,
    generation: u64,
    settled: bool,
}

impl<A> Drop for PendingRefresh<'_, A> {
    fn drop(&mut self) {
        if !self.settled {
            self.store.abandon(self.generation);
        }
    }
}
