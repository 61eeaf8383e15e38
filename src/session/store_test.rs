use super::*;

use std::collections::VecDeque;
use std::future::Future;
use std::pin::pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::{LocalSpawnExt, noop_waker_ref};

use crate::net::api::ApiError;
use crate::net::types::Account;

type Lookup = Result<Option<Account>, ApiError>;

enum Reply {
    Ready(Lookup),
    Gated(oneshot::Receiver<Lookup>),
}

#[derive(Default)]
struct ScriptedAccounts {
    replies: RefCell<VecDeque<Reply>>,
    lookups: Cell<usize>,
    deletes: Cell<usize>,
    delete_fails: Cell<bool>,
    delete_gate: RefCell<Option<oneshot::Receiver<()>>>,
}

impl ScriptedAccounts {
    fn with(replies: Vec<Reply>) -> Rc<Self> {
        Rc::new(Self { replies: RefCell::new(replies.into()), ..Self::default() })
    }
}

#[async_trait(?Send)]
impl AccountService for Rc<ScriptedAccounts> {
    async fn current_account(&self) -> Lookup {
        self.lookups.set(self.lookups.get() + 1);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(lookup)) => lookup,
            Some(Reply::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(ApiError::Network("dropped".to_owned()))),
            None => Ok(None),
        }
    }

    async fn delete_session(&self) -> Result<(), ApiError> {
        self.deletes.set(self.deletes.get() + 1);
        let gate = self.delete_gate.borrow_mut().take();
        if let Some(rx) = gate {
            let _ = rx.await;
        }
        if self.delete_fails.get() { Err(ApiError::Status(500)) } else { Ok(()) }
    }
}

fn account(id: &str) -> Account {
    Account {
        id: id.to_owned(),
        name: "Ada Lovelace".to_owned(),
        username: "ada".to_owned(),
        email: "ada@example.com".to_owned(),
        image_url: "https://cdn.example.com/ada.png".to_owned(),
        bio: String::new(),
    }
}

fn record(store: &SessionStore<Rc<ScriptedAccounts>>) -> Rc<RefCell<Vec<SessionState>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |state| sink.borrow_mut().push(state.clone()));
    seen
}

fn spawn_refresh(
    pool: &LocalPool,
    store: &SessionStore<Rc<ScriptedAccounts>>,
) -> Rc<Cell<Option<bool>>> {
    let result = Rc::new(Cell::new(None));
    let out = Rc::clone(&result);
    let store = store.clone();
    pool.spawner()
        .spawn_local(async move { out.set(Some(store.refresh().await)) })
        .unwrap();
    result
}

// =============================================================
// refresh outcomes
// =============================================================

#[test]
fn refresh_with_account_authenticates_and_maps_fields() {
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Ready(Ok(Some(account("acc-1"))))]));
    assert!(block_on(store.refresh()));

    let state = store.state();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.user, User::from(account("acc-1")));
}

#[test]
fn refresh_without_account_stays_anonymous() {
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Ready(Ok(None))]));
    assert!(!block_on(store.refresh()));

    let state = store.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_empty());
    assert!(!state.is_loading);
}

#[test]
fn refresh_backend_error_returns_false_and_clears_loading() {
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Ready(Err(ApiError::Network(
        "offline".to_owned(),
    )))]));
    assert!(!block_on(store.refresh()));
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

#[test]
fn refresh_can_move_between_authenticated_and_anonymous() {
    let store = SessionStore::new(ScriptedAccounts::with(vec![
        Reply::Ready(Ok(Some(account("acc-1")))),
        Reply::Ready(Ok(None)),
        Reply::Ready(Ok(Some(account("acc-2")))),
    ]));
    assert!(block_on(store.refresh()));
    assert!(!block_on(store.refresh()));
    assert!(store.user().is_empty());
    assert!(block_on(store.refresh()));
    assert_eq!(store.user().id, "acc-2");
}

// =============================================================
// is_loading span
// =============================================================

#[test]
fn observers_see_loading_only_during_refresh() {
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Ready(Ok(Some(account("acc-1"))))]));
    let seen = record(&store);
    block_on(store.refresh());

    let loading: Vec<bool> = seen.borrow().iter().map(|s| s.is_loading).collect();
    assert_eq!(loading, vec![false, true, false]);
    assert!(seen.borrow().last().unwrap().is_authenticated);
}

#[test]
fn loading_holds_until_backend_answers() {
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx)]));
    let mut pool = LocalPool::new();
    let result = spawn_refresh(&pool, &store);

    pool.run_until_stalled();
    assert!(store.is_loading());
    assert_eq!(result.get(), None);

    tx.send(Ok(Some(account("acc-1")))).unwrap();
    pool.run_until_stalled();
    assert!(!store.is_loading());
    assert_eq!(result.get(), Some(true));
}

#[test]
fn dropping_refresh_mid_flight_clears_loading() {
    let (_tx, rx) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx)]));
    {
        let mut fut = pin!(store.refresh());
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));
        assert!(store.is_loading());
    }
    assert!(!store.is_loading());
}

// =============================================================
// overlapping refreshes
// =============================================================

#[test]
fn older_refresh_resolving_last_is_discarded() {
    let (tx_old, rx_old) = oneshot::channel();
    let (tx_new, rx_new) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx_old), Reply::Gated(rx_new)]));
    let mut pool = LocalPool::new();
    let old = spawn_refresh(&pool, &store);
    pool.run_until_stalled();
    let new = spawn_refresh(&pool, &store);
    pool.run_until_stalled();

    tx_new.send(Ok(Some(account("acc-new")))).unwrap();
    pool.run_until_stalled();
    assert_eq!(new.get(), Some(true));
    assert!(!store.is_loading());

    tx_old.send(Ok(None)).unwrap();
    pool.run_until_stalled();
    assert_eq!(old.get(), Some(false));
    assert!(store.is_authenticated());
    assert_eq!(store.user().id, "acc-new");
}

#[test]
fn older_refresh_resolving_first_keeps_loading() {
    let (tx_old, rx_old) = oneshot::channel();
    let (tx_new, rx_new) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx_old), Reply::Gated(rx_new)]));
    let mut pool = LocalPool::new();
    let old = spawn_refresh(&pool, &store);
    pool.run_until_stalled();
    let new = spawn_refresh(&pool, &store);
    pool.run_until_stalled();

    tx_old.send(Ok(Some(account("acc-old")))).unwrap();
    pool.run_until_stalled();
    assert_eq!(old.get(), Some(true));
    assert!(store.is_loading());
    assert!(!store.is_authenticated());

    tx_new.send(Ok(None)).unwrap();
    pool.run_until_stalled();
    assert_eq!(new.get(), Some(false));
    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
}

// =============================================================
// setters, sign-out, teardown
// =============================================================

#[test]
fn setters_update_state_and_notify() {
    let store = SessionStore::new(ScriptedAccounts::with(Vec::new()));
    let seen = record(&store);
    let user = User { id: "u9".to_owned(), name: "Nine".to_owned(), ..User::default() };

    store.set_user(user.clone());
    store.set_is_authenticated(true);

    assert_eq!(store.user(), user);
    assert!(store.is_authenticated());
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn sign_out_clears_state_even_when_backend_fails() {
    let accounts = ScriptedAccounts::with(vec![Reply::Ready(Ok(Some(account("acc-1"))))]);
    accounts.delete_fails.set(true);
    let store = SessionStore::new(Rc::clone(&accounts));
    block_on(store.refresh());

    block_on(store.sign_out());
    assert_eq!(accounts.deletes.get(), 1);
    assert!(!store.is_authenticated());
    assert!(store.user().is_empty());
}

#[test]
fn sign_out_supersedes_refresh_in_flight() {
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx)]));
    let mut pool = LocalPool::new();
    let result = spawn_refresh(&pool, &store);
    pool.run_until_stalled();

    block_on(store.sign_out());
    tx.send(Ok(Some(account("acc-1")))).unwrap();
    pool.run_until_stalled();

    assert_eq!(result.get(), Some(true));
    assert!(!store.is_authenticated());
    assert!(!store.is_loading());
}

#[test]
fn refresh_resolving_after_close_is_discarded() {
    let (tx, rx) = oneshot::channel();
    let store = SessionStore::new(ScriptedAccounts::with(vec![Reply::Gated(rx)]));
    let mut pool = LocalPool::new();
    let result = spawn_refresh(&pool, &store);
    pool.run_until_stalled();

    store.close();
    tx.send(Ok(Some(account("acc-1")))).unwrap();
    pool.run_until_stalled();

    assert_eq!(result.get(), Some(false));
    assert!(!store.is_authenticated());
}

#[test]
fn refresh_after_close_skips_backend() {
    let accounts = ScriptedAccounts::with(vec![Reply::Ready(Ok(Some(account("acc-1"))))]);
    let store = SessionStore::new(Rc::clone(&accounts));
    store.close();

    assert!(!block_on(store.refresh()));
    assert_eq!(accounts.lookups.get(), 0);
}

#[test]
fn refresh_settling_during_sign_out_keeps_newer_result() {
    let (tx_delete, rx_delete) = oneshot::channel();
    let accounts = ScriptedAccounts::with(vec![Reply::Ready(Ok(Some(account("acc-1"))))]);
    *accounts.delete_gate.borrow_mut() = Some(rx_delete);
    let store = SessionStore::new(Rc::clone(&accounts));
    let mut pool = LocalPool::new();
    let signing_out = store.clone();
    pool.spawner()
        .spawn_local(async move { signing_out.sign_out().await })
        .unwrap();
    pool.run_until_stalled();
    assert_eq!(accounts.deletes.get(), 1);

    assert!(block_on(store.refresh()));
    tx_delete.send(()).unwrap();
    pool.run_until_stalled();

    assert!(store.is_authenticated());
    assert_eq!(store.user().id, "acc-1");
    assert!(!store.is_loading());
}
