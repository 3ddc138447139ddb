//! In-memory collaborator fakes for the test suites.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};

use crate::error::HostError;
use crate::host::{
    AccessPredicate, IdentityProvider, ItemQuery, PageMiddleware, ProviderSession, Redirect,
    Request, RequestContext, SessionStrategy,
};
use crate::types::{Item, ItemId, ItemSession, ListKey, SessionToken};

pub(crate) fn ctx(
    request: Request,
    session: Option<ItemSession>,
    query: Arc<dyn ItemQuery>,
) -> RequestContext {
    RequestContext::new(request, session, query)
}

pub(crate) fn session(list: &str, item: &str) -> ItemSession {
    ItemSession {
        list_key: ListKey::from(list),
        item_id: ItemId::from(item),
        data: json!({ "id": item }),
    }
}

struct StoredItem {
    id: ItemId,
    data: JsonValue,
    secret: Option<String>,
}

/// In-memory stand-in for the host data layer.
pub(crate) struct MemoryItems {
    lists: Mutex<BTreeMap<ListKey, Vec<StoredItem>>>,
    fail: bool,
    next_id: AtomicU64,
}

impl MemoryItems {
    pub(crate) fn empty() -> Arc<Self> {
        Arc::new(Self {
            lists: Mutex::new(BTreeMap::new()),
            fail: false,
            next_id: AtomicU64::new(1),
        })
    }

    /// A data layer whose every operation fails, for error-propagation tests.
    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            lists: Mutex::new(BTreeMap::new()),
            fail: true,
            next_id: AtomicU64::new(1),
        })
    }

    pub(crate) fn add(&self, list: &str, id: &str, data: JsonValue, secret: &str) {
        self.lists
            .lock()
            .unwrap()
            .entry(ListKey::from(list))
            .or_default()
            .push(StoredItem {
                id: ItemId::from(id),
                data,
                secret: Some(secret.to_owned()),
            });
    }

    fn check(&self) -> Result<(), HostError> {
        if self.fail {
            return Err("store unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl ItemQuery for MemoryItems {
    async fn count_privileged(&self, list: &ListKey) -> Result<u64, HostError> {
        self.check()?;
        let lists = self.lists.lock().unwrap();
        Ok(lists.get(list).map_or(0, |items| items.len() as u64))
    }

    async fn item_data(
        &self,
        list: &ListKey,
        item: &ItemId,
        selection: &str,
    ) -> Result<Option<JsonValue>, HostError> {
        self.check()?;
        let lists = self.lists.lock().unwrap();
        let Some(stored) = lists
            .get(list)
            .and_then(|items| items.iter().find(|i| &i.id == item))
        else {
            return Ok(None);
        };

        let mut selected = serde_json::Map::new();
        for field in selection.split_whitespace() {
            if let Some(value) = stored.data.get(field) {
                selected.insert(field.to_owned(), value.clone());
            }
        }
        Ok(Some(JsonValue::Object(selected)))
    }

    async fn find_one(
        &self,
        list: &ListKey,
        field: &str,
        value: &str,
    ) -> Result<Option<Item>, HostError> {
        self.check()?;
        let lists = self.lists.lock().unwrap();
        Ok(lists.get(list).and_then(|items| {
            items
                .iter()
                .find(|i| i.data.get(field).and_then(JsonValue::as_str) == Some(value))
                .map(|i| Item {
                    id: i.id.clone(),
                    data: i.data.clone(),
                })
        }))
    }

    async fn verify_secret(
        &self,
        list: &ListKey,
        item: &ItemId,
        secret: &str,
    ) -> Result<bool, HostError> {
        self.check()?;
        let lists = self.lists.lock().unwrap();
        Ok(lists
            .get(list)
            .and_then(|items| items.iter().find(|i| &i.id == item))
            .and_then(|i| i.secret.as_deref())
            .is_some_and(|stored| stored == secret))
    }

    async fn create_privileged(
        &self,
        list: &ListKey,
        data: JsonValue,
    ) -> Result<Item, HostError> {
        self.check()?;
        let id = ItemId::from(format!("item-{}", self.next_id.fetch_add(1, Ordering::Relaxed)));
        self.lists
            .lock()
            .unwrap()
            .entry(list.clone())
            .or_default()
            .push(StoredItem {
                id: id.clone(),
                data: data.clone(),
                secret: None,
            });
        Ok(Item { id, data })
    }
}

/// Identity provider resolving every request to a fixed outcome.
pub(crate) struct StaticProvider {
    session: Option<ProviderSession>,
}

impl StaticProvider {
    pub(crate) fn some_owned(item_id: &str) -> Self {
        Self {
            session: Some(ProviderSession {
                item_id: ItemId::from(item_id),
            }),
        }
    }

    pub(crate) fn none_owned() -> Self {
        Self { session: None }
    }

    pub(crate) fn some(item_id: &str) -> Arc<Self> {
        Arc::new(Self::some_owned(item_id))
    }

    pub(crate) fn none() -> Arc<Self> {
        Arc::new(Self::none_owned())
    }
}

#[async_trait]
impl IdentityProvider for StaticProvider {
    async fn resolve(&self, _req: &Request) -> Result<Option<ProviderSession>, HostError> {
        Ok(self.session.clone())
    }
}

/// Session strategy recording started sessions; resolves nothing itself.
pub(crate) struct MemorySessions {
    started: Mutex<Vec<ItemSession>>,
    counter: AtomicU64,
}

impl MemorySessions {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Mutex::new(Vec::new()),
            counter: AtomicU64::new(1),
        })
    }

    pub(crate) fn started(&self) -> Vec<ItemSession> {
        self.started.lock().unwrap().clone()
    }
}

#[async_trait]
impl SessionStrategy for MemorySessions {
    async fn start(&self, session: ItemSession) -> Result<SessionToken, HostError> {
        self.started.lock().unwrap().push(session);
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        Ok(SessionToken::from(format!("token-{n}")))
    }

    async fn get(
        &self,
        _req: &Request,
        _query: &dyn ItemQuery,
    ) -> Result<Option<ItemSession>, HostError> {
        Ok(None)
    }
}

/// Page middleware returning a fixed outcome and counting invocations.
pub(crate) struct FixedMiddleware {
    redirect: Option<Redirect>,
    calls: AtomicUsize,
}

impl FixedMiddleware {
    pub(crate) fn redirecting(to: &str) -> Self {
        Self {
            redirect: Some(Redirect::to(to)),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PageMiddleware for FixedMiddleware {
    async fn handle(&self, _ctx: &RequestContext) -> Result<Option<Redirect>, HostError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.redirect.clone())
    }
}

/// Access predicate returning a fixed verdict and counting invocations.
pub(crate) struct FixedPredicate {
    allow: bool,
    calls: AtomicUsize,
}

impl FixedPredicate {
    pub(crate) fn allowing(allow: bool) -> Self {
        Self {
            allow,
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AccessPredicate for FixedPredicate {
    async fn allows(&self, _ctx: &RequestContext) -> Result<bool, HostError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.allow)
    }
}
