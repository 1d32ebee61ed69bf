use futures::future::{AbortHandle, Abortable};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::search::{self, Searchable};
use super::{Cursor, QueryState, Status};
use crate::api::envelope::{extract_payload, is_empty_payload};
use crate::api::{ApiClient, RequestOptions, Resource};
use crate::error::ApiError;
use crate::session::SessionContext;

/// Payload of one successful fetch
struct Fetched<T> {
    data: T,
    has_more: bool,
    empty: bool,
}

#[derive(Clone, Copy)]
enum FetchMode {
    Load,
    Refresh,
}

struct Shared<T> {
    resource: Resource,
    state: QueryState<T>,
    cursor: Cursor,
    // Bumped whenever earlier requests must no longer apply
    epoch: u64,
    in_flight: Option<AbortHandle>,
    more_in_flight: Option<AbortHandle>,
    mounted: bool,
}

impl<T> Shared<T> {
    fn abort_all(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
        if let Some(handle) = self.more_in_flight.take() {
            handle.abort();
        }
    }
}

#[derive(Clone, Copy)]
enum Slot {
    FirstPage,
    NextPage,
}

/// Frees an in-flight slot when the fetch future is dropped before it settles
struct InFlight<T> {
    shared: Arc<Mutex<Shared<T>>>,
    epoch: u64,
    slot: Slot,
    settled: bool,
}

impl<T> InFlight<T> {
    fn new(shared: Arc<Mutex<Shared<T>>>, epoch: u64, slot: Slot) -> Self {
        Self {
            shared,
            epoch,
            slot,
            settled: false,
        }
    }

    fn settle(&mut self) {
        self.settled = true;
    }
}

impl<T> Drop for InFlight<T> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut shared = self.shared.lock().unwrap_or_else(PoisonError::into_inner);
        if shared.epoch != self.epoch {
            return;
        }
        match self.slot {
            Slot::FirstPage => {
                tracing::debug!(path = %shared.resource.path, "Fetch abandoned by caller");
                shared.in_flight = None;
                shared.state.refreshing = false;
                if shared.state.status == Status::Loading {
                    shared.state.status = Status::Idle;
                }
            }
            Slot::NextPage => {
                shared.more_in_flight = None;
                shared.state.loading_more = false;
            }
        }
    }
}

/// Loading/error/empty/ready lifecycle of one resource on one screen
///
/// Cloning yields another handle on the same state, so a view can read
/// `state()` while a fetch runs. Requests from one controller are serial:
/// `load`/`refresh` while one is in flight is a no-op.
pub struct ResourceController<T> {
    api: ApiClient,
    session: SessionContext,
    shared: Arc<Mutex<Shared<T>>>,
}

impl<T> Clone for ResourceController<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: self.session.clone(),
            shared: self.shared.clone(),
        }
    }
}

impl<T> ResourceController<T>
where
    T: DeserializeOwned + Clone + Send + 'static,
{
    pub fn new(api: ApiClient, session: SessionContext, resource: Resource) -> Self {
        Self {
            api,
            session,
            shared: Arc::new(Mutex::new(Shared {
                resource,
                state: QueryState::default(),
                cursor: Cursor::first_page(),
                epoch: 0,
                in_flight: None,
                more_in_flight: None,
                mounted: true,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared<T>> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> QueryState<T> {
        self.lock().state.clone()
    }

    pub fn cursor(&self) -> Cursor {
        self.lock().cursor
    }

    pub fn resource(&self) -> Resource {
        self.lock().resource.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().mounted
    }

    /// Fetch from scratch; previous data is cleared while loading
    pub async fn load(&self) {
        self.fetch_first_page(FetchMode::Load).await
    }

    /// Pull-to-refresh: previous data stays visible until the response lands
    pub async fn refresh(&self) {
        self.fetch_first_page(FetchMode::Refresh).await
    }

    /// Manual retry after an error
    pub async fn reload(&self) {
        self.load().await
    }

    /// Change the dependency set; a different resource invalidates the data
    /// and reloads from page 1
    pub async fn set_resource(&self, resource: Resource) {
        {
            let mut shared = self.lock();
            if !shared.mounted || shared.resource == resource {
                return;
            }
            tracing::debug!(path = %resource.path, "Resource changed, reloading");
            shared.abort_all();
            shared.epoch += 1;
            shared.resource = resource;
            shared.cursor = Cursor::first_page();
            shared.state = QueryState::default();
        }
        self.load().await
    }

    /// Screen is gone: cancel what is in flight and never mutate again
    pub fn unmount(&self) {
        let mut shared = self.lock();
        shared.mounted = false;
        shared.epoch += 1;
        shared.abort_all();
    }

    async fn fetch_first_page(&self, mode: FetchMode) {
        let (epoch, registration, resource) = {
            let mut shared = self.lock();
            if !shared.mounted || shared.in_flight.is_some() {
                return;
            }
            // A fresh first page supersedes any pending append
            if let Some(handle) = shared.more_in_flight.take() {
                handle.abort();
            }
            shared.epoch += 1;

            let (handle, registration) = AbortHandle::new_pair();
            shared.in_flight = Some(handle);
            shared.state.error_message = None;
            shared.state.loading_more = false;
            match mode {
                FetchMode::Load => {
                    shared.state.status = Status::Loading;
                    shared.state.data = None;
                }
                FetchMode::Refresh => shared.state.refreshing = true,
            }
            (shared.epoch, registration, shared.resource.clone())
        };
        let mut guard = InFlight::new(self.shared.clone(), epoch, Slot::FirstPage);

        let page = resource.paginated.then_some(1);
        let outcome = Abortable::new(fetch::<T>(&self.api, &self.session, &resource, page), registration).await;
        let Ok(result) = outcome else {
            tracing::debug!(path = %resource.path, "Fetch cancelled");
            return;
        };

        guard.settle();
        let mut shared = self.lock();
        if !shared.mounted || shared.epoch != epoch {
            return;
        }
        shared.in_flight = None;
        shared.state.refreshing = false;

        match result {
            Ok(fetched) => {
                shared.state.status = if fetched.empty { Status::Empty } else { Status::Ready };
                shared.state.data = Some(fetched.data);
                shared.state.error_message = None;
                shared.cursor = Cursor {
                    page: 1,
                    has_more: fetched.has_more,
                };
            }
            Err(e) => {
                tracing::warn!(path = %resource.path, code = e.error_code(), "Fetch failed: {}", e);
                shared.state.status = Status::Error;
                shared.state.data = None;
                shared.state.error_message = Some(e.screen_message(resource.label));
                shared.cursor = Cursor::first_page();
            }
        }
    }
}

impl<I> ResourceController<Vec<I>>
where
    I: DeserializeOwned + Clone + Send + 'static,
{
    /// Append the next page of a paginated list
    ///
    /// Returns whether a request was issued. No-op without `has_more`, before
    /// the first page landed, or while any load is in flight. On failure the
    /// list is kept and only `error_message` is set.
    pub async fn load_more(&self) -> bool {
        let (epoch, registration, resource, next_page) = {
            let mut shared = self.lock();
            let ready = matches!(shared.state.status, Status::Ready | Status::Empty);
            if !shared.mounted
                || !shared.resource.paginated
                || !shared.cursor.has_more
                || !ready
                || shared.in_flight.is_some()
                || shared.more_in_flight.is_some()
            {
                return false;
            }

            let (handle, registration) = AbortHandle::new_pair();
            shared.more_in_flight = Some(handle);
            shared.state.loading_more = true;
            (shared.epoch, registration, shared.resource.clone(), shared.cursor.page + 1)
        };
        let mut guard = InFlight::new(self.shared.clone(), epoch, Slot::NextPage);

        let outcome = Abortable::new(
            fetch::<Vec<I>>(&self.api, &self.session, &resource, Some(next_page)),
            registration,
        )
        .await;
        let Ok(result) = outcome else {
            return true;
        };

        guard.settle();
        let mut shared = self.lock();
        if !shared.mounted || shared.epoch != epoch {
            return true;
        }
        shared.more_in_flight = None;
        shared.state.loading_more = false;

        match result {
            Ok(fetched) => {
                let has_items = {
                    let items = shared.state.data.get_or_insert_with(Vec::new);
                    items.extend(fetched.data);
                    !items.is_empty()
                };
                if has_items {
                    shared.state.status = Status::Ready;
                }
                shared.state.error_message = None;
                shared.cursor = Cursor {
                    page: next_page,
                    has_more: fetched.has_more,
                };
            }
            Err(e) => {
                tracing::warn!(path = %resource.path, page = next_page, "Load more failed: {}", e);
                shared.state.error_message = Some(e.screen_message(resource.label));
            }
        }
        true
    }

    /// Fetched items matching the search box, without touching the fetched list
    pub fn search(&self, query: &str) -> Vec<I>
    where
        I: Searchable,
    {
        let shared = self.lock();
        match &shared.state.data {
            Some(items) => search::filter(items, query).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }
}

/// One authorized GET of `resource`; refuses to send without a token
async fn fetch<T: DeserializeOwned>(
    api: &ApiClient,
    session: &SessionContext,
    resource: &Resource,
    page: Option<u32>,
) -> Result<Fetched<T>, ApiError> {
    let token = session.bearer_token().await?;
    let options = RequestOptions::authorized(token).params(resource.params_for_page(page));
    let response = api.get(&resource.path, options).await?;

    let has_more = response.data.get("has_more").and_then(Value::as_bool).unwrap_or(false);
    let payload = extract_payload(response.data, resource.envelope, resource.shape, resource.collection)?;
    let empty = is_empty_payload(&payload);
    let data = serde_json::from_value(payload)
        .map_err(|e| ApiError::malformed(format!("{} payload: {}", resource.label, e)))?;

    Ok(Fetched { data, has_more, empty })
}
