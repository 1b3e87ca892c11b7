//! Async orchestration of the core controllers.
//!
//! A [`ListScreen`] wraps a [`ListController`] and a shared [`RispApi`]
//! client. The controller sits behind a mutex that is only held for the
//! synchronous `begin_load` / `finish_load` steps, never across the RPC
//! await, so reloads can overlap; the controller's tickets decide which one
//! lands.
//!
//! A [`Dialog`] drives one [`ModalWorkflow`] against the backend. On a
//! successful submit it sends a [`ScreenEvent`] to the owning screen, and
//! [`Screens::pump`] turns pending events into reloads.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use risp_client_core::api::{RispApi, RpcError};
use risp_client_core::list::{ListController, ListPhase, Page};
use risp_client_core::modal::{
    create_context_workflow, index_uri_workflow, CreateContextFields, IndexUriFields, ModalError,
    ModalPhase, ModalWorkflow,
};
use risp_client_core::models::{ApiResponse, Context, Entity, ErrorCode, Resource, Source};
use risp_client_core::selection::SelectionObserver;

// ═══════════════════════════════════════════════════════════════════════
// Lists
// ═══════════════════════════════════════════════════════════════════════

/// Entities a [`ListScreen`] can fetch on its own.
#[async_trait]
pub trait Loadable: Entity + Send + Sized + 'static {
    async fn load(api: &dyn RispApi) -> Result<Page<Self>, RpcError>;
}

#[async_trait]
impl Loadable for Context {
    async fn load(api: &dyn RispApi) -> Result<Page<Self>, RpcError> {
        let resp = api.get_contexts().await?.into_result()?;
        Ok(Page::new(resp.contexts, resp.contexts_total))
    }
}

#[async_trait]
impl Loadable for Source {
    async fn load(api: &dyn RispApi) -> Result<Page<Self>, RpcError> {
        let resp = api.get_sources().await?.into_result()?;
        Ok(Page::new(resp.sources, resp.sources_total))
    }
}

#[async_trait]
impl Loadable for Resource {
    async fn load(api: &dyn RispApi) -> Result<Page<Self>, RpcError> {
        let resp = api.get_resources().await?.into_result()?;
        Ok(Page::new(resp.resources, resp.resources_total))
    }
}

pub struct ListScreen<E: Entity> {
    api: Arc<dyn RispApi>,
    list: Arc<Mutex<ListController<E>>>,
}

impl<E: Entity> Clone for ListScreen<E> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            list: Arc::clone(&self.list),
        }
    }
}

impl<E: Entity + Send + 'static> ListScreen<E> {
    pub fn new(api: Arc<dyn RispApi>, observer: Option<SelectionObserver>) -> Self {
        Self {
            api,
            list: Arc::new(Mutex::new(ListController::new(observer))),
        }
    }

    pub fn api(&self) -> &Arc<dyn RispApi> {
        &self.api
    }

    /// Loads through `fetch` and applies the result if no newer load was
    /// started meanwhile. Returns whether the result was applied.
    pub async fn reload_with<F, Fut>(&self, fetch: F) -> bool
    where
        F: FnOnce(Arc<dyn RispApi>) -> Fut,
        Fut: Future<Output = Result<Page<E>, RpcError>>,
    {
        self.reload_then(fetch, || {}).await
    }

    /// Like [`reload_with`](Self::reload_with), and runs `on_applied` under
    /// the list lock when the result lands, so state kept beside the list
    /// changes atomically with it.
    pub async fn reload_then<F, Fut, A>(&self, fetch: F, on_applied: A) -> bool
    where
        F: FnOnce(Arc<dyn RispApi>) -> Fut,
        Fut: Future<Output = Result<Page<E>, RpcError>>,
        A: FnOnce(),
    {
        let ticket = self.list.lock().begin_load();
        let result = fetch(Arc::clone(&self.api)).await;

        if let Err(err) = &result {
            tracing::warn!(entity = E::PLURAL, error = %err, "load failed");
        }
        let mut list = self.list.lock();
        let applied = list.finish_load(ticket, result);
        if applied {
            on_applied();
        } else {
            tracing::debug!(entity = E::PLURAL, ?ticket, "discarding stale response");
        }
        applied
    }

    /// Runs `f` against the current controller state.
    pub fn with_list<R>(&self, f: impl FnOnce(&ListController<E>) -> R) -> R {
        f(&self.list.lock())
    }

    pub fn phase(&self) -> ListPhase {
        self.list.lock().phase()
    }

    pub fn last_error(&self) -> Option<RpcError> {
        self.list.lock().last_error().cloned()
    }

    pub fn toggle(&self, id: &str) -> bool {
        self.list.lock().selection_mut().toggle(id)
    }

    pub fn select_all(&self) {
        self.list.lock().selection_mut().select_all();
    }

    pub fn clear_selection(&self) {
        self.list.lock().selection_mut().clear();
    }

    /// Ids to hand to a bulk action, read at call time.
    pub fn selected_ids(&self) -> Vec<String> {
        self.list.lock().selection().selected_in_order()
    }

    pub fn summary(&self) -> String {
        self.list.lock().summary()
    }
}

impl<E: Loadable> ListScreen<E> {
    pub async fn reload(&self) -> bool {
        self.reload_with(|api| async move { E::load(api.as_ref()).await })
            .await
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Dialogs
// ═══════════════════════════════════════════════════════════════════════

/// Sent by a dialog to its owning screen after a successful submit.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    ContextCreated(Context),
    SourceIndexed(Source),
}

/// The RPC half of a dialog.
#[async_trait]
pub trait DialogAction: Send + Sync {
    type Fields: Clone + Default + Send + Sync;
    type Saved: Clone + Send;

    async fn submit(
        &self,
        api: &dyn RispApi,
        fields: Self::Fields,
    ) -> Result<Self::Saved, RpcError>;

    fn saved_event(saved: &Self::Saved) -> ScreenEvent;
}

pub struct CreateContextAction;

#[async_trait]
impl DialogAction for CreateContextAction {
    type Fields = CreateContextFields;
    type Saved = Context;

    async fn submit(
        &self,
        api: &dyn RispApi,
        fields: CreateContextFields,
    ) -> Result<Context, RpcError> {
        let resp = api.create_context(&fields.name).await?.into_result()?;
        resp.context.ok_or_else(|| missing_entity("CreateContext", "context"))
    }

    fn saved_event(saved: &Context) -> ScreenEvent {
        ScreenEvent::ContextCreated(saved.clone())
    }
}

pub struct IndexUriAction;

#[async_trait]
impl DialogAction for IndexUriAction {
    type Fields = IndexUriFields;
    type Saved = Source;

    async fn submit(
        &self,
        api: &dyn RispApi,
        fields: IndexUriFields,
    ) -> Result<Source, RpcError> {
        let resp = api.index_uri(&fields.uri).await?.into_result()?;
        resp.source.ok_or_else(|| missing_entity("IndexURI", "source"))
    }

    fn saved_event(saved: &Source) -> ScreenEvent {
        ScreenEvent::SourceIndexed(saved.clone())
    }
}

fn missing_entity(method: &str, field: &str) -> RpcError {
    RpcError::Application {
        code: ErrorCode::Unknown,
        message: format!("{} succeeded without a {}", method, field),
    }
}

pub struct Dialog<A: DialogAction> {
    api: Arc<dyn RispApi>,
    action: A,
    workflow: ModalWorkflow<A::Fields>,
    close_on_error: bool,
    events: mpsc::UnboundedSender<ScreenEvent>,
}

pub type CreateContextDialog = Dialog<CreateContextAction>;
pub type IndexUriDialog = Dialog<IndexUriAction>;

impl<A: DialogAction> Dialog<A> {
    pub fn new(
        api: Arc<dyn RispApi>,
        action: A,
        workflow: ModalWorkflow<A::Fields>,
        close_on_error: bool,
        events: mpsc::UnboundedSender<ScreenEvent>,
    ) -> Self {
        Self {
            api,
            action,
            workflow,
            close_on_error,
            events,
        }
    }

    pub fn open(&mut self, initial: A::Fields) -> bool {
        self.workflow.open(initial)
    }

    pub fn close(&mut self) -> bool {
        self.workflow.close()
    }

    pub fn phase(&self) -> ModalPhase {
        self.workflow.phase()
    }

    pub fn workflow(&self) -> &ModalWorkflow<A::Fields> {
        &self.workflow
    }

    /// Validates, calls the backend, and on success notifies the owning
    /// screen. Validation failures never reach the backend and always leave
    /// the dialog open. Backend failures close it when `close_on_error` is
    /// set.
    pub async fn submit(&mut self) -> Result<A::Saved, ModalError> {
        let fields = match self.workflow.begin_submit() {
            Ok(fields) => fields,
            Err(err) => {
                tracing::debug!(error = %err, "dialog submit rejected");
                return Err(err);
            }
        };
        let result = self.action.submit(self.api.as_ref(), fields).await;

        match self.workflow.finish_submit(result) {
            Ok(saved) => {
                if self.events.send(A::saved_event(&saved)).is_err() {
                    tracing::debug!("owning screen is gone, dropping saved event");
                }
                Ok(saved)
            }
            Err(err) => {
                tracing::warn!(error = %err, "dialog submit failed");
                if self.close_on_error {
                    self.workflow.close();
                }
                Err(err)
            }
        }
    }
}

pub fn create_context_dialog(
    api: Arc<dyn RispApi>,
    close_on_error: bool,
    events: mpsc::UnboundedSender<ScreenEvent>,
) -> CreateContextDialog {
    Dialog::new(
        api,
        CreateContextAction,
        create_context_workflow(),
        close_on_error,
        events,
    )
}

pub fn index_uri_dialog(
    api: Arc<dyn RispApi>,
    close_on_error: bool,
    events: mpsc::UnboundedSender<ScreenEvent>,
) -> IndexUriDialog {
    Dialog::new(
        api,
        IndexUriAction,
        index_uri_workflow(),
        close_on_error,
        events,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// Screen set
// ═══════════════════════════════════════════════════════════════════════

/// The browsing screens sharing one client, plus the event channel their
/// dialogs report to.
pub struct Screens {
    pub contexts: ListScreen<Context>,
    pub sources: ListScreen<Source>,
    pub resources: ListScreen<Resource>,
    events_tx: mpsc::UnboundedSender<ScreenEvent>,
    events_rx: mpsc::UnboundedReceiver<ScreenEvent>,
}

impl Screens {
    pub fn new(api: Arc<dyn RispApi>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            contexts: ListScreen::new(Arc::clone(&api), None),
            sources: ListScreen::new(Arc::clone(&api), None),
            resources: ListScreen::new(api, None),
            events_tx,
            events_rx,
        }
    }

    pub fn events(&self) -> mpsc::UnboundedSender<ScreenEvent> {
        self.events_tx.clone()
    }

    pub fn create_context_dialog(&self, close_on_error: bool) -> CreateContextDialog {
        create_context_dialog(Arc::clone(self.contexts.api()), close_on_error, self.events())
    }

    pub fn index_uri_dialog(&self, close_on_error: bool) -> IndexUriDialog {
        index_uri_dialog(Arc::clone(self.sources.api()), close_on_error, self.events())
    }

    /// Reloads the screen that owns `event`.
    pub async fn handle(&self, event: ScreenEvent) -> bool {
        match event {
            ScreenEvent::ContextCreated(ctx) => {
                tracing::debug!(id = %ctx.id, "context created, reloading contexts");
                self.contexts.reload().await
            }
            ScreenEvent::SourceIndexed(src) => {
                tracing::debug!(id = %src.id, "source indexed, reloading sources");
                self.sources.reload().await
            }
        }
    }

    /// Handles every event already queued. Returns how many were handled.
    pub async fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle(event).await;
            handled += 1;
        }
        handled
    }
}
