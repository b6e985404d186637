use crate::backend::{BackendApi, HttpBackend};
use crate::capability::{AccessDenied, Capabilities, Section};
use crate::catalog::ProductCatalog;
use crate::checkout::{CheckoutError, CheckoutForm, CheckoutOrchestrator, CheckoutReceipt, PayloadOptions};
use crate::clients::DraftClient;
use crate::config::{ConfigError, ConsoleConfig};
use crate::draft::{self, DraftStorage};
use crate::notify::{Notifier, NotifyConfig};
use crate::session::Session;
use crate::storage::{FileStore, KeyValueStore, StorageError};
use crate::tracking::{OrderBook, ReservationTracker};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The running console: storage, session, the draft actor and the services
/// built on top of them.
///
/// # Example
///
/// ```ignore
/// let system = ConsoleSystem::start(&config)?;
/// system.draft.add(item).await?;
/// system.checkout.submit(&mut form).await?;
/// system.shutdown().await?;
/// ```
pub struct ConsoleSystem {
    pub session: Session,
    pub draft: DraftClient,
    pub notifier: Notifier,
    pub backend: Arc<dyn BackendApi>,
    pub checkout: CheckoutOrchestrator,

    /// Task handles for running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ConsoleSystem {
    /// Opens the state directory and talks HTTP to the configured backend.
    pub fn start(config: &ConsoleConfig) -> Result<Self, StartupError> {
        let base = config.api_base()?;
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.state_dir)?);
        let backend = Arc::new(HttpBackend::new(base, store.clone()));
        Ok(Self::with_parts(
            store,
            backend,
            config.notify(),
            config.payload_options(),
        ))
    }

    /// Wires the system from explicit parts. Must be called inside a runtime.
    pub fn with_parts(
        store: Arc<dyn KeyValueStore>,
        backend: Arc<dyn BackendApi>,
        notify: NotifyConfig,
        options: PayloadOptions,
    ) -> Self {
        // 1. Create actors (no dependencies)
        let (draft_actor, draft_client) = draft::new();

        // 2. Start actors with injected context; the draft hydrates before serving
        let draft_handle = tokio::spawn(draft_actor.run(DraftStorage::new(store.clone())));

        let draft = DraftClient::new(draft_client);
        let notifier = Notifier::new(notify);
        let checkout = CheckoutOrchestrator::new(draft.clone(), backend.clone(), notifier.clone())
            .with_options(options);

        info!("Console system started");
        Self {
            session: Session::new(store),
            draft,
            notifier,
            backend,
            checkout,
            handles: vec![draft_handle],
        }
    }

    /// The current session's capabilities, if they include `section`.
    pub fn authorize(&self, section: Section) -> Result<Capabilities, AccessDenied> {
        let capabilities = self.session.capabilities();
        capabilities
            .require(section)
            .inspect_err(|e| warn!(error = %e, "Access denied"))?;
        Ok(capabilities)
    }

    /// Submits the draft on behalf of the logged-in user. Roles that cannot open
    /// the orders section are refused before anything is sent.
    pub async fn place_order(&self, form: &mut CheckoutForm) -> Result<CheckoutReceipt, CheckoutError> {
        self.authorize(Section::Orders)?;
        self.checkout.submit(form).await
    }

    pub fn catalog(&self) -> ProductCatalog {
        ProductCatalog::new(self.backend.clone())
    }

    pub fn tracker(&self) -> ReservationTracker {
        ReservationTracker::new(self.backend.clone(), self.notifier.clone())
    }

    pub fn orders(&self) -> OrderBook {
        OrderBook::new(self.backend.clone(), self.notifier.clone())
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the actors' channels; each actor finishes
    /// the requests already queued and exits. Returns an error if an actor task
    /// panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        drop(self.checkout);
        drop(self.draft);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
