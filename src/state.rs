//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::services::{
    AdminCredentials, AnalyticsService, AuthService, DomainSelector, PageViewService,
    WorkspaceService,
};
use crate::domain::analytics_event::AnalyticsEvent;
use crate::domain::content_store::ContentStore;
use crate::domain::entities::PortfolioDomain;
use crate::domain::repositories::PreferenceStore;
use crate::infrastructure::collectors::AnalyticsCollector;
use crate::infrastructure::sessions::InMemorySessionRepository;

pub type SharedAuthService = Arc<AuthService<InMemorySessionRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub content: ContentStore,
    pub domain_selector: Arc<DomainSelector<dyn PreferenceStore>>,
    pub analytics: Arc<AnalyticsService>,
    pub page_views: Arc<PageViewService>,
    pub auth_service: SharedAuthService,
    pub workspaces: Arc<WorkspaceService>,
    /// Collectors behind the analytics worker, asked for status by the health check.
    pub collectors: Arc<Vec<Arc<dyn AnalyticsCollector>>>,
    pub cookie_secure: bool,
}

/// Everything [`AppState::new`] needs besides the analytics channel.
pub struct StateOptions {
    pub content: ContentStore,
    pub settings: Arc<dyn PreferenceStore>,
    pub default_domain: PortfolioDomain,
    pub collectors: Vec<Arc<dyn AnalyticsCollector>>,
    pub credentials: Option<AdminCredentials>,
    pub signing_secret: String,
    pub session_ttl: chrono::Duration,
    pub page_view_idle: Duration,
    /// Spacing of each page view's interval time measurements.
    pub time_flush_period: Duration,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(options: StateOptions, analytics_tx: mpsc::Sender<AnalyticsEvent>) -> Self {
        let analytics = Arc::new(AnalyticsService::new(analytics_tx));
        let page_views = Arc::new(PageViewService::new(
            analytics.clone(),
            options.page_view_idle,
            options.time_flush_period,
        ));
        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemorySessionRepository::new()),
            options.credentials,
            options.signing_secret,
            options.session_ttl,
        ));

        Self {
            workspaces: Arc::new(WorkspaceService::new(options.content.clone())),
            content: options.content,
            domain_selector: Arc::new(DomainSelector::new(
                options.settings,
                options.default_domain,
            )),
            analytics,
            page_views,
            auth_service,
            collectors: Arc::new(options.collectors),
            cookie_secure: options.cookie_secure,
        }
    }
}
