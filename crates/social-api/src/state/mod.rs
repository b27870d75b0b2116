//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the gateway state for the WebSocket routes, the pool for readiness checks,
//! and the configuration.

use std::sync::Arc;

use axum::extract::FromRef;
use social_common::AppConfig;
use social_db::PgPool;
use social_gateway::GatewayState;
use social_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Gateway state sharing the same service context
    gateway: GatewayState,
    /// Connection pool, used for readiness checks
    pool: PgPool,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(service_context: ServiceContext, pool: PgPool, config: AppConfig) -> Self {
        let service_context = Arc::new(service_context);
        let config = Arc::new(config);
        Self {
            gateway: GatewayState::new(service_context.clone(), config.clone()),
            service_context,
            pool,
            config,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the gateway state
    pub fn gateway(&self) -> &GatewayState {
        &self.gateway
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl FromRef<AppState> for GatewayState {
    fn from_ref(state: &AppState) -> Self {
        state.gateway.clone()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("gateway", &self.gateway)
            .field("config", &"AppConfig")
            .finish()
    }
}
