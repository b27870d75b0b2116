//! Gateway state
//!
//! Shared dependencies of the WebSocket handlers.

use crate::connection::ChatRegistry;
use social_common::AppConfig;
use social_service::ServiceContext;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Service context with repositories and the notification hub
    service_context: Arc<ServiceContext>,
    /// Chat listeners of this process
    registry: Arc<ChatRegistry>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state with an empty registry
    pub fn new(service_context: Arc<ServiceContext>, config: Arc<AppConfig>) -> Self {
        Self {
            service_context,
            registry: Arc::new(ChatRegistry::new()),
            config,
        }
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the chat registry
    pub fn registry(&self) -> &ChatRegistry {
        &self.registry
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("registry", &self.registry)
            .field("config", &"AppConfig")
            .finish()
    }
}
