//! HTTP transport for the descriptor.
//!
//! Routes come from an explicit [`HandlerTable`] built at startup; the
//! descriptor is loaded (and usually parsed) once and shared by every request.

pub mod handlers;

use crate::config::{RouteConfig, ServeMode, Settings};
use crate::core::{parse_descriptor, DocumentLoader, ServiceDescriptor};
use crate::utils::error::{Error, Result};
use crate::utils::validation;
use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Descriptor,
    Headers,
}

/// Route table handed to the transport; nothing is registered globally.
#[derive(Debug, Clone, Default)]
pub struct HandlerTable {
    entries: Vec<(String, Endpoint)>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_routes(routes: &RouteConfig) -> Self {
        Self::new()
            .with(routes.descriptor.clone(), Endpoint::Descriptor)
            .with(routes.headers.clone(), Endpoint::Headers)
    }

    pub fn with(mut self, path: impl Into<String>, endpoint: Endpoint) -> Self {
        self.entries.push((path.into(), endpoint));
        self
    }

    pub fn entries(&self) -> &[(String, Endpoint)] {
        &self.entries
    }

    pub fn router(&self, state: AppState) -> Result<Router> {
        let mut seen = HashSet::new();
        let mut router = Router::new();

        for (path, endpoint) in &self.entries {
            validation::validate_route_path("route", path)?;
            if !seen.insert(path.as_str()) {
                return Err(Error::ConfigError {
                    message: format!("route {} registered twice", path),
                });
            }
            tracing::debug!("Registering {:?} at {}", endpoint, path);
            router = match endpoint {
                Endpoint::Descriptor => router.route(path, get(handlers::descriptor)),
                Endpoint::Headers => router.route(path, get(handlers::echo_headers)),
            };
        }

        Ok(router.with_state(state))
    }
}

#[derive(Clone)]
pub enum DescriptorSource {
    /// Parsed once at startup.
    Parsed(Arc<ServiceDescriptor>),
    /// Loaded once at startup, served verbatim.
    Raw(Arc<str>),
    /// Loaded on every request.
    Live {
        loader: Arc<dyn DocumentLoader>,
        mode: ServeMode,
    },
}

pub enum Payload {
    Descriptor(Arc<ServiceDescriptor>),
    Raw(Arc<str>),
}

impl DescriptorSource {
    pub async fn resolve(&self) -> Result<Payload> {
        match self {
            DescriptorSource::Parsed(descriptor) => Ok(Payload::Descriptor(descriptor.clone())),
            DescriptorSource::Raw(text) => Ok(Payload::Raw(text.clone())),
            DescriptorSource::Live { loader, mode } => {
                let text = loader.load().await?;
                match mode {
                    ServeMode::Parsed => Ok(Payload::Descriptor(Arc::new(parse_descriptor(&text)?))),
                    ServeMode::Raw => Ok(Payload::Raw(text.into())),
                }
            }
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub source: DescriptorSource,
    pub allow_origin: HeaderValue,
}

impl AppState {
    pub fn new(source: DescriptorSource, allow_origin: &str) -> Result<Self> {
        let allow_origin =
            HeaderValue::from_str(allow_origin).map_err(|e| Error::InvalidConfigValueError {
                field: "server.allow_origin".to_string(),
                value: allow_origin.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source,
            allow_origin,
        })
    }

    /// With `cache` on, the document is loaded now and a broken document fails startup.
    pub async fn prepare(
        loader: Arc<dyn DocumentLoader>,
        mode: ServeMode,
        cache: bool,
        allow_origin: &str,
    ) -> Result<Self> {
        let source = if cache {
            let text = loader.load().await?;
            match mode {
                ServeMode::Parsed => {
                    let descriptor = parse_descriptor(&text)?;
                    tracing::info!(
                        "Loaded descriptor '{}' with {} dependencies and {} consumers",
                        descriptor.name,
                        descriptor.dependencies.len(),
                        descriptor.consumers.len()
                    );
                    DescriptorSource::Parsed(Arc::new(descriptor))
                }
                ServeMode::Raw => {
                    tracing::info!("Serving {} bytes verbatim", text.len());
                    DescriptorSource::Raw(text.into())
                }
            }
        } else {
            tracing::info!("Loading {} on every request", loader.describe());
            DescriptorSource::Live { loader, mode }
        };

        Self::new(source, allow_origin)
    }
}

pub async fn serve_listener<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::ServerError {
            message: e.to_string(),
        })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

pub async fn serve(settings: Settings) -> Result<()> {
    let loader = settings.source.clone().into_loader();
    tracing::info!("Descriptor source: {}", loader.describe());

    let state = AppState::prepare(loader, settings.mode, settings.cache, &settings.allow_origin)
        .await?;
    let router = HandlerTable::from_routes(&settings.routes).router(state)?;

    let listener = TcpListener::bind(settings.bind)
        .await
        .map_err(|e| Error::ServerError {
            message: format!("cannot bind {}: {}", settings.bind, e),
        })?;
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);

    serve_listener(listener, router, shutdown_signal()).await
}
