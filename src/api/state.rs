//! Shared application state, injected at startup

use std::sync::Arc;

use crate::api::middleware::Authenticator;
use crate::api::routing::RouteTable;
use crate::domain::Datastore;

/// Process-wide immutable state: the store collaborator, the authenticator
/// (key ring + mode), and the route table. Everything here is built once at
/// startup and safe to share across concurrent requests without locking.
#[derive(Clone)]
pub struct AppState {
    pub datastore: Arc<dyn Datastore>,
    pub authenticator: Arc<Authenticator>,
    pub routes: Arc<RouteTable>,
}

impl AppState {
    pub fn new(
        datastore: Arc<dyn Datastore>,
        authenticator: Arc<Authenticator>,
        routes: Arc<RouteTable>,
    ) -> Self {
        Self {
            datastore,
            authenticator,
            routes,
        }
    }
}
