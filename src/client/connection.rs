//! Client connection descriptors.

use serde::Serialize;
use url::Url;

/// A destination the client context may connect to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConnection {
    destination: Url,
}

impl ClientConnection {
    pub fn new(destination: Url) -> Self {
        Self { destination }
    }

    pub fn builder() -> ClientConnectionBuilder {
        ClientConnectionBuilder::default()
    }

    pub fn destination(&self) -> &Url {
        &self.destination
    }
}

/// Builder for [`ClientConnection`].
#[derive(Debug, Clone, Default)]
pub struct ClientConnectionBuilder {
    destination: Option<Url>,
}

impl ClientConnectionBuilder {
    pub fn destination(mut self, destination: Url) -> Self {
        self.destination = Some(destination);
        self
    }

    /// Returns `None` when no destination was set.
    pub fn build(self) -> Option<ClientConnection> {
        self.destination.map(ClientConnection::new)
    }
}
