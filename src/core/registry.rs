//! Registered clients
//!
//! The set of clients is fixed when the ledger is built. Client existence is
//! nothing more than membership in this set.

/// Ordered set of known client names
///
/// Iteration follows registration order, which is also the order used by
/// reports and CSV output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientRegistry {
    clients: Vec<String>,
}

impl ClientRegistry {
    /// Build a registry from client names
    ///
    /// Repeated names are registered once, at their first position.
    pub fn new<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = ClientRegistry::default();
        for client in clients {
            let client = client.into();
            if !registry.contains(&client) {
                registry.clients.push(client);
            }
        }
        registry
    }

    /// Whether `client` is registered
    pub fn contains(&self, client: &str) -> bool {
        self.clients.iter().any(|c| c == client)
    }

    /// Registered clients in registration order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.clients.iter().map(String::as_str)
    }

    /// Number of registered clients
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is registered
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
