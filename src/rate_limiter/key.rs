//! Identity under which requests are counted.

use std::fmt;
use std::net::IpAddr;

/// Group of routes that share one counter per client.
///
/// Each group is limited independently: exhausting the quota on the
/// collection does not block updates or deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteGroup {
    /// `GET`/`POST /api/books`
    Collection,
    /// `PUT /api/books/{id}`
    Update,
    /// `DELETE /api/books/{id}`
    Delete,
}

impl RouteGroup {
    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteGroup::Collection => "collection",
            RouteGroup::Update => "update",
            RouteGroup::Delete => "delete",
        }
    }
}

impl fmt::Display for RouteGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counter key: the route group plus the client address as seen on the socket.
///
/// Only the IP is used; the source port changes with every connection.
/// Forwarding headers are never consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateLimitKey {
    /// Route group the request counts against.
    pub group: RouteGroup,
    /// Peer IP of the connection.
    pub client: IpAddr,
}

impl RateLimitKey {
    /// Key for `client` in `group`.
    pub fn new(group: RouteGroup, client: IpAddr) -> Self {
        Self { group, client }
    }
}

impl fmt::Display for RateLimitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.client)
    }
}
