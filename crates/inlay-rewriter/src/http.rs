//! HTTP-backed embed id lookups.

use std::time::Duration;

use ureq::Agent;

use crate::consts::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
use crate::resolver::{IdResolver, ProfileTarget, ResolveError, extract_embed_id};

/// Resolver that fetches the itch.io embed endpoint.
///
/// `ureq` is blocking, so each lookup runs on Tokio's blocking thread pool and
/// the calling task only suspends while it waits. A lookup is a single `GET`
/// with a global timeout; failures are never retried.
///
/// # Example
///
/// ```ignore
/// use std::time::Duration;
/// use inlay_rewriter::{HttpResolver, IdResolver, ProfileTarget};
///
/// let resolver = HttpResolver::new().timeout(Duration::from_secs(5));
/// let id = resolver.resolve(&ProfileTarget::new("dev", "game")).await?;
/// ```
#[derive(Clone)]
pub struct HttpResolver {
    /// HTTP agent for connection pooling (shared by clones).
    agent: Agent,
    timeout: Duration,
    user_agent: String,
    /// Serves lookups instead of the owner's itch.io subdomain when set.
    lookup_base: Option<String>,
}

impl std::fmt::Debug for HttpResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResolver")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("lookup_base", &self.lookup_base)
            .finish_non_exhaustive()
    }
}

impl Default for HttpResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResolver {
    /// Create a resolver with the default timeout and user agent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: create_agent(DEFAULT_TIMEOUT),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            lookup_base: None,
        }
    }

    /// Set the HTTP timeout for lookups.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.agent = create_agent(timeout);
        self
    }

    /// Set the `User-Agent` header sent with lookups.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Send lookups to `base` (e.g. a mirror) as `{base}/{owner}/{item}/embed`.
    #[must_use]
    pub fn lookup_base(mut self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.lookup_base = Some(base.trim_end_matches('/').to_owned());
        self
    }

    /// Configured lookup timeout.
    #[must_use]
    pub fn configured_timeout(&self) -> Duration {
        self.timeout
    }

    /// URL fetched for `target`.
    fn resolve_url(&self, target: &ProfileTarget) -> String {
        match &self.lookup_base {
            Some(base) => format!("{base}/{}/{}/embed", target.owner, target.item),
            None => target.lookup_url(),
        }
    }
}

impl IdResolver for HttpResolver {
    async fn resolve(&self, target: &ProfileTarget) -> Result<String, ResolveError> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let url = self.resolve_url(target);

        tracing::debug!(url = %url, "Looking up embed id");
        let body =
            tokio::task::spawn_blocking(move || fetch_text(&agent, &url, &user_agent)).await??;

        extract_embed_id(&body).ok_or(ResolveError::IdNotFound)
    }
}

/// Create HTTP agent with the specified timeout.
///
/// Status codes are checked by [`fetch_text`] rather than surfaced as
/// transport errors.
fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// `GET` a URL and return the body of a 2xx response as text.
fn fetch_text(agent: &Agent, url: &str, user_agent: &str) -> Result<String, ResolveError> {
    let response = agent
        .get(url)
        .header("User-Agent", user_agent)
        .call()
        .map_err(|e| ResolveError::Http(e.to_string()))?;

    let status = response.status().as_u16();
    if !(200..300).contains(&status) {
        return Err(ResolveError::Status(status));
    }

    let mut body = response.into_body();
    body.read_to_string()
        .map_err(|e| ResolveError::Body(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const EMBED_BODY: &str = r#"<div data-init="{&quot;url&quot;:&quot;https:\/\/itch.io\/embed\/555999&quot;}"></div>"#;

    #[test]
    fn test_fetch_text_success() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/dev/game/embed")
            .match_header("user-agent", "inlay-test")
            .with_status(200)
            .with_body(EMBED_BODY)
            .create();

        let agent = create_agent(DEFAULT_TIMEOUT);
        let url = format!("{}/dev/game/embed", server.url());
        let body = fetch_text(&agent, &url, "inlay-test").unwrap();

        mock.assert();
        assert_eq!(extract_embed_id(&body), Some("555999".to_owned()));
    }

    #[test]
    fn test_fetch_text_non_success_status() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/missing/embed")
            .with_status(404)
            .with_body(EMBED_BODY)
            .create();

        let agent = create_agent(DEFAULT_TIMEOUT);
        let url = format!("{}/missing/embed", server.url());
        let err = fetch_text(&agent, &url, DEFAULT_USER_AGENT).unwrap_err();

        assert!(matches!(err, ResolveError::Status(404)), "got {err:?}");
    }

    #[test]
    fn test_fetch_text_connection_refused() {
        let agent = create_agent(Duration::from_secs(2));
        let err = fetch_text(&agent, "http://127.0.0.1:1/embed", DEFAULT_USER_AGENT).unwrap_err();
        assert!(matches!(err, ResolveError::Http(_)), "got {err:?}");
    }

    #[test]
    fn test_resolve_url() {
        let target = ProfileTarget::new("dev", "game");
        assert_eq!(
            HttpResolver::new().resolve_url(&target),
            "https://dev.itch.io/game/embed"
        );
        assert_eq!(
            HttpResolver::new()
                .lookup_base("http://127.0.0.1:8080/")
                .resolve_url(&target),
            "http://127.0.0.1:8080/dev/game/embed"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_finds_embed_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/dev/game/embed")
            .with_status(200)
            .with_body(EMBED_BODY)
            .create_async()
            .await;

        let resolver = HttpResolver::new().lookup_base(server.url());
        let id = resolver
            .resolve(&ProfileTarget::new("dev", "game"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(id, "555999");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_body_without_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/dev/game/embed")
            .with_status(200)
            .with_body("<html>no widget</html>")
            .create_async()
            .await;

        let resolver = HttpResolver::new().lookup_base(server.url());
        let err = resolver
            .resolve(&ProfileTarget::new("dev", "game"))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::IdNotFound), "got {err:?}");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_resolve_not_found_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/dev/gone/embed")
            .with_status(404)
            .create_async()
            .await;

        let resolver = HttpResolver::new().lookup_base(server.url());
        let err = resolver
            .resolve(&ProfileTarget::new("dev", "gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, ResolveError::Status(404)), "got {err:?}");
    }

    #[test]
    fn test_builder_settings() {
        let resolver = HttpResolver::new()
            .timeout(Duration::from_secs(3))
            .user_agent("custom/1.0");
        assert_eq!(resolver.configured_timeout(), Duration::from_secs(3));
        assert_eq!(resolver.user_agent, "custom/1.0");
    }

    #[test]
    fn test_default_user_agent() {
        assert!(DEFAULT_USER_AGENT.starts_with("inlay/"));
        assert_eq!(HttpResolver::default().user_agent, DEFAULT_USER_AGENT);
    }
}
