//! CLI command implementations.

pub(crate) mod classify;
pub(crate) mod render;

pub(crate) use classify::ClassifyArgs;
pub(crate) use render::RenderArgs;

use inlay_config::ResolverConfig;
use inlay_rewriter::{HttpResolver, IdResolver, NoResolver, ProfileTarget, ResolveError};

/// Resolver selected by the `[resolver]` configuration.
#[derive(Debug, Clone)]
pub(crate) enum ConfiguredResolver {
    Http(HttpResolver),
    Disabled(NoResolver),
}

impl ConfiguredResolver {
    /// Build the resolver described by `config`.
    pub(crate) fn from_config(config: &ResolverConfig) -> Self {
        if config.enabled {
            Self::Http(
                HttpResolver::new()
                    .timeout(config.timeout())
                    .user_agent(config.user_agent.clone()),
            )
        } else {
            Self::Disabled(NoResolver)
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl IdResolver for ConfiguredResolver {
    async fn resolve(&self, target: &ProfileTarget) -> Result<String, ResolveError> {
        match self {
            Self::Http(resolver) => resolver.resolve(target).await,
            Self::Disabled(resolver) => resolver.resolve(target).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_from_config_enabled_uses_http() {
        let config = ResolverConfig {
            enabled: true,
            timeout_secs: 4,
            user_agent: "test/1".to_owned(),
        };

        let resolver = ConfiguredResolver::from_config(&config);

        assert!(resolver.is_enabled());
        let ConfiguredResolver::Http(http) = resolver else {
            panic!("expected HTTP resolver");
        };
        assert_eq!(http.configured_timeout(), Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_from_config_disabled_never_resolves() {
        let config = ResolverConfig {
            enabled: false,
            ..ResolverConfig::default()
        };

        let resolver = ConfiguredResolver::from_config(&config);

        assert!(!resolver.is_enabled());
        let err = resolver
            .resolve(&ProfileTarget::new("dev", "game"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Disabled));
    }
}
