//! Resolution of the configuration record from environment input.

use std::collections::BTreeSet;

use crate::defaults::{
    DEFAULT_API_URL, DEFAULT_WS_URL, DEVELOPMENT_MODE, ENV_API_URL, ENV_MODE, ENV_WS_URL,
    IMAGE_DOMAIN, REDIRECT_DESTINATION, REDIRECT_SOURCE, SESSION_COOKIE,
};
use crate::env::Environment;
use crate::model::{Condition, ConfigurationRecord, OutputMode, RedirectRule};

/// Produce the configuration record for `env`.
///
/// Never fails: a missing or empty override falls back to its literal
/// default, so both public URLs are always non-empty.
#[must_use]
pub fn resolve(env: &Environment) -> ConfigurationRecord {
    ConfigurationRecord {
        output_mode: OutputMode::Standalone,
        public_api_url: env.non_empty(ENV_API_URL).unwrap_or(DEFAULT_API_URL).to_string(),
        public_ws_url: env.non_empty(ENV_WS_URL).unwrap_or(DEFAULT_WS_URL).to_string(),
        strict_mode_enabled: true,
        image_allowed_domains: BTreeSet::from([IMAGE_DOMAIN.to_string()]),
        images_unoptimized: env.get(ENV_MODE) == Some(DEVELOPMENT_MODE),
        redirect_rules: vec![
            RedirectRule::new(REDIRECT_SOURCE, REDIRECT_DESTINATION, false)
                .when(Condition::cookie(SESSION_COOKIE)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_empty_environment() {
        let config = resolve(&Environment::new());
        assert_eq!(config.output_mode(), OutputMode::Standalone);
        assert_eq!(config.public_api_url(), "http://localhost:8000");
        assert_eq!(config.public_ws_url(), "ws://localhost:8000/ws");
        assert!(config.strict_mode_enabled());
        assert!(!config.images_unoptimized());
        assert_eq!(config.redirect_rules().len(), 1);
    }

    #[test]
    fn overrides_are_used_verbatim() {
        let env = Environment::new()
            .with(ENV_API_URL, "https://x.test")
            .with(ENV_WS_URL, "wss://x.test/socket/");
        let config = resolve(&env);
        assert_eq!(config.public_api_url(), "https://x.test");
        assert_eq!(config.public_ws_url(), "wss://x.test/socket/");
    }

    #[test]
    fn empty_overrides_fall_back() {
        let env = Environment::new().with(ENV_API_URL, "").with(ENV_WS_URL, "");
        let config = resolve(&env);
        assert_eq!(config.public_api_url(), DEFAULT_API_URL);
        assert_eq!(config.public_ws_url(), DEFAULT_WS_URL);
    }

    #[test]
    fn images_unoptimized_only_in_exact_development_mode() {
        for (mode, expected) in [
            (Some("development"), true),
            (Some("production"), false),
            (Some("Development"), false),
            (Some("development "), false),
            (Some(""), false),
            (None, false),
        ] {
            let env = mode.map_or_else(Environment::new, |value| {
                Environment::new().with(ENV_MODE, value)
            });
            assert_eq!(
                resolve(&env).images_unoptimized(),
                expected,
                "mode {mode:?}"
            );
        }
    }

    #[test]
    fn image_domains_ignore_environment() {
        let env = Environment::new()
            .with(ENV_MODE, "development")
            .with(ENV_API_URL, "https://cdn.example.com");
        let expected = BTreeSet::from(["localhost".to_string()]);
        assert_eq!(resolve(&env).image_allowed_domains(), &expected);
        assert_eq!(resolve(&Environment::new()).image_allowed_domains(), &expected);
    }

    #[test]
    fn redirect_rule_literals() {
        let config = resolve(&Environment::new());
        let rule = &config.redirect_rules()[0];
        assert_eq!(rule.source, "/");
        assert_eq!(rule.destination, "/dashboard");
        assert!(!rule.permanent);
        assert_eq!(rule.conditions, vec![Condition::cookie("token")]);
    }

    #[test]
    fn public_env_and_image_checks() {
        let config = resolve(&Environment::new().with(ENV_API_URL, "https://x.test"));
        let public = config.public_env();
        assert_eq!(public.get("NEXT_PUBLIC_API_URL"), Some(&"https://x.test"));
        assert_eq!(
            public.get("NEXT_PUBLIC_WS_URL"),
            Some(&"ws://localhost:8000/ws")
        );

        assert!(config.is_image_allowed("http://localhost:8000/avatars/1.png"));
        assert!(config.is_image_allowed("https://localhost/a.webp"));
        assert!(!config.is_image_allowed("https://images.example.com/a.png"));
        assert!(!config.is_image_allowed("/relative/path.png"));
        assert!(!config.is_image_allowed("not a url"));
    }
}
