//! Site configuration loaded from `archdocs.yaml`.

use archdocs_core::{RedirectProfile, RedirectRule, RedirectTable, SiteError};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration file name at the project root.
pub const CONFIG_FILE: &str = "archdocs.yaml";
/// Environment variable selecting the active environment.
pub const ENV_VAR: &str = "ARCHDOCS_ENV";
/// Environment used when none is selected.
pub const DEFAULT_ENVIRONMENT: &str = "production";

/// Where an environment's redirect rules come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RedirectSource {
    /// A built-in profile (`full`, `root-only`, `none`).
    Profile(RedirectProfile),
    /// An explicit rule list.
    Rules(Vec<RedirectRule>),
}

impl Default for RedirectSource {
    fn default() -> Self {
        Self::Profile(RedirectProfile::Full)
    }
}

impl RedirectSource {
    /// Compiles the rules into a table.
    pub fn compile(&self) -> Result<RedirectTable, SiteError> {
        match self {
            Self::Profile(profile) => RedirectTable::from_profile(*profile),
            Self::Rules(rules) => RedirectTable::compile(rules.iter().cloned()),
        }
    }
}

/// Per-environment settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// Redirect rules for this environment.
    pub redirects: RedirectSource,
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Default page description.
    pub description: Option<String>,
    /// Document language.
    pub lang: String,
    /// Browser theme color.
    pub theme_color: String,
    /// Docs content directory (alias-aware).
    pub content_dir: String,
    /// Generated manifest directory (alias-aware).
    pub manifest_dir: String,
    /// Static output directory.
    pub out_dir: String,
    /// Static assets copied verbatim.
    pub public_dir: String,
    /// URL prefix of every docs page.
    pub base_url: String,
    /// Named environments.
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert(DEFAULT_ENVIRONMENT.to_string(), EnvironmentConfig::default());
        Self {
            title: "Arch Network".to_string(),
            description: None,
            lang: "en".to_string(),
            theme_color: "#4E3AF1".to_string(),
            content_dir: "content/docs".to_string(),
            manifest_dir: "@/.source".to_string(),
            out_dir: "out".to_string(),
            public_dir: "public".to_string(),
            base_url: "/docs".to_string(),
            environments,
        }
    }
}

impl SiteConfig {
    /// Parses YAML configuration.
    pub fn from_yaml(source: &str) -> Result<Self, SiteError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
            .map_err(|err| SiteError::config(format!("invalid {CONFIG_FILE}: {err}")))
    }

    /// Loads `archdocs.yaml` from `root`, or the defaults when it is absent.
    pub fn load(root: &Path) -> Result<Self, SiteError> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            log::debug!("no {CONFIG_FILE} in {}, using defaults", root.display());
            return Ok(Self::default());
        }
        let source = std::fs::read_to_string(&path)?;
        Self::from_yaml(&source)
    }

    /// Redirect table for `environment`. Unknown environments get the full
    /// profile.
    pub fn redirect_table(&self, environment: &str) -> Result<RedirectTable, SiteError> {
        let table = match self.environments.get(environment) {
            Some(env) => env.redirects.compile()?,
            None => {
                log::info!("environment `{environment}` not configured, using full redirects");
                RedirectTable::from_profile(RedirectProfile::Full)?
            }
        };
        log::info!(
            "environment `{environment}`: {} redirect rules",
            table.len()
        );
        Ok(table)
    }
}

/// Active environment: explicit choice, then `ARCHDOCS_ENV`, then `production`.
pub fn active_environment(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(ENV_VAR).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archdocs_core::RedirectOutcome;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_when_empty() {
        let config = SiteConfig::from_yaml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.redirect_table("production").unwrap().len(), 8);
    }

    #[test]
    fn environments_pick_profiles_or_rules() {
        let config = SiteConfig::from_yaml(
            r#"
base_url: /docs
environments:
  production:
    redirects: full
  preview:
    redirects: root-only
  local:
    redirects:
      - source: /old/:slug
        destination: /docs/:slug
        permanent: false
"#,
        )
        .unwrap();
        assert_eq!(config.redirect_table("preview").unwrap().len(), 1);
        let local = config.redirect_table("local").unwrap();
        assert_eq!(
            local.resolve("/old/intro"),
            RedirectOutcome::Redirect {
                location: "/docs/intro".to_string(),
                status: archdocs_core::RedirectStatus::Temporary,
            }
        );
        assert_eq!(config.redirect_table("staging").unwrap().len(), 8);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = SiteConfig::from_yaml("titel: Typo\n").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn bad_rules_fail_at_table_compile() {
        let config = SiteConfig::from_yaml(
            "environments:\n  production:\n    redirects:\n      - {source: /a, destination: /b/:missing, permanent: true}\n",
        )
        .unwrap();
        assert!(config.redirect_table("production").unwrap_err().is_configuration());
    }

    #[test]
    fn explicit_environment_wins() {
        assert_eq!(active_environment(Some("preview")), "preview");
    }
}
