//! Built-in redirect rule sets, one per deployment flavour.

use super::RedirectRule;
use crate::error::SiteError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Historical mixed-case section folders and their lowercase replacements.
const LEGACY_SECTIONS: &[(&str, &str)] = &[
    ("Quick-Start", "quick-start"),
    ("Setup-Infrastructure", "setup-infrastructure"),
    ("Core-Concepts", "core-concepts"),
    ("DeFi-Applications", "defi-applications"),
    ("Help-Resources", "help-resources"),
];

static FULL: Lazy<Vec<RedirectRule>> = Lazy::new(|| {
    let mut rules = vec![root_rule()];
    rules.extend(LEGACY_SECTIONS.iter().map(|(old, new)| {
        RedirectRule::permanent(format!("/docs/{old}/:path*"), format!("/docs/{new}/:path*"))
    }));
    // The old folder name had a space; links exist in both spellings.
    rules.push(RedirectRule::permanent(
        "/docs/APIs and Tools/:path*",
        "/docs/tools-apis/:path*",
    ));
    rules.push(RedirectRule::permanent(
        "/docs/APIs%20and%20Tools/:path*",
        "/docs/tools-apis/:path*",
    ));
    rules
});

fn root_rule() -> RedirectRule {
    RedirectRule::permanent("/", "/docs")
}

/// Named rule set selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RedirectProfile {
    /// Root redirect plus the full legacy path table.
    #[default]
    Full,
    /// Only `/` → `/docs`.
    RootOnly,
    /// No redirects at all.
    None,
}

impl RedirectProfile {
    /// Rules of this profile in evaluation order.
    pub fn rules(self) -> Vec<RedirectRule> {
        match self {
            Self::Full => FULL.clone(),
            Self::RootOnly => vec![root_rule()],
            Self::None => Vec::new(),
        }
    }

    /// Configuration name of the profile.
    pub fn name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::RootOnly => "root-only",
            Self::None => "none",
        }
    }
}

impl FromStr for RedirectProfile {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "root-only" => Ok(Self::RootOnly),
            "none" => Ok(Self::None),
            other => Err(SiteError::config(format!(
                "unknown redirect profile `{other}` (expected full, root-only or none)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_profile_has_eight_rules() {
        let rules = RedirectProfile::Full.rules();
        assert_eq!(rules.len(), 8);
        assert!(rules.iter().all(|r| r.permanent));
    }

    #[test]
    fn smaller_profiles() {
        assert_eq!(RedirectProfile::RootOnly.rules(), vec![root_rule()]);
        assert!(RedirectProfile::None.rules().is_empty());
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for profile in [
            RedirectProfile::Full,
            RedirectProfile::RootOnly,
            RedirectProfile::None,
        ] {
            assert_eq!(profile.name().parse::<RedirectProfile>().unwrap(), profile);
        }
        assert!("legacy".parse::<RedirectProfile>().is_err());
    }
}
