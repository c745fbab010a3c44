//! Legacy URL redirect table.
//!
//! Rules are compiled once at configuration load and evaluated in declaration
//! order; the first rule whose source template matches the request path wins.

mod pattern;
mod profiles;

pub use profiles::RedirectProfile;

use crate::error::SiteError;
use pattern::{DestinationPattern, SourcePattern};
use serde::{Deserialize, Serialize};

/// A single `(source, destination, permanent)` redirect declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RedirectRule {
    /// Source template, e.g. `/docs/Quick-Start/:path*`.
    pub source: String,
    /// Destination template, may reference captures from `source`.
    pub destination: String,
    /// Permanent (308) when true, temporary (307) otherwise.
    pub permanent: bool,
}

impl RedirectRule {
    /// Creates a rule.
    pub fn new(source: impl Into<String>, destination: impl Into<String>, permanent: bool) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            permanent,
        }
    }

    /// Creates a permanent rule.
    pub fn permanent(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self::new(source, destination, true)
    }

    /// HTTP status this rule answers with.
    pub fn status(&self) -> RedirectStatus {
        RedirectStatus::from_permanent(self.permanent)
    }
}

/// Redirect permanence, mapped onto the standard HTTP redirect codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedirectStatus {
    /// 308 Permanent Redirect (cacheable).
    Permanent,
    /// 307 Temporary Redirect.
    Temporary,
}

impl RedirectStatus {
    /// Maps the `permanent` flag of a rule.
    pub fn from_permanent(permanent: bool) -> Self {
        if permanent {
            Self::Permanent
        } else {
            Self::Temporary
        }
    }

    /// HTTP status code.
    pub fn code(self) -> u16 {
        match self {
            Self::Permanent => 308,
            Self::Temporary => 307,
        }
    }
}

/// Result of looking a request path up in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// No rule matched; normal route resolution proceeds.
    NoMatch,
    /// A rule matched.
    Redirect {
        /// Value for the `Location` header.
        location: String,
        /// Redirect status.
        status: RedirectStatus,
    },
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: RedirectRule,
    source: SourcePattern,
    destination: DestinationPattern,
}

impl CompiledRule {
    fn compile(rule: RedirectRule) -> Result<Self, SiteError> {
        let source = SourcePattern::parse(&rule.source)?;
        let destination = DestinationPattern::parse(&rule.destination)?;

        if let Some(missing) = destination
            .capture_names()
            .find(|name| !source.has_capture(name))
        {
            return Err(SiteError::config(format!(
                "redirect `{}` -> `{}` references unknown capture `:{missing}`",
                rule.source, rule.destination
            )));
        }
        if rule.source == rule.destination {
            return Err(SiteError::config(format!(
                "redirect `{}` points at itself",
                rule.source
            )));
        }

        Ok(Self {
            rule,
            source,
            destination,
        })
    }
}

/// Compiled, immutable, ordered redirect table.
#[derive(Debug, Clone, Default)]
pub struct RedirectTable {
    rules: Vec<CompiledRule>,
}

impl RedirectTable {
    /// Compiles a rule list. Any malformed rule fails the whole table.
    pub fn compile(rules: impl IntoIterator<Item = RedirectRule>) -> Result<Self, SiteError> {
        let rules = rules
            .into_iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("compiled {} redirect rules", rules.len());
        Ok(Self { rules })
    }

    /// Compiles one of the built-in rule sets.
    pub fn from_profile(profile: RedirectProfile) -> Result<Self, SiteError> {
        Self::compile(profile.rules())
    }

    /// Looks up a request path. A query string is ignored for matching and
    /// carried over onto the redirect location.
    pub fn resolve(&self, request: &str) -> RedirectOutcome {
        let (path, query) = match request.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (request, None),
        };

        for compiled in &self.rules {
            let Some(captures) = compiled.source.matches(path) else {
                continue;
            };
            let mut location = compiled.destination.expand(&captures);
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                location.push(if location.contains('?') { '&' } else { '?' });
                location.push_str(query);
            }
            log::debug!(
                "redirect {request} -> {location} via `{}`",
                compiled.rule.source
            );
            return RedirectOutcome::Redirect {
                location,
                status: compiled.rule.status(),
            };
        }

        RedirectOutcome::NoMatch
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &RedirectRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full() -> RedirectTable {
        RedirectTable::from_profile(RedirectProfile::Full).expect("built-in table compiles")
    }

    fn redirect(location: &str) -> RedirectOutcome {
        RedirectOutcome::Redirect {
            location: location.to_string(),
            status: RedirectStatus::Permanent,
        }
    }

    #[test]
    fn root_redirects_to_docs() {
        assert_eq!(full().resolve("/"), redirect("/docs"));
    }

    #[test]
    fn mixed_case_sections_are_lowercased() {
        let table = full();
        assert_eq!(
            table.resolve("/docs/Quick-Start/intro"),
            redirect("/docs/quick-start/intro")
        );
        assert_eq!(
            table.resolve("/docs/Core-Concepts/accounts/owner"),
            redirect("/docs/core-concepts/accounts/owner")
        );
        assert_eq!(
            table.resolve("/docs/DeFi-Applications/amm"),
            redirect("/docs/defi-applications/amm")
        );
    }

    #[test]
    fn encoded_and_literal_space_reach_same_destination() {
        let table = full();
        assert_eq!(
            table.resolve("/docs/APIs%20and%20Tools/auth"),
            redirect("/docs/tools-apis/auth")
        );
        assert_eq!(
            table.resolve("/docs/APIs and Tools/auth"),
            redirect("/docs/tools-apis/auth")
        );
    }

    #[test]
    fn unmatched_path_falls_through() {
        assert_eq!(full().resolve("/docs/apis-and-tools"), RedirectOutcome::NoMatch);
        assert_eq!(full().resolve("/docs/quick-start/intro"), RedirectOutcome::NoMatch);
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = RedirectTable::compile([
            RedirectRule::permanent("/old/:path*", "/first/:path*"),
            RedirectRule::new("/old/:page", "/second/:page", false),
        ])
        .unwrap();
        assert_eq!(table.resolve("/old/x"), redirect("/first/x"));
    }

    #[test]
    fn temporary_rules_use_307() {
        let table = RedirectTable::compile([RedirectRule::new("/beta", "/docs", false)]).unwrap();
        let RedirectOutcome::Redirect { status, .. } = table.resolve("/beta") else {
            panic!("expected redirect");
        };
        assert_eq!(status, RedirectStatus::Temporary);
        assert_eq!(status.code(), 307);
        assert_eq!(RedirectStatus::Permanent.code(), 308);
    }

    #[test]
    fn query_string_is_carried_over() {
        assert_eq!(
            full().resolve("/docs/Quick-Start/intro?ref=blog"),
            redirect("/docs/quick-start/intro?ref=blog")
        );
        assert_eq!(full().resolve("/?"), redirect("/docs"));
    }

    #[test]
    fn unknown_destination_capture_is_a_configuration_error() {
        let err =
            RedirectTable::compile([RedirectRule::permanent("/old/:path*", "/new/:slug*")])
                .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains(":slug"), "{err}");
    }

    #[test]
    fn self_redirect_is_rejected() {
        let err = RedirectTable::compile([RedirectRule::permanent(
            "/docs/Quick-Start/:path*",
            "/docs/Quick-Start/:path*",
        )])
        .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn rules_keep_declaration_order() {
        let sources: Vec<_> = full().rules().map(|r| r.source.clone()).collect();
        assert_eq!(sources.first().map(String::as_str), Some("/"));
        assert_eq!(
            sources.last().map(String::as_str),
            Some("/docs/APIs%20and%20Tools/:path*")
        );
    }
}
