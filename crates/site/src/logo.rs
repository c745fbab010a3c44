//! Theme-aware logo.
//!
//! Before the client has mounted, the stored color scheme is unknown, so the
//! light asset is rendered unconditionally. Server output and the first
//! client render therefore always agree.
//!
//! Static pages cannot mount, so [`render_static`] emits the resolved branch
//! for each scheme and lets the theme class the shell script puts on `<html>`
//! choose between them.

use std::str::FromStr;

const LIGHT_ASSET: &str = "/arch-logo.svg";
const DARK_ASSET: &str = "/arch-logo-dark.svg";
const ALT: &str = "Arch Network Logo";
const WIDTH: u32 = 100;
const HEIGHT: u32 = 25;

/// Resolved color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light scheme.
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Parses a stored preference; `system` or anything unknown is unresolved.
    pub fn from_preference(value: &str) -> Option<Self> {
        value.parse().ok()
    }

    /// Logo asset for this scheme.
    pub fn logo_asset(self) -> &'static str {
        match self {
            Theme::Light => LIGHT_ASSET,
            Theme::Dark => DARK_ASSET,
        }
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Render state of the logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoState {
    /// Server render / first client render.
    #[default]
    Unmounted,
    /// Mounted, theme provider has not reported yet.
    MountedUnresolved,
    /// Mounted with a resolved theme.
    MountedResolved(Theme),
}

/// Logo component; reads the theme, never owns it.
#[derive(Debug, Clone, Default)]
pub struct Logo {
    state: LogoState,
}

impl Logo {
    /// A logo that has not mounted yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> LogoState {
        self.state
    }

    /// First client-side run.
    pub fn mount(&mut self) {
        if self.state == LogoState::Unmounted {
            self.state = LogoState::MountedUnresolved;
        }
    }

    /// Theme provider report. Ignored before mount; `None` means unresolved.
    pub fn observe(&mut self, theme: Option<Theme>) {
        if self.state == LogoState::Unmounted {
            return;
        }
        self.state = match theme {
            Some(theme) => LogoState::MountedResolved(theme),
            None => LogoState::MountedUnresolved,
        };
    }

    /// A mounted logo that has resolved `theme`.
    pub fn resolved(theme: Theme) -> Self {
        let mut logo = Self::new();
        logo.mount();
        logo.observe(Some(theme));
        logo
    }

    /// Markup for the current state.
    pub fn render(&self) -> String {
        img(self.asset(), None)
    }

    fn asset(&self) -> &'static str {
        match self.state {
            LogoState::Unmounted | LogoState::MountedUnresolved => LIGHT_ASSET,
            LogoState::MountedResolved(theme) => theme.logo_asset(),
        }
    }
}

/// Two-branch render: default asset until mounted with a resolved theme.
pub fn render_logo(mounted: bool, resolved: Option<Theme>) -> String {
    match (mounted, resolved) {
        (true, Some(theme)) => Logo::resolved(theme).render(),
        _ => Logo::new().render(),
    }
}

/// Both resolved branches for static output; `dark:` variants select one.
pub fn render_static() -> String {
    [
        (Theme::Light, "dark:hidden"),
        (Theme::Dark, "hidden dark:block"),
    ]
    .into_iter()
    .map(|(theme, class)| img(Logo::resolved(theme).asset(), Some(class)))
    .collect()
}

fn img(src: &str, class: Option<&str>) -> String {
    let class = class.map(|c| format!(r#" class="{c}""#)).unwrap_or_default();
    format!(r#"<img src="{src}" alt="{ALT}" width="{WIDTH}" height="{HEIGHT}"{class} />"#)
}
