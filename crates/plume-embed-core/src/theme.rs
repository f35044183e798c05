//! Host theme tokens and their CSS class mapping.
//!
//! The host publishes its theme as an attribute on the document root element
//! or body. The adapter mirrors that token as a class on its own root so the
//! engine's styles can follow the host theme without the engine knowing
//! anything about the host.

/// Attribute carrying the host theme token.
pub const THEME_ATTRIBUTE: &str = "data-bs-theme";

/// Attributes that can encode the host theme.
///
/// Mutation observation is scoped to exactly these; hosts that swap theme by
/// rewriting `class` still trigger a resync.
pub const THEME_SOURCE_ATTRIBUTES: [&str; 2] = [THEME_ATTRIBUTE, "class"];

/// Every class the adapter may place on its root. A resync removes all of
/// them before applying the current one.
pub const THEME_CLASSES: [&str; 3] = ["theme-light", "theme-dark", "theme-system"];

/// A recognized host theme token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeToken {
    Light,
    Dark,
    System,
}

impl ThemeToken {
    /// Parse a raw attribute value. Unknown or empty values carry no theme.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// The CSS class mirroring this token.
    pub fn class(self) -> &'static str {
        match self {
            Self::Light => "theme-light",
            Self::Dark => "theme-dark",
            Self::System => "theme-system",
        }
    }
}

/// Resolve the effective token from attribute readings in priority order.
///
/// The first non-empty reading wins, even when it parses to no known token —
/// a host that sets an unrecognized value on the root element has still made
/// a choice, and a recognized value further down the list must not override
/// it.
pub fn resolve_theme_token<I, S>(readings: I) -> Option<ThemeToken>
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    readings
        .into_iter()
        .flatten()
        .find(|reading| !reading.as_ref().trim().is_empty())
        .and_then(|reading| ThemeToken::parse(reading.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        assert_eq!(ThemeToken::parse("light"), Some(ThemeToken::Light));
        assert_eq!(ThemeToken::parse("dark"), Some(ThemeToken::Dark));
        assert_eq!(ThemeToken::parse("system"), Some(ThemeToken::System));
    }

    #[test]
    fn rejects_unknown_and_empty() {
        assert_eq!(ThemeToken::parse(""), None);
        assert_eq!(ThemeToken::parse("  "), None);
        assert_eq!(ThemeToken::parse("solarized"), None);
    }

    #[test]
    fn class_mirrors_token() {
        assert_eq!(ThemeToken::Dark.class(), "theme-dark");
        assert!(THEME_CLASSES.contains(&ThemeToken::Light.class()));
        assert!(THEME_CLASSES.contains(&ThemeToken::System.class()));
    }

    #[test]
    fn first_reading_wins() {
        let token = resolve_theme_token([Some("dark"), Some("light")]);
        assert_eq!(token, Some(ThemeToken::Dark));
    }

    #[test]
    fn empty_readings_are_skipped() {
        let token = resolve_theme_token([None, Some(""), Some("light")]);
        assert_eq!(token, Some(ThemeToken::Light));
    }

    #[test]
    fn unknown_first_reading_shadows_later_ones() {
        let token = resolve_theme_token([Some("solarized"), Some("dark")]);
        assert_eq!(token, None);
    }

    #[test]
    fn no_readings_no_token() {
        assert_eq!(resolve_theme_token(Vec::<Option<&str>>::new()), None);
    }
}
