use serde::Serialize;

pub const THEME_KEY: &str = "site-theme";
pub const DARK_CLASS: &str = "dark";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn from_dark_marker(has_dark_class: bool) -> Self {
        if has_dark_class {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Durable home of the theme preference.
pub trait ThemeStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, value: &str);
}

/// `None` only when nothing is stored. Any stored value other than `dark`
/// reads as light.
pub fn read_stored_theme(store: &impl ThemeStore) -> Option<Theme> {
    let value = store.load().filter(|value| !value.is_empty())?;
    Some(Theme::from_str(&value).unwrap_or(Theme::Light))
}

/// Stored preference wins over the platform signal; light is the fallback.
pub fn resolve_theme(stored: Option<Theme>, system_prefers_dark: bool) -> Theme {
    stored.unwrap_or(if system_prefers_dark {
        Theme::Dark
    } else {
        Theme::Light
    })
}

/// Flips the applied theme and persists the result unconditionally.
pub fn toggle_theme(current: Theme, store: &mut impl ThemeStore) -> Theme {
    let next = current.toggled();
    store.save(next.as_str());
    next
}
