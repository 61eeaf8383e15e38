//! Presence marker left in `localStorage` by the backend SDK.
//!
//! The marker is a hint about a previous login, never proof of one. This
//! module only reads it; the SDK owns writes.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

/// Storage key the backend SDK writes its cookie fallback under.
pub const DEFAULT_MARKER_KEY: &str = "cookieFallback";

/// Value the SDK leaves behind once its session list is empty.
const EMPTY_SENTINEL: &str = "[]";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenceMarker {
    Absent,
    Empty,
    Token(String),
}

impl PresenceMarker {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => Self::Absent,
            Some(EMPTY_SENTINEL) => Self::Empty,
            Some(token) => Self::Token(token.to_owned()),
        }
    }

    /// Whether a session probably exists. Only `Token` says yes.
    pub fn hints_session(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

/// Read-only key/value lookup for presence markers.
pub trait MarkerStore {
    fn get(&self, key: &str) -> Option<String>;

    fn marker(&self, key: &str) -> PresenceMarker {
        PresenceMarker::parse(self.get(key).as_deref())
    }
}

/// Browser `localStorage`. Reads nothing during SSR.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageMarkers;

impl MarkerStore for LocalStorageMarkers {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }
}
