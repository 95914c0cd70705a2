/// Remote data with an explicit "not yet loaded" state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    NotLoaded,
    Loading,
    Ready(T),
    /// The last load failed; no stale value is kept.
    Failed(String),
}

impl<T> Loadable<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Loadable::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loadable::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T: Default + Clone> Loadable<T> {
    /// The loaded value, or an empty one while loading or after a failure.
    pub fn value_or_default(&self) -> T {
        self.ready().cloned().unwrap_or_default()
    }
}
