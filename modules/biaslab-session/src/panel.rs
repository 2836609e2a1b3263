/// Fetch state of one independently-loaded section of the view. Each
/// panel resolves on its own; a failure here never cascades into the
/// others.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Panel<T> {
    /// Nothing fetched yet.
    #[default]
    Empty,
    /// A fetch for the current subject is in flight.
    Loading,
    Ready(T),
    /// The fetch failed; the section renders as unavailable with the
    /// surfaced message.
    Unavailable(String),
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Panel::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Panel::Empty)
    }
}
