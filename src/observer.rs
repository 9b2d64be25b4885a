//! Viewport-intersection rules shared by the timeline and fade-in effects.

/// Whether an element keeps being watched after it first becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchMode {
    /// Marker follows intersection for the element's whole lifetime.
    Toggle,
    /// Marker is set on first entry, then the element is dropped.
    Once,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryAction {
    Mark,
    Unmark,
    MarkAndUnwatch,
    Ignore,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WatchSpec {
    pub mode: WatchMode,
    pub marker_class: &'static str,
    pub root_margin: &'static str,
}

impl WatchSpec {
    pub fn decide(&self, is_intersecting: bool) -> EntryAction {
        match (self.mode, is_intersecting) {
            (WatchMode::Toggle, true) => EntryAction::Mark,
            (WatchMode::Toggle, false) => EntryAction::Unmark,
            (WatchMode::Once, true) => EntryAction::MarkAndUnwatch,
            (WatchMode::Once, false) => EntryAction::Ignore,
        }
    }
}

/// One observed element as the browser would leave it.
#[cfg(test)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Watched {
    pub marked: bool,
    pub unwatched: bool,
    pub marks: usize,
}

#[cfg(test)]
impl Watched {
    /// Feeds one intersection notification; unwatched elements get none.
    pub fn notify(&mut self, spec: &WatchSpec, is_intersecting: bool) {
        if self.unwatched {
            return;
        }

        match spec.decide(is_intersecting) {
            EntryAction::Mark => self.mark(),
            EntryAction::Unmark => self.marked = false,
            EntryAction::MarkAndUnwatch => {
                self.mark();
                self.unwatched = true;
            }
            EntryAction::Ignore => {}
        }
    }

    fn mark(&mut self) {
        if !self.marked {
            self.marks += 1;
        }
        self.marked = true;
    }
}
