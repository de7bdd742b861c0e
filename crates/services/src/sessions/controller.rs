use study_core::model::StudyMode;

use super::store::SessionStore;

/// Which screen the study view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StudyViewState {
    #[default]
    Selecting,
    Active(StudyMode),
}

impl StudyViewState {
    #[must_use]
    pub fn mode(self) -> Option<StudyMode> {
        match self {
            Self::Selecting => None,
            Self::Active(mode) => Some(mode),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyViewEvent {
    /// A mode card was clicked.
    SelectMode(StudyMode),
    /// The back button was pressed.
    Back,
    Escape,
    /// A mode keyboard shortcut fired.
    Shortcut(StudyMode),
}

/// Store effect of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    /// Start a fresh attempt: clear the mode's answers and feedback.
    Entered(StudyMode),
    Left,
}

impl ModeChange {
    pub async fn apply(self, store: &SessionStore) {
        match self {
            Self::Entered(mode) => store.begin_attempt(mode).await,
            Self::Left => store.set_current_mode(None).await,
        }
    }
}

/// Drives mode selection for the study view.
///
/// Transitions are pure; the returned `ModeChange` carries the store update.
#[derive(Debug, Clone, Default)]
pub struct StudyViewController {
    state: StudyViewState,
}

impl StudyViewController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> StudyViewState {
        self.state
    }

    /// Apply `event`, returning the store update it implies, if any.
    pub fn handle(&mut self, event: StudyViewEvent) -> Option<ModeChange> {
        let (next, change) = transition(self.state, event);
        if next != self.state {
            log::debug!("study view {:?} -> {next:?} on {event:?}", self.state);
        }
        self.state = next;
        change
    }

    /// `handle` followed by applying the change to `store`.
    pub async fn dispatch(&mut self, store: &SessionStore, event: StudyViewEvent) {
        if let Some(change) = self.handle(event) {
            change.apply(store).await;
        }
    }

    /// Reset the view on mount; a restored current mode is not resumed.
    pub async fn mount(&mut self, store: &SessionStore) {
        self.state = StudyViewState::Selecting;
        if store.current_mode().is_some() {
            store.set_current_mode(None).await;
        }
    }
}

fn transition(
    state: StudyViewState,
    event: StudyViewEvent,
) -> (StudyViewState, Option<ModeChange>) {
    match (state, event) {
        (StudyViewState::Active(current), StudyViewEvent::SelectMode(mode) | StudyViewEvent::Shortcut(mode))
            if current == mode =>
        {
            (state, None)
        }
        (_, StudyViewEvent::SelectMode(mode) | StudyViewEvent::Shortcut(mode)) => (
            StudyViewState::Active(mode),
            Some(ModeChange::Entered(mode)),
        ),
        (StudyViewState::Active(_), StudyViewEvent::Back | StudyViewEvent::Escape) => {
            (StudyViewState::Selecting, Some(ModeChange::Left))
        }
        (StudyViewState::Selecting, StudyViewEvent::Back | StudyViewEvent::Escape) => (state, None),
    }
}

/// Map a key press to a study view event.
///
/// Shortcuts need Ctrl (or Cmd); Escape needs no modifier. Nothing fires while
/// focus is in a text input.
#[must_use]
pub fn shortcut_event(key: &str, ctrl_or_meta: bool, in_text_input: bool) -> Option<StudyViewEvent> {
    if in_text_input {
        return None;
    }
    if key == "Escape" {
        return Some(StudyViewEvent::Escape);
    }
    if !ctrl_or_meta {
        return None;
    }
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            StudyMode::from_shortcut(c.to_ascii_lowercase()).map(StudyViewEvent::Shortcut)
        }
        _ => None,
    }
}
