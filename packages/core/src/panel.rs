use strum::Display;

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum PanelState {
    Hidden,
    Opening,
    Active,
    Closing,
}

impl PanelState {
    /// Is this the panel the user last asked to see?
    pub fn is_open(self) -> bool {
        matches!(self, Self::Opening | Self::Active)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum PanelEvent {
    /// The user selected this panel.
    Open,
    /// Another panel was selected.
    Yield,
    /// Everything is being closed.
    Dismiss,
    /// The reveal animation has started.
    Started,
    /// The current animation finished.
    Completed,
}

/// Identifies one open/close cycle of a panel.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Clone, Debug)]
pub struct Panel {
    state: PanelState,
    epoch: Epoch,
    marked: bool,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            state: PanelState::Hidden,
            epoch: Epoch::default(),
            marked: false,
        }
    }
}

impl Panel {
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Does the panel currently carry the active marker?
    pub fn is_marked(&self) -> bool {
        self.marked
    }

    pub(crate) fn set_marked(&mut self, marked: bool) {
        self.marked = marked;
    }

    /// Apply `event`, returning the new state, or `None` if the event doesn't
    /// apply in the current state.
    ///
    /// `Open`, `Yield` and `Dismiss` start a new epoch.
    pub fn handle(&mut self, event: PanelEvent) -> Option<PanelState> {
        use PanelEvent as E;
        use PanelState as S;

        let next = match (self.state, event) {
            (S::Hidden | S::Closing, E::Open) => S::Opening,
            (S::Opening | S::Active, E::Yield) => S::Closing,
            (S::Opening | S::Active | S::Closing, E::Dismiss) => S::Closing,
            (S::Opening, E::Started) => S::Opening,
            (S::Opening, E::Completed) => S::Active,
            (S::Closing, E::Completed) => S::Hidden,
            _ => return None,
        };

        if matches!(event, E::Open | E::Yield | E::Dismiss) {
            self.epoch = self.epoch.next();
        }

        self.state = next;
        Some(next)
    }
}
