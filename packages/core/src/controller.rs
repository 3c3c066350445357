use derive_more::{Display, From, Into};
use futures_signals::signal::{Mutable, Signal};

use crate::{
    panel::{Epoch, Panel, PanelEvent, PanelState},
    tween::{Pose, Property, Tween},
    Config,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, From, Into)]
pub struct PanelId(usize);

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Target {
    Background,
    Content(PanelId),
}

/// Tags a tween so its progress can be routed back to the panel that asked
/// for it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Cue {
    pub panel: PanelId,
    pub epoch: Epoch,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct WrapHideTicket(Epoch);

/// Something for the view to do.
#[derive(Clone, PartialEq, Debug)]
pub enum Effect {
    ShowWrap,
    HideWrap,
    Animate {
        target: Target,
        tween: Tween,
        cue: Option<Cue>,
    },
    /// Add or remove the active marker, and make the panel interactive or
    /// inert.
    Mark { panel: PanelId, active: bool },
    /// Call [`Controller::wrap_hide_due`] with `ticket` after `delay_ms`.
    ScheduleWrapHide { ticket: WrapHideTicket, delay_ms: u32 },
    CancelWrapHide,
}

/// The dropdown's state, independent of any DOM.
///
/// Each input returns the [`Effect`]s the view should carry out. Animation
/// progress and timers are fed back in through [`Controller::started`],
/// [`Controller::completed`] and [`Controller::wrap_hide_due`].
pub struct Controller {
    config: Config,
    panels: Vec<Panel>,
    open: Mutable<Option<PanelId>>,
    background_epoch: Epoch,
}

impl Controller {
    pub fn new(panel_count: usize, config: Config) -> Self {
        Self {
            config,
            panels: vec![Panel::default(); panel_count],
            open: Mutable::new(None),
            background_epoch: Epoch::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn panel_ids(&self) -> impl Iterator<Item = PanelId> {
        (0..self.panels.len()).map(PanelId)
    }

    /// The poses every target should be set to before anything is shown.
    pub fn initial_poses(&self) -> Vec<(Target, Pose)> {
        let mut poses = vec![(Target::Background, self.background_hidden())];
        poses.extend(
            self.panel_ids()
                .map(|id| (Target::Content(id), self.content_hidden())),
        );
        poses
    }

    pub fn open_panel(&self) -> Option<PanelId> {
        self.open.get()
    }

    pub fn open_signal(&self) -> impl Signal<Item = Option<PanelId>> {
        self.open.signal()
    }

    pub fn background_visible(&self) -> bool {
        self.open.get().is_some()
    }

    pub fn state(&self, id: PanelId) -> Option<PanelState> {
        self.panel(id).map(Panel::state)
    }

    pub fn is_marked(&self, id: PanelId) -> bool {
        self.panel(id).is_some_and(Panel::is_marked)
    }

    /// The user clicked the trigger for `id`.
    pub fn toggle(&mut self, id: PanelId) -> Vec<Effect> {
        let Some(panel) = self.panel(id) else {
            return Vec::new();
        };

        if panel.state().is_open() {
            return self.dismiss();
        }

        let mut effects = Vec::new();

        match self.open.get() {
            None => self.show_background(&mut effects),
            Some(current) => self.yield_panel(current, &mut effects),
        }

        self.reveal(id, &mut effects);
        self.open.set(Some(id));

        effects
    }

    /// Close everything. Does nothing if no panel is open.
    pub fn dismiss(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.open.get().is_none() {
            return effects;
        }

        for id in self.panel_ids() {
            self.mark(id, false, &mut effects);

            if self.panel_mut(id).handle(PanelEvent::Dismiss).is_some() {
                effects.push(self.hide_content(id));
            }
        }

        self.background_epoch = self.background_epoch.next();
        effects.push(Effect::Animate {
            target: Target::Background,
            tween: self.background_tween(self.background_hidden()),
            cue: None,
        });
        effects.push(Effect::ScheduleWrapHide {
            ticket: WrapHideTicket(self.background_epoch),
            delay_ms: self.config.wrap_hide_delay_ms,
        });
        self.open.set(None);

        effects
    }

    pub fn started(&mut self, cue: Cue) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.accept(cue, PanelEvent::Started).is_some() {
            self.mark(cue.panel, true, &mut effects);
        }

        effects
    }

    pub fn completed(&mut self, cue: Cue) -> Vec<Effect> {
        let mut effects = Vec::new();

        if self.accept(cue, PanelEvent::Completed) == Some(PanelState::Hidden) {
            self.mark(cue.panel, false, &mut effects);
        }

        effects
    }

    pub fn wrap_hide_due(&mut self, ticket: WrapHideTicket) -> Vec<Effect> {
        if ticket.0 == self.background_epoch && self.open.get().is_none() {
            vec![Effect::HideWrap]
        } else {
            Vec::new()
        }
    }

    fn accept(&mut self, cue: Cue, event: PanelEvent) -> Option<PanelState> {
        let panel = self.panels.get_mut(usize::from(cue.panel))?;

        if panel.epoch() == cue.epoch {
            panel.handle(event)
        } else {
            None
        }
    }

    fn show_background(&mut self, effects: &mut Vec<Effect>) {
        self.background_epoch = self.background_epoch.next();
        effects.extend([
            Effect::CancelWrapHide,
            Effect::ShowWrap,
            Effect::Animate {
                target: Target::Background,
                tween: self.background_tween(self.background_shown()),
                cue: None,
            },
        ]);
    }

    fn yield_panel(&mut self, id: PanelId, effects: &mut Vec<Effect>) {
        if self.panel_mut(id).handle(PanelEvent::Yield).is_some() {
            effects.push(self.hide_content(id));
        }
    }

    fn reveal(&mut self, id: PanelId, effects: &mut Vec<Effect>) {
        if self.panel_mut(id).handle(PanelEvent::Open).is_some() {
            effects.push(Effect::Animate {
                target: Target::Content(id),
                tween: self
                    .content_tween(self.content_shown())
                    .delay(self.config.switch_delay),
                cue: Some(self.cue(id)),
            });
        }
    }

    fn hide_content(&self, id: PanelId) -> Effect {
        Effect::Animate {
            target: Target::Content(id),
            tween: self.content_tween(self.content_hidden()),
            cue: Some(self.cue(id)),
        }
    }

    fn mark(&mut self, id: PanelId, active: bool, effects: &mut Vec<Effect>) {
        self.panel_mut(id).set_marked(active);
        effects.push(Effect::Mark { panel: id, active });
    }

    fn cue(&self, id: PanelId) -> Cue {
        Cue {
            panel: id,
            epoch: self.panels[usize::from(id)].epoch(),
        }
    }

    fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.get(usize::from(id))
    }

    // Only called with ids from `panel_ids`, or ones already checked with
    // `panel`.
    fn panel_mut(&mut self, id: PanelId) -> &mut Panel {
        &mut self.panels[usize::from(id)]
    }

    fn content_tween(&self, to: Pose) -> Tween {
        Tween::to(to)
            .duration(self.config.duration)
            .ease(self.config.content_ease)
    }

    fn background_tween(&self, to: Pose) -> Tween {
        Tween::to(to)
            .duration(self.config.duration)
            .ease(self.config.background_ease)
    }

    fn content_shown(&self) -> Pose {
        Pose::new()
            .with(Property::Opacity, 1.0)
            .with(Property::OffsetY, 0.0)
    }

    fn content_hidden(&self) -> Pose {
        Pose::new()
            .with(Property::Opacity, 0.0)
            .with(Property::OffsetY, self.config.content_offset)
    }

    fn background_shown(&self) -> Pose {
        Pose::new()
            .with(Property::Height, self.config.background_height)
            .with(Property::Opacity, 1.0)
    }

    fn background_hidden(&self) -> Pose {
        Pose::new()
            .with(Property::Height, 0.0)
            .with(Property::Opacity, 0.0)
    }
}
