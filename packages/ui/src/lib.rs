use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use dom::Elements;
use dropnav_core::{
    timeline::{Progress, Timeline},
    Config, Controller, Cue, Effect, Error, PanelId, Result, Role, Target,
};
use gloo_console::{error, log};
use listener::EventListener;
use silkenweb::{clone, task::on_animation_frame};
use timer::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Event};

mod dom;
mod listener;
mod timer;

/// Attach to the page once its content has loaded, and stay attached.
///
/// Failures are logged to the console and leave the page untouched.
pub fn attach_when_loaded() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        error!("Dropdown: no document");
        return;
    };

    if is_loading(&document) {
        let on_loaded = EventListener::new(&document, "DOMContentLoaded", {
            clone!(document);
            move |_| attach_forever(&document)
        });

        match on_loaded {
            Ok(on_loaded) => on_loaded.forget(),
            Err(e) => error!(e.to_string()),
        }
    } else {
        attach_forever(&document);
    }
}

fn attach_forever(document: &Document) {
    match Dropdown::attach(document, Config::default()) {
        Ok(dropdown) => dropdown.forget(),
        Err(e) => error!(e.to_string()),
    }
}

fn is_loading(document: &Document) -> bool {
    js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|state| state.as_string())
        .is_some_and(|state| state == "loading")
}

/// A dropdown bound to the page. Dropping it detaches every listener.
pub struct Dropdown {
    widget: Rc<Widget>,
    _listeners: Vec<EventListener>,
}

impl Dropdown {
    /// Bind to the elements in `document`.
    ///
    /// `config` is used unless the wrap element carries its own.
    pub fn attach(document: &Document, config: Config) -> Result<Self> {
        let wrap = dom::query_one(document, Role::Wrap, &config.attribute)?;
        let config = dom::wrap_config(&wrap)?.unwrap_or(config);
        let elements = Elements::find(document, wrap, &config.attribute)?;
        let controller = Controller::new(elements.pairs.len(), config);
        let mut timeline = Timeline::new();

        for (target, pose) in controller.initial_poses() {
            elements.apply_pose(target, &pose)?;
            timeline.set(target, &pose);
        }

        elements.set_wrap_visible(false)?;

        let widget = Rc::new(Widget {
            elements,
            controller: RefCell::new(controller),
            timeline: RefCell::new(timeline),
            wrap_hide: RefCell::new(None),
            frame_requested: Cell::new(false),
        });
        let listeners = widget.listen(document)?;

        log!(format!(
            "Dropdown attached with {} panels",
            widget.elements.pairs.len()
        ));

        Ok(Self {
            widget,
            _listeners: listeners,
        })
    }

    pub fn open_panel(&self) -> Option<PanelId> {
        self.widget.controller.borrow().open_panel()
    }

    pub fn background_visible(&self) -> bool {
        self.widget.controller.borrow().background_visible()
    }

    /// Keep the dropdown attached for the lifetime of the page.
    pub fn forget(self) {
        std::mem::forget(self)
    }
}

struct Widget {
    elements: Elements,
    controller: RefCell<Controller>,
    timeline: RefCell<Timeline<Target, Cue>>,
    wrap_hide: RefCell<Option<Timeout>>,
    frame_requested: Cell<bool>,
}

impl Widget {
    fn listen(self: &Rc<Self>, document: &Document) -> Result<Vec<EventListener>> {
        let mut listeners = Vec::new();

        for (index, pair) in self.elements.pairs.iter().enumerate() {
            let id = PanelId::from(index);
            let widget = Rc::downgrade(self);

            listeners.push(EventListener::new(&pair.trigger, "click", {
                move |event: Event| {
                    event.stop_propagation();
                    Self::run(&widget, |controller| controller.toggle(id));
                }
            })?);

            listeners.push(EventListener::new(&pair.content, "click", |event: Event| {
                event.stop_propagation()
            })?);
        }

        let widget = Rc::downgrade(self);
        listeners.push(EventListener::new(document, "click", move |_| {
            Self::run(&widget, |controller| {
                let effects = controller.dismiss();

                if !effects.is_empty() {
                    log!("Closing dropdowns and cleaning up.");
                }

                effects
            })
        })?);

        Ok(listeners)
    }

    fn run(widget: &Weak<Self>, f: impl FnOnce(&mut Controller) -> Vec<Effect>) {
        if let Some(widget) = widget.upgrade() {
            let effects = f(&mut *widget.controller.borrow_mut());
            widget.dispatch_or_log(effects);
        }
    }

    fn dispatch_or_log(self: &Rc<Self>, effects: Vec<Effect>) {
        if let Err(e) = self.dispatch(effects) {
            error!(e.to_string());
        }
    }

    fn dispatch(self: &Rc<Self>, effects: Vec<Effect>) -> Result<()> {
        for effect in effects {
            match effect {
                Effect::ShowWrap => self.elements.set_wrap_visible(true)?,
                Effect::HideWrap => self.elements.set_wrap_visible(false)?,
                Effect::Animate { target, tween, cue } => {
                    self.timeline
                        .borrow_mut()
                        .play(target, tween, cue, js_sys::Date::now());
                    self.request_frame();
                }
                Effect::Mark { panel, active } => {
                    let controller = self.controller.borrow();
                    self.elements
                        .set_marker(panel, &controller.config().active_class, active)?;
                }
                Effect::ScheduleWrapHide { ticket, delay_ms } => {
                    let widget = Rc::downgrade(self);
                    let timeout = Timeout::new(delay_ms, move || {
                        Self::run(&widget, |controller| controller.wrap_hide_due(ticket))
                    })?;
                    self.wrap_hide.replace(Some(timeout));
                }
                Effect::CancelWrapHide => {
                    self.wrap_hide.take();
                }
            }
        }

        Ok(())
    }

    fn request_frame(self: &Rc<Self>) {
        if self.frame_requested.replace(true) {
            return;
        }

        let widget = Rc::downgrade(self);

        on_animation_frame(move || {
            if let Some(widget) = widget.upgrade() {
                widget.frame();
            }
        });
    }

    fn frame(self: &Rc<Self>) {
        self.frame_requested.set(false);
        let frame = self.timeline.borrow_mut().tick(js_sys::Date::now());

        for (target, pose) in &frame.poses {
            if let Err(e) = self.elements.apply_pose(*target, pose) {
                error!(e.to_string());
            }
        }

        for progress in frame.progress {
            let effects = match progress {
                Progress::Started(cue) => self.controller.borrow_mut().started(cue),
                Progress::Completed(cue) => self.controller.borrow_mut().completed(cue),
            };

            self.dispatch_or_log(effects);
        }

        if !self.timeline.borrow().is_idle() {
            self.request_frame();
        }
    }
}

fn js_error(value: JsValue) -> Error {
    Error::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}
