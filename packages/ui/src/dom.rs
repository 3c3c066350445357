use dropnav_core::{
    pair_up, tween::Pose, Config, Error, Pair, PanelId, Result, Role, Target,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::js_error;

/// The elements the dropdown binds to.
pub struct Elements {
    pub wrap: HtmlElement,
    pub background: HtmlElement,
    pub pairs: Vec<Pair<HtmlElement, HtmlElement>>,
}

impl Elements {
    /// Find every element, checking the required ones are present and that
    /// links and contents pair up.
    pub fn find(document: &Document, wrap: HtmlElement, attribute: &str) -> Result<Self> {
        let background = query_one(document, Role::Background, attribute)?;
        let triggers = query_all(document, Role::Link, attribute)?;
        let contents = query_all(document, Role::Content, attribute)?;

        Ok(Self {
            wrap,
            background,
            pairs: pair_up(triggers, contents)?,
        })
    }

    pub fn target(&self, target: Target) -> Option<&HtmlElement> {
        match target {
            Target::Background => Some(&self.background),
            Target::Content(id) => self.pair(id).map(|pair| &pair.content),
        }
    }

    pub fn pair(&self, id: PanelId) -> Option<&Pair<HtmlElement, HtmlElement>> {
        self.pairs.get(usize::from(id))
    }

    pub fn set_wrap_visible(&self, visible: bool) -> Result<()> {
        set_style(&self.wrap, "display", if visible { "flex" } else { "none" })
    }

    pub fn apply_pose(&self, target: Target, pose: &Pose) -> Result<()> {
        let Some(elem) = self.target(target) else {
            return Ok(());
        };

        for (property, value) in pose.iter() {
            let (name, value) = property.css(value);
            set_style(elem, name, &value)?;
        }

        Ok(())
    }

    pub fn set_marker(&self, id: PanelId, active_class: &str, active: bool) -> Result<()> {
        let Some(Pair { trigger, content }) = self.pair(id) else {
            return Ok(());
        };

        content
            .class_list()
            .toggle_with_force(active_class, active)
            .map_err(js_error)?;

        let (pointer_events, z_index) = if active { ("auto", "1") } else { ("none", "0") };
        set_style(content, "pointer-events", pointer_events)?;
        set_style(content, "z-index", z_index)?;
        trigger
            .set_attribute("aria-expanded", if active { "true" } else { "false" })
            .map_err(js_error)
    }
}

pub fn query_one(document: &Document, role: Role, attribute: &str) -> Result<HtmlElement> {
    document
        .query_selector(&role.selector(attribute))
        .map_err(js_error)?
        .and_then(|elem| elem.dyn_into::<HtmlElement>().ok())
        .ok_or(Error::MissingElement { role })
}

pub fn query_all(document: &Document, role: Role, attribute: &str) -> Result<Vec<HtmlElement>> {
    let nodes = document
        .query_selector_all(&role.selector(attribute))
        .map_err(js_error)?;

    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect())
}

/// Config from the JSON in the wrap's [`Config::ATTRIBUTE`], if it has one.
pub fn wrap_config(wrap: &Element) -> Result<Option<Config>> {
    wrap.get_attribute(Config::ATTRIBUTE)
        .map(|json| Config::from_json(&json))
        .transpose()
}

fn set_style(elem: &HtmlElement, name: &str, value: &str) -> Result<()> {
    elem.style().set_property(name, value).map_err(js_error)
}
