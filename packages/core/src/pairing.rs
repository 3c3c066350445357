use strum::{AsRefStr, Display, EnumIter};

use crate::{Error, Result};

/// The value of the marker attribute that tags each element the widget binds
/// to.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, AsRefStr, EnumIter)]
pub enum Role {
    #[strum(serialize = "dropdown-wrap")]
    Wrap,
    #[strum(serialize = "dropdown-link")]
    Link,
    #[strum(serialize = "dropdown-content")]
    Content,
    #[strum(serialize = "dropdown-bg")]
    Background,
}

impl Role {
    /// A CSS selector matching elements with this role.
    pub fn selector(self, attribute: &str) -> String {
        format!("[{attribute}='{}']", self.as_ref())
    }

    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Wrap | Self::Background)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair<Trigger, Content> {
    pub trigger: Trigger,
    pub content: Content,
}

/// Pair triggers with contents by position.
///
/// Fails rather than silently dropping the unmatched tail.
pub fn pair_up<Trigger, Content>(
    triggers: Vec<Trigger>,
    contents: Vec<Content>,
) -> Result<Vec<Pair<Trigger, Content>>> {
    if triggers.len() != contents.len() {
        return Err(Error::PairingMismatch {
            triggers: triggers.len(),
            contents: contents.len(),
        });
    }

    Ok(triggers
        .into_iter()
        .zip(contents)
        .map(|(trigger, content)| Pair { trigger, content })
        .collect())
}
