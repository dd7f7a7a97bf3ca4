//! Names under which a funnel is stored on a navigation entry.

/// The three keys a funnel owns on an entry, namespaced by funnel id.
///
/// This layout is what shared URLs resolve against, so it must stay stable:
/// - `{id}.step`: URL query parameter holding the current step name
/// - `{id}.context`: payload key holding the current step's context
/// - `{id}.histories`: payload key holding the full history array
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunnelKeys {
    id: String,
    step: String,
    context: String,
    histories: String,
}

impl FunnelKeys {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            step: format!("{id}.step"),
            context: format!("{id}.context"),
            histories: format!("{id}.histories"),
            id,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn histories(&self) -> &str {
        &self.histories
    }
}
