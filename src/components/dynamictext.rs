use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Debug, Default)]
/// Text sink for an on-screen label.
pub struct DynamicText {
    /// The text content to render.
    pub content: String,
    /// Number of times the content has been written since spawn.
    ///
    /// A renderer re-lays out the label on every write, so callers compare
    /// before writing.
    pub revision: u32,
}

impl DynamicText {
    /// Creates a new DynamicText component.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            revision: 0,
        }
    }
    /// Updates the text content.
    pub fn set_content(&mut self, new_content: impl Into<String>) {
        self.content = new_content.into();
        self.revision += 1;
    }
}
