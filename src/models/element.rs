use crate::core::errors::Result;

/// What the page tree needs from anything it places on a page.
pub trait Element {
    /// Prefix used when generating an element id.
    fn default_id_prefix(&self) -> &'static str;

    /// Stable part of the element id, appended to the prefix.
    fn element_id_template(&self) -> Result<String>;

    fn label(&self) -> Result<String>;

    /// Id candidate before the page resolves collisions with its siblings.
    fn default_id(&self) -> Result<String> {
        Ok(format!(
            "{}-{}",
            self.default_id_prefix(),
            self.element_id_template()?
        ))
    }
}
