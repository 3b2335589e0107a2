use crate::shared::Result;

/// OutputPresenter port - destination of the rendered report (stdout, file, ...)
pub trait OutputPresenter {
    /// # Errors
    /// Returns an error if writing to the destination fails
    fn present(&self, content: &str) -> Result<()>;
}
