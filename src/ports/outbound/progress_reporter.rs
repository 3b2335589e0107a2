/// ProgressReporter port for user-facing progress output
///
/// Diagnostics for individual packages go to `tracing`; this port is for the short status
/// lines and the progress bar a user watches during a run.
pub trait ProgressReporter {
    /// Reports a status line
    fn report(&self, message: &str);

    /// Reports `current` of `total` work items done
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a warning or error line
    fn report_error(&self, message: &str);

    /// Reports the end of a phase
    fn report_completion(&self, message: &str);
}
