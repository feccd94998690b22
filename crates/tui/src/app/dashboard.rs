use engine::{DashboardReport, ReportError};

use super::Session;

#[derive(Debug, Default)]
pub struct DashboardState {
    /// `None` until the dashboard is first opened.
    pub report: Option<DashboardReport>,
}

impl DashboardState {
    /// Rebuilds both charts and returns the errors of the ones that failed.
    pub fn refresh(&mut self, session: &Session) -> Vec<ReportError> {
        let report = DashboardReport::build(session.records());
        let errors = report.errors().into_iter().cloned().collect();
        self.report = Some(report);
        errors
    }
}
