//! Report sinks — where render reports go after each turn.

use crate::RenderReport;

/// Consumer of [`RenderReport`]s.
///
/// The engine never reads anything back from a sink; views are pure sinks.
/// Any `FnMut(&RenderReport)` closure is a sink.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// let mut printer = |r: &RenderReport| {
///     println!("{}: {} infected / {} healthy", r.turn, r.infected_agents, r.healthy_agents());
/// };
/// engine.run_turns(10, &mut printer);
/// ```
pub trait ReportSink {
    fn on_report(&mut self, report: &RenderReport);
}

impl<F: FnMut(&RenderReport)> ReportSink for F {
    fn on_report(&mut self, report: &RenderReport) {
        self(report)
    }
}

/// A [`ReportSink`] that drops every report.
pub struct NullSink;

impl ReportSink for NullSink {
    fn on_report(&mut self, _report: &RenderReport) {}
}
