use egui::{RichText, Ui};
use project_planner::report::AnalysisKind;

use crate::app::PlannerApp;
use crate::ui::theme;

/// Render the analysis side panel: report picker and result text.
pub fn show_analysis_panel(app: &mut PlannerApp, ui: &mut Ui) {
    ui.add_space(2.0);
    ui.label(
        RichText::new("Analysis")
            .strong()
            .size(15.0)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(4.0);

    let mut changed = false;
    for kind in AnalysisKind::ALL {
        changed |= ui
            .radio_value(&mut app.analysis_kind, kind, kind.label())
            .changed();
    }
    ui.add_space(4.0);
    if ui.button("Analyze").clicked() || (changed && !app.analysis_text.is_empty()) {
        app.run_analysis();
    }

    ui.add_space(6.0);
    ui.separator();

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if app.analysis_text.is_empty() {
                ui.label(RichText::new("Pick an analysis and press Analyze.").color(theme::TEXT_DIM));
            } else {
                ui.label(
                    RichText::new(&app.analysis_text)
                        .font(theme::font_mono())
                        .color(theme::TEXT_PRIMARY),
                );
            }
        });
}
