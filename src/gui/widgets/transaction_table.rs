//! Transaction table component for the GUI
//! Draws the rows computed by `presentation::rows` and reports what the operator did.

use crate::gui::theme::AppTheme;
use crate::presentation::{RowView, EMPTY_MESSAGE};
use crate::types::TransactionId;
use eframe::egui::{self, RichText};

/// A command issued from the table during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableCommand {
    ToggleSelected(TransactionId),
    ClearFunds(TransactionId),
}

#[derive(Debug, Default)]
pub struct TableOutput {
    pub commands: Vec<TableCommand>,
    /// Pointer is over a checkbox or clear button this frame
    pub hovering_critical: bool,
}

pub struct TransactionTable<'a> {
    rows: &'a [RowView],
    theme: &'a AppTheme,
}

impl<'a> TransactionTable<'a> {
    pub fn new(rows: &'a [RowView], theme: &'a AppTheme) -> Self {
        Self { rows, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> TableOutput {
        let mut output = TableOutput::default();
        let theme = self.theme;

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("transactions_table")
                .num_columns(7)
                .striped(true)
                .spacing([theme.spacing_md, theme.spacing_xs])
                .show(ui, |ui| {
                    ui.label("");
                    for header in ["ID", "Client name", "Amount", "Status", "Timestamp", ""] {
                        ui.label(RichText::new(header).strong().color(theme.text_secondary));
                    }
                    ui.end_row();

                    if self.rows.is_empty() {
                        ui.label("");
                        ui.label(RichText::new(EMPTY_MESSAGE).color(theme.text_secondary));
                        ui.end_row();
                        return;
                    }

                    for row in self.rows {
                        render_row(ui, theme, row, &mut output);
                        ui.end_row();
                    }
                });
        });

        output
    }
}

fn render_row(ui: &mut egui::Ui, theme: &AppTheme, row: &RowView, output: &mut TableOutput) {
    let text_color = if row.high_amount {
        theme.warning
    } else {
        theme.text_primary
    };

    // Select column
    match &row.controls {
        Some(controls) => {
            let mut checked = controls.selected;
            let response = ui
                .checkbox(&mut checked, "")
                .on_hover_text(format!("Select transaction {}", row.id));
            if ui.rect_contains_pointer(response.rect) {
                output.hovering_critical = true;
            }
            if response.changed() {
                output.commands.push(TableCommand::ToggleSelected(row.id));
            }
        }
        None => {
            ui.label("");
        }
    }

    ui.label(RichText::new(row.id.to_string()).color(text_color));
    ui.label(RichText::new(&row.client_name).color(text_color));
    let amount = RichText::new(&row.amount).color(text_color);
    if row.high_amount {
        ui.label(amount.strong()).on_hover_text("High-amount transaction: super admin required to clear");
    } else {
        ui.label(amount);
    }
    ui.label(RichText::new(row.status.as_str()).color(theme.status_color(&row.status)));
    ui.label(RichText::new(&row.timestamp).color(theme.text_secondary));

    // Action column
    match &row.controls {
        Some(controls) => {
            let response = ui.add_enabled(
                controls.button_enabled(),
                theme.button_small(controls.button_label()),
            );
            if ui.rect_contains_pointer(response.rect) {
                output.hovering_critical = true;
            }
            if response.clicked() {
                output.commands.push(TableCommand::ClearFunds(row.id));
            }
        }
        None => {
            ui.label("");
        }
    }
}
