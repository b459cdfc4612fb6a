//! Main GUI application module
//!
//! Contains the GuiApp struct: the eframe shell around `DeskController`.

use crate::{
    client::HttpTransactionSource,
    config::Config,
    desk_controller::{DeskController, DeskSettings},
    presentation::{self, Screen, LOADING_MESSAGE},
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

use super::notifications::{bulk_report_messages, push_notification, NotificationEntry};
use super::theme::{configure_style, AppTheme};
use super::widgets::{TableCommand, TransactionTable};

/// Notifications shown in the bottom strip
const VISIBLE_NOTIFICATIONS: usize = 5;

pub struct GuiApp {
    pub(crate) theme: AppTheme,
    pub(crate) desk: DeskController,
    pub(crate) notifications: VecDeque<NotificationEntry>,
    pub(crate) last_action_error: Option<String>,
    pub(crate) api_url: String,
    // Dropped after `desk`, whose teardown cancels the jobs running here
    _runtime: Runtime,
}

impl GuiApp {
    fn new(config: Config, runtime: Runtime, source: HttpTransactionSource, ctx: &egui::Context) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        let mut desk = DeskController::new(
            Arc::new(source),
            runtime.handle().clone(),
            DeskSettings::from(&config),
        );
        desk.mount();

        Self {
            theme,
            desk,
            notifications: VecDeque::with_capacity(super::notifications::MAX_NOTIFICATIONS),
            last_action_error: None,
            api_url: config.api_base_url.to_string(),
            _runtime: runtime,
        }
    }

    /// Turn finished clears into notifications
    fn collect_notifications(&mut self) {
        if let Some(report) = self.desk.take_bulk_report() {
            for message in bulk_report_messages(&report) {
                push_notification(&mut self.notifications, message);
            }
        }
        let current = self.desk.state().action_error.clone();
        if current != self.last_action_error {
            if let Some(error) = &current {
                push_notification(&mut self.notifications, format!("[!!] Clear failed: {}", error));
            }
            self.last_action_error = current;
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(self.theme.spacing_xs);
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Transactions").strong().color(self.theme.text_primary));
            ui.label(
                RichText::new(format!("v{} · {}", env!("CARGO_PKG_VERSION"), self.api_url))
                    .small()
                    .color(self.theme.text_secondary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let bulk = presentation::bulk_button(self.desk.state());
                if ui
                    .add_enabled(bulk.enabled, self.theme.button_primary(&bulk.label))
                    .on_hover_text("Clear every selected transaction")
                    .clicked()
                {
                    self.desk.clear_selected();
                }

                ui.add_space(self.theme.spacing_md);
                let mut super_admin = self.desk.state().super_admin;
                if ui
                    .checkbox(&mut super_admin, "Super admin")
                    .on_hover_text("Allow clearing high-amount transactions")
                    .changed()
                {
                    self.desk.set_super_admin(super_admin);
                }
            });
        });
        ui.add_space(self.theme.spacing_xs);
    }

    fn render_notifications(&self, ui: &mut egui::Ui) {
        if self.notifications.is_empty() {
            return;
        }
        self.theme.frame_panel().show(ui, |ui| {
            for entry in self.notifications.iter().rev().take(VISIBLE_NOTIFICATIONS) {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(entry.time_ago())
                            .small()
                            .color(self.theme.text_secondary),
                    );
                    ui.label(entry.message.as_str());
                });
            }
        });
    }

    fn render_body(&mut self, ui: &mut egui::Ui) {
        match presentation::screen(self.desk.state()) {
            Screen::Loading => {
                self.desk.set_pointer_over_controls(false);
                ui.label(RichText::new(LOADING_MESSAGE).color(self.theme.text_secondary));
            }
            Screen::Failed(message) => {
                self.desk.set_pointer_over_controls(false);
                ui.label(RichText::new(message).color(self.theme.error));
            }
            Screen::Table => {
                if let Some(error) = self.desk.state().action_error.clone() {
                    let mut dismiss = false;
                    ui.horizontal(|ui| {
                        ui.colored_label(self.theme.error, format!("⚠ Error: {}", error));
                        if ui.small_button("Dismiss").clicked() {
                            dismiss = true;
                        }
                    });
                    if dismiss {
                        self.desk.dismiss_error();
                    }
                    ui.add_space(self.theme.spacing_xs);
                }

                let rows = presentation::rows(self.desk.state());
                let output = TransactionTable::new(&rows, &self.theme).show(ui);
                self.desk.set_pointer_over_controls(output.hovering_critical);

                for command in output.commands {
                    match command {
                        TableCommand::ToggleSelected(id) => self.desk.toggle_selected(id),
                        TableCommand::ClearFunds(id) => {
                            if !self.desk.clear_funds(id) {
                                tracing::debug!("Clear for transaction {} ignored", id);
                            }
                        }
                    }
                }
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.desk.tick();
        self.collect_notifications();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| self.render_top_bar(ui));

        egui::TopBottomPanel::bottom("notifications")
            .resizable(false)
            .show(ctx, |ui| self.render_notifications(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.render_body(ui));

        // Keep ticking while idle so polls and hover releases fire
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

pub fn launch(config: Config) -> Result<()> {
    let runtime = Builder::new_multi_thread()
        .enable_all()
        .thread_name("portola-io")
        .build()
        .map_err(|e| anyhow!("Failed to create async runtime: {}", e))?;
    let source = HttpTransactionSource::new(config.clone())?;

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(config, runtime, source, &cc.egui_ctx)) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_title("Portola - Transactions")
        .with_inner_size([1100.0, 720.0]);

    let native_options = NativeOptions {
        viewport,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native("Portola - Transactions", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
