//! Centralized theme and styling system for the GUI
//!
//! Provides the AppTheme struct with colors, spacing, and styled widget factories.

use crate::types::TransactionStatus;
use eframe::egui;

/// Centralized theme and styling system
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,
    pub accent_green: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Dark background with green accents
            background: egui::Color32::from_rgb(8, 8, 8),
            surface: egui::Color32::from_rgb(15, 15, 15),
            surface_hover: egui::Color32::from_rgb(25, 25, 25),
            surface_active: egui::Color32::from_rgb(35, 35, 35),
            panel_fill: egui::Color32::from_rgb(12, 12, 12),
            text_primary: egui::Color32::from_rgb(0, 221, 119), // #00dd77
            text_secondary: egui::Color32::from_rgb(170, 170, 170),

            primary: egui::Color32::from_rgb(0, 221, 119),
            success: egui::Color32::from_rgb(0, 221, 119),
            warning: egui::Color32::from_rgb(255, 170, 0), // amber, also marks high amounts
            error: egui::Color32::from_rgb(255, 85, 85),
            accent_green: egui::Color32::from_rgb(0, 221, 119),

            spacing_xs: 6.0,
            spacing_sm: 12.0,
            spacing_md: 20.0,

            button_small: egui::vec2(110.0, 24.0),
            button_medium: egui::vec2(170.0, 32.0),
        }
    }
}

impl AppTheme {
    /// Create a themed button with consistent sizing and colors
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary).strong())
            .fill(self.surface)
            .stroke(egui::Stroke::new(3.0, self.primary))
            .min_size(self.button_medium)
    }

    /// Create a small themed button (row actions)
    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(2.0, self.primary))
            .min_size(self.button_small)
    }

    /// Create a themed frame for panels/cards
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(2.0)
            .inner_margin(self.spacing_sm)
            .stroke(egui::Stroke::new(2.0, self.accent_green))
    }

    /// Color used for a transaction status badge
    pub fn status_color(&self, status: &TransactionStatus) -> egui::Color32 {
        match status {
            TransactionStatus::Pending => self.warning,
            TransactionStatus::Cleared => self.success,
            TransactionStatus::Failed => self.error,
            TransactionStatus::Other(_) => self.text_secondary,
        }
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(2.0, theme.accent_green);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(2.0, theme.accent_green);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(3.0, theme.primary);
    visuals.faint_bg_color = theme.surface_hover; // striped table rows

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(20.0, egui::FontFamily::Monospace),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Monospace),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(14.0, egui::FontFamily::Monospace),
    );

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        let theme = AppTheme::default();
        assert_eq!(theme.status_color(&TransactionStatus::Pending), theme.warning);
        assert_eq!(theme.status_color(&TransactionStatus::Cleared), theme.success);
        assert_eq!(theme.status_color(&TransactionStatus::Failed), theme.error);
        assert_eq!(
            theme.status_color(&TransactionStatus::Other("held".into())),
            theme.text_secondary
        );
    }
}
