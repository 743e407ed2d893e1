use crate::app::ClientSession;
use crate::constants::SEARCH_PROMPT;
use crate::models::Track;
use crate::state::TokenStatus;
use eframe::egui;

/// Search results page
pub fn render_home(session: &mut ClientSession, ui: &mut egui::Ui) {
    ui.add_space(20.0);

    if session.is_loading() {
        ui.vertical_centered(|ui| ui.spinner());
    }

    if let Some(message) = session.search.message().map(str::to_string) {
        ui.vertical_centered(|ui| {
            super::error_label(ui, &message);
            if session.token_status() == TokenStatus::Failed && ui.button("Retry").clicked() {
                session.retry_token();
            }
        });
        ui.add_space(10.0);
    }

    if session.search.show_prompt() {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(egui::RichText::new(SEARCH_PROMPT).size(18.0).color(egui::Color32::GRAY));
        });
        return;
    }

    if let Some(track) = session.playback.current_track() {
        let state = if session.playback.is_playing() { "Now playing" } else { "Paused" };
        ui.label(
            egui::RichText::new(format!("{}: {} - {}", state, track.name, track.primary_artist()))
                .color(egui::Color32::GRAY),
        );
        ui.add_space(6.0);
    }

    // Clicked row is applied after the loop so the list isn't borrowed twice
    let mut clicked: Option<Track> = None;
    egui::ScrollArea::vertical()
        .max_height((ui.available_height() - 50.0).max(120.0))
        .show(ui, |ui| {
            for track in session.search.results() {
                let playing = session.playback.is_playing_track(&track.id);
                if render_track_row(ui, track, playing) {
                    clicked = Some(track.clone());
                }
            }
        });
    if let Some(track) = clicked {
        session.toggle_play(&track);
    }

    if session.search.show_pagination() {
        ui.add_space(10.0);
        render_pagination(session, ui);
    }
}

/// One result row; returns true when its Play/Pause button was clicked
fn render_track_row(ui: &mut egui::Ui, track: &Track, playing: bool) -> bool {
    let mut clicked = false;
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(egui::RichText::new(&track.name).size(16.0).strong());
                ui.label(egui::RichText::new(track.primary_artist()).color(egui::Color32::GRAY));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if playing { "Pause" } else { "Play" };
                clicked = ui.button(label).clicked();
            });
        });
    });
    clicked
}

fn render_pagination(session: &mut ClientSession, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let previous = ui.add_enabled(
            session.search.previous_enabled(),
            egui::Button::new(session.search.previous_label()),
        );
        if previous.clicked() {
            session.previous_page();
        }
        if ui.button(session.search.next_label()).clicked() {
            session.next_page();
        }
    });
}
