pub mod home;
pub mod signin;
pub mod signup;

use crate::app::ClientSession;
use crate::constants::APP_NAME;
use crate::state::AppScreen;
use eframe::egui;

/// Top bar: title, search box, account links
pub fn render_navbar(session: &mut ClientSession, ui: &mut egui::Ui) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        if ui
            .add(egui::Label::new(egui::RichText::new(APP_NAME).size(20.0).strong()).sense(egui::Sense::click()))
            .clicked()
        {
            session.navigate(AppScreen::Home);
        }
        ui.add_space(20.0);

        let search_box = ui.add(
            egui::TextEdit::singleline(&mut session.search.keyword)
                .hint_text("Search for a song")
                .desired_width(320.0),
        );
        let enter_pressed =
            search_box.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || enter_pressed {
            session.navigate(AppScreen::Home);
            session.submit_search();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if session.auth.is_signed_in() {
                if ui.button("Sign out").clicked() {
                    session.sign_out();
                }
                if let Some(email) = session.auth.signed_in_email.as_deref() {
                    ui.label(egui::RichText::new(email).color(egui::Color32::GRAY));
                }
            } else {
                if ui.button("Sign in").clicked() {
                    session.navigate(AppScreen::Signin);
                }
                if ui.button("Sign up").clicked() {
                    session.navigate(AppScreen::Signup);
                }
            }
        });
    });
    ui.add_space(6.0);
}

/// Error text in the app's warning colour
pub(crate) fn error_label(ui: &mut egui::Ui, message: &str) {
    ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(255, 100, 100)));
}
