use super::signup::{render_auth_form, FormAction};
use crate::app::ClientSession;
use crate::state::AppScreen;
use eframe::egui;

pub fn render_signin(session: &mut ClientSession, ui: &mut egui::Ui) {
    let switch = ("No account yet?", "Sign up");
    match render_auth_form(ui, "Sign in", switch, &mut session.auth.signin) {
        FormAction::Submit => {
            session.submit_signin();
        }
        FormAction::SwitchScreen => session.navigate(AppScreen::Signup),
        FormAction::None => {}
    }
}
