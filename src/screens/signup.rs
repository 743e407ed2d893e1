use crate::app::ClientSession;
use crate::state::{AppScreen, AuthForm};
use eframe::egui;

pub fn render_signup(session: &mut ClientSession, ui: &mut egui::Ui) {
    let switch = ("Already have an account?", "Sign in");
    match render_auth_form(ui, "Sign up", switch, &mut session.auth.signup) {
        FormAction::Submit => {
            session.submit_signup();
        }
        FormAction::SwitchScreen => session.navigate(AppScreen::Signin),
        FormAction::None => {}
    }
}

pub(crate) enum FormAction {
    None,
    Submit,
    SwitchScreen,
}

/// Email + password form shared by both auth screens
///
/// `switch` is the prompt and link text leading to the other screen.
pub(crate) fn render_auth_form(
    ui: &mut egui::Ui,
    title: &str,
    switch: (&str, &str),
    form: &mut AuthForm,
) -> FormAction {
    let mut action = FormAction::None;
    let (switch_prompt, switch_link) = switch;

    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.heading(title);
        ui.add_space(20.0);

        ui.add(
            egui::TextEdit::singleline(&mut form.email)
                .hint_text("Email")
                .desired_width(280.0),
        );
        ui.add_space(8.0);
        let password = ui.add(
            egui::TextEdit::singleline(&mut form.password)
                .password(true)
                .hint_text("Password")
                .desired_width(280.0),
        );
        let enter_pressed = password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        ui.add_space(12.0);

        if form.submitting {
            ui.spinner();
        } else if ui.button(title).clicked() || enter_pressed {
            action = FormAction::Submit;
        }

        if let Some(error) = form.error.as_deref() {
            ui.add_space(8.0);
            super::error_label(ui, error);
        }

        ui.add_space(16.0);
        ui.horizontal(|ui| {
            ui.label(switch_prompt);
            if ui.link(switch_link).clicked() {
                action = FormAction::SwitchScreen;
            }
        });
    });
    action
}
