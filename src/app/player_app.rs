use crate::app::session::ClientSession;
use crate::constants::*;
use crate::screens;
use crate::state::AppScreen;
use eframe::egui;
use std::time::Duration;

pub struct MusicSearchApp {
    pub session: ClientSession,
    is_shutting_down: bool,
}

impl MusicSearchApp {
    /// Build the app and fire the one token request of this application load
    pub fn new(_cc: &eframe::CreationContext<'_>, mut session: ClientSession) -> Self {
        session.mount();
        Self {
            session,
            is_shutting_down: false,
        }
    }

    /// Stop audio before the window goes away
    fn cleanup_and_exit(&mut self, ctx: &egui::Context) {
        log::info!("[Shutdown] Stopping playback...");
        self.session.shutdown();
        if self.session.auth.is_signed_in() {
            log::info!("[Shutdown] Revoking session...");
            self.session.sign_out_and_wait();
        }
        log::info!("[Shutdown] Cleanup complete, closing application...");
        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
    }
}

impl eframe::App for MusicSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Faster repaints only while a request is in flight
        let repaint_interval = if self.session.is_loading() {
            Duration::from_millis(REPAINT_INTERVAL_ACTIVE_MILLIS)
        } else {
            Duration::from_millis(REPAINT_INTERVAL_IDLE_MILLIS)
        };
        ctx.request_repaint_after(repaint_interval);

        if ctx.input(|i| i.viewport().close_requested()) && !self.is_shutting_down {
            self.is_shutting_down = true;
            self.cleanup_and_exit(ctx);
        }

        if self.session.poll() {
            ctx.request_repaint();
        }

        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("navbar").show(ctx, |ui| {
            screens::render_navbar(&mut self.session, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.session.screen {
            AppScreen::Home => screens::home::render_home(&mut self.session, ui),
            AppScreen::Signup => screens::signup::render_signup(&mut self.session, ui),
            AppScreen::Signin => screens::signin::render_signin(&mut self.session, ui),
        });
    }
}
