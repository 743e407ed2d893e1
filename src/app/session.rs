use crate::api::Backend;
use crate::constants::TOKEN_ERROR_MESSAGE;
use crate::models::Track;
use crate::state::{
    AppScreen, AudioOutput, AuthState, PlaybackController, SearchState, SearchTicket, TokenStatus,
};
use crate::utils::async_helper::{spawn_and_send, spawn_fire_and_forget, AsyncTask, AsyncTaskResult};
use crate::utils::error_handling::create_runtime;
use std::sync::mpsc::{channel, Receiver, Sender};

/// Which auth request a background result answers
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    Signup,
    Signin { email: String },
}

type Channel<K, T> = (Sender<(K, AsyncTaskResult<T>)>, Receiver<(K, AsyncTaskResult<T>)>);

/// Everything one running client owns: backend handle, screen state, audio
///
/// Views borrow it mutably each frame; background requests report back over
/// channels drained by [`ClientSession::poll`].
pub struct ClientSession {
    backend: Box<dyn Backend>,

    pub screen: AppScreen,
    pub search: SearchState,
    pub auth: AuthState,
    pub playback: PlaybackController,
    token_status: TokenStatus,

    // Background task channels (3 fields)
    token_channel: Channel<(), ()>,
    search_channel: Channel<SearchTicket, Vec<Track>>,
    auth_channel: Channel<AuthAction, Option<String>>,
}

impl ClientSession {
    pub fn new(backend: Box<dyn Backend>, output: Box<dyn AudioOutput>) -> Self {
        Self {
            backend,
            screen: AppScreen::default(),
            search: SearchState::default(),
            auth: AuthState::default(),
            playback: PlaybackController::new(output),
            token_status: TokenStatus::Pending,
            token_channel: channel(),
            search_channel: channel(),
            auth_channel: channel(),
        }
    }

    /// Application load: ask the backend for a catalog token
    pub fn mount(&mut self) {
        self.request_token();
    }

    /// Manual retry after a failed token fetch
    pub fn retry_token(&mut self) {
        if self.token_status != TokenStatus::Pending {
            self.request_token();
        }
    }

    fn request_token(&mut self) {
        log::info!("[Session] Requesting catalog token");
        self.token_status = TokenStatus::Pending;
        let task = self.backend.prepare_token();
        spawn_and_send((), move || task, self.token_channel.0.clone());
    }

    pub fn token_status(&self) -> TokenStatus {
        self.token_status
    }

    /// Search button / Enter key; returns whether a request went out
    pub fn submit_search(&mut self) -> bool {
        if !self.token_ready() {
            return false;
        }
        match self.search.begin_search() {
            Some(ticket) => {
                self.dispatch_search(ticket);
                true
            }
            None => false,
        }
    }

    pub fn next_page(&mut self) -> bool {
        if !self.token_ready() {
            return false;
        }
        match self.search.begin_next_page() {
            Some(ticket) => {
                self.dispatch_search(ticket);
                true
            }
            None => false,
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.token_ready() {
            return false;
        }
        match self.search.begin_previous_page() {
            Some(ticket) => {
                self.dispatch_search(ticket);
                true
            }
            None => false,
        }
    }

    fn token_ready(&self) -> bool {
        if self.token_status == TokenStatus::Ready {
            return true;
        }
        log::error!("[Session] No token available ({:?}), search skipped", self.token_status);
        false
    }

    fn dispatch_search(&mut self, ticket: SearchTicket) {
        log::info!(
            "[Session] Search #{} '{}' at offset {}",
            ticket.generation,
            ticket.keyword,
            ticket.offset
        );
        let task = self.backend.search(ticket.keyword.clone(), ticket.offset);
        spawn_and_send(ticket, move || task, self.search_channel.0.clone());
    }

    pub fn toggle_play(&mut self, track: &Track) {
        self.playback.toggle_play(track);
    }

    pub fn submit_signup(&mut self) -> bool {
        let Some((email, password)) = self.auth.signup.begin_submit() else {
            return false;
        };
        let task = self.backend.signup(email, password);
        let task: AsyncTask<Option<String>> = Box::pin(async move { task.await.map(|_| None) });
        spawn_and_send(AuthAction::Signup, move || task, self.auth_channel.0.clone());
        true
    }

    pub fn submit_signin(&mut self) -> bool {
        let Some((email, password)) = self.auth.signin.begin_submit() else {
            return false;
        };
        let task = self.backend.signin(email.clone(), password);
        let task: AsyncTask<Option<String>> = Box::pin(async move { task.await.map(Some) });
        spawn_and_send(AuthAction::Signin { email }, move || task, self.auth_channel.0.clone());
        true
    }

    pub fn sign_out(&mut self) {
        if let Some(session) = self.auth.clear_session() {
            log::info!("[Session] Signing out");
            let task = self.backend.signout(session);
            spawn_fire_and_forget("Session", move || task);
        }
    }

    /// Sign out and wait for the backend to revoke the session
    ///
    /// Used on window close, where a detached request would die with the process.
    pub fn sign_out_and_wait(&mut self) {
        let Some(session) = self.auth.clear_session() else {
            return;
        };
        log::info!("[Session] Signing out before exit");
        let task = self.backend.signout(session);
        match create_runtime() {
            Ok(rt) => {
                if let Err(e) = rt.block_on(task) {
                    log::warn!("[Session] Sign-out on exit failed: {}", e);
                }
            }
            Err(e) => log::warn!("[Session] Sign-out on exit skipped: {}", e),
        }
    }

    pub fn navigate(&mut self, screen: AppScreen) {
        self.screen = screen;
    }

    /// Spinner condition: any request still outstanding
    pub fn is_loading(&self) -> bool {
        self.token_status == TokenStatus::Pending
            || self.search.is_loading()
            || self.auth.is_submitting()
    }

    /// Drain finished background work into state (call once per frame)
    pub fn poll(&mut self) -> bool {
        let mut changed = false;

        while let Ok(((), result)) = self.token_channel.1.try_recv() {
            changed = true;
            match result {
                Ok(()) => {
                    log::info!("[Session] Catalog token ready");
                    self.token_status = TokenStatus::Ready;
                    self.search.clear_message_if(TOKEN_ERROR_MESSAGE);
                }
                Err(message) => {
                    log::error!("[Session] Error fetching token: {}", message);
                    self.token_status = TokenStatus::Failed;
                    self.search.set_message(TOKEN_ERROR_MESSAGE);
                }
            }
        }

        while let Ok((ticket, result)) = self.search_channel.1.try_recv() {
            if let Err(message) = &result {
                log::error!("[Session] Search #{} failed: {}", ticket.generation, message);
            }
            changed |= self.search.apply(&ticket, result);
        }

        while let Ok((action, result)) = self.auth_channel.1.try_recv() {
            changed = true;
            self.finish_auth(action, result);
        }

        changed
    }

    fn finish_auth(&mut self, action: AuthAction, result: AsyncTaskResult<Option<String>>) {
        match (action, result) {
            (AuthAction::Signup, Ok(_)) => {
                log::info!("[Session] Signup complete, redirecting to sign in");
                let email = std::mem::take(&mut self.auth.signup.email);
                self.auth.signup.reset();
                self.auth.signin.reset();
                self.auth.signin.email = email;
                self.screen = AppScreen::Signin;
            }
            (AuthAction::Signup, Err(message)) => self.auth.signup.fail(message),
            (AuthAction::Signin { email }, Ok(session)) => {
                log::info!("[Session] Signed in as {}", email);
                // A still-live previous session is revoked before it is replaced
                self.sign_out();
                self.auth.signin.reset();
                self.auth.session = session;
                self.auth.signed_in_email = Some(email);
                self.screen = AppScreen::Home;
            }
            (AuthAction::Signin { .. }, Err(message)) => self.auth.signin.fail(message),
        }
    }

    /// Window teardown: make sure nothing keeps playing
    pub fn shutdown(&mut self) {
        self.playback.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SEARCH_ERROR_MESSAGE;
    use crate::models::Artist;
    use crate::state::playback_state::testing::{AudioEvent, RecordingOutput};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    /// Scripted backend that records every call it receives
    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<Mutex<Vec<String>>>,
        /// Token requests still to fail before one succeeds
        token_failures: Arc<AtomicUsize>,
        search_fails: bool,
        signins: Arc<AtomicUsize>,
    }

    impl FakeBackend {
        fn failing_token(times: usize) -> Self {
            Self {
                token_failures: Arc::new(AtomicUsize::new(times)),
                ..Default::default()
            }
        }
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Backend for FakeBackend {
        fn prepare_token(&self) -> AsyncTask<()> {
            self.record("token".into());
            let fails = self
                .token_failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            Box::pin(async move {
                if fails {
                    Err(TOKEN_ERROR_MESSAGE.to_string())
                } else {
                    Ok(())
                }
            })
        }

        fn search(&self, keyword: String, offset: u32) -> AsyncTask<Vec<Track>> {
            self.record(format!("search {keyword} {offset}"));
            let fails = self.search_fails;
            Box::pin(async move {
                if keyword == "slow" {
                    tokio::time::sleep(Duration::from_millis(300)).await;
                }
                if fails {
                    return Err(SEARCH_ERROR_MESSAGE.to_string());
                }
                Ok((0..20)
                    .map(|i| Track {
                        id: format!("{keyword}-{}", offset + i),
                        name: format!("{keyword} #{}", offset + i),
                        artists: vec![Artist { name: "Daft Punk".into() }],
                        preview_url: Some(format!("https://p/{}.mp3", offset + i)),
                    })
                    .collect())
            })
        }

        fn signup(&self, email: String, _password: String) -> AsyncTask<()> {
            self.record(format!("signup {email}"));
            Box::pin(async move {
                if email == "taken@example.com" {
                    Err("User already exists".to_string())
                } else {
                    Ok(())
                }
            })
        }

        fn signin(&self, email: String, password: String) -> AsyncTask<String> {
            self.record(format!("signin {email}"));
            let n = self.signins.fetch_add(1, Ordering::SeqCst) + 1;
            Box::pin(async move {
                if password == "secret" {
                    Ok(format!("session-{n}"))
                } else {
                    Err("Invalid email or password".to_string())
                }
            })
        }

        fn signout(&self, session: String) -> AsyncTask<()> {
            // Recorded when the request completes, not when it is created
            let backend = self.clone();
            Box::pin(async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                backend.record(format!("signout {session}"));
                Ok(())
            })
        }
    }

    fn session_with(backend: FakeBackend) -> (ClientSession, RecordingOutput) {
        let output = RecordingOutput::default();
        let session = ClientSession::new(Box::new(backend), Box::new(output.clone()));
        (session, output)
    }

    fn wait_idle(session: &mut ClientSession) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            session.poll();
            if !session.is_loading() || Instant::now() > deadline {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!session.is_loading(), "background work did not finish");
    }

    fn mounted(backend: FakeBackend) -> (ClientSession, RecordingOutput) {
        let (mut session, output) = session_with(backend);
        session.mount();
        wait_idle(&mut session);
        (session, output)
    }

    #[test]
    fn search_and_paginate() {
        let backend = FakeBackend::default();
        let (mut session, _) = mounted(backend.clone());
        assert_eq!(session.token_status(), TokenStatus::Ready);

        session.search.keyword = "daft punk".into();
        assert!(session.submit_search());
        wait_idle(&mut session);

        let ids: Vec<_> = session.search.results().iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(ids[0], "daft punk-0");
        assert_eq!(ids[9], "daft punk-9");
        assert!(!session.search.previous_enabled());

        assert!(session.next_page());
        wait_idle(&mut session);
        assert_eq!(session.search.offset(), 20);
        assert_eq!(session.search.results()[0].id, "daft punk-20");
        assert_eq!(session.search.previous_label(), "Previous Page: 1");
        assert_eq!(session.search.next_label(), "Next Page: 3");

        assert_eq!(
            backend.calls(),
            vec!["token", "search daft punk 0", "search daft punk 20"]
        );
    }

    #[test]
    fn failed_token_blocks_search_without_network() {
        let backend = FakeBackend::failing_token(1);
        let (mut session, _) = mounted(backend.clone());
        assert_eq!(session.token_status(), TokenStatus::Failed);
        assert_eq!(session.search.message(), Some(TOKEN_ERROR_MESSAGE));

        session.search.keyword = "daft punk".into();
        assert!(!session.submit_search());
        assert!(!session.next_page());

        assert_eq!(backend.calls(), vec!["token"]);
        assert!(session.search.results().is_empty());
        assert!(session.search.show_prompt());
        assert_eq!(session.search.message(), Some(TOKEN_ERROR_MESSAGE));
    }

    #[test]
    fn search_before_token_arrives_is_skipped() {
        let backend = FakeBackend::default();
        let (mut session, _) = session_with(backend.clone());
        session.mount();
        session.search.keyword = "daft punk".into();

        assert!(!session.submit_search());
        wait_idle(&mut session);
        assert_eq!(backend.calls(), vec!["token"]);
    }

    #[test]
    fn retry_after_failure_requests_again() {
        let backend = FakeBackend::failing_token(usize::MAX);
        let (mut session, _) = mounted(backend.clone());
        session.retry_token();
        wait_idle(&mut session);
        assert_eq!(backend.calls(), vec!["token", "token"]);
    }

    #[test]
    fn successful_retry_clears_the_token_error() {
        let backend = FakeBackend::failing_token(1);
        let (mut session, _) = mounted(backend.clone());
        assert_eq!(session.search.message(), Some(TOKEN_ERROR_MESSAGE));

        session.retry_token();
        wait_idle(&mut session);

        assert_eq!(session.token_status(), TokenStatus::Ready);
        assert_eq!(session.search.message(), None);
        session.search.keyword = "daft punk".into();
        assert!(session.submit_search());
    }

    #[test]
    fn slow_earlier_search_does_not_overwrite_later_one() {
        let backend = FakeBackend::default();
        let (mut session, _) = mounted(backend);

        session.search.keyword = "slow".into();
        assert!(session.submit_search());
        session.search.keyword = "fast".into();
        assert!(session.submit_search());
        wait_idle(&mut session);
        assert_eq!(session.search.results()[0].id, "fast-0");

        std::thread::sleep(Duration::from_millis(500));
        session.poll();
        assert_eq!(session.search.results()[0].id, "fast-0");
    }

    #[test]
    fn search_failure_shows_message() {
        let backend = FakeBackend {
            search_fails: true,
            ..Default::default()
        };
        let (mut session, _) = mounted(backend);
        session.search.keyword = "daft punk".into();
        session.submit_search();
        wait_idle(&mut session);

        assert_eq!(session.search.message(), Some(SEARCH_ERROR_MESSAGE));
        assert!(session.search.has_searched());
        assert!(!session.search.show_pagination());
    }

    #[test]
    fn play_buttons_drive_the_single_output() {
        let (mut session, output) = mounted(FakeBackend::default());
        session.search.keyword = "daft punk".into();
        session.submit_search();
        wait_idle(&mut session);

        let a = session.search.results()[0].clone();
        let b = session.search.results()[1].clone();
        session.toggle_play(&a);
        session.toggle_play(&b);
        session.toggle_play(&b);

        assert!(!session.playback.is_playing());
        assert_eq!(
            output.take(),
            vec![
                AudioEvent::Load("https://p/0.mp3".into()),
                AudioEvent::Play,
                AudioEvent::Load("https://p/1.mp3".into()),
                AudioEvent::Play,
                AudioEvent::Pause,
            ]
        );

        session.shutdown();
        assert_eq!(output.take(), vec![AudioEvent::Pause]);
    }

    #[test]
    fn signup_redirects_to_signin_then_home() {
        let backend = FakeBackend::default();
        let (mut session, _) = mounted(backend.clone());
        session.navigate(AppScreen::Signup);

        session.auth.signup.email = "fan@example.com".into();
        session.auth.signup.password = "secret".into();
        assert!(session.submit_signup());
        wait_idle(&mut session);
        assert_eq!(session.screen, AppScreen::Signin);
        assert_eq!(session.auth.signin.email, "fan@example.com");

        session.auth.signin.password = "secret".into();
        assert!(session.submit_signin());
        wait_idle(&mut session);
        assert_eq!(session.screen, AppScreen::Home);
        assert!(session.auth.is_signed_in());
        assert_eq!(session.auth.signed_in_email.as_deref(), Some("fan@example.com"));

        session.sign_out();
        assert!(!session.auth.is_signed_in());
    }

    fn sign_in(session: &mut ClientSession) {
        session.auth.signin.email = "fan@example.com".into();
        session.auth.signin.password = "secret".into();
        assert!(session.submit_signin());
        wait_idle(session);
    }

    fn wait_for_call(backend: &FakeBackend, call: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if backend.calls().iter().any(|c| c == call) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn signing_in_again_revokes_the_previous_session() {
        let backend = FakeBackend::default();
        let (mut session, _) = mounted(backend.clone());

        sign_in(&mut session);
        assert_eq!(session.auth.session.as_deref(), Some("session-1"));
        sign_in(&mut session);
        assert_eq!(session.auth.session.as_deref(), Some("session-2"));

        assert!(wait_for_call(&backend, "signout session-1"));
        assert!(!backend.calls().iter().any(|c| c == "signout session-2"));
    }

    #[test]
    fn sign_out_on_exit_waits_for_the_revoke() {
        let backend = FakeBackend::default();
        let (mut session, _) = mounted(backend.clone());
        sign_in(&mut session);

        session.sign_out_and_wait();

        assert!(!session.auth.is_signed_in());
        assert!(backend.calls().iter().any(|c| c == "signout session-1"));
        // Nothing left to revoke
        session.sign_out_and_wait();
        assert_eq!(backend.calls().iter().filter(|c| c.starts_with("signout")).count(), 1);
    }

    #[test]
    fn auth_failures_stay_on_the_form() {
        let (mut session, _) = mounted(FakeBackend::default());
        session.navigate(AppScreen::Signup);
        session.auth.signup.email = "taken@example.com".into();
        session.auth.signup.password = "pw".into();
        session.submit_signup();
        wait_idle(&mut session);

        assert_eq!(session.screen, AppScreen::Signup);
        assert_eq!(session.auth.signup.error.as_deref(), Some("User already exists"));

        session.navigate(AppScreen::Signin);
        session.auth.signin.email = "fan@example.com".into();
        session.auth.signin.password = "wrong".into();
        session.submit_signin();
        wait_idle(&mut session);

        assert_eq!(session.screen, AppScreen::Signin);
        assert_eq!(
            session.auth.signin.error.as_deref(),
            Some("Invalid email or password")
        );
        assert!(!session.auth.is_signed_in());
    }
}
