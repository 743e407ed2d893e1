use crate::models::Track;

/// The single audio output the playback controller drives
pub trait AudioOutput {
    /// Replace whatever is loaded with `url` (empty means nothing to play)
    fn load(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
}

/// At most one current track; starting another one replaces it
pub struct PlaybackController {
    output: Box<dyn AudioOutput>,
    current_track: Option<Track>,
    is_playing: bool,
}

impl PlaybackController {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self {
            output,
            current_track: None,
            is_playing: false,
        }
    }

    /// Pause `track` if it is the one playing, otherwise (re)start it
    pub fn toggle_play(&mut self, track: &Track) {
        if self.is_playing_track(&track.id) {
            log::info!("[Playback] Pausing '{}'", track.name);
            self.output.pause();
            self.is_playing = false;
            return;
        }

        if track.preview_url.is_none() {
            log::warn!("[Playback] '{}' has no preview clip", track.name);
        } else {
            log::info!("[Playback] Playing '{}' by {}", track.name, track.primary_artist());
        }
        self.output.load(track.preview_source());
        self.output.play();
        self.current_track = Some(track.clone());
        self.is_playing = true;
    }

    /// Whether the row for `track_id` should offer "Pause"
    pub fn is_playing_track(&self, track_id: &str) -> bool {
        self.is_playing
            && self
                .current_track
                .as_ref()
                .is_some_and(|current| current.id == track_id)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Force-pause on teardown
    pub fn shutdown(&mut self) {
        log::debug!("[Playback] Shutting down output");
        self.output.pause();
        self.is_playing = false;
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.output.pause();
    }
}
