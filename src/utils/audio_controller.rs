use crate::constants::HTTP_TIMEOUT_SECS;
use crate::state::AudioOutput;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::io::Cursor;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

pub enum AudioCommand {
    Load(String),
    Play,
    Pause,
    Shutdown,
}

/// Single rodio output driven from a dedicated audio thread
///
/// The output stream is not `Send`, so it lives on the thread and is opened on
/// the first `Load`. Preview clips are short; each one is downloaded whole and
/// decoded from memory.
pub struct AudioController {
    command_tx: Sender<AudioCommand>,
}

impl AudioController {
    pub fn new() -> Self {
        let (command_tx, command_rx) = channel();
        std::thread::spawn(move || run_audio_thread(command_rx));
        Self { command_tx }
    }

    fn send(&self, cmd: AudioCommand) {
        if self.command_tx.send(cmd).is_err() {
            log::warn!("[AudioController] Audio thread is gone, command dropped");
        }
    }
}

impl Default for AudioController {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for AudioController {
    fn load(&mut self, url: &str) {
        self.send(AudioCommand::Load(url.to_string()));
    }

    fn play(&mut self) {
        self.send(AudioCommand::Play);
    }

    fn pause(&mut self) {
        self.send(AudioCommand::Pause);
    }
}

impl Drop for AudioController {
    fn drop(&mut self) {
        let _ = self.command_tx.send(AudioCommand::Shutdown);
    }
}

fn run_audio_thread(command_rx: Receiver<AudioCommand>) {
    let http = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            log::error!("[AudioController] Failed to build HTTP client: {}", e);
            return;
        }
    };

    // Kept alive for as long as the sink plays through it
    let mut stream: Option<(OutputStream, OutputStreamHandle)> = None;
    let mut sink: Option<Sink> = None;

    while let Ok(cmd) = command_rx.recv() {
        match cmd {
            AudioCommand::Load(url) => {
                if let Some(old) = sink.take() {
                    old.stop();
                }
                if url.is_empty() {
                    log::debug!("[AudioController] Empty source, nothing loaded");
                    continue;
                }
                if stream.is_none() {
                    match OutputStream::try_default() {
                        Ok(s) => stream = Some(s),
                        Err(e) => {
                            log::error!("[AudioController] No audio output device: {}", e);
                            continue;
                        }
                    }
                }
                if let Some((_, handle)) = stream.as_ref() {
                    match load_preview(&http, handle, &url) {
                        Ok(s) => sink = Some(s),
                        Err(e) => log::error!("[AudioController] Error loading audio: {}", e),
                    }
                }
            }
            AudioCommand::Play => {
                if let Some(s) = sink.as_ref() {
                    s.play();
                }
            }
            AudioCommand::Pause => {
                if let Some(s) = sink.as_ref() {
                    s.pause();
                }
            }
            AudioCommand::Shutdown => {
                log::debug!("[AudioController] Shutting down audio thread");
                break;
            }
        }
    }

    if let Some(s) = sink.take() {
        s.stop();
    }
}

/// Download and decode a preview into a paused sink
fn load_preview(
    http: &reqwest::blocking::Client,
    handle: &OutputStreamHandle,
    url: &str,
) -> Result<Sink, Box<dyn std::error::Error>> {
    log::debug!("[AudioController] Fetching preview {}", url);
    let bytes = http.get(url).send()?.error_for_status()?.bytes()?;
    let source = Decoder::new(Cursor::new(bytes.to_vec()))?;

    let sink = Sink::try_new(handle)?;
    sink.pause();
    sink.append(source);
    log::info!("[AudioController] Preview loaded ({} bytes)", bytes.len());
    Ok(sink)
}
