use std::{
    io::Cursor,
    sync::mpsc::{self, Sender},
    thread,
    time::Duration,
};

use async_trait::async_trait;
use reqwest::Client;
use rodio::{Decoder, OutputStreamBuilder, Sink, Source, mixer::Mixer};
use tracing::debug;

/// Source of audio resources.
///
/// `attach` may take a while (network, decoding); the controller does not
/// hold its lock while it runs.
#[async_trait]
pub trait AudioBackend: Send + Sync {
    async fn attach(&self, media_uri: &str) -> Result<Box<dyn MediaHandle>, String>;
}

/// One attached audio resource. Only the controller talks to it.
pub trait MediaHandle: Send {
    fn start(&mut self, volume: f32) -> Result<(), String>;
    fn pause(&mut self);
    fn resume(&mut self);
    fn seek(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    fn position(&self) -> f64;
    /// Length in seconds, when the resource knows it.
    fn duration(&self) -> Option<f64>;
    fn is_finished(&self) -> bool;
    fn teardown(&mut self);
}

/// Plays catalog media on the default audio output device.
///
/// The output stream lives on its own thread for as long as the backend is
/// alive. Attaching downloads the media file, decodes it and hands back a
/// paused [`Sink`] on that stream.
pub struct RodioBackend {
    client: Client,
    mixer: Mixer,
    // dropping this ends the output thread
    _output: Sender<()>,
}

impl RodioBackend {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns a message when no output device can be opened.
    pub fn open() -> Result<Self, String> {
        let (ready_tx, ready_rx) = mpsc::channel::<Result<Mixer, String>>();
        let (close_tx, close_rx) = mpsc::channel::<()>();

        thread::Builder::new()
            .name("harmony-audio".to_string())
            .spawn(move || {
                let mut stream = match OutputStreamBuilder::open_default_stream() {
                    Ok(stream) => stream,
                    Err(e) => {
                        let _ = ready_tx.send(Err(format!("no audio output device: {e}")));
                        return;
                    }
                };
                // rodio reports the drop on stderr otherwise
                stream.log_on_drop(false);

                if ready_tx.send(Ok(stream.mixer().clone())).is_err() {
                    return;
                }
                // blocks until the backend is dropped
                let _ = close_rx.recv();
                debug!("closing audio output");
            })
            .map_err(|e| e.to_string())?;

        let mixer = ready_rx.recv().map_err(|e| e.to_string())??;

        Ok(Self {
            client: Client::new(),
            mixer,
            _output: close_tx,
        })
    }
}

#[async_trait]
impl AudioBackend for RodioBackend {
    async fn attach(&self, media_uri: &str) -> Result<Box<dyn MediaHandle>, String> {
        if media_uri.trim().is_empty() {
            return Err("track has no media file".to_string());
        }

        let body = self
            .client
            .get(media_uri)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| e.to_string())?
            .bytes()
            .await
            .map_err(|e| e.to_string())?;
        debug!(%media_uri, bytes = body.len(), "media downloaded");

        let source = Decoder::new(Cursor::new(body))
            .map_err(|e| format!("cannot decode {media_uri}: {e}"))?;
        let duration = source.total_duration().map(|d| d.as_secs_f64());

        let sink = Sink::connect_new(&self.mixer);
        sink.pause();
        sink.append(source);

        Ok(Box::new(RodioHandle::new(sink, duration)))
    }
}

/// A decoded track queued on a paused sink.
pub struct RodioHandle {
    sink: Sink,
    duration: Option<f64>,
}

impl RodioHandle {
    fn new(sink: Sink, duration: Option<f64>) -> Self {
        Self { sink, duration }
    }
}

impl MediaHandle for RodioHandle {
    fn start(&mut self, volume: f32) -> Result<(), String> {
        self.sink.set_volume(volume);
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }

    fn seek(&mut self, seconds: f64) {
        let target = Duration::try_from_secs_f64(seconds).unwrap_or_default();
        if let Err(e) = self.sink.try_seek(target) {
            debug!(seconds, error = %e, "seek not supported by this source");
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn position(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn is_finished(&self) -> bool {
        self.sink.empty()
    }

    fn teardown(&mut self) {
        self.sink.stop();
    }
}
