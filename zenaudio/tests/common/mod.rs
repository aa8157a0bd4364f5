//! Lecteur factice qui enregistre chaque appel, avec injection d'échecs,
//! de paniques et de latences par opération.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use zenaudio::{
    AudioPlayer, NotificationPermission, PermissionStatus, PlatformError, PlatformResult,
    PlaybackState, PlayerOptions, PlayerSetup, RepeatMode, Track, async_trait,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Setup,
    UpdateOptions,
    SetRepeatMode(RepeatMode),
    SetVolume,
    Queue,
    Add(String),
    Reset,
    Play,
    Pause,
    Stop,
    State,
}

impl Call {
    /// Appels qui modifient ce qui est chargé ou joué
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Call::Setup | Call::Add(_) | Call::Reset | Call::Play | Call::Pause | Call::Stop
        )
    }
}

#[derive(Default)]
pub struct FakePlayer {
    calls: Mutex<Vec<Call>>,
    queue: Mutex<Vec<Track>>,
    failures: Mutex<HashSet<&'static str>>,
    panics: Mutex<HashSet<&'static str>>,
    delays: Mutex<HashMap<&'static str, Duration>>,
}

impl FakePlayer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail(&self, operation: &'static str) {
        self.failures.lock().unwrap().insert(operation);
    }

    pub fn heal(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    pub fn panic_on(&self, operation: &'static str) {
        self.panics.lock().unwrap().insert(operation);
    }

    pub fn calm_down(&self, operation: &'static str) {
        self.panics.lock().unwrap().remove(operation);
    }

    pub fn delay(&self, operation: &'static str, delay: Duration) {
        self.delays.lock().unwrap().insert(operation, delay);
    }

    /// Remplit la file sans passer par `add` (état laissé par un autre client)
    pub fn preload(&self, tracks: Vec<Track>) {
        self.queue.lock().unwrap().extend(tracks);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn transport_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_transport).collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }

    pub fn position(&self, call: &Call) -> Option<usize> {
        self.calls().iter().position(|c| c == call)
    }

    pub fn loaded_ids(&self) -> Vec<String> {
        self.queue
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.id.clone())
            .collect()
    }

    async fn enter(&self, operation: &'static str, call: Call) -> PlatformResult<()> {
        self.calls.lock().unwrap().push(call);

        let delay = self.delays.lock().unwrap().get(operation).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let should_panic = self.panics.lock().unwrap().contains(operation);
        if should_panic {
            panic!("injected panic in {}", operation);
        }

        let should_fail = self.failures.lock().unwrap().contains(operation);
        if should_fail {
            return Err(PlatformError::operation(operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl AudioPlayer for FakePlayer {
    async fn setup(&self, _setup: &PlayerSetup) -> PlatformResult<()> {
        self.enter("setup", Call::Setup).await
    }

    async fn update_options(&self, _options: &PlayerOptions) -> PlatformResult<()> {
        self.enter("update_options", Call::UpdateOptions).await
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> PlatformResult<()> {
        self.enter("set_repeat_mode", Call::SetRepeatMode(mode)).await
    }

    async fn set_volume(&self, _volume: f32) -> PlatformResult<()> {
        self.enter("set_volume", Call::SetVolume).await
    }

    async fn queue(&self) -> PlatformResult<Vec<Track>> {
        self.enter("queue", Call::Queue).await?;
        Ok(self.queue.lock().unwrap().clone())
    }

    async fn add(&self, track: Track) -> PlatformResult<()> {
        self.enter("add", Call::Add(track.id.clone())).await?;
        self.queue.lock().unwrap().push(track);
        Ok(())
    }

    async fn reset(&self) -> PlatformResult<()> {
        self.enter("reset", Call::Reset).await?;
        self.queue.lock().unwrap().clear();
        Ok(())
    }

    async fn play(&self) -> PlatformResult<()> {
        self.enter("play", Call::Play).await
    }

    async fn pause(&self) -> PlatformResult<()> {
        self.enter("pause", Call::Pause).await
    }

    async fn stop(&self) -> PlatformResult<()> {
        self.enter("stop", Call::Stop).await
    }

    async fn state(&self) -> PlatformResult<PlaybackState> {
        self.enter("state", Call::State).await?;
        Ok(PlaybackState::Playing)
    }
}

/// Demande de permission factice qui compte les appels
#[derive(Default)]
pub struct FakePermission {
    pub requests: AtomicUsize,
    pub fail: bool,
}

impl FakePermission {
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationPermission for FakePermission {
    async fn request_notification_permission(&self) -> PlatformResult<PermissionStatus> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(PlatformError::Permission("injected failure".into()))
        } else {
            Ok(PermissionStatus::Granted)
        }
    }
}
