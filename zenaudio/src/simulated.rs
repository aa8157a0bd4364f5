//! Lecteur simulé en mémoire
//!
//! Implémentation de [`AudioPlayer`] sans sortie audio, pour les hôtes
//! headless et la démonstration. Reproduit les règles d'un lecteur mono-file :
//! `setup` une seule fois, `reset` vide la file, `play` sur une file vide ne
//! fait rien.

use crate::{
    AudioPlayer, PlatformError, PlatformResult, PlaybackState, PlayerOptions, PlayerSetup,
    RepeatMode, Track,
};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

/// Instantané de l'état du lecteur simulé
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedSnapshot {
    pub set_up: bool,
    pub queue: Vec<Track>,
    pub state: PlaybackState,
    pub volume: f32,
    pub repeat_mode: RepeatMode,
}

impl Default for SimulatedSnapshot {
    fn default() -> Self {
        Self {
            set_up: false,
            queue: Vec::new(),
            state: PlaybackState::None,
            volume: 1.0,
            repeat_mode: RepeatMode::Off,
        }
    }
}

#[derive(Debug, Default)]
pub struct SimulatedPlayer {
    inner: Mutex<SimulatedSnapshot>,
}

impl SimulatedPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SimulatedSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SimulatedSnapshot> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ready(&self) -> PlatformResult<MutexGuard<'_, SimulatedSnapshot>> {
        let guard = self.lock();
        if guard.set_up {
            Ok(guard)
        } else {
            Err(PlatformError::NotSetUp)
        }
    }
}

#[async_trait]
impl AudioPlayer for SimulatedPlayer {
    async fn setup(&self, setup: &PlayerSetup) -> PlatformResult<()> {
        let mut inner = self.lock();
        if inner.set_up {
            return Err(PlatformError::AlreadySetUp);
        }
        trace!(?setup, "simulated setup");
        inner.set_up = true;
        inner.state = PlaybackState::None;
        Ok(())
    }

    async fn update_options(&self, options: &PlayerOptions) -> PlatformResult<()> {
        self.ready()?;
        trace!(?options, "simulated update_options");
        Ok(())
    }

    async fn set_repeat_mode(&self, mode: RepeatMode) -> PlatformResult<()> {
        self.ready()?.repeat_mode = mode;
        Ok(())
    }

    async fn set_volume(&self, volume: f32) -> PlatformResult<()> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(PlatformError::operation(
                "set_volume",
                format!("volume {} out of range", volume),
            ));
        }
        self.ready()?.volume = volume;
        Ok(())
    }

    async fn queue(&self) -> PlatformResult<Vec<Track>> {
        Ok(self.ready()?.queue.clone())
    }

    async fn add(&self, track: Track) -> PlatformResult<()> {
        let mut inner = self.ready()?;
        trace!(id = %track.id, url = %track.url, "simulated add");
        inner.queue.push(track);
        if inner.state == PlaybackState::None {
            inner.state = PlaybackState::Ready;
        }
        Ok(())
    }

    async fn reset(&self) -> PlatformResult<()> {
        let mut inner = self.ready()?;
        inner.queue.clear();
        inner.state = PlaybackState::None;
        Ok(())
    }

    async fn play(&self) -> PlatformResult<()> {
        let mut inner = self.ready()?;
        if !inner.queue.is_empty() {
            inner.state = PlaybackState::Playing;
        }
        Ok(())
    }

    async fn pause(&self) -> PlatformResult<()> {
        let mut inner = self.ready()?;
        if inner.state == PlaybackState::Playing {
            inner.state = PlaybackState::Paused;
        }
        Ok(())
    }

    async fn stop(&self) -> PlatformResult<()> {
        let mut inner = self.ready()?;
        if !inner.queue.is_empty() {
            inner.state = PlaybackState::Stopped;
        }
        Ok(())
    }

    async fn state(&self) -> PlatformResult<PlaybackState> {
        Ok(self.ready()?.state)
    }
}
