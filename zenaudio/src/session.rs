//! Gestionnaire de session audio
//!
//! Toutes les commandes (play / pause / resume / stop) passent par une voie
//! unique : un canal `mpsc` consommé par une seule tâche Tokio. Une commande
//! est soumise au moment de l'appel, s'exécute entièrement avant la suivante,
//! et son échec (ou sa panique) n'empêche jamais les commandes suivantes de
//! s'exécuter.
//!
//! ```text
//! UI (focus, blur, toggle) ──submit──▶ [Play(calm), Stop, Play(energy)] ──▶ Lane ──▶ AudioPlayer
//!                          ◀─oneshot──                                       │
//!                                                                            └──▶ watch<SessionState>
//! ```

use crate::{
    AudioError, AudioPlayer, Category, PermissionGate, PlatformError, PlayerOptions, PlayerSetup,
    RepeatMode, Result, Track, TrackCatalog,
};
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, warn};

/// Ce que le gestionnaire croit être chargé dans le lecteur
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Passe à `true` après la première initialisation réussie, ne revient jamais à `false`
    pub initialized: bool,
    pub current_category: Option<Category>,
}

/// Paramètres appliqués lors de l'initialisation du lecteur
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub setup: PlayerSetup,
    pub options: PlayerOptions,
    pub volume: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            setup: PlayerSetup::default(),
            options: PlayerOptions::default(),
            volume: 0.9,
        }
    }
}

/// Commande soumise à la voie de sérialisation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Category),
    Pause,
    Resume,
    Stop,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Play(_) => "play",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Stop => "stop",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Play(category) => write!(f, "play({})", category),
            other => f.write_str(other.name()),
        }
    }
}

type Submission = (Command, oneshot::Sender<Result<()>>);

/// Point d'entrée unique vers le lecteur audio.
///
/// Construit une fois au démarrage puis partagé (clone bon marché ou `Arc`).
/// Les opérations retournent un futur, mais la commande est mise en file dès
/// l'appel : l'ordre d'exécution est l'ordre des appels, que le futur soit
/// attendu ou non.
#[derive(Clone)]
pub struct SessionManager {
    tx: mpsc::UnboundedSender<Submission>,
    state: watch::Receiver<SessionState>,
}

impl SessionManager {
    pub fn builder(player: Arc<dyn AudioPlayer>) -> SessionManagerBuilder {
        SessionManagerBuilder {
            player,
            permissions: PermissionGate::none(),
            catalog: TrackCatalog::default(),
            config: SessionConfig::default(),
        }
    }

    /// Joue la piste d'une catégorie, en bouclant indéfiniment.
    ///
    /// Les échecs d'initialisation et de chargement sont remontés ;
    /// la demande de permission de notification est faite au mieux.
    pub fn play_category(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        let reply = self.submit(Command::Play(category));
        async move {
            match reply.await {
                Ok(result) => result,
                Err(_) => Err(AudioError::LaneClosed),
            }
        }
    }

    /// Met en pause. Sans effet si le lecteur n'a jamais été initialisé.
    pub fn pause_music(&self) -> impl Future<Output = ()> + Send + 'static {
        self.best_effort(Command::Pause)
    }

    /// Reprend la lecture de ce qui est chargé, en initialisant le lecteur si besoin.
    pub fn resume_music(&self) -> impl Future<Output = ()> + Send + 'static {
        self.best_effort(Command::Resume)
    }

    /// Arrête la lecture et vide la file. Sans effet si le lecteur n'a jamais été initialisé.
    pub fn stop_music(&self) -> impl Future<Output = ()> + Send + 'static {
        self.best_effort(Command::Stop)
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn current_category(&self) -> Option<Category> {
        self.state.borrow().current_category
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Observe les changements d'état de la session
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    fn submit(&self, command: Command) -> oneshot::Receiver<Result<()>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        if self.tx.send((command, reply_tx)).is_err() {
            warn!(%command, "Audio session lane is closed, command dropped");
        }
        reply_rx
    }

    fn best_effort(&self, command: Command) -> impl Future<Output = ()> + Send + 'static {
        let reply = self.submit(command);
        async move {
            match reply.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => debug!(%command, "Best-effort command failed: {}", e),
                Err(_) => debug!(%command, "Audio session lane is closed"),
            }
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Construction du [`SessionManager`]
pub struct SessionManagerBuilder {
    player: Arc<dyn AudioPlayer>,
    permissions: PermissionGate,
    catalog: TrackCatalog,
    config: SessionConfig,
}

impl SessionManagerBuilder {
    pub fn permissions(mut self, permissions: PermissionGate) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn catalog(mut self, catalog: TrackCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Lance la tâche de la voie de sérialisation.
    ///
    /// Doit être appelé depuis un runtime Tokio.
    pub fn spawn(self) -> SessionManager {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionState::default());

        let lane = Lane {
            player: self.player,
            permissions: self.permissions,
            catalog: self.catalog,
            config: self.config,
            state: state_tx,
        };
        tokio::spawn(lane.run(rx));

        SessionManager {
            tx,
            state: state_rx,
        }
    }
}

/// Tâche unique qui possède le lecteur et exécute les commandes une par une
struct Lane {
    player: Arc<dyn AudioPlayer>,
    permissions: PermissionGate,
    catalog: TrackCatalog,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
}

impl Lane {
    async fn run(mut self, mut rx: mpsc::UnboundedReceiver<Submission>) {
        debug!("Audio session lane started");

        while let Some((command, reply)) = rx.recv().await {
            let result = match AssertUnwindSafe(self.execute(command))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    error!(%command, "Audio command panicked, lane continues");
                    Err(AudioError::CommandPanicked(command.name()))
                }
            };

            // L'appelant a pu abandonner son futur
            let _ = reply.send(result);
        }

        debug!("Audio session lane stopped");
    }

    async fn execute(&mut self, command: Command) -> Result<()> {
        debug!(%command, "Running audio command");
        match command {
            Command::Play(category) => self.play(category).await,
            Command::Pause => {
                self.pause().await;
                Ok(())
            }
            Command::Resume => {
                self.resume().await;
                Ok(())
            }
            Command::Stop => {
                self.stop().await;
                Ok(())
            }
        }
    }

    fn initialized(&self) -> bool {
        self.state.borrow().initialized
    }

    /// Initialisation unique du lecteur (idempotente)
    async fn ensure(&mut self) -> std::result::Result<(), PlatformError> {
        if self.initialized() {
            return Ok(());
        }

        self.player.setup(&self.config.setup).await?;
        self.player.update_options(&self.config.options).await?;
        self.player.set_repeat_mode(RepeatMode::Track).await?;
        self.player.set_volume(self.config.volume).await?;

        self.state.send_modify(|s| s.initialized = true);
        info!(volume = self.config.volume, "Audio player initialized");
        Ok(())
    }

    async fn play(&mut self, category: Category) -> Result<()> {
        self.permissions.request_if_needed().await;
        self.ensure().await.map_err(AudioError::Setup)?;

        let load = |source| AudioError::Load { category, source };

        let queue = self.player.queue().await.map_err(load)?;
        if is_loaded(&queue, category) {
            debug!(%category, "Category already loaded, resuming");
            self.player.play().await.map_err(load)?;
        } else {
            // Invariant : au plus une piste dans la file
            if queue.len() > 1 {
                warn!(queued = queue.len(), "Unexpected multi-track queue, clearing it");
            }
            if !queue.is_empty() {
                self.player.reset().await.map_err(load)?;
            }
            let track = self.catalog.track(category).clone();
            self.player.add(track).await.map_err(load)?;
            self.player
                .set_repeat_mode(RepeatMode::Track)
                .await
                .map_err(load)?;
            self.player.play().await.map_err(load)?;
            info!(%category, "Category loaded and playing");
        }

        self.state
            .send_modify(|s| s.current_category = Some(category));
        Ok(())
    }

    async fn pause(&mut self) {
        if !self.initialized() {
            debug!("Pause ignored, player not initialized");
            return;
        }
        if let Err(e) = self.player.pause().await {
            warn!("Pause failed (ignored): {}", e);
        }
    }

    async fn resume(&mut self) {
        if let Err(e) = self.ensure().await {
            warn!("Player setup failed on resume (ignored): {}", e);
            return;
        }
        if let Err(e) = self.player.play().await {
            warn!("Resume failed (ignored): {}", e);
        }
    }

    async fn stop(&mut self) {
        if !self.initialized() {
            debug!("Stop ignored, player not initialized");
            return;
        }

        match self.player.state().await {
            Ok(state) => {
                debug!(?state, "Stopping playback");
                if let Err(e) = self.player.stop().await {
                    warn!("Stop failed (ignored): {}", e);
                }
            }
            Err(e) => debug!("Playback state query failed, skipping stop: {}", e),
        }

        // Toujours revenir à « rien de chargé », même si stop a échoué
        if let Err(e) = self.player.reset().await {
            warn!("Reset after stop failed (ignored): {}", e);
        }
        self.state.send_modify(|s| s.current_category = None);
        info!("Playback stopped");
    }
}

fn is_loaded(queue: &[Track], category: Category) -> bool {
    matches!(queue, [only] if only.is_category(category))
}
