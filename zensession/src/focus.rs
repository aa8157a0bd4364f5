//! Politique musicale d'un écran de méditation
//!
//! Un écran ne joue sa catégorie que s'il a le focus, qu'il est à l'étape
//! `Meditate` et que le réglage musique est actif. Dans tous les autres cas
//! (sauf hors focus, où la sortie de l'écran a déjà arrêté la musique) il
//! demande l'arrêt.

use crate::Step;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use zenaudio::{Category, SessionManager};
use zenstore::SettingsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenState {
    music_on: bool,
    step: Step,
    focused: bool,
}

#[derive(Debug)]
pub struct ScreenAudio {
    manager: Arc<SessionManager>,
    category: Category,
    state: Mutex<ScreenState>,
}

impl ScreenAudio {
    /// Écran hors focus, à l'étape `initial`
    pub fn new(
        manager: Arc<SessionManager>,
        category: Category,
        initial: Step,
        music_on: bool,
    ) -> Self {
        Self {
            manager,
            category,
            state: Mutex::new(ScreenState {
                music_on,
                step: initial,
                focused: false,
            }),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn step(&self) -> Step {
        self.lock().step
    }

    pub fn music_on(&self) -> bool {
        self.lock().music_on
    }

    pub fn is_focused(&self) -> bool {
        self.lock().focused
    }

    /// Applique la politique à l'état courant
    pub async fn apply(&self) {
        let state = *self.lock();
        if !state.focused {
            return;
        }

        if state.step == Step::Meditate && state.music_on {
            if let Err(e) = self.manager.play_category(self.category).await {
                warn!(category = %self.category, "Screen music failed to start: {}", e);
            }
        } else {
            self.manager.stop_music().await;
        }
    }

    pub async fn on_focus(&self) {
        self.lock().focused = true;
        self.apply().await;
    }

    /// Sortie de l'écran : la musique s'arrête toujours
    pub async fn on_blur(&self) {
        self.lock().focused = false;
        self.manager.stop_music().await;
    }

    pub async fn set_step(&self, step: Step) {
        self.lock().step = step;
        self.apply().await;
    }

    pub async fn set_music_on(&self, on: bool) {
        self.lock().music_on = on;
        self.apply().await;
    }

    /// Suit les changements du réglage musique jusqu'à la fermeture du canal
    pub fn follow_settings(self: &Arc<Self>, mut rx: broadcast::Receiver<bool>) -> JoinHandle<()> {
        let screen = Arc::clone(self);
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(on) => {
                        debug!(category = %screen.category, on, "Music setting changed");
                        screen.set_music_on(on).await;
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Music setting updates skipped");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, ScreenState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Bascule du réglage musique depuis le profil : persiste, diffuse aux
/// écrans abonnés et coupe la musique quand elle est désactivée.
pub async fn toggle_music(settings: &SettingsStore, manager: &SessionManager, on: bool) {
    settings.set_music_on(on);
    if !on {
        manager.stop_music().await;
    }
}
