//! Déroulé des deux écrans de méditation
//!
//! - [`GuidedMeditation`] : `Intro → Meditate → Result` sur une catégorie,
//!   la séance terminée incrémente le compteur de la catégorie
//! - [`CreatedMeditationFlow`] : `Form → Meditate → Result`, la méditation
//!   créée est enregistrée à son terme
//!
//! L'interface appelle `tick()` régulièrement (chaque seconde) pendant
//! l'étape `Meditate`.

use crate::{MeditationTimer, Result, ScreenAudio, SessionError, format_mmss};
use std::sync::Arc;
use tracing::{info, warn};
use zenaudio::{Category, SessionManager};
use zenstore::{CreatedMeditation, StatsStore};

/// Étape d'un écran de méditation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Intro,
    Form,
    Meditate,
    Result,
}

/// Durée d'une séance guidée par défaut
pub const DEFAULT_GUIDED_MINUTES: u32 = 8;

/// Durées proposées par l'écran de création
pub const CREATED_MINUTE_CHOICES: [u32; 3] = [8, 12, 20];

/// Catégorie jouée pendant une méditation créée
pub const CREATED_MEDITATION_CATEGORY: Category = Category::Calm;

fn minutes_to_seconds(minutes: u32) -> Result<u32> {
    let seconds = minutes.saturating_mul(60);
    if seconds == 0 || seconds > MeditationTimer::MAX_DURATION {
        return Err(SessionError::InvalidDuration(seconds));
    }
    Ok(seconds)
}

pub struct GuidedMeditation {
    audio: Arc<ScreenAudio>,
    stats: Arc<StatsStore>,
    duration_seconds: u32,
    step: Step,
    timer: MeditationTimer,
    recorded: bool,
}

impl GuidedMeditation {
    pub fn new(
        category: Category,
        manager: Arc<SessionManager>,
        stats: Arc<StatsStore>,
        music_on: bool,
        minutes: u32,
    ) -> Result<Self> {
        Ok(Self {
            audio: Arc::new(ScreenAudio::new(manager, category, Step::Intro, music_on)),
            stats,
            duration_seconds: minutes_to_seconds(minutes)?,
            step: Step::Intro,
            timer: MeditationTimer::new(),
            recorded: false,
        })
    }

    pub fn audio(&self) -> &Arc<ScreenAudio> {
        &self.audio
    }

    pub fn category(&self) -> Category {
        self.audio.category()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer
            .remaining_seconds()
            .unwrap_or(self.duration_seconds)
    }

    pub fn remaining_display(&self) -> String {
        format_mmss(self.remaining_seconds())
    }

    pub async fn on_focus(&self) {
        self.audio.on_focus().await;
    }

    /// Quitter l'écran ramène à l'introduction
    pub async fn on_blur(&mut self) {
        self.audio.on_blur().await;
        self.reset_to(Step::Intro);
        self.audio.set_step(Step::Intro).await;
    }

    /// Démarre la séance
    pub async fn begin(&mut self) -> Result<()> {
        if self.step != Step::Intro {
            return Err(SessionError::InvalidStep {
                action: "begin",
                from: self.step,
            });
        }

        self.timer.start(self.duration_seconds)?;
        self.recorded = false;
        self.step = Step::Meditate;
        info!(category = %self.category(), seconds = self.duration_seconds, "Guided meditation started");
        self.audio.set_step(Step::Meditate).await;
        Ok(())
    }

    /// Vérifie l'échéance. Au terme, la séance est comptée une seule fois et
    /// l'écran passe au résultat ; retourne alors le nouveau compteur.
    pub async fn tick(&mut self) -> Result<Option<u32>> {
        if self.step != Step::Meditate || self.recorded || !self.timer.is_expired() {
            return Ok(None);
        }

        self.recorded = true;
        let recorded = self.stats.record_category_completion(self.category());

        self.timer.cancel();
        self.step = Step::Result;
        self.audio.set_step(Step::Result).await;

        let count = recorded?;
        info!(category = %self.category(), count, "Guided meditation completed");
        Ok(Some(count))
    }

    /// Retour à l'introduction (bouton « recommencer »)
    pub async fn restart(&mut self) {
        self.reset_to(Step::Intro);
        self.audio.set_step(Step::Intro).await;
    }

    fn reset_to(&mut self, step: Step) {
        self.timer.cancel();
        self.recorded = false;
        self.step = step;
    }
}

pub struct CreatedMeditationFlow {
    audio: Arc<ScreenAudio>,
    stats: Arc<StatsStore>,
    step: Step,
    timer: MeditationTimer,
    name: String,
    minutes: u32,
    saved: Option<CreatedMeditation>,
}

impl CreatedMeditationFlow {
    pub fn new(manager: Arc<SessionManager>, stats: Arc<StatsStore>, music_on: bool) -> Self {
        Self {
            audio: Arc::new(ScreenAudio::new(
                manager,
                CREATED_MEDITATION_CATEGORY,
                Step::Form,
                music_on,
            )),
            stats,
            step: Step::Form,
            timer: MeditationTimer::new(),
            name: String::new(),
            minutes: CREATED_MINUTE_CHOICES[0],
            saved: None,
        }
    }

    pub fn audio(&self) -> &Arc<ScreenAudio> {
        &self.audio
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Méditation enregistrée à la fin de la dernière séance
    pub fn saved(&self) -> Option<&CreatedMeditation> {
        self.saved.as_ref()
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.timer
            .remaining_seconds()
            .unwrap_or(self.minutes.saturating_mul(60))
    }

    pub fn remaining_display(&self) -> String {
        format_mmss(self.remaining_seconds())
    }

    /// Texte partagé depuis l'écran de résultat
    pub fn share_message(&self) -> String {
        let name = self.name.trim();
        let name = if name.is_empty() {
            zenstore::stats::DEFAULT_MEDITATION_NAME
        } else {
            name
        };
        format!("I created \"{}\" for {} minutes", name, self.minutes)
    }

    pub async fn on_focus(&self) {
        self.audio.on_focus().await;
    }

    /// Quitter l'écran pendant la séance la abandonne
    pub async fn on_blur(&mut self) {
        self.audio.on_blur().await;
        if self.step == Step::Meditate {
            info!("Created meditation abandoned");
            self.reset_to_form();
            self.audio.set_step(Step::Form).await;
        }
    }

    pub async fn begin(&mut self, name: &str, minutes: u32) -> Result<()> {
        if self.step != Step::Form {
            return Err(SessionError::InvalidStep {
                action: "begin",
                from: self.step,
            });
        }

        self.timer.start(minutes_to_seconds(minutes)?)?;
        self.name = name.to_string();
        self.minutes = minutes;
        self.saved = None;
        self.step = Step::Meditate;
        info!(minutes, "Created meditation started");
        self.audio.set_step(Step::Meditate).await;
        Ok(())
    }

    /// Au terme de la séance, l'enregistre une seule fois et passe au résultat
    pub async fn tick(&mut self) -> Result<Option<CreatedMeditation>> {
        if self.step != Step::Meditate || self.saved.is_some() || !self.timer.is_expired() {
            return Ok(None);
        }

        let saved = self.stats.save_created_meditation(&self.name, self.minutes);

        self.timer.cancel();
        self.step = Step::Result;
        self.audio.set_step(Step::Result).await;

        match saved {
            Ok(meditation) => {
                self.saved = Some(meditation.clone());
                Ok(Some(meditation))
            }
            Err(e) => {
                warn!("Created meditation not saved: {}", e);
                Err(e.into())
            }
        }
    }

    /// Nouvelle séance depuis le formulaire
    pub async fn restart(&mut self) {
        self.reset_to_form();
        self.audio.set_step(Step::Form).await;
    }

    fn reset_to_form(&mut self) {
        self.timer.cancel();
        self.saved = None;
        self.step = Step::Form;
    }
}
