//! Compte à rebours d'une méditation.
//!
//! Dérivé d'un minuteur de mise en veille : une échéance absolue, consultée
//! à chaque tick de l'interface. Basé sur `tokio::time::Instant` pour que les
//! tests puissent suspendre et avancer l'horloge.

use crate::{Result, SessionError};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct MeditationTimer {
    /// Échéance (None si aucun compte à rebours actif)
    end_time: Option<Instant>,
    /// Durée totale configurée, en secondes
    duration_seconds: u32,
}

impl MeditationTimer {
    /// Durée maximale : 2 heures
    pub const MAX_DURATION: u32 = 7200;

    pub fn new() -> Self {
        Self::default()
    }

    /// Démarre (ou redémarre) le compte à rebours.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidDuration`] si la durée vaut 0 ou dépasse
    /// [`MAX_DURATION`](Self::MAX_DURATION).
    pub fn start(&mut self, duration_seconds: u32) -> Result<()> {
        if duration_seconds == 0 || duration_seconds > Self::MAX_DURATION {
            return Err(SessionError::InvalidDuration(duration_seconds));
        }

        self.duration_seconds = duration_seconds;
        self.end_time = Some(Instant::now() + Duration::from_secs(u64::from(duration_seconds)));
        Ok(())
    }

    /// Secondes restantes, arrondies au supérieur ; None si inactif
    pub fn remaining_seconds(&self) -> Option<u32> {
        self.end_time.map(|end| {
            let left = end.saturating_duration_since(Instant::now());
            let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
            u32::try_from(secs).unwrap_or(self.duration_seconds)
        })
    }

    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn is_expired(&self) -> bool {
        self.end_time
            .map(|end| Instant::now() >= end)
            .unwrap_or(false)
    }

    pub fn cancel(&mut self) {
        self.end_time = None;
        self.duration_seconds = 0;
    }
}

/// Affichage `m:ss` (ex. `8:00`, `0:07`)
pub fn format_mmss(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_creation() {
        let timer = MeditationTimer::new();
        assert!(!timer.is_active());
        assert!(!timer.is_expired());
        assert_eq!(timer.remaining_seconds(), None);
        assert_eq!(timer.duration_seconds(), 0);
    }

    #[test]
    fn test_timer_validation() {
        let mut timer = MeditationTimer::new();

        assert!(matches!(
            timer.start(0),
            Err(SessionError::InvalidDuration(0))
        ));
        assert!(timer.start(MeditationTimer::MAX_DURATION + 1).is_err());
        assert!(!timer.is_active());

        assert!(timer.start(1).is_ok());
        assert!(timer.start(MeditationTimer::MAX_DURATION).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_and_expiry() {
        let mut timer = MeditationTimer::new();
        timer.start(480).unwrap();
        assert_eq!(timer.remaining_seconds(), Some(480));

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(timer.remaining_seconds(), Some(479));
        assert!(!timer.is_expired());

        tokio::time::advance(Duration::from_secs(479)).await;
        assert!(timer.is_expired());
        assert_eq!(timer.remaining_seconds(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_and_cancel() {
        let mut timer = MeditationTimer::new();
        timer.start(60).unwrap();
        tokio::time::advance(Duration::from_secs(30)).await;

        timer.start(60).unwrap();
        assert_eq!(timer.remaining_seconds(), Some(60));

        timer.cancel();
        assert!(!timer.is_active());
        assert_eq!(timer.remaining_seconds(), None);
        assert_eq!(timer.duration_seconds(), 0);
    }

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(480), "8:00");
        assert_eq!(format_mmss(7), "0:07");
        assert_eq!(format_mmss(719), "11:59");
        assert_eq!(format_mmss(0), "0:00");
    }
}
