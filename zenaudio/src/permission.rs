//! Permission de notification (lecture en arrière-plan)
//!
//! Certaines plateformes exigent un consentement explicite pour afficher la
//! notification du lecteur. La demande est faite au mieux : un refus ou un
//! échec n'empêche jamais la lecture.

use crate::PlatformResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Réponse de l'utilisateur à la demande de permission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    NeverAskAgain,
}

/// Capacité de demande de permission fournie par la plateforme
#[async_trait]
pub trait NotificationPermission: Send + Sync {
    async fn request_notification_permission(&self) -> PlatformResult<PermissionStatus>;
}

/// Plateforme sans consentement à l'exécution : toujours accordé
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPermission;

#[async_trait]
impl NotificationPermission for NoPermission {
    async fn request_notification_permission(&self) -> PlatformResult<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }
}

/// Système d'exploitation hôte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Android,
    Ios,
    Other,
}

/// Description de l'hôte, utilisée pour savoir si la permission doit être demandée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: Os,
    pub api_level: u32,
    consent_api_level: u32,
}

impl HostPlatform {
    /// Premier niveau d'API Android exigeant le consentement aux notifications
    pub const NOTIFICATION_CONSENT_API_LEVEL: u32 = 33;

    pub fn android(api_level: u32) -> Self {
        Self {
            os: Os::Android,
            api_level,
            consent_api_level: Self::NOTIFICATION_CONSENT_API_LEVEL,
        }
    }

    pub fn ios() -> Self {
        Self {
            os: Os::Ios,
            api_level: 0,
            consent_api_level: Self::NOTIFICATION_CONSENT_API_LEVEL,
        }
    }

    /// Hôte sans contrainte (desktop, tests)
    pub fn headless() -> Self {
        Self {
            os: Os::Other,
            api_level: 0,
            consent_api_level: Self::NOTIFICATION_CONSENT_API_LEVEL,
        }
    }

    pub fn with_consent_api_level(mut self, level: u32) -> Self {
        self.consent_api_level = level;
        self
    }

    pub fn requires_notification_consent(&self) -> bool {
        self.os == Os::Android && self.api_level >= self.consent_api_level
    }
}

/// Associe l'hôte et la capacité de demande.
#[derive(Clone)]
pub struct PermissionGate {
    platform: HostPlatform,
    requester: Arc<dyn NotificationPermission>,
}

impl PermissionGate {
    pub fn new(platform: HostPlatform, requester: Arc<dyn NotificationPermission>) -> Self {
        Self {
            platform,
            requester,
        }
    }

    /// Hôte qui n'exige aucune demande
    pub fn none() -> Self {
        Self::new(HostPlatform::headless(), Arc::new(NoPermission))
    }

    pub fn platform(&self) -> HostPlatform {
        self.platform
    }

    /// Demande la permission si l'hôte l'exige. Les échecs sont ignorés.
    pub async fn request_if_needed(&self) {
        if !self.platform.requires_notification_consent() {
            return;
        }
        match self.requester.request_notification_permission().await {
            Ok(status) => debug!(?status, "Notification permission answered"),
            Err(e) => debug!("Notification permission request failed (ignored): {}", e),
        }
    }
}

impl std::fmt::Debug for PermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionGate")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
