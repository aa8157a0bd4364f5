use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use zenaudio::{AudioConfigExt, Category, Os, PermissionGate, SessionManager, SimulatedPlayer};
use zenconfig::get_config;
use zensession::{GuidedMeditation, MeditationConfigExt, Step};
use zenstore::StoreConfigExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Configuration et logs ==========
    let config = get_config();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().to_lowercase()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(directory = %config.directory(), "🧘 ZenMeditation starting");

    // ========== PHASE 2 : Session audio ==========
    info!("🎵 Starting audio session...");
    let player = Arc::new(SimulatedPlayer::new());
    let manager = Arc::new(
        SessionManager::builder(player.clone())
            .permissions(PermissionGate::new(
                config.host_platform(Os::Other, 0),
                Arc::new(zenaudio::NoPermission),
            ))
            .catalog(config.track_catalog())
            .config(config.session_config())
            .spawn(),
    );

    // ========== PHASE 3 : Réglages et statistiques ==========
    let settings = config.open_settings_store()?;
    let profile = config.open_profile_store()?;
    info!("👋 Hello, {}", profile.greeting_name());
    let stats = Arc::new(config.open_stats_store()?);
    let before = stats.summary();
    info!(
        "📊 {} session(s), {} minute(s), favourite: {}",
        before.session_count,
        before.total_minutes,
        before.favourite_label()
    );

    // ========== PHASE 4 : Séance guidée ==========
    let category = before.favourite.unwrap_or(Category::Calm);
    let mut flow = GuidedMeditation::new(
        category,
        manager.clone(),
        stats.clone(),
        settings.music_on(),
        config.guided_minutes(),
    )?;
    let follower = flow.audio().follow_settings(settings.subscribe_music());

    flow.on_focus().await;
    flow.begin().await?;
    info!(
        "✅ {} meditation started ({}), press Ctrl+C to stop...",
        category.label(),
        flow.remaining_display()
    );

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match flow.tick().await {
                    Ok(Some(count)) => {
                        info!("🎉 {} meditation completed ({} so far)", category.label(), count);
                        break;
                    }
                    Ok(None) => {
                        let remaining = flow.remaining_seconds();
                        if remaining % 60 == 0 && flow.step() == Step::Meditate {
                            info!("⏳ {} left", flow.remaining_display());
                        }
                    }
                    Err(e) => {
                        warn!("⚠️ Failed to record meditation: {}", e);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Meditation interrupted");
                break;
            }
        }
    }

    // ========== PHASE 5 : Arrêt ==========
    flow.on_blur().await;
    follower.abort();

    let after = stats.summary();
    info!(
        "📊 {} session(s), {} minute(s), favourite: {}",
        after.session_count,
        after.total_minutes,
        after.favourite_label()
    );
    info!(player = ?player.snapshot().state, "👋 ZenMeditation stopped");

    Ok(())
}
