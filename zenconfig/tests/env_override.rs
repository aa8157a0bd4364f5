//! Surcharges par variables d'environnement.
//!
//! Dans son propre binaire de test : modifier l'environnement pendant que
//! d'autres tests chargent une configuration n'est pas sûr.

use serde_yaml::Value;
use tempfile::TempDir;
use zenconfig::Config;

#[test]
fn test_env_override() {
    let dir = TempDir::new().unwrap();
    unsafe {
        std::env::set_var("ZENMEDITATION_CONFIG__PLAYER__STOP_GRACE_PERIOD", "12");
        std::env::set_var("ZENMEDITATION_CONFIG__TESTING__FLAG", "true");
    }
    let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
    unsafe {
        std::env::remove_var("ZENMEDITATION_CONFIG__PLAYER__STOP_GRACE_PERIOD");
        std::env::remove_var("ZENMEDITATION_CONFIG__TESTING__FLAG");
    }

    assert_eq!(config.get_stop_grace_period(), 12);
    assert_eq!(
        config.get_value(&["testing", "flag"]).unwrap(),
        Value::Bool(true)
    );
    // Les autres valeurs par défaut sont intactes
    assert_eq!(config.get_max_buffer(), 60);
}
