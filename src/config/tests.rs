use std::sync::{Mutex, OnceLock};

use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::player::LoopMode;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_soundfree_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SOUNDFREE_CONFIG_PATH", "/tmp/soundfree-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/soundfree-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home/soundfree/config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/sf-home");
    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/sf-home/.config/soundfree/config.toml")
    );
}

#[test]
fn defaults_are_sane() {
    let settings = Settings::default();
    assert!(!settings.playback.shuffle);
    assert_eq!(settings.playback.loop_mode, LoopModeSetting::NoLoop);
    assert_eq!(settings.transport.tick_ms, 200);
    assert_eq!(settings.storage.data_path, None);
    assert!(settings.validate().is_ok());
}

#[test]
fn validate_rejects_zero_tick() {
    let mut settings = Settings::default();
    settings.transport.tick_ms = 0;
    assert!(settings.validate().is_err());
}

#[test]
fn toml_accepts_loop_mode_aliases() {
    let settings: Settings = toml::from_str(
        r#"
        [playback]
        shuffle = true
        loop_mode = "all"
        "#,
    )
    .unwrap();
    assert!(settings.playback.shuffle);
    assert_eq!(settings.playback.loop_mode, LoopModeSetting::LoopAll);

    let settings: Settings = toml::from_str("[playback]\nloop_mode = \"repeat-one\"\n").unwrap();
    assert_eq!(settings.playback.loop_mode, LoopModeSetting::LoopOne);
    assert_eq!(LoopMode::from(settings.playback.loop_mode), LoopMode::LoopOne);
}

#[test]
fn environment_overrides_defaults() {
    let _lock = env_lock();
    // Point the file source somewhere that does not exist so only env applies.
    let _g1 = EnvGuard::set("SOUNDFREE_CONFIG_PATH", "/nonexistent/soundfree.toml");
    let _g2 = EnvGuard::set("SOUNDFREE__TRANSPORT__TICK_MS", "500");

    let settings = Settings::load().unwrap();
    assert_eq!(settings.transport.tick_ms, 500);
}
