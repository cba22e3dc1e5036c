// tests/config_settings.rs
use keyword_trends::config::{load_settings_default, load_settings_from, AppConfig, Settings};
use std::time::Duration;
use std::{env, fs};

#[test]
fn parse_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("trends.toml");
    fs::write(
        &p,
        r#"
request_interval_ms = 500
source_top_k = 5
live_cache_ttl_secs = 60
schedule_interval_secs = 900
"#,
    )
    .unwrap();

    let s = load_settings_from(&p).unwrap();
    assert_eq!(s.request_interval(), Duration::from_millis(500));
    assert_eq!(s.source_top_k, 5);
    assert_eq!(s.combined_top_k, 20, "unset keys keep defaults");
    assert_eq!(s.live_cache_ttl(), Duration::from_secs(60));
    assert_eq!(s.schedule_interval(), Some(Duration::from_secs(900)));
}

#[test]
fn malformed_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("trends.toml");
    fs::write(&p, "source_top_k = \"ten\"").unwrap();
    assert!(load_settings_from(&p).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the test never reads the repo's config/.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    env::remove_var("TRENDS_CONFIG_PATH");

    // 1) Nothing on disk -> defaults
    let s = load_settings_default().unwrap();
    assert_eq!(s, Settings::default());

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("trends.toml"), "combined_top_k = 30").unwrap();
    assert_eq!(load_settings_default().unwrap().combined_top_k, 30);

    // 3) Env path wins
    let p_env = tmp.path().join("override.toml");
    fs::write(&p_env, "combined_top_k = 5").unwrap();
    env::set_var("TRENDS_CONFIG_PATH", p_env.display().to_string());
    assert_eq!(load_settings_default().unwrap().combined_top_k, 5);

    // 4) Env path pointing nowhere is an error, not a silent fallback
    env::set_var("TRENDS_CONFIG_PATH", tmp.path().join("missing.toml").display().to_string());
    assert!(load_settings_default().is_err());
    env::remove_var("TRENDS_CONFIG_PATH");

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn app_config_reads_database_url_and_credentials() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var("TRENDS_CONFIG_PATH");

    env::remove_var("DATABASE_URL");
    env::remove_var("NAVER_CLIENT_ID");
    env::remove_var("NAVER_CLIENT_SECRET");
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.database_url, "sqlite://data/trends.db");
    assert!(cfg.credentials.naver().is_none());

    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("NAVER_CLIENT_ID", "id");
    env::set_var("NAVER_CLIENT_SECRET", "secret");
    let cfg = AppConfig::from_env().unwrap();
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert_eq!(cfg.credentials.naver().unwrap().client_secret, "secret");

    env::remove_var("DATABASE_URL");
    env::remove_var("NAVER_CLIENT_ID");
    env::remove_var("NAVER_CLIENT_SECRET");
    env::set_current_dir(&old).unwrap();
}
