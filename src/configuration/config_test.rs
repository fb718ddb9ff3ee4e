use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();

    assert!(toml_res.is_ok());
}

#[test]
fn it_has_sensible_defaults() {
    assert_eq!(Config::default(ConfigKey::AttachContext), "true");
    assert_eq!(Config::default(ConfigKey::Backend), "gemini");
    assert_eq!(Config::default(ConfigKey::Model), "gemini-2.5-flash");
    assert_eq!(
        Config::default(ConfigKey::GeminiURL),
        "https://generativelanguage.googleapis.com"
    );
    assert!(!Config::default(ConfigKey::Username).is_empty());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["fintalk", "-c", "./config.example.toml"])?;
    Config::load(cli::build(), vec![&matches]).await?;

    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_bad_config() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["fintalk", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;

    assert!(res.is_err());

    return Ok(());
}
