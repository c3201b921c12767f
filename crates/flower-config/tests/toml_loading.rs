//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use std::path::PathBuf;

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use flower_config::{ConfigError, FlowerConfig, ParameterSource};
use pretty_assertions::assert_eq;

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
config_path = "/srv/flower/config.json"
dataset_path = "/srv/flower/iris.csv"
model_dir = "/srv/flower/models"
lock_timeout_secs = 5
"#,
        )?;

        let config: FlowerConfig = Figment::from(Serialized::defaults(FlowerConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(
            config.storage.config_path,
            PathBuf::from("/srv/flower/config.json")
        );
        assert_eq!(config.storage.dataset_path, PathBuf::from("/srv/flower/iris.csv"));
        assert_eq!(config.storage.model_dir, PathBuf::from("/srv/flower/models"));
        assert_eq!(config.storage.lock_timeout_secs, 5);
        // Untouched keys keep their defaults.
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        Ok(())
    });
}

#[test]
fn loads_firestore_source_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[parameters]
source = "firestore"

[firestore]
project_id = "flower-dev"
access_token = "ya29.token"
base_url = "http://localhost:8081/v1"
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(FlowerConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = FlowerConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.parameters.source, ParameterSource::Firestore);
        assert_eq!(config.firestore.project_id, "flower-dev");
        assert_eq!(config.firestore.base_url, "http://localhost:8081/v1");
        assert_eq!(config.firestore.collection, "parameters");
        Ok(())
    });
}

#[test]
fn firestore_source_without_credentials_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[parameters]\nsource = \"firestore\"\n")?;

        let figment = Figment::from(Serialized::defaults(FlowerConfig::default()))
            .merge(Toml::file("config.toml"));
        let result = FlowerConfig::from_figment(&figment);

        assert!(matches!(result, Err(ConfigError::NotConfigured { .. })));
        Ok(())
    });
}

#[test]
fn unknown_parameter_source_is_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[parameters]\nsource = \"redis\"\n")?;

        let figment = Figment::from(Serialized::defaults(FlowerConfig::default()))
            .merge(Toml::file("config.toml"));

        assert!(matches!(
            FlowerConfig::from_figment(&figment),
            Err(ConfigError::Figment(_))
        ));
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "flower.toml",
            r#"
[server]
port = 9000

[pipeline]
seed = 7
"#,
        )?;

        let config = FlowerConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.pipeline.seed, 7);
        assert_eq!(config.pipeline.test_percent, 20);
        Ok(())
    });
}
