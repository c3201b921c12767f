use figment::Jail;
use flower_config::FlowerConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("FLOWER_SERVER__PORT", "9100");
        jail.set_env("FLOWER_STORAGE__MODEL_DIR", "/tmp/flower-models");

        let config = FlowerConfig::load().expect("config loads");
        assert_eq!(config.server.port, 9100);
        assert_eq!(
            config.storage.model_dir,
            std::path::PathBuf::from("/tmp/flower-models")
        );
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file("flower.toml", "[server]\nhost = \"0.0.0.0\"\n")?;
        jail.set_env("FLOWER_SERVER__HOST", "10.0.0.1");

        let config = FlowerConfig::load().expect("config loads");
        assert_eq!(config.server.host, "10.0.0.1");
        Ok(())
    });
}

#[test]
fn invalid_env_value_surfaces_as_error() {
    Jail::expect_with(|jail| {
        jail.set_env("FLOWER_PIPELINE__TEST_PERCENT", "0");
        assert!(FlowerConfig::load().is_err());
        Ok(())
    });
}
