#[cfg(test)]
mod tests {
    use parking_lot::{const_mutex, Mutex, MutexGuard};
    use tasksync::libs::config::{Config, ServerConfig, SyncConfig, API_URL_ENV, DEFAULT_API_URL};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Tests in this file share the process environment.
    static ENV_LOCK: Mutex<()> = const_mutex(());

    /// Test context to ensure a clean environment for each config test.
    /// It sets up a temporary directory to act as the user's home/appdata directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        _guard: MutexGuard<'static, ()>,
        api_url: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let guard = ENV_LOCK.lock();
            let temp_dir = tempfile::tempdir().unwrap();
            // Mock the home/appdata directory for cross-platform compatibility.
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            std::env::remove_var(API_URL_ENV);
            ConfigTestContext {
                _temp_dir: temp_dir,
                _guard: guard,
                api_url: "https://tasks.example.com/drfapi".to_string(),
            }
        }

        fn teardown(self) {
            std::env::remove_var(API_URL_ENV);
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.server.is_none());
        assert!(config.sync.is_none());
        assert_eq!(config.server().api_url, DEFAULT_API_URL);
        assert!(!config.sync().purge_remote);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(_ctx: &mut ConfigTestContext) {
        // When no config file exists, read() should return the default config.
        let config = Config::read().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
            }),
            sync: Some(SyncConfig { purge_remote: true }),
        };
        config.save().unwrap();

        let read_config = Config::read().unwrap();
        assert_eq!(read_config, config);
        assert_eq!(read_config.server().api_url, ctx.api_url);
        assert!(read_config.sync().purge_remote);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_sync_section_defaults_when_field_missing(_ctx: &mut ConfigTestContext) {
        let config: Config = serde_json::from_str(r#"{"sync": {}}"#).unwrap();
        assert_eq!(config.sync, Some(SyncConfig { purge_remote: false }));
        assert!(config.server.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_env_overrides_api_url(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
            }),
            sync: None,
        };

        std::env::set_var(API_URL_ENV, "http://10.0.0.5:9000/drfapi");
        assert_eq!(config.server().api_url, "http://10.0.0.5:9000/drfapi");

        // Blank values are ignored.
        std::env::set_var(API_URL_ENV, "   ");
        assert_eq!(config.server().api_url, ctx.api_url);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_delete_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            server: Some(ServerConfig {
                api_url: ctx.api_url.clone(),
            }),
            sync: None,
        };
        config.save().unwrap();
        Config::delete().unwrap();

        assert_eq!(Config::read().unwrap(), Config::default());
        // Deleting again is fine.
        Config::delete().unwrap();
    }
}
