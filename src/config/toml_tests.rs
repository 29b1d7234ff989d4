//! Tests for TOML configuration parsing.

use super::toml::{ConfigFile, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let config = ConfigFile::parse("").unwrap();

        assert!(config.client.api_key.is_none());
        assert!(!config.client.demo);
        assert!(config.webhook.secret.is_none());
    }

    #[test]
    fn parse_full_config() {
        let toml = r#"
            [client]
            api_key = "nope_live_abc"
            base_url = "http://localhost:8788"
            timeout = 60
            demo = true

            [webhook]
            secret = "whsec_test"
            max_age = 0
        "#;

        let config = ConfigFile::parse(toml).unwrap();

        assert_eq!(config.client.api_key.as_deref(), Some("nope_live_abc"));
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("http://localhost:8788")
        );
        assert_eq!(config.client.timeout, Some(60));
        assert!(config.client.demo);
        assert_eq!(config.webhook.secret.as_deref(), Some("whsec_test"));
        assert_eq!(config.webhook.max_age, Some(0));
    }

    #[test]
    fn reject_unknown_fields() {
        let toml = r#"
            [client]
            api_key = "k"
            retries = 3
        "#;

        assert!(ConfigFile::parse(toml).is_err());
    }

    #[test]
    fn reject_unknown_sections() {
        let toml = r#"
            [logging]
            level = "debug"
        "#;

        assert!(ConfigFile::parse(toml).is_err());
    }

    #[test]
    fn reject_negative_timeout() {
        let toml = r#"
            [client]
            timeout = -5
        "#;

        assert!(ConfigFile::parse(toml).is_err());
    }
}

mod default_template {
    use super::*;

    #[test]
    fn template_is_valid_toml() {
        let template = default_config_template();
        let result = ConfigFile::parse(&template);
        assert!(
            result.is_ok(),
            "Template should be valid TOML: {:?}",
            result.err()
        );
    }

    #[test]
    fn template_contains_all_sections() {
        let template = default_config_template();

        assert!(template.contains("[client]"));
        assert!(template.contains("[webhook]"));
    }

    #[test]
    fn template_documents_environment_overrides() {
        let template = default_config_template();

        assert!(template.contains("NOPE_API_KEY"));
        assert!(template.contains("NOPE_WEBHOOK_SECRET"));
    }
}

mod file_loading {
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [client]
            base_url = "https://nope.internal.example"
        "#
        )
        .unwrap();

        let config = ConfigFile::load(file.path()).unwrap();
        assert_eq!(
            config.client.base_url.as_deref(),
            Some("https://nope.internal.example")
        );
    }

    #[test]
    fn load_nonexistent_file_returns_error() {
        let path = Path::new("nonexistent_nope_config_12345.toml");
        let result = ConfigFile::load(path);

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }

    #[test]
    fn load_invalid_toml_file_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "this is not valid toml {{{{").unwrap();

        let result = ConfigFile::load(file.path());

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }
}
