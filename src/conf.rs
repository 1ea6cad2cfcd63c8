use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::content::BodyFormat;

#[derive(Debug, Deserialize, Clone)]
pub struct Log {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    pub port: u16,
    pub graceful_shutdown: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Content {
    /// Directory holding one subdirectory per content type.
    pub base_dir: String,
    #[serde(default)]
    pub body_format: BodyFormat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Conf {
    pub env: String,
    pub log: Log,
    pub server: Server,
    pub content: Content,
}

impl Conf {
    pub fn new() -> Result<Self, ConfigError> {
        let file_name =
            std::env::var("CONFIG_FILE_PATH").unwrap_or_else(|_| "./config/default.toml".into());
        Self::from(&file_name)
    }

    pub fn from(file_name: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder().add_source(File::new(file_name, FileFormat::Toml));
        builder.build()?.try_deserialize::<Conf>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_works() {
        let cfg = Conf::from("./config/default.toml").unwrap();
        assert_eq!(cfg.log.level, "info");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.content.base_dir, "./content");
        assert_eq!(cfg.content.body_format, BodyFormat::Markdown);
    }

    #[test]
    fn body_format_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            r#"
env = "test"

[log]
level = "debug"

[server]
port = 3000
graceful_shutdown = 5

[content]
base_dir = "/srv/content"
body_format = "html"
"#
        )
        .unwrap();

        let cfg = Conf::from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.env, "test");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.content.base_dir, "/srv/content");
        assert_eq!(cfg.content.body_format, BodyFormat::Html);
    }

    #[test]
    fn missing_section_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "env = \"test\"\n").unwrap();
        assert!(Conf::from(file.path().to_str().unwrap()).is_err());
    }
}
