use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub wialon: WialonSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WialonSettings {
    pub base_url: String,
    pub token: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/app"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [wialon]
                base_url = "https://hst-api.wialon.com"
                token = "abc123"

                [server]
                bind = "0.0.0.0:8080"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let parsed: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(parsed.wialon.base_url, "https://hst-api.wialon.com");
        assert_eq!(parsed.server.bind, "0.0.0.0:8080");
    }
}
