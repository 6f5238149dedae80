use pd_shared::{AppConfig, CorsConfig, JwtConfig};

/// The slice of configuration the HTTP layer needs per worker
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
    pub max_payload_size: usize,
}

impl From<&AppConfig> for HttpSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            jwt: config.auth.jwt.clone(),
            cors: config.cors.clone(),
            max_payload_size: config.server.max_payload_size,
        }
    }
}

/// Read the environment and reject unsafe settings
pub fn load() -> anyhow::Result<AppConfig> {
    let config = AppConfig::from_env();
    config.validate()?;

    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET is not set, using the development secret");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_settings_from_app_config() {
        let mut config = AppConfig::default();
        config.auth.jwt = JwtConfig::new("abc");
        config.server.max_payload_size = 1024;

        let settings = HttpSettings::from(&config);
        assert_eq!(settings.jwt.secret, "abc");
        assert_eq!(settings.max_payload_size, 1024);
    }
}
