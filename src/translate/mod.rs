//! Machine translation backends used to fill non-base catalogs.
//!
//! Each backend takes a batch of source texts and returns translations in the
//! same order and of the same length. Failures are plain `anyhow` errors; the
//! catalog generator decides how to fall back.

mod baidu;
mod deepl;
mod google;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use reqwest::blocking::Client;

use crate::config::Config;

pub use baidu::BaiduTranslator;
pub use deepl::DeeplTranslator;
pub use google::GoogleTranslator;

#[enum_dispatch]
pub trait Translator {
    /// Human-readable service name for reports.
    fn name(&self) -> &'static str;

    /// Translate `texts` into `target`, preserving order and length.
    fn translate_batch(&self, texts: &[String], target: &str) -> Result<Vec<String>>;
}

#[enum_dispatch(Translator)]
pub enum TranslatorBackend {
    Google(GoogleTranslator),
    Baidu(BaiduTranslator),
    Deepl(DeeplTranslator),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TranslationService {
    Google,
    Baidu,
    Deepl,
}

impl TranslationService {
    pub fn is_configured(self, config: &Config) -> bool {
        match self {
            Self::Google => config.free_google,
            Self::Baidu => config.baidu.is_configured(),
            Self::Deepl => config.deepl.is_configured(),
        }
    }
}

/// Services usable with `config`, in order of preference.
pub fn available_services(config: &Config) -> Vec<TranslationService> {
    [
        TranslationService::Google,
        TranslationService::Baidu,
        TranslationService::Deepl,
    ]
    .into_iter()
    .filter(|service| service.is_configured(config))
    .collect()
}

/// Build the backend for `preferred`, or for the first configured service.
pub fn select_backend(
    preferred: Option<TranslationService>,
    config: &Config,
) -> Result<TranslatorBackend> {
    let available = available_services(config);
    let service = match preferred {
        Some(service) if available.contains(&service) => service,
        Some(service) => bail!(
            "Translation service '{}' is not configured",
            service
                .to_possible_value()
                .map(|v| v.get_name().to_string())
                .unwrap_or_default()
        ),
        None => match available.first() {
            Some(service) => *service,
            None => bail!("No translation service configured (enable freeGoogle, or set baidu / deepl credentials)"),
        },
    };

    let client = http_client(config.request_timeout_secs)?;
    let source = config.base_language.clone();
    Ok(match service {
        TranslationService::Google => GoogleTranslator::new(client, source).into(),
        TranslationService::Baidu => {
            BaiduTranslator::new(client, source, config.baidu.clone()).into()
        }
        TranslationService::Deepl => {
            DeeplTranslator::new(client, source, config.deepl.clone()).into()
        }
    })
}

fn http_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaiduConfig, DeeplConfig};

    #[test]
    fn test_available_services_follow_config() {
        let mut config = Config::default();
        assert_eq!(available_services(&config), vec![TranslationService::Google]);

        config.free_google = false;
        config.deepl = DeeplConfig {
            auth_key: "key".to_string(),
            is_pro: false,
        };
        assert_eq!(available_services(&config), vec![TranslationService::Deepl]);
    }

    #[test]
    fn test_select_backend_defaults_to_first_available() {
        let config = Config {
            free_google: false,
            baidu: BaiduConfig {
                appid: "id".to_string(),
                secret_key: "secret".to_string(),
            },
            ..Default::default()
        };
        let backend = select_backend(None, &config).unwrap();
        assert_eq!(backend.name(), "Baidu");
    }

    #[test]
    fn test_select_backend_rejects_unconfigured_service() {
        let config = Config::default();
        let err = select_backend(Some(TranslationService::Deepl), &config)
            .err()
            .unwrap();
        assert!(err.to_string().contains("'deepl' is not configured"));
    }

    #[test]
    fn test_select_backend_without_any_service() {
        let config = Config {
            free_google: false,
            ..Default::default()
        };
        assert!(select_backend(None, &config).is_err());
    }
}
