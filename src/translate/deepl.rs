use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::Translator;
use crate::config::DeeplConfig;

const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

/// DeepL v2 API. A whole batch goes out in one request.
pub struct DeeplTranslator {
    client: Client,
    source: String,
    credentials: DeeplConfig,
}

#[derive(Serialize)]
struct DeeplRequest<'a> {
    text: &'a [String],
    target_lang: String,
    source_lang: String,
}

#[derive(Deserialize)]
struct DeeplResponse {
    translations: Vec<DeeplTranslation>,
}

#[derive(Deserialize)]
struct DeeplTranslation {
    text: String,
}

impl DeeplTranslator {
    pub fn new(client: Client, source: String, credentials: DeeplConfig) -> Self {
        Self {
            client,
            source,
            credentials,
        }
    }

    fn endpoint(&self) -> &'static str {
        if self.credentials.is_pro {
            PRO_ENDPOINT
        } else {
            FREE_ENDPOINT
        }
    }
}

impl Translator for DeeplTranslator {
    fn name(&self) -> &'static str {
        "DeepL"
    }

    fn translate_batch(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        let request = DeeplRequest {
            text: texts,
            target_lang: deepl_language(target),
            source_lang: deepl_language(&self.source),
        };

        let response: DeeplResponse = self
            .client
            .post(self.endpoint())
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.credentials.auth_key),
            )
            .json(&request)
            .send()
            .context("DeepL request failed")?
            .error_for_status()
            .context("DeepL returned an error status")?
            .json()
            .context("DeepL returned invalid JSON")?;

        collect_translations(response, texts.len())
    }
}

fn collect_translations(response: DeeplResponse, expected: usize) -> Result<Vec<String>> {
    if response.translations.len() != expected {
        bail!(
            "DeepL returned {} translations for {} texts",
            response.translations.len(),
            expected
        );
    }
    Ok(response.translations.into_iter().map(|t| t.text).collect())
}

/// DeepL language codes are upper case (`EN`, `JA`, `ZH`).
fn deepl_language(code: &str) -> String {
    code.to_ascii_uppercase()
}
