use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::warn;

use super::Translator;
use crate::config::BaiduConfig;

const ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

/// Baidu general translation API. Requests are sequential to stay under the
/// per-second quota of free accounts.
pub struct BaiduTranslator {
    client: Client,
    source: String,
    credentials: BaiduConfig,
}

#[derive(Debug, Deserialize)]
struct BaiduResponse {
    #[serde(default)]
    trans_result: Vec<BaiduResult>,
    error_code: Option<String>,
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BaiduResult {
    dst: String,
}

impl BaiduTranslator {
    pub fn new(client: Client, source: String, credentials: BaiduConfig) -> Self {
        Self {
            client,
            source,
            credentials,
        }
    }

    fn translate_one(&self, text: &str, target: &str) -> Result<String> {
        let salt = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default()
            .to_string();
        let sign = sign(
            &self.credentials.appid,
            text,
            &salt,
            &self.credentials.secret_key,
        );

        let response: BaiduResponse = self
            .client
            .post(ENDPOINT)
            .form(&[
                ("q", text),
                ("from", baidu_language(&self.source)),
                ("to", baidu_language(target)),
                ("appid", self.credentials.appid.as_str()),
                ("salt", salt.as_str()),
                ("sign", sign.as_str()),
            ])
            .send()
            .context("Baidu request failed")?
            .json()
            .context("Baidu returned invalid JSON")?;

        parse_response(response)
    }
}

impl Translator for BaiduTranslator {
    fn name(&self) -> &'static str {
        "Baidu"
    }

    /// A failed text comes back empty so the caller falls back for that
    /// entry alone.
    fn translate_batch(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        Ok(texts
            .iter()
            .map(|text| {
                self.translate_one(text, target).unwrap_or_else(|err| {
                    warn!("Baidu translation failed for {:?}: {:#}", text, err);
                    String::new()
                })
            })
            .collect())
    }
}

fn parse_response(response: BaiduResponse) -> Result<String> {
    if let Some(code) = response.error_code {
        bail!(
            "Baidu error {}: {}",
            code,
            response.error_msg.unwrap_or_default()
        );
    }
    let Some(first) = response.trans_result.into_iter().next() else {
        bail!("Baidu returned no translation");
    };
    Ok(first.dst)
}

/// `md5(appid + q + salt + secret)`, lowercase hex.
fn sign(appid: &str, query: &str, salt: &str, secret: &str) -> String {
    format!(
        "{:x}",
        md5::compute(format!("{}{}{}{}", appid, query, salt, secret))
    )
}

/// Baidu uses its own codes for several languages.
fn baidu_language(code: &str) -> &str {
    match code {
        "ja" => "jp",
        "ko" => "kor",
        "fr" => "fra",
        "es" => "spa",
        "ar" => "ara",
        "bg" => "bul",
        "et" => "est",
        "da" => "dan",
        "fi" => "fin",
        "ro" => "rom",
        "sl" => "slo",
        "sv" => "swe",
        "vi" => "vie",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_matches_md5_of_concatenation() {
        assert_eq!(
            sign("app", "你好", "1", "secret"),
            format!("{:x}", md5::compute("app你好1secret"))
        );
        assert_eq!(sign("app", "你好", "1", "secret").len(), 32);
    }

    #[test]
    fn test_baidu_language_mapping() {
        assert_eq!(baidu_language("ja"), "jp");
        assert_eq!(baidu_language("vi"), "vie");
        assert_eq!(baidu_language("en"), "en");
        assert_eq!(baidu_language("zh"), "zh");
    }

    #[test]
    fn test_parse_response_success() {
        let response: BaiduResponse = serde_json::from_str(
            r#"{"from":"zh","to":"en","trans_result":[{"src":"你好","dst":"Hello"}]}"#,
        )
        .unwrap();
        assert_eq!(parse_response(response).unwrap(), "Hello");
    }

    #[test]
    fn test_parse_response_error() {
        let response: BaiduResponse =
            serde_json::from_str(r#"{"error_code":"54001","error_msg":"Invalid Sign"}"#).unwrap();
        let err = parse_response(response).unwrap_err();
        assert_eq!(err.to_string(), "Baidu error 54001: Invalid Sign");
    }
}
