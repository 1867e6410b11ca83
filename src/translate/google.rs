use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde_json::Value;

use super::Translator;

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// The free, keyless Google endpoint. One request per text, issued in
/// parallel on the rayon pool.
pub struct GoogleTranslator {
    client: Client,
    source: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, source: String) -> Self {
        Self { client, source }
    }

    fn translate_one(&self, text: &str, target: &str) -> Result<String> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("dt", "t"),
                ("sl", google_language(&self.source)),
                ("tl", google_language(target)),
                ("q", text),
            ])
            .send()
            .context("Google request failed")?
            .error_for_status()
            .context("Google returned an error status")?;
        let body: Value = response.json().context("Google returned invalid JSON")?;
        parse_response(&body)
    }
}

impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "Google"
    }

    fn translate_batch(&self, texts: &[String], target: &str) -> Result<Vec<String>> {
        texts
            .par_iter()
            .map(|text| self.translate_one(text, target))
            .collect()
    }
}

/// Google wants region-qualified Chinese codes.
fn google_language(code: &str) -> &str {
    match code {
        "zh" | "zh-CN" | "zh-Hans" => "zh-CN",
        "zh-TW" | "zh-Hant" => "zh-TW",
        other => other,
    }
}

/// The response is `[[["translated", "source", ...], ...], ...]`; long
/// inputs come back split into several sentence chunks.
fn parse_response(body: &Value) -> Result<String> {
    let Some(chunks) = body.get(0).and_then(Value::as_array) else {
        bail!("Unexpected Google response shape");
    };
    Ok(chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect())
}
