//! The `TextCompleter` capability (spec ch. 6.1): the one surface through
//! which the core talks to an LLM backend. The core never sees anything
//! about the backend beyond `verify`/`complete`.

use crate::error::CompleterError;

/// A narrow capability: given a prompt, produce a short text response.
///
/// Implementations own whatever connection or session they need and are
/// responsible for releasing it on every exit path, including when a call
/// returns an error.
pub trait TextCompleter {
    /// Check that the backend is usable before any generation begins.
    fn verify(&self) -> Result<(), CompleterError>;

    /// Produce a completion for `prompt`.
    fn complete(&self, prompt: &str) -> Result<String, CompleterError>;
}

/// Blanket impl so engines can be parameterized over `&dyn TextCompleter`
/// or a boxed trait object interchangeably with a concrete type.
impl<T: TextCompleter + ?Sized> TextCompleter for &T {
    fn verify(&self) -> Result<(), CompleterError> {
        (**self).verify()
    }

    fn complete(&self, prompt: &str) -> Result<String, CompleterError> {
        (**self).complete(prompt)
    }
}

#[cfg(feature = "ollama")]
pub mod ollama {
    //! An HTTP adapter for a locally hosted Ollama-compatible daemon
    //! (spec ch. 6.1, collaborator (a)): `POST {base_url}/api/generate`
    //! with `{model, prompt, stream: false, options}` and reads back the
    //! JSON field `response`.

    use super::TextCompleter;
    use crate::error::CompleterError;
    use serde_json::json;
    use std::time::Duration;

    #[derive(Debug, Clone)]
    pub struct OllamaConfig {
        pub base_url: String,
        pub model: String,
        pub temperature: f64,
        pub top_p: f64,
        pub num_predict: u32,
        pub timeout: Duration,
    }

    impl Default for OllamaConfig {
        fn default() -> Self {
            Self {
                base_url: "http://localhost:11434".to_string(),
                model: "llama3".to_string(),
                temperature: 0.8,
                top_p: 0.9,
                num_predict: 64,
                timeout: Duration::from_secs(30),
            }
        }
    }

    pub struct OllamaCompleter {
        config: OllamaConfig,
        client: reqwest::blocking::Client,
    }

    impl OllamaCompleter {
        pub fn new(config: OllamaConfig) -> Self {
            let client = reqwest::blocking::Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_else(|_| reqwest::blocking::Client::new());
            Self { config, client }
        }

        fn generate_url(&self) -> String {
            format!("{}/api/generate", self.config.base_url.trim_end_matches('/'))
        }

        fn classify_transport_error(err: &reqwest::Error) -> CompleterError {
            if err.is_timeout() {
                CompleterError::Timeout
            } else if err.is_connect() {
                CompleterError::Unavailable
            } else {
                CompleterError::TransportError(err.to_string())
            }
        }
    }

    impl TextCompleter for OllamaCompleter {
        fn verify(&self) -> Result<(), CompleterError> {
            let url = format!("{}/api/tags", self.config.base_url.trim_end_matches('/'));
            let resp = self
                .client
                .get(&url)
                .send()
                .map_err(|e| Self::classify_transport_error(&e))?;

            if !resp.status().is_success() {
                return Err(CompleterError::Unavailable);
            }

            let body: serde_json::Value = resp
                .json()
                .map_err(|e| CompleterError::Malformed(e.to_string()))?;

            let has_model = body["models"]
                .as_array()
                .map(|models| {
                    models.iter().any(|m| {
                        m["name"]
                            .as_str()
                            .map(|n| n == self.config.model || n.starts_with(&format!("{}:", self.config.model)))
                            .unwrap_or(false)
                    })
                })
                .unwrap_or(false);

            if has_model {
                Ok(())
            } else {
                Err(CompleterError::ModelMissing(self.config.model.clone()))
            }
        }

        fn complete(&self, prompt: &str) -> Result<String, CompleterError> {
            let body = json!({
                "model": self.config.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": self.config.temperature,
                    "top_p": self.config.top_p,
                    "num_predict": self.config.num_predict,
                }
            });

            let resp = self
                .client
                .post(self.generate_url())
                .json(&body)
                .send()
                .map_err(|e| Self::classify_transport_error(&e))?;

            if !resp.status().is_success() {
                return Err(CompleterError::TransportError(format!(
                    "backend returned status {}",
                    resp.status()
                )));
            }

            let value: serde_json::Value = resp
                .json()
                .map_err(|e| CompleterError::Malformed(e.to_string()))?;

            value["response"]
                .as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| CompleterError::Malformed("response field missing or not a string".to_string()))
        }
    }
}
