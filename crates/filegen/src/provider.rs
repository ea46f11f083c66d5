use crate::prelude::*;
use filegen_core::{CapabilityError, GenerationCapability, InvokeOptions};
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::{gemini, ollama};

const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Provider {
    /// Google Gemini (requires GEMINI_API_KEY)
    Gemini,
    /// Local Ollama server
    Ollama,
}

/// Model provider settings, shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct ProviderOptions {
    /// Model provider used to generate file content
    #[clap(long, env = "FILEGEN_PROVIDER", global = true, value_enum, default_value = "gemini")]
    pub provider: Provider,

    /// Model name (defaults to a provider-specific model)
    #[clap(long, env = "FILEGEN_MODEL", global = true)]
    pub model: Option<String>,

    /// Gemini API key
    #[clap(long, env = "GEMINI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Ollama base URL
    #[clap(long, env = "OLLAMA_URL", global = true, default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Sampling temperature passed to the model
    #[clap(long, env = "FILEGEN_TEMPERATURE", global = true, default_value = "0.7")]
    pub temperature: f64,
}

impl ProviderOptions {
    pub fn model(&self) -> &str {
        match (&self.model, self.provider) {
            (Some(model), _) => model,
            (None, Provider::Gemini) => DEFAULT_GEMINI_MODEL,
            (None, Provider::Ollama) => DEFAULT_OLLAMA_MODEL,
        }
    }

    pub fn invoke_options(&self) -> InvokeOptions {
        InvokeOptions {
            temperature: self.temperature,
        }
    }

    pub fn capability(&self) -> RigCapability {
        RigCapability {
            provider: self.provider,
            model: self.model().to_string(),
            api_key: self.api_key.clone(),
            ollama_url: self.ollama_url.clone(),
        }
    }

    pub fn gateway(&self) -> filegen_core::Gateway<RigCapability> {
        filegen_core::Gateway::with_options(self.capability(), self.invoke_options())
    }
}

/// Generation capability backed by a rig completion agent.
#[derive(Debug, Clone)]
pub struct RigCapability {
    provider: Provider,
    model: String,
    api_key: Option<String>,
    ollama_url: String,
}

impl RigCapability {
    async fn prompt_ollama(&self, directive: &str, options: &InvokeOptions) -> Result<String> {
        use rig::client::Nothing;

        let client: ollama::Client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(&self.ollama_url)
            .build()
            .map_err(|e| eyre!("Failed to create Ollama client: {}", e))?;

        // Temperature is the only knob the gateway forwards
        let agent = client
            .agent(&self.model)
            .temperature(options.temperature)
            .build();

        agent
            .prompt(directive)
            .await
            .map_err(|e| eyre!("Model generation failed: {}", e))
    }

    async fn prompt_gemini(&self, directive: &str, options: &InvokeOptions) -> Result<String> {
        // Fail before touching the network when no key is configured
        let api_key = self
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_eyre("GEMINI_API_KEY is not set")?;

        let client: gemini::Client = gemini::Client::builder()
            .api_key(api_key)
            .build()
            .map_err(|e| eyre!("Failed to create Gemini client: {}", e))?;

        let agent = client
            .agent(&self.model)
            .temperature(options.temperature)
            .build();

        agent
            .prompt(directive)
            .await
            .map_err(|e| eyre!("Model generation failed: {}", e))
    }
}

impl GenerationCapability for RigCapability {
    async fn invoke(
        &self,
        directive: &str,
        options: &InvokeOptions,
    ) -> std::result::Result<String, CapabilityError> {
        log::debug!("prompting {:?} model '{}'", self.provider, self.model);

        let response = match self.provider {
            Provider::Gemini => self.prompt_gemini(directive, options).await,
            Provider::Ollama => self.prompt_ollama(directive, options).await,
        };

        response.map_err(|e| CapabilityError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(provider: Provider, model: Option<&str>) -> ProviderOptions {
        ProviderOptions {
            provider,
            model: model.map(str::to_string),
            api_key: None,
            ollama_url: "http://localhost:11434".to_string(),
            temperature: 0.3,
        }
    }

    #[test]
    fn test_default_models_per_provider() {
        assert_eq!(options(Provider::Gemini, None).model(), DEFAULT_GEMINI_MODEL);
        assert_eq!(options(Provider::Ollama, None).model(), DEFAULT_OLLAMA_MODEL);
        assert_eq!(options(Provider::Ollama, Some("qwen2.5-coder")).model(), "qwen2.5-coder");
    }

    #[test]
    fn test_invoke_options_carry_temperature() {
        assert_eq!(options(Provider::Gemini, None).invoke_options().temperature, 0.3);
    }

    #[tokio::test]
    async fn test_gemini_without_key_fails_before_network() {
        let capability = options(Provider::Gemini, None).capability();

        let err = capability
            .invoke("directive", &InvokeOptions::default())
            .await
            .unwrap_err();

        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
