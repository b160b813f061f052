use anyhow::{bail, Context, Result};

const DEFAULT_MODEL: &str = "gpt-4.1-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Which flavour of `comment` the model is asked to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStyle {
    /// One concise evaluative sentence.
    Summary,
    /// A 3–6 item checklist of concrete edits.
    #[default]
    Revision,
}

impl CommentStyle {
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(CommentStyle::Summary),
            "revision" => Ok(CommentStyle::Revision),
            other => bail!("GRADE_COMMENT_STYLE must be 'summary' or 'revision', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// A missing OpenAI key is tolerated at startup; grading requests fail instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
    pub comment_style: CommentStyle,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_model: optional_env("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            comment_style: optional_env("GRADE_COMMENT_STYLE")
                .map(|raw| CommentStyle::parse(&raw))
                .transpose()?
                .unwrap_or_default(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating unset and blank the same way.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
