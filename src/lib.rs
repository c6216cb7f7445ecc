//! mdblog: a small Markdown blog engine
//!
//! Posts carry a fixed block of `Field:Value` header lines. At startup the
//! posts directory is scanned into an in-memory index keyed by link slug;
//! article bodies are rendered to HTML on demand and the about page is
//! rendered once.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentInitializer, ContentSettings, MarkdownRenderer};

/// The main blog application
#[derive(Debug, Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self { config, base_dir })
    }

    /// Content settings with paths resolved against the base directory
    pub fn settings(&self) -> ContentSettings {
        ContentSettings::from_config(&self.base_dir, &self.config)
    }

    /// Scan posts and render the about page
    pub fn initialize(&self) -> Result<ContentInitializer> {
        let markdown = MarkdownRenderer::with_options(&self.config.highlight);
        let initializer = ContentInitializer::from_fs(self.settings(), markdown)?;
        Ok(initializer)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_post(self, title)
    }
}
