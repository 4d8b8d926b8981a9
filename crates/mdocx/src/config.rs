//! Configuration types for mdocx conversion.
//!
//! This module provides configuration structures that control which external
//! tools are invoked, how diagrams are rendered, and where input documents
//! are discovered. All types implement [`serde::Deserialize`] for flexible
//! loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining all sections.
//! - [`ToolsConfig`] - Locations of the external renderer and converter executables.
//! - [`RenderConfig`] - Diagram rasterization options (background, scale).
//! - [`DiscoveryConfig`] - Input directory and filename pattern.
//! - [`BatchConfig`] - Batch failure policy.
//!
//! # Example
//!
//! ```
//! # use mdocx::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert_eq!(config.tools().renderer().to_str(), Some("mmdc"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration combining all sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// External tool locations.
    #[serde(default)]
    tools: ToolsConfig,

    /// Diagram rendering section.
    #[serde(default)]
    render: RenderConfig,

    /// Input discovery section.
    #[serde(default)]
    discovery: DiscoveryConfig,

    /// Batch policy section.
    #[serde(default)]
    batch: BatchConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from the given sections.
    pub fn new(
        tools: ToolsConfig,
        render: RenderConfig,
        discovery: DiscoveryConfig,
        batch: BatchConfig,
    ) -> Self {
        Self {
            tools,
            render,
            discovery,
            batch,
        }
    }

    /// Returns the external tool configuration.
    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    /// Returns the diagram rendering configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the input discovery configuration.
    pub fn discovery(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    /// Returns the batch policy configuration.
    pub fn batch(&self) -> &BatchConfig {
        &self.batch
    }

    /// Returns a mutable reference to the external tool configuration.
    pub fn tools_mut(&mut self) -> &mut ToolsConfig {
        &mut self.tools
    }

    /// Returns a mutable reference to the diagram rendering configuration.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns a mutable reference to the input discovery configuration.
    pub fn discovery_mut(&mut self) -> &mut DiscoveryConfig {
        &mut self.discovery
    }

    /// Returns a mutable reference to the batch policy configuration.
    pub fn batch_mut(&mut self) -> &mut BatchConfig {
        &mut self.batch
    }
}

/// Locations of the external diagram renderer and document converter.
///
/// Both fields accept a bare executable name (resolved through `PATH`) or an
/// absolute path.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolsConfig {
    /// Diagram renderer executable (mmdc-compatible).
    #[serde(default = "ToolsConfig::default_renderer")]
    renderer: PathBuf,

    /// Document converter executable (pandoc-compatible).
    #[serde(default = "ToolsConfig::default_converter")]
    converter: PathBuf,
}

impl ToolsConfig {
    /// Creates a new [`ToolsConfig`] with the specified executables.
    pub fn new(renderer: PathBuf, converter: PathBuf) -> Self {
        Self {
            renderer,
            converter,
        }
    }

    fn default_renderer() -> PathBuf {
        PathBuf::from("mmdc")
    }

    fn default_converter() -> PathBuf {
        PathBuf::from("pandoc")
    }

    /// Returns the renderer executable path.
    pub fn renderer(&self) -> &Path {
        &self.renderer
    }

    /// Returns the converter executable path.
    pub fn converter(&self) -> &Path {
        &self.converter
    }

    /// Sets the renderer executable path.
    pub fn set_renderer(&mut self, renderer: PathBuf) {
        self.renderer = renderer;
    }

    /// Sets the converter executable path.
    pub fn set_converter(&mut self, converter: PathBuf) {
        self.converter = converter;
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            renderer: Self::default_renderer(),
            converter: Self::default_converter(),
        }
    }
}

/// Diagram rasterization options passed through to the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Background color for rendered images.
    #[serde(default = "RenderConfig::default_background")]
    background: String,

    /// Scale factor for rendered images.
    #[serde(default = "RenderConfig::default_scale")]
    scale: u32,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with the specified options.
    pub fn new(background: String, scale: u32) -> Self {
        Self { background, scale }
    }

    fn default_background() -> String {
        "white".to_string()
    }

    fn default_scale() -> u32 {
        2
    }

    /// Returns the background color.
    pub fn background(&self) -> &str {
        &self.background
    }

    /// Returns the scale factor.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Sets the background color.
    pub fn set_background(&mut self, background: String) {
        self.background = background;
    }

    /// Sets the scale factor.
    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale;
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Self::default_background(),
            scale: Self::default_scale(),
        }
    }
}

/// Input document discovery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Directory searched for input documents.
    #[serde(default = "DiscoveryConfig::default_input_dir")]
    input_dir: PathBuf,

    /// Glob pattern matched against filenames inside the input directory.
    #[serde(default = "DiscoveryConfig::default_pattern")]
    pattern: String,
}

impl DiscoveryConfig {
    /// Creates a new [`DiscoveryConfig`] with the specified directory and pattern.
    pub fn new(input_dir: PathBuf, pattern: String) -> Self {
        Self { input_dir, pattern }
    }

    fn default_input_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_pattern() -> String {
        "*.md".to_string()
    }

    /// Returns the input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Returns the filename pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Sets the input directory.
    pub fn set_input_dir(&mut self, input_dir: PathBuf) {
        self.input_dir = input_dir;
    }

    /// Sets the filename pattern.
    pub fn set_pattern(&mut self, pattern: String) {
        self.pattern = pattern;
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            input_dir: Self::default_input_dir(),
            pattern: Self::default_pattern(),
        }
    }
}

/// Batch failure policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchConfig {
    /// Abort the batch on the first document that fails to convert.
    ///
    /// When unset, failed documents are recorded and the remaining documents
    /// are still processed.
    #[serde(default)]
    fail_fast: bool,
}

impl BatchConfig {
    /// Creates a new [`BatchConfig`] with the specified policy.
    pub fn new(fail_fast: bool) -> Self {
        Self { fail_fast }
    }

    /// Returns whether the batch aborts on the first failed document.
    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Sets whether the batch aborts on the first failed document.
    pub fn set_fail_fast(&mut self, fail_fast: bool) {
        self.fail_fast = fail_fast;
    }
}
