//! Image generation seam.
//!
//! The backend that turns a prompt into image bytes lives outside this
//! crate; [`GenerationRequest`] only carries the prompt parameters and the
//! prompt text derived from them.

use crate::storage::BoxFuture;
use thiserror::Error;

/// Highest accepted complexity level.
pub const MAX_COMPLEXITY: u8 = 10;

/// Complexity from which the larger model is used.
pub const ULTRA_COMPLEXITY: u8 = 8;

/// Features backends are asked to avoid.
pub const NEGATIVE_PROMPT: &str =
    "blurry, smooth, realistic, high resolution, detailed, 3D, shading, anti-aliasing, gradients";

/// Generation errors.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("Complexity must be between 1 and {MAX_COMPLEXITY}, got {0}")]
    InvalidComplexity(u8),
    #[error("Generation backend failed: {0}")]
    Backend(String),
}

/// Which backend model a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationModel {
    Core,
    Ultra,
}

impl GenerationModel {
    pub fn endpoint(self) -> &'static str {
        match self {
            GenerationModel::Core => "core",
            GenerationModel::Ultra => "ultra",
        }
    }
}

/// Parameters of one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub style: String,
    /// 1 (minimal) to 10 (intricate).
    pub complexity: u8,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, style: impl Into<String>, complexity: u8) -> Self {
        Self {
            prompt: prompt.into(),
            style: style.into(),
            complexity,
        }
    }

    /// Reject requests that should never reach a backend.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.prompt.trim().is_empty() {
            return Err(GenerationError::EmptyPrompt);
        }
        if self.complexity == 0 || self.complexity > MAX_COMPLEXITY {
            return Err(GenerationError::InvalidComplexity(self.complexity));
        }
        Ok(())
    }

    pub fn model(&self) -> GenerationModel {
        if self.complexity >= ULTRA_COMPLEXITY {
            GenerationModel::Ultra
        } else {
            GenerationModel::Core
        }
    }

    /// Full prompt sent to the backend.
    pub fn prompt_text(&self) -> String {
        let detail = match self.complexity {
            0..=3 => "minimal",
            4..=6 => "moderate",
            _ => "intricate",
        };
        let palette = if self.complexity <= 4 {
            "limited color palette"
        } else {
            "vibrant colors"
        };
        format!(
            "a 30x30 pixel art dotmint of {} in {} style, with {} details and {}, \
             pixelated texture, flat colors with no anti-aliasing, \
             perfect for a retro game sprite, square pixels, \
             pixel art complexity level: {}/{}",
            self.prompt.trim(),
            self.style,
            detail,
            palette,
            self.complexity,
            MAX_COMPLEXITY
        )
    }

    /// Form fields a backend posts for this request.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("prompt", self.prompt_text()),
            ("negative_prompt", NEGATIVE_PROMPT.to_string()),
            ("output_format", "jpeg".to_string()),
            ("aspect_ratio", "1:1".to_string()),
        ]
    }
}

/// Trait for image generation backends. Returns encoded image bytes.
pub trait GenerationService: Send + Sync {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> BoxFuture<'_, Result<Vec<u8>, GenerationError>>;
}
