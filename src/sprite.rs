//! Player sprite animation frames.
//!
//! A small JSON manifest names the frame images and the frame-advance
//! interval; each image becomes a GL texture. The current frame is a pure
//! function of the clock, so nothing here ticks.

use std::path::Path;
use std::sync::Arc;

use glow::HasContext;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Manifest {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("manifest {path} lists no frames")]
    Empty { path: String },
    #[error("failed to load {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("gl error: {0}")]
    Gl(String),
}

/// Manifest format, e.g. assets/player/sprite.json
#[derive(Deserialize)]
struct SpriteManifest {
    frames: Vec<String>,
    frame_interval_ms: f64,
}

pub struct PlayerSprite {
    frames: Vec<glow::Texture>,
    pub frame_interval_ms: f64,
}

impl PlayerSprite {
    /// Load the manifest and its frame images (paths relative to the
    /// manifest) into GL textures.
    pub fn load(gl: &Arc<glow::Context>, manifest_path: &Path) -> Result<Self, SpriteError> {
        let manifest_str =
            std::fs::read_to_string(manifest_path).map_err(|source| SpriteError::Io {
                path: manifest_path.display().to_string(),
                source,
            })?;
        let manifest: SpriteManifest =
            serde_json::from_str(&manifest_str).map_err(|source| SpriteError::Manifest {
                path: manifest_path.display().to_string(),
                source,
            })?;
        if manifest.frames.is_empty() {
            return Err(SpriteError::Empty {
                path: manifest_path.display().to_string(),
            });
        }

        let dir = manifest_path.parent().unwrap_or(Path::new("."));
        let mut frames = Vec::with_capacity(manifest.frames.len());
        for frame in &manifest.frames {
            let image_path = dir.join(frame);
            let img = image::open(&image_path)
                .map_err(|source| SpriteError::Image {
                    path: image_path.display().to_string(),
                    source,
                })?
                .into_rgba8();
            let (width, height) = img.dimensions();

            let texture = unsafe {
                let tex = gl.create_texture().map_err(SpriteError::Gl)?;
                gl.bind_texture(glow::TEXTURE_2D, Some(tex));

                // NEAREST keeps the tiny sprite crisp when scaled
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MIN_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_MAG_FILTER,
                    glow::NEAREST as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_S,
                    glow::CLAMP_TO_EDGE as i32,
                );
                gl.tex_parameter_i32(
                    glow::TEXTURE_2D,
                    glow::TEXTURE_WRAP_T,
                    glow::CLAMP_TO_EDGE as i32,
                );

                gl.tex_image_2d(
                    glow::TEXTURE_2D,
                    0,
                    glow::RGBA as i32,
                    width as i32,
                    height as i32,
                    0,
                    glow::RGBA,
                    glow::UNSIGNED_BYTE,
                    Some(img.as_raw()),
                );

                gl.bind_texture(glow::TEXTURE_2D, None);
                tex
            };
            frames.push(texture);
        }

        Ok(Self {
            frames,
            frame_interval_ms: manifest.frame_interval_ms,
        })
    }

    /// Texture for the frame that is current at `now_ms`.
    pub fn current(&self, now_ms: f64) -> glow::Texture {
        self.frames[frame_index(now_ms, self.frame_interval_ms, self.frames.len())]
    }
}

/// Which frame is showing at `now_ms`, cycling every `interval_ms`.
fn frame_index(now_ms: f64, interval_ms: f64, frame_count: usize) -> usize {
    if interval_ms <= 0.0 || frame_count == 0 {
        return 0;
    }
    (now_ms / interval_ms).max(0.0) as usize % frame_count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_cycle_on_the_interval() {
        assert_eq!(frame_index(0.0, 500.0, 2), 0);
        assert_eq!(frame_index(499.0, 500.0, 2), 0);
        assert_eq!(frame_index(500.0, 500.0, 2), 1);
        assert_eq!(frame_index(999.0, 500.0, 2), 1);
        assert_eq!(frame_index(1000.0, 500.0, 2), 0);
    }

    #[test]
    fn degenerate_manifests_pin_frame_zero() {
        assert_eq!(frame_index(1234.0, 0.0, 2), 0);
        assert_eq!(frame_index(-50.0, 500.0, 2), 0);
    }
}
