//! recolor: a CSS value-rewriting pipeline for runtime theme transforms.
//!
//! Given one declaration's raw value (a color, gradient, shadow list or
//! background-image reference), the pipeline compiles a [`Modifier`]: a
//! pure mapping from a [`ThemeConfig`] to a rewritten CSS value string.
//! A document can then be re-rendered under an arbitrary color transform
//! by re-evaluating the compiled modifiers, without re-parsing anything.
//!
//! The pipeline owns the micro-parsers, the modifier graph, the parse and
//! classification caches, and the single-flight deduplication of image
//! analysis. The color-transform math and the image decoding itself are
//! collaborator services injected through the [`ColorTransform`] and
//! [`image::ImageAnalyzer`] trait seams.

pub mod builder;
pub mod color;
pub mod config;
pub mod context;
pub mod declaration;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod modifier;
pub mod resolve;
pub(crate) mod scan;
pub mod stylesheet;
pub mod transform;

pub use color::{Hsla, Rgba};
pub use config::{Mode, ThemeConfig};
pub use context::PipelineContext;
pub use declaration::{classify_declaration, DeclarationValue, ModifiableDeclaration, RuleContext};
pub use diagnostics::PipelineDiagnostics;
pub use error::{Error, Result};
pub use modifier::{CancellationProbe, ColorAxis, Modifier};
pub use transform::{ColorTransform, IdentityTransform};

#[cfg(test)]
pub(crate) mod test_support {
  use crate::config::ThemeConfig;
  use crate::context::PipelineContext;
  use crate::error::{Error, Result};
  use crate::image::{ImageAnalyzer, ImageClassification};
  use crate::transform::IdentityTransform;
  use std::sync::Arc;

  struct NoImages;

  impl ImageAnalyzer for NoImages {
    fn analyze(&self, url: &str) -> Result<ImageClassification> {
      Err(Error::Other(format!("no analyzer for {url}")))
    }

    fn filtered_data_url(&self, image: &ImageClassification, _config: &ThemeConfig) -> String {
      image.data_url.clone()
    }
  }

  /// A context with the identity transform and no image service.
  pub(crate) fn test_context() -> PipelineContext {
    PipelineContext::new(Arc::new(IdentityTransform), Arc::new(NoImages))
  }
}
