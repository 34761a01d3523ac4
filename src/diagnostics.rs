//! Fire-and-forget diagnostics sink.
//!
//! The pipeline records warnings (unparsable values, failed image
//! classifications) and informational notes into an optional shared sink.
//! Recording never affects control flow; a poisoned or absent sink is
//! silently ignored.

/// Collected warnings and notes from one pipeline's lifetime.
#[derive(Debug, Default, Clone)]
pub struct PipelineDiagnostics {
  warnings: Vec<String>,
  infos: Vec<String>,
}

impl PipelineDiagnostics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn warn(&mut self, message: impl Into<String>) {
    self.warnings.push(message.into());
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.infos.push(message.into());
  }

  pub fn warnings(&self) -> &[String] {
    &self.warnings
  }

  pub fn infos(&self) -> &[String] {
    &self.infos
  }

  /// Drains all recorded warnings, oldest first.
  pub fn take_warnings(&mut self) -> Vec<String> {
    std::mem::take(&mut self.warnings)
  }
}
