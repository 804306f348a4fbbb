//! The rendered document handed back by a successful compile.

use std::{
  io::Write,
  path::{Path, PathBuf},
};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::debug;
use vitae_core::document::BasicDetails;

use crate::Result;

/// File name offered when the user downloads the PDF.
pub fn download_file_name(details: &BasicDetails) -> String {
  format!(
    "{}_{}_Resume.pdf",
    file_name_part(&details.first_name),
    file_name_part(&details.last_name)
  )
}

/// `part` with path separators and characters that are invalid in file
/// names replaced by `_`, and leading dots removed.
fn file_name_part(part: &str) -> String {
  let cleaned: String = part
    .chars()
    .map(|c| match c {
      '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
      c if c.is_control() => '_',
      c => c,
    })
    .collect();
  cleaned.trim_start_matches('.').to_string()
}

/// A decoded PDF plus the name it should be saved under.
///
/// Cheap to clone; the bytes are reference-counted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  bytes:     Bytes,
  file_name: String,
}

impl Artifact {
  /// `file_name` is reduced to a single path component.
  pub fn new(bytes: impl Into<Bytes>, file_name: impl AsRef<str>) -> Self {
    let file_name = match file_name_part(file_name.as_ref()) {
      name if name.is_empty() => "Resume.pdf".to_string(),
      name => name,
    };
    Self {
      bytes: bytes.into(),
      file_name,
    }
  }

  /// Decode the base64 payload of a compile response.
  pub fn from_base64(encoded: &str, details: &BasicDetails) -> Result<Self> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(Self::new(bytes, download_file_name(details)))
  }

  pub fn bytes(&self) -> &Bytes { &self.bytes }

  pub fn len(&self) -> usize { self.bytes.len() }

  pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

  pub fn file_name(&self) -> &str { &self.file_name }

  /// Write the PDF into `dir` under [`Artifact::file_name`], returning the
  /// full path.
  pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&self.file_name);
    std::fs::write(&path, &self.bytes)?;
    debug!(path = %path.display(), bytes = self.len(), "saved artifact");
    Ok(path)
  }

  /// Materialise the PDF as a temporary file for previewing.
  pub fn preview(&self) -> Result<Preview> {
    let mut file = tempfile::Builder::new()
      .prefix("vitae-preview-")
      .suffix(".pdf")
      .tempfile()?;
    file.write_all(&self.bytes)?;
    file.flush()?;
    Ok(Preview { file })
  }
}

/// A short-lived local reference to a rendered PDF. The backing file is
/// deleted on [`Preview::revoke`] or when the handle is dropped.
#[derive(Debug)]
pub struct Preview {
  file: NamedTempFile,
}

impl Preview {
  pub fn path(&self) -> &Path { self.file.path() }

  pub fn revoke(self) -> Result<()> {
    self.file.close()?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn details() -> BasicDetails {
    BasicDetails {
      first_name: "Priya".into(),
      last_name: "Sharma".into(),
      ..Default::default()
    }
  }

  #[test]
  fn download_name_uses_first_and_last_name() {
    assert_eq!(download_file_name(&details()), "Priya_Sharma_Resume.pdf");
  }

  #[test]
  fn decodes_base64_payload() {
    let artifact = Artifact::from_base64("JVBERi0xLjQK", &details()).unwrap();
    assert_eq!(artifact.bytes().as_ref(), b"%PDF-1.4\n");
    assert_eq!(artifact.file_name(), "Priya_Sharma_Resume.pdf");
  }

  #[test]
  fn rejects_invalid_base64() {
    assert!(Artifact::from_base64("not base64!!", &details()).is_err());
  }

  #[test]
  fn save_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = Artifact::new(&b"%PDF"[..], "A_B_Resume.pdf");
    let path = artifact.save_in(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("A_B_Resume.pdf"));
    assert_eq!(std::fs::read(path).unwrap(), b"%PDF");
  }

  #[test]
  fn names_cannot_climb_out_of_the_output_dir() {
    let details = BasicDetails {
      first_name: "../escaped".into(),
      last_name: "X".into(),
      ..Default::default()
    };
    assert_eq!(download_file_name(&details), "_escaped_X_Resume.pdf");

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let artifact = Artifact::from_base64("JVBERi0xLjQK", &details).unwrap();
    let path = artifact.save_in(&out).unwrap();
    assert_eq!(path.parent(), Some(out.as_path()));
  }

  #[test]
  fn separators_inside_a_name_are_replaced() {
    let details = BasicDetails {
      first_name: "Mary/Ann".into(),
      last_name: r"O\Neil".into(),
      ..Default::default()
    };
    assert_eq!(download_file_name(&details), "Mary_Ann_O_Neil_Resume.pdf");

    let dir = tempfile::tempdir().unwrap();
    let artifact = Artifact::from_base64("JVBERi0xLjQK", &details).unwrap();
    let path = artifact.save_in(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("Mary_Ann_O_Neil_Resume.pdf"));
  }

  #[test]
  fn explicit_file_name_is_one_component() {
    let artifact = Artifact::new(&b"%PDF"[..], "../../etc/passwd");
    assert_eq!(artifact.file_name(), "_.._etc_passwd");
    assert_eq!(Artifact::new(&b"%PDF"[..], "..").file_name(), "Resume.pdf");
  }

  #[test]
  fn revoked_preview_is_gone() {
    let artifact = Artifact::new(&b"%PDF"[..], "A_B_Resume.pdf");
    let preview = artifact.preview().unwrap();
    let path = preview.path().to_path_buf();
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    preview.revoke().unwrap();
    assert!(!path.exists());
  }
}
