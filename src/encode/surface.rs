use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    foundation::error::{GradientError, GradientResult},
    spec::model::ImageFormat,
};

/// Host capability that receives an encoded export.
///
/// The synthesizer never touches files or DOM elements itself; a browser host would turn the
/// bytes into a download link, a CLI writes them to disk.
pub trait ExportSurface {
    /// Deliver `bytes` under `file_name`.
    fn write_export(
        &mut self,
        file_name: &str,
        format: ImageFormat,
        bytes: &[u8],
    ) -> GradientResult<()>;
}

/// Writes exports into a directory.
#[derive(Clone, Debug)]
pub struct DirectorySurface {
    dir: PathBuf,
    overwrite: bool,
}

impl DirectorySurface {
    /// Surface rooted at `dir`, overwriting existing files.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overwrite: true,
        }
    }

    /// Whether an existing file may be replaced.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path an export named `file_name` would be written to.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl ExportSurface for DirectorySurface {
    fn write_export(
        &mut self,
        file_name: &str,
        format: ImageFormat,
        bytes: &[u8],
    ) -> GradientResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        let path = self.path_for(file_name);
        if !self.overwrite && path.exists() {
            return Err(GradientError::invalid_target(format!(
                "refusing to overwrite '{}'",
                path.display()
            )));
        }
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        tracing::info!(
            path = %path.display(),
            mime = format.mime_type(),
            bytes = bytes.len(),
            "wrote export"
        );
        Ok(())
    }
}

/// One export captured by [`InMemorySurface`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedExport {
    /// File name the host would use.
    pub file_name: String,
    /// Container format.
    pub format: ImageFormat,
    /// Encoded bytes.
    pub bytes: Vec<u8>,
}

/// In-memory surface for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySurface {
    exports: Vec<CapturedExport>,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exports in delivery order.
    pub fn exports(&self) -> &[CapturedExport] {
        &self.exports
    }
}

impl ExportSurface for InMemorySurface {
    fn write_export(
        &mut self,
        file_name: &str,
        format: ImageFormat,
        bytes: &[u8],
    ) -> GradientResult<()> {
        self.exports.push(CapturedExport {
            file_name: file_name.to_owned(),
            format,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_surface_records_exports() {
        let mut s = InMemorySurface::new();
        s.write_export("gradient.png", ImageFormat::Png, &[1, 2, 3])
            .unwrap();
        assert_eq!(s.exports().len(), 1);
        assert_eq!(s.exports()[0].file_name, "gradient.png");
        assert_eq!(s.exports()[0].bytes, vec![1, 2, 3]);
    }

    #[test]
    fn directory_surface_writes_and_respects_overwrite() {
        let dir = PathBuf::from("target").join("surface_unit");
        let _ = std::fs::remove_dir_all(&dir);

        let mut s = DirectorySurface::new(&dir);
        s.write_export("gradient.jpeg", ImageFormat::Jpeg, b"abc")
            .unwrap();
        assert_eq!(std::fs::read(dir.join("gradient.jpeg")).unwrap(), b"abc");

        let mut s = DirectorySurface::new(&dir).overwrite(false);
        assert!(
            s.write_export("gradient.jpeg", ImageFormat::Jpeg, b"xyz")
                .is_err()
        );
        assert_eq!(std::fs::read(dir.join("gradient.jpeg")).unwrap(), b"abc");
    }
}
