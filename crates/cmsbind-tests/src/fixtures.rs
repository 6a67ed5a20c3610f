//! ICC fixture files
//!
//! Profiles are serialized by the engine itself and written into a
//! temporary directory that lives as long as the [`Fixtures`] value.

use anyhow::{Context, Result};
use lcms2::Profile;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create fixture directory")?;
        debug!("fixtures in {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Serialized built-in sRGB profile
    pub fn srgb(&self) -> Result<PathBuf> {
        let data = Profile::new_srgb().icc().context("serialize sRGB")?;
        self.write("srgb.icc", &data)
    }

    /// Serialized built-in XYZ profile
    pub fn xyz(&self) -> Result<PathBuf> {
        let data = Profile::new_xyz().icc().context("serialize XYZ")?;
        self.write("xyz.icc", &data)
    }

    /// Valid header followed by nothing
    pub fn truncated(&self) -> Result<PathBuf> {
        let data = Profile::new_srgb().icc().context("serialize sRGB")?;
        self.write("truncated.icc", &data[..data.len().min(64)])
    }

    pub fn garbage(&self) -> Result<PathBuf> {
        self.write("garbage.icc", b"this is not an ICC profile")
    }

    pub fn empty(&self) -> Result<PathBuf> {
        self.write("empty.icc", b"")
    }

    /// Path inside the fixture directory that does not exist
    pub fn absent(&self) -> PathBuf {
        self.dir.path().join("absent.icc")
    }

    pub fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join(name);
        fs::write(&path, data).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }
}
