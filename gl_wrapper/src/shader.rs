//! Programs with a uniform-setting interface, optionally reloaded from disk.
use cgmath::{Matrix4, Vector3};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

use crate::program::{Program, ProgramBuilder, ProgramError};

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error("cannot read metadata of {0:?}: {1}")]
    Metadata(PathBuf, #[source] std::io::Error),
}

pub trait Shader {
    /// Rebuilds the program if its sources changed. Returns whether a reload happened.
    fn check_for_changes(&mut self) -> Result<bool, ShaderError>;

    fn program(&self) -> &Program;

    fn use_shader(&self) {
        self.program().use_program();
    }

    fn set_bool(&self, name: &str, value: bool) {
        self.program().set_bool(name, value);
    }

    fn set_int(&self, name: &str, value: i32) {
        self.program().set_int(name, value);
    }

    fn set_float(&self, name: &str, value: f32) {
        self.program().set_float(name, value);
    }

    fn set_vec3(&self, name: &str, value: Vector3<f32>) {
        self.program().set_vec3(name, value);
    }

    fn set_matrix4(&self, name: &str, value: Matrix4<f32>) {
        self.program().set_matrix4(name, value);
    }
}

/// A file path with the last modification time seen for it.
#[derive(Debug, Clone)]
pub struct WatchedFile {
    path: PathBuf,
    modified: SystemTime,
}

impl WatchedFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ShaderError> {
        let path = path.as_ref().to_path_buf();
        let modified = modified_time(&path)?;

        Ok(Self { path, modified })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the new modification time if it differs from the recorded one, without recording it.
    pub fn changed(&self) -> Result<Option<SystemTime>, ShaderError> {
        let modified = modified_time(&self.path)?;

        Ok((modified != self.modified).then_some(modified))
    }

    pub fn commit(&mut self, modified: SystemTime) {
        self.modified = modified;
    }

    /// Returns true if the modification time differs from the recorded one, and records it.
    pub fn poll(&mut self) -> Result<bool, ShaderError> {
        match self.changed()? {
            Some(modified) => {
                self.commit(modified);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceChanges {
    pub vert: bool,
    pub frag: bool,
}

impl SourceChanges {
    pub fn any(&self) -> bool {
        self.vert || self.frag
    }
}

/// The vertex and fragment files of one program, polled together.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    vert: WatchedFile,
    frag: WatchedFile,
}

impl ShaderSources {
    pub fn new<P: AsRef<Path>>(vert_path: P, frag_path: P) -> Result<Self, ShaderError> {
        Ok(Self {
            vert: WatchedFile::new(vert_path)?,
            frag: WatchedFile::new(frag_path)?,
        })
    }

    pub fn vert_path(&self) -> &Path {
        self.vert.path()
    }

    pub fn frag_path(&self) -> &Path {
        self.frag.path()
    }

    /// Stats both files, then records both times. A failed stat records nothing.
    pub fn poll(&mut self) -> Result<SourceChanges, ShaderError> {
        let vert = self.vert.changed()?;
        let frag = self.frag.changed()?;

        if let Some(modified) = vert {
            self.vert.commit(modified);
        }
        if let Some(modified) = frag {
            self.frag.commit(modified);
        }

        Ok(SourceChanges {
            vert: vert.is_some(),
            frag: frag.is_some(),
        })
    }
}

fn modified_time(path: &Path) -> Result<SystemTime, ShaderError> {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| ShaderError::Metadata(path.to_path_buf(), e))
}

/// Shader loaded from a vertex and a fragment file, rebuilt when either changes.
pub struct FileShader {
    program: Program,
    sources: ShaderSources,
}

impl FileShader {
    pub fn new<P: AsRef<Path>>(vert_path: P, frag_path: P) -> Result<Self, ShaderError> {
        let sources = ShaderSources::new(vert_path, frag_path)?;
        let program =
            ProgramBuilder::from_paths(sources.vert_path(), sources.frag_path())?.build()?;

        Ok(Self { program, sources })
    }
}

impl Shader for FileShader {
    fn check_for_changes(&mut self) -> Result<bool, ShaderError> {
        let changes = self.sources.poll()?;

        if !changes.any() {
            return Ok(false);
        }

        if changes.vert {
            log::info!("vertex shader modified: {}", self.sources.vert_path().display());
        }
        if changes.frag {
            log::info!("fragment shader modified: {}", self.sources.frag_path().display());
        }

        // on failure the previous program stays in use
        let program =
            ProgramBuilder::from_paths(self.sources.vert_path(), self.sources.frag_path())?
                .build()?;
        self.program = program;

        Ok(true)
    }

    fn program(&self) -> &Program {
        &self.program
    }
}

/// Shader built from sources compiled into the binary.
pub struct EmbeddedShader {
    program: Program,
}

impl EmbeddedShader {
    pub fn new(vert_src: &str, frag_src: &str) -> Result<Self, ShaderError> {
        let program = ProgramBuilder::new(vert_src, frag_src).build()?;

        Ok(Self { program })
    }
}

impl Shader for EmbeddedShader {
    fn check_for_changes(&mut self) -> Result<bool, ShaderError> {
        Ok(false)
    }

    fn program(&self) -> &Program {
        &self.program
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::time::Duration;

    fn touch(path: &Path, time: SystemTime) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    #[test]
    fn unchanged_file_is_not_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.vert");
        File::create(&path).unwrap().write_all(b"void main() {}").unwrap();

        let mut watched = WatchedFile::new(&path).unwrap();

        assert!(!watched.poll().unwrap());
        assert!(!watched.poll().unwrap());
    }

    #[test]
    fn modification_is_reported_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.frag");
        File::create(&path).unwrap().write_all(b"void main() {}").unwrap();
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        let mut watched = WatchedFile::new(&path).unwrap();
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));

        assert!(watched.poll().unwrap());
        assert!(!watched.poll().unwrap());
    }

    #[test]
    fn older_time_counts_as_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.frag");
        File::create(&path).unwrap();
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(5_000));

        let mut watched = WatchedFile::new(&path).unwrap();
        touch(&path, SystemTime::UNIX_EPOCH + Duration::from_secs(4_000));

        assert!(watched.poll().unwrap());
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.vert");

        assert!(matches!(
            WatchedFile::new(&path),
            Err(ShaderError::Metadata(p, _)) if p == path
        ));
    }

    #[test]
    fn deleted_file_errors_on_poll() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.vert");
        File::create(&path).unwrap();

        let mut watched = WatchedFile::new(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(watched.poll().is_err());
    }

    fn write_pair(dir: &Path) -> (PathBuf, PathBuf) {
        let vert = dir.join("basic.vert");
        let frag = dir.join("basic.frag");
        File::create(&vert).unwrap().write_all(b"void main() {}").unwrap();
        File::create(&frag).unwrap().write_all(b"void main() {}").unwrap();
        touch(&vert, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));
        touch(&frag, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        (vert, frag)
    }

    #[test]
    fn changed_does_not_record() {
        let dir = tempfile::tempdir().unwrap();
        let (vert, _) = write_pair(dir.path());

        let mut watched = WatchedFile::new(&vert).unwrap();
        let later = SystemTime::UNIX_EPOCH + Duration::from_secs(2_000);
        touch(&vert, later);

        assert_eq!(watched.changed().unwrap(), Some(later));
        assert_eq!(watched.changed().unwrap(), Some(later));

        watched.commit(later);
        assert_eq!(watched.changed().unwrap(), None);
    }

    #[test]
    fn sources_report_each_file() {
        let dir = tempfile::tempdir().unwrap();
        let (vert, frag) = write_pair(dir.path());

        let mut sources = ShaderSources::new(&vert, &frag).unwrap();
        assert!(!sources.poll().unwrap().any());

        touch(&frag, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));
        assert_eq!(
            sources.poll().unwrap(),
            SourceChanges {
                vert: false,
                frag: true
            }
        );
        assert!(!sources.poll().unwrap().any());
    }

    #[test]
    fn vert_change_survives_failed_frag_stat() {
        let dir = tempfile::tempdir().unwrap();
        let (vert, frag) = write_pair(dir.path());

        let mut sources = ShaderSources::new(&vert, &frag).unwrap();

        touch(&vert, SystemTime::UNIX_EPOCH + Duration::from_secs(2_000));
        std::fs::remove_file(&frag).unwrap();

        assert!(matches!(
            sources.poll(),
            Err(ShaderError::Metadata(p, _)) if p == frag
        ));

        File::create(&frag).unwrap();
        touch(&frag, SystemTime::UNIX_EPOCH + Duration::from_secs(1_000));

        assert_eq!(
            sources.poll().unwrap(),
            SourceChanges {
                vert: true,
                frag: false
            }
        );
    }
}
