use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Result};

/// Environment variable naming the entry-point library.
pub const EGL_LIBRARY_ENV: &str = "EMBER_EGL_LIBRARY";

/// Where to look for the library file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SearchType {
    /// Next to the running executable.
    ApplicationDir,
    /// Defer to the system loader's search path.
    SystemDir,
}

/// Handle to the shared library exposing the context-creation entry points.
///
/// Resolution never fails. A missing or empty name is carried as-is and
/// reported by the graphics context when it tries to use the library.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EntryPointLibrary {
    name: Option<String>,
    search: SearchType,
}

impl EntryPointLibrary {
    /// Resolves the library name: build-time `EMBER_EGL_LIBRARY` first, then
    /// the same variable in the runtime environment.
    pub fn resolve() -> Self {
        let name = option_env!("EMBER_EGL_LIBRARY")
            .map(str::to_owned)
            .or_else(|| env::var(EGL_LIBRARY_ENV).ok());
        Self::named(name, SearchType::ApplicationDir)
    }

    pub fn named(name: Option<String>, search: SearchType) -> Self {
        let name = name.filter(|n| !n.trim().is_empty());
        match &name {
            Some(n) => log::debug!("entry-point library: {n} ({search:?})"),
            None => log::debug!("entry-point library: unset"),
        }
        Self { name, search }
    }

    /// No library configured.
    pub fn none() -> Self {
        Self {
            name: None,
            search: SearchType::ApplicationDir,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn search(&self) -> SearchType {
        self.search
    }

    /// Platform file name for the library, e.g. `libEGL.so` for `EGL`.
    pub fn file_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        if Path::new(name).extension().is_some() {
            return Some(name.to_owned());
        }
        Some(format!(
            "{}{name}{}",
            env::consts::DLL_PREFIX,
            env::consts::DLL_SUFFIX
        ))
    }

    /// Candidate path to load from, given the search policy.
    pub fn candidate_path(&self) -> Option<PathBuf> {
        let file = self.file_name()?;
        match self.search {
            SearchType::SystemDir => Some(PathBuf::from(file)),
            SearchType::ApplicationDir => {
                let dir = env::current_exe().ok()?.parent()?.to_path_buf();
                Some(dir.join(file))
            }
        }
    }

    /// Checks that a configured library can be found.
    ///
    /// `Ok(None)` when no library is configured. `SystemDir` names are left
    /// to the platform loader's search path and only checked for a name.
    pub fn locate(&self) -> Result<Option<PathBuf>> {
        let Some(path) = self.candidate_path() else {
            if let Some(name) = self.name() {
                bail!("no search path for entry-point library {name}");
            }
            return Ok(None);
        };

        if self.search == SearchType::ApplicationDir {
            ensure!(
                path.is_file(),
                "entry-point library not found at {}",
                path.display()
            );
        }
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_treated_as_unset() {
        let lib = EntryPointLibrary::named(Some("   ".into()), SearchType::ApplicationDir);
        assert_eq!(lib.name(), None);
        assert_eq!(lib.file_name(), None);
        assert_eq!(lib.candidate_path(), None);
    }

    #[test]
    fn bare_name_gets_platform_affixes() {
        let lib = EntryPointLibrary::named(Some("EGL".into()), SearchType::SystemDir);
        let expected = format!("{}EGL{}", env::consts::DLL_PREFIX, env::consts::DLL_SUFFIX);
        assert_eq!(lib.file_name(), Some(expected.clone()));
        assert_eq!(lib.candidate_path(), Some(PathBuf::from(expected)));
    }

    #[test]
    fn explicit_file_name_is_kept() {
        let lib = EntryPointLibrary::named(Some("libEGL_angle.so".into()), SearchType::SystemDir);
        assert_eq!(lib.file_name().as_deref(), Some("libEGL_angle.so"));
    }

    #[test]
    fn unset_library_locates_to_nothing() {
        assert_eq!(EntryPointLibrary::none().locate().unwrap(), None);
    }

    #[test]
    fn missing_application_dir_library_fails_to_locate() {
        let lib = EntryPointLibrary::named(
            Some("ember_no_such_library.so".into()),
            SearchType::ApplicationDir,
        );
        let err = lib.locate().unwrap_err();
        assert!(err.to_string().contains("ember_no_such_library.so"));
    }

    #[test]
    fn present_application_dir_library_locates() {
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        let file = exe_dir.join("ember_locate_fixture.so");
        std::fs::write(&file, b"").unwrap();

        let lib = EntryPointLibrary::named(
            Some("ember_locate_fixture.so".into()),
            SearchType::ApplicationDir,
        );
        let located = lib.locate();
        std::fs::remove_file(&file).unwrap();
        assert_eq!(located.unwrap(), Some(file));
    }

    #[test]
    fn system_dir_library_is_left_to_the_loader() {
        let lib = EntryPointLibrary::named(Some("EGL".into()), SearchType::SystemDir);
        assert_eq!(lib.locate().unwrap(), lib.candidate_path());
    }

    #[test]
    fn application_dir_path_sits_next_to_executable() {
        let lib = EntryPointLibrary::named(Some("EGL".into()), SearchType::ApplicationDir);
        let path = lib.candidate_path().expect("test binary has a parent dir");
        let exe_dir = env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(path.parent(), Some(exe_dir.as_path()));
    }
}
