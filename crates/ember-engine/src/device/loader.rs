use std::collections::HashMap;

use super::ProcAddress;

/// Summary of one `EntryPointLoader::load` pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LoadReport {
    pub resolved: usize,
    pub missing: usize,
}

/// Resolves GPU function pointers through a context's address lookup.
pub trait EntryPointLoader {
    fn load(&mut self, resolve: &dyn Fn(&str) -> Option<ProcAddress>) -> LoadReport;
}

/// Core GLES 2.0 entry points every sample relies on.
pub const GLES2_ENTRY_POINTS: &[&str] = &[
    "glActiveTexture",
    "glAttachShader",
    "glBindBuffer",
    "glBindFramebuffer",
    "glBindTexture",
    "glBufferData",
    "glClear",
    "glClearColor",
    "glCompileShader",
    "glCreateProgram",
    "glCreateShader",
    "glDeleteProgram",
    "glDeleteShader",
    "glDrawArrays",
    "glDrawElements",
    "glEnableVertexAttribArray",
    "glGenBuffers",
    "glGenTextures",
    "glGetAttribLocation",
    "glGetError",
    "glGetUniformLocation",
    "glLinkProgram",
    "glShaderSource",
    "glTexImage2D",
    "glTexParameteri",
    "glUniform1i",
    "glUniformMatrix4fv",
    "glUseProgram",
    "glVertexAttribPointer",
    "glViewport",
];

/// Name-keyed table of resolved entry points.
#[derive(Debug, Default)]
pub struct GlEntryPoints {
    names: Vec<&'static str>,
    table: HashMap<&'static str, ProcAddress>,
}

impl GlEntryPoints {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
            table: HashMap::new(),
        }
    }

    pub fn gles2() -> Self {
        Self::new(GLES2_ENTRY_POINTS)
    }

    pub fn get(&self, name: &str) -> Option<ProcAddress> {
        self.table.get(name).copied()
    }

    pub fn resolved_count(&self) -> usize {
        self.table.len()
    }

    /// Names that did not resolve on the last load.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names
            .iter()
            .copied()
            .filter(|n| !self.table.contains_key(n))
    }
}

impl EntryPointLoader for GlEntryPoints {
    fn load(&mut self, resolve: &dyn Fn(&str) -> Option<ProcAddress>) -> LoadReport {
        self.table.clear();
        for &name in &self.names {
            if let Some(addr) = resolve(name) {
                self.table.insert(name, addr);
            }
        }

        let report = LoadReport {
            resolved: self.resolved_count(),
            missing: self.names.len() - self.resolved_count(),
        };
        log::debug!(
            "entry points: {} resolved, {} missing",
            report.resolved,
            report.missing
        );
        for name in self.missing() {
            log::trace!("unresolved entry point {name}");
        }
        report
    }
}
