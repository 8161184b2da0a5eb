use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{LoadError, LoadResult};

/// What a file in the output directory holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    Temperature,
    Phase,
    Enthalpy,
    Values,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Temperature => "temperature",
            Role::Phase => "phase",
            Role::Enthalpy => "enthalpy",
            Role::Values => "values",
        };
        f.write_str(name)
    }
}

/// Filenames the loader expects inside an output directory.
///
/// Defaults to what the simulation writes (`temp.o`, `phase.o`, `enth.o`,
/// `values.o`). Can be overridden from a JSON file:
///
/// ```json
/// { "temperature": "T.out", "values": "scalars.out" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatasetLayout {
    pub temperature: String,
    pub phase: String,
    pub enthalpy: String,
    pub values: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        DatasetLayout {
            temperature: "temp.o".to_string(),
            phase: "phase.o".to_string(),
            enthalpy: "enth.o".to_string(),
            values: "values.o".to_string(),
        }
    }
}

impl DatasetLayout {
    pub fn from_json_file(path: &Path) -> LoadResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let layout: DatasetLayout =
            serde_json::from_str(&text).map_err(|source| LoadError::LayoutFile {
                path: path.to_path_buf(),
                source,
            })?;
        layout.validate()?;
        Ok(layout)
    }

    /// `(role, filename)` pairs in load order.
    pub fn entries(&self) -> [(Role, &str); 4] {
        [
            (Role::Temperature, self.temperature.as_str()),
            (Role::Phase, self.phase.as_str()),
            (Role::Enthalpy, self.enthalpy.as_str()),
            (Role::Values, self.values.as_str()),
        ]
    }

    pub fn filename(&self, role: Role) -> &str {
        match role {
            Role::Temperature => &self.temperature,
            Role::Phase => &self.phase,
            Role::Enthalpy => &self.enthalpy,
            Role::Values => &self.values,
        }
    }

    pub fn path_in(&self, dir: &Path, role: Role) -> PathBuf {
        dir.join(self.filename(role))
    }

    /// Names must be non-empty, plain filenames, and distinct.
    pub fn validate(&self) -> LoadResult<()> {
        let mut seen = BTreeSet::new();
        for (role, name) in self.entries() {
            if name.trim().is_empty() {
                return Err(LoadError::InvalidLayout(format!("{role} filename is empty")));
            }
            if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
                return Err(LoadError::InvalidLayout(format!(
                    "{role} filename '{name}' must be a plain file name"
                )));
            }
            if !seen.insert(name) {
                return Err(LoadError::InvalidLayout(format!(
                    "'{name}' is used for more than one role"
                )));
            }
        }
        Ok(())
    }
}
