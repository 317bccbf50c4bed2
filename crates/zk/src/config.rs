//! Circuit artifact locations.

use std::env;
use std::path::{Path, PathBuf};

/// Locations of the precompiled circuit artifacts.
///
/// The files are opaque to this crate. They are passed explicitly into the
/// proving engine at construction time, and nothing here searches the
/// filesystem for keys on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitArtifacts {
    /// Compiled circuit, in whatever format the engine consumes
    pub circuit: Option<PathBuf>,

    /// Proving key produced by the circuit's setup
    pub proving_key: PathBuf,

    /// Optional verifying key, checked against the proving key on load
    pub verifying_key: Option<PathBuf>,
}

impl CircuitArtifacts {
    pub fn new(proving_key: impl Into<PathBuf>) -> Self {
        Self {
            circuit: None,
            proving_key: proving_key.into(),
            verifying_key: None,
        }
    }

    /// Load artifact locations from environment variables.
    ///
    /// Environment variables:
    /// - `QUEST_PROVING_KEY` - Path to the proving key (required)
    /// - `QUEST_CIRCUIT` - Path to the compiled circuit (optional)
    /// - `QUEST_VERIFYING_KEY` - Path to the verifying key (optional)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let present = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let proving_key = present("QUEST_PROVING_KEY")
            .ok_or_else(|| "QUEST_PROVING_KEY environment variable not set".to_string())?;

        Ok(Self {
            circuit: present("QUEST_CIRCUIT").map(PathBuf::from),
            proving_key: PathBuf::from(proving_key),
            verifying_key: present("QUEST_VERIFYING_KEY").map(PathBuf::from),
        })
    }

    /// Set compiled circuit path.
    pub fn with_circuit(mut self, path: impl AsRef<Path>) -> Self {
        self.circuit = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set verifying key path.
    pub fn with_verifying_key(mut self, path: impl AsRef<Path>) -> Self {
        self.verifying_key = Some(path.as_ref().to_path_buf());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn test_from_lookup_reads_all_artifacts() {
        let artifacts = CircuitArtifacts::from_lookup(lookup(&[
            ("QUEST_CIRCUIT", "answer.r1cs"),
            ("QUEST_PROVING_KEY", "answer.pk"),
            ("QUEST_VERIFYING_KEY", "answer.vk"),
        ]))
        .unwrap();

        assert_eq!(
            artifacts,
            CircuitArtifacts::new("answer.pk")
                .with_circuit("answer.r1cs")
                .with_verifying_key("answer.vk")
        );
    }

    #[test]
    fn test_from_lookup_requires_proving_key() {
        let err = CircuitArtifacts::from_lookup(lookup(&[("QUEST_PROVING_KEY", " ")])).unwrap_err();
        assert!(err.contains("QUEST_PROVING_KEY"));
    }

    #[test]
    fn test_optional_artifacts_default_to_none() {
        let artifacts =
            CircuitArtifacts::from_lookup(lookup(&[("QUEST_PROVING_KEY", "answer.pk")])).unwrap();
        assert_eq!(artifacts.circuit, None);
        assert_eq!(artifacts.verifying_key, None);
    }
}
