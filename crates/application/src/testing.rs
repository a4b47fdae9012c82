//! Port mocks and fixtures shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use varsub_domain::{EnvironmentOverride, ExpansionContext, VariantTable, WorkspaceFolder};

use crate::expansion::EnginePorts;
use crate::ports::{
    CommandError, CommandExecutor, EnvironmentError, EnvironmentSource, PathNormalizer,
    WorkspaceFolderRegistry,
};

pub fn variables() -> Vec<(&'static str, &'static str)> {
    vec![
        ("generator", "Ninja"),
        ("workspaceFolder", "/work/app"),
        ("workspaceFolderBasename", "app"),
        ("sourceDir", "/work/app"),
        ("workspaceHash", "abc123"),
        ("workspaceRoot", "/work"),
        ("workspaceRootFolderName", "work"),
        ("userHome", "/home/dev"),
    ]
}

pub fn context() -> ExpansionContext {
    ExpansionContext::builder(variables())
        .expect("valid variables")
        .build()
}

pub fn context_with<const N: usize>(extra: [(&'static str, &'static str); N]) -> ExpansionContext {
    let mut entries = variables();
    entries.extend(extra);
    ExpansionContext::builder(entries)
        .expect("valid variables")
        .build()
}

pub fn context_with_override<const N: usize>(
    entries: [(&str, Option<&str>); N],
) -> ExpansionContext {
    let table: EnvironmentOverride = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect();
    ExpansionContext::builder(variables())
        .expect("valid variables")
        .environment_override(table)
        .build()
}

pub fn context_with_variants<const N: usize>(entries: [(&str, &str); N]) -> ExpansionContext {
    let table: VariantTable = entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ExpansionContext::builder(variables())
        .expect("valid variables")
        .variants(table)
        .build()
}

pub fn context_without_commands() -> ExpansionContext {
    ExpansionContext::builder(variables())
        .expect("valid variables")
        .commands_disabled(true)
        .build()
}

#[derive(Debug, Default)]
pub struct MapEnvironment {
    values: HashMap<String, String>,
    broken: Vec<String>,
}

impl MapEnvironment {
    pub fn new<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            broken: Vec::new(),
        }
    }

    pub fn with_broken(mut self, name: &str) -> Self {
        self.broken.push(name.to_string());
        self
    }
}

impl EnvironmentSource for MapEnvironment {
    fn get(&self, name: &str) -> Result<Option<String>, EnvironmentError> {
        if self.broken.iter().any(|b| b == name) {
            return Err(EnvironmentError::NotUnicode(name.to_string()));
        }
        Ok(self.values.get(name).cloned())
    }
}

/// Trims surrounding whitespace so tests can observe normalization.
pub struct TrimNormalizer;

impl PathNormalizer for TrimNormalizer {
    fn normalize(&self, raw: Option<&str>) -> String {
        raw.map(str::trim).unwrap_or_default().to_string()
    }
}

#[derive(Debug, Default)]
pub struct FixedFolders {
    folders: Vec<WorkspaceFolder>,
}

impl FixedFolders {
    pub fn new<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self {
            folders: entries
                .into_iter()
                .map(|(name, path)| WorkspaceFolder::new(name, path))
                .collect(),
        }
    }
}

impl WorkspaceFolderRegistry for FixedFolders {
    fn folders(&self) -> Vec<WorkspaceFolder> {
        self.folders.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingExecutor {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingExecutor {
    pub fn new<const N: usize>(outputs: [(&str, &str); N]) -> Self {
        Self {
            outputs: outputs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("Lock poisoned").clone()
    }
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, command: &str, workspace_folder: &str) -> Result<String, CommandError> {
        self.calls
            .lock()
            .expect("Lock poisoned")
            .push((command.to_string(), workspace_folder.to_string()));
        self.outputs
            .get(command)
            .cloned()
            .ok_or_else(|| CommandError::Unknown(command.to_string()))
    }
}

pub fn ports(environment: MapEnvironment) -> EnginePorts {
    ports_with(environment, FixedFolders::default(), RecordingExecutor::default())
}

pub fn ports_with(
    environment: MapEnvironment,
    folders: FixedFolders,
    executor: RecordingExecutor,
) -> EnginePorts {
    EnginePorts {
        environment: std::sync::Arc::new(environment),
        path_normalizer: std::sync::Arc::new(TrimNormalizer),
        workspace_folders: std::sync::Arc::new(folders),
        commands: std::sync::Arc::new(executor),
    }
}
