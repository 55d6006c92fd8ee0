use std::path::PathBuf;

use crate::{
    config::{Config, ConfigManager},
    domain::BiomarkerCatalog,
    errors::CliError,
    recommendation::FileRecommendationSource,
    storage::JsonProfileStore,
    utils::PathResolver,
};

use super::commands::{all_definitions, CommandDefinition, CommandRegistry};
use super::output;
use strsim::levenshtein;

/// Shared runtime state for one CLI invocation.
pub struct CliContext {
    pub config: Config,
    pub store: JsonProfileStore,
    pub catalog: BiomarkerCatalog,
    pub registry: CommandRegistry,
}

impl CliContext {
    pub fn new(base: Option<PathBuf>) -> Result<Self, CliError> {
        let base = PathResolver::resolve_base(base);
        let config = ConfigManager::with_base_dir(base.clone())?.load()?;
        let store_root = config.data_dir.clone().unwrap_or(base);
        let store = JsonProfileStore::new(Some(store_root))?;
        Ok(Self {
            config,
            store,
            catalog: BiomarkerCatalog::standard(),
            registry: CommandRegistry::new(all_definitions()),
        })
    }

    pub fn recommendation_source(&self) -> Option<FileRecommendationSource> {
        self.config
            .recommendations_file
            .as_ref()
            .map(FileRecommendationSource::new)
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub fn dispatch(&mut self, raw: &str, args: &[&str]) -> Result<(), CliError> {
        let name = raw.to_lowercase();
        match self.registry.get(&name).map(|definition| definition.handler) {
            Some(handler) => handler(self, args),
            None => {
                self.suggest_command(raw);
                Err(CliError::Command(format!("unknown command `{raw}`")))
            }
        }
    }

    pub fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Run `help` to see available commands.",
            input
        ));
        if let Some(best) = self.closest_command(input) {
            output::info(format!("Suggestion: `{}`?", best));
        }
    }

    pub fn closest_command(&self, input: &str) -> Option<&'static str> {
        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &input.to_lowercase()), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);
        suggestions
            .first()
            .filter(|(distance, _)| *distance <= 3)
            .map(|(_, name)| *name)
    }
}
