// Runtime settings: command-line flags win over environment variables, which win
// over defaults.
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::ReviewAnalyzer;
use crate::lexicon::Lexicon;
use crate::nlp::{PolarityScorer, VaderEngine, WordListEngine};
use crate::source::{open_source, ProductSource};

pub const DATA_ENV: &str = "REVIEWPULSE_DATA";
pub const LEXICON_ENV: &str = "REVIEWPULSE_LEXICON";
pub const ENGINE_ENV: &str = "REVIEWPULSE_ENGINE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    Vader,
    Wordlist,
}

impl FromStr for EngineKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "vader" => Ok(EngineKind::Vader),
            "wordlist" | "word-list" => Ok(EngineKind::Wordlist),
            other => Err(anyhow!("unknown sentiment engine: {}", other)),
        }
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data: Option<PathBuf>,
    pub lexicon: Option<PathBuf>,
    pub engine: Option<EngineKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// JSON dataset (file or directory). `None` selects the sample catalog.
    pub data: Option<PathBuf>,
    /// Lexicon override file. `None` uses the built-in tables.
    pub lexicon: Option<PathBuf>,
    pub engine: EngineKind,
}

impl Settings {
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        Self::resolve_with(overrides, |key| std::env::var(key).ok())
    }

    pub fn resolve_with<F>(overrides: Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let engine = match overrides.engine {
            Some(engine) => engine,
            None => match non_empty(ENGINE_ENV) {
                Some(value) => value
                    .parse::<EngineKind>()
                    .with_context(|| format!("invalid {}", ENGINE_ENV))?,
                None => EngineKind::default(),
            },
        };

        let settings = Settings {
            data: overrides.data.or_else(|| non_empty(DATA_ENV).map(PathBuf::from)),
            lexicon: overrides.lexicon.or_else(|| non_empty(LEXICON_ENV).map(PathBuf::from)),
            engine,
        };
        debug!(?settings, "resolved settings");
        Ok(settings)
    }

    pub fn load_lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon {
            Some(path) => Ok(Lexicon::from_file(path)?),
            None => Ok(Lexicon::builtin()),
        }
    }

    pub fn build_analyzer(&self) -> Result<ReviewAnalyzer> {
        let lexicon = Arc::new(self.load_lexicon()?);
        let scorer = match self.engine {
            EngineKind::Vader => PolarityScorer::new(Box::new(VaderEngine::new())),
            EngineKind::Wordlist => {
                PolarityScorer::new(Box::new(WordListEngine::new(&lexicon.polarity_words)))
            }
        };
        Ok(ReviewAnalyzer::new(scorer, lexicon))
    }

    pub fn open_source(&self) -> Result<Box<dyn ProductSource>> {
        Ok(open_source(self.data.as_deref())?)
    }
}
