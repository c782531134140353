use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

use wordcard_lib::catalog::{Catalog, Deck};
use wordcard_lib::config::Config;
use wordcard_lib::scheduling::SchedulingEngine;
use wordcard_lib::session::LearningMode;
use wordcard_lib::store::FileRecordStore;
use wordcard_lib::study_log::StudyLogStorage;

/// Shared application state for CLI commands
pub struct App {
    pub config: Config,
    pub catalog: Catalog,
    pub engine: SchedulingEngine<FileRecordStore>,
    pub study_log: StudyLogStorage,
    pub today: NaiveDate,
}

impl App {
    /// Initialize from the data directory, config file and study date
    pub fn new(
        data_dir: Option<PathBuf>,
        config_path: Option<&Path>,
        date: Option<NaiveDate>,
    ) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => FileRecordStore::default_data_dir()
                .context("Failed to get data directory")?,
        };

        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| data_dir.join("config.toml"));
        let config = Config::load(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

        let catalog_path = config.catalog_path(&data_dir);
        if !catalog_path.exists() {
            bail!(
                "No catalog at {}. Create it or set [catalog] path in {}",
                catalog_path.display(),
                config_path.display()
            );
        }
        let catalog = Catalog::load(&catalog_path)
            .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))?;

        let study_log = StudyLogStorage::new(data_dir.clone())
            .context("Failed to open study log")?;
        let store = FileRecordStore::new(data_dir);
        let engine = SchedulingEngine::new(store, config.scheduling.daily_new_words);

        Ok(Self {
            config,
            catalog,
            engine,
            study_log,
            today: date.unwrap_or_else(|| Local::now().date_naive()),
        })
    }

    /// Find a deck by exact name
    pub fn find_deck(&self, name: &str) -> Result<Deck> {
        match self.catalog.deck(name) {
            Ok(deck) => Ok(deck.clone()),
            Err(_) => bail!(
                "No deck named '{}'. Available decks:\n{}",
                name,
                self.catalog
                    .decks()
                    .iter()
                    .map(|d| format!("  - {} ({} items)", d.name, d.len()))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    /// Working set a session in `mode` walks today
    ///
    /// The new-word session covers the whole batch so items already
    /// recalled still count towards completion.
    pub fn session_set(&self, deck: &Deck, mode: LearningMode) -> Result<Vec<String>> {
        let ids = match mode {
            LearningMode::NewWords => self.engine.batch_for(deck, self.today),
            LearningMode::Review => self.engine.select_review_working_set(deck, self.today),
        };
        ids.with_context(|| format!("Failed to read learning records of deck {}", deck.name))
    }

    pub fn mastery_counts(&self, deck: &Deck, ids: &[String]) -> Result<Vec<u32>> {
        self.engine
            .mastery_counts(&deck.name, ids)
            .with_context(|| format!("Failed to read learning records of deck {}", deck.name))
    }
}

pub fn mode_for(review: bool) -> LearningMode {
    if review {
        LearningMode::Review
    } else {
        LearningMode::NewWords
    }
}
