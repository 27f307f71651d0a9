use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::document::{DocxReader, DocxWriter};
use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::rebuilder::Rebuilder;
use crate::translation::cache::CacheStats;
use crate::translation::concurrency::ProviderProfile;
use crate::translation::core::PROBE_TEXT;
use crate::translation::{TranslationService, Translator};

// @module: Application controller for document translation

/// Outcome of a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Main application controller for document translation
#[derive(Debug)]
pub struct Controller {
    // @field: App configuration
    config: Config,

    /// Translator shared by every document of the run
    translator: Arc<dyn Translator>,

    /// Provider-backed service, absent when a custom translator was injected
    service: Option<Arc<TranslationService>>,
}

impl Controller {
    /// Create a controller with a provider-backed translation service built from the configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        let service = Arc::new(TranslationService::new(config.translation.clone())?);
        let translator: Arc<dyn Translator> = service.clone();

        Ok(Self {
            config,
            translator,
            service: Some(service),
        })
    }

    /// Create a controller around any translator
    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self {
            config,
            translator,
            service: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Cache counters of the provider-backed service, `None` for injected translators
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.service.as_ref().map(|service| service.cache().stats())
    }

    fn rebuilder(&self) -> Rebuilder {
        let configured = self
            .config
            .translation
            .get_active_provider_config()
            .map(|p| p.concurrent_requests);
        let concurrency = ProviderProfile::for_provider(self.config.translation.provider)
            .effective_concurrent_requests(configured);

        Rebuilder::new(
            Arc::clone(&self.translator),
            self.config.language_pair(),
            concurrency,
            self.config.translation.common.failure_policy,
        )
    }

    /// Check the translator answers before starting a run.
    pub async fn test_connection(&self) -> Result<(), AppError> {
        let languages = self.config.language_pair();
        match &self.service {
            Some(service) => {
                service.test_connection(&languages).await?;
            }
            None => {
                self.translator
                    .translate(PROBE_TEXT, &languages)
                    .await?;
            }
        }
        info!("Translation backend is reachable");
        Ok(())
    }

    /// Convert one document, writing to the configured output path.
    ///
    /// Returns the path of the written document.
    pub async fn translate_word_file<P: AsRef<Path>>(&self, input: P) -> Result<PathBuf, AppError> {
        let output = self.config.output.path();
        self.translate_word_file_to(input, output).await
    }

    /// Convert one document, writing to `output`.
    ///
    /// Nothing is written when loading or translation fails.
    pub async fn translate_word_file_to<P1: AsRef<Path>, P2: AsRef<Path>>(
        &self,
        input: P1,
        output: P2,
    ) -> Result<PathBuf, AppError> {
        let input = input.as_ref();
        let output = output.as_ref();
        let start_time = Instant::now();

        info!("Translating {:?} ({})", input, self.config.language_pair());
        let source = DocxReader::load(input)?;

        let progress_bar = Self::create_progress_bar("units");
        let bilingual = self
            .rebuilder()
            .rebuild_with_progress(&source, |done, total| {
                progress_bar.set_length(total as u64);
                progress_bar.set_position(done as u64);
            })
            .await;
        progress_bar.finish_and_clear();
        let bilingual = bilingual?;

        DocxWriter::save(&bilingual, output)?;

        if let Some(stats) = self.cache_stats() {
            debug!(
                "Translation cache: {} entries, {} hits, {} misses ({:.0}% hit rate)",
                stats.entries,
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0
            );
        }

        info!(
            "Success: {} ({})",
            output.display(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(output.to_path_buf())
    }

    /// Convert every document under `input_dir`, writing `<stem>.<target>.docx` beside each.
    ///
    /// Lock files and earlier outputs are ignored. Existing outputs are kept
    /// unless `force_overwrite` is set. A failing document does not stop the run.
    pub async fn run_folder<P: AsRef<Path>>(
        &self,
        input_dir: P,
        force_overwrite: bool,
    ) -> Result<FolderSummary, AppError> {
        let input_dir = input_dir.as_ref();
        let start_time = Instant::now();

        if !FileManager::dir_exists(input_dir) {
            return Err(AppError::File(format!(
                "Input directory does not exist: {:?}",
                input_dir
            )));
        }

        let target_language = self.config.target_language.clone();
        let documents: Vec<PathBuf> = FileManager::find_files(input_dir, "docx")?
            .into_iter()
            .filter(|path| !FileManager::is_translated_output(path, &target_language))
            .collect();

        if documents.is_empty() {
            return Err(AppError::File(format!(
                "No .docx files found in directory: {:?}",
                input_dir
            )));
        }

        let folder_pb = Self::create_progress_bar("files");
        folder_pb.set_length(documents.len() as u64);

        let mut summary = FolderSummary::default();

        for document in &documents {
            let file_name = document
                .file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = document.parent().unwrap_or(input_dir);
            let output_path = FileManager::generate_output_path(document, output_dir, &target_language, "docx");

            if output_path.exists() && !force_overwrite {
                warn!(
                    "Skipping {}, translation already exists (use -f to force overwrite)",
                    file_name
                );
                summary.skipped += 1;
                folder_pb.inc(1);
                continue;
            }

            match self.translate_word_file_to(document, &output_path).await {
                Ok(_) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.failed += 1;
                }
            }
            folder_pb.inc(1);
        }

        folder_pb.finish_and_clear();

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.failed
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join("bidocx.log");
        let log_line = format!(
            "{} ({}) - Duration: {}",
            summary_message,
            input_dir.display(),
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder log: {}", e);
        }

        Ok(summary)
    }

    fn create_progress_bar(unit: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(0);
        let template = format!(
            "{{spinner:.green}} [{{elapsed_precise}}] [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{percent}}%) {{msg}}",
            unit
        );
        let style = ProgressStyle::default_bar()
            .template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(style.progress_chars("█▓▒░"));
        progress_bar
    }

    // Format duration in a human-readable format
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
