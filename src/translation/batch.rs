/*!
 * Batch translation processing.
 *
 * This module translates many independent texts with bounded concurrency.
 * Results come back in input order whatever order the requests finish in.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use super::Translator;
use crate::app_config::FailurePolicy;
use crate::errors::TranslationError;
use crate::language_utils::LanguagePair;

/// Batch translator for processing many texts concurrently
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    /// The translator to use
    translator: Arc<dyn Translator>,

    /// Maximum number of concurrent requests
    max_concurrent_requests: usize,

    /// What a failed text turns into
    failure_policy: FailurePolicy,
}

impl BatchTranslator {
    /// Create a new batch translator
    pub fn new(
        translator: Arc<dyn Translator>,
        max_concurrent_requests: usize,
        failure_policy: FailurePolicy,
    ) -> Self {
        Self {
            translator,
            max_concurrent_requests: max_concurrent_requests.max(1),
            failure_policy,
        }
    }

    /// Translate `texts`, returning one entry per input in the same order.
    ///
    /// Identical texts are requested once. A blank answer for a non-blank
    /// text counts as a failure. Under `FailurePolicy::Fallback` a failed
    /// text yields `None`; under `FailurePolicy::Abort` the first
    /// failure cancels the outstanding requests and is returned.
    ///
    /// `progress_callback(done, total)` is called after each distinct text.
    pub async fn translate_all<F>(
        &self,
        texts: &[String],
        languages: &LanguagePair,
        progress_callback: F,
    ) -> Result<Vec<Option<String>>, TranslationError>
    where
        F: Fn(usize, usize) + Send + Sync,
    {
        let start_time = Instant::now();

        // Distinct texts in first-seen order
        let mut distinct: Vec<&str> = Vec::new();
        let mut slot_of: HashMap<&str, usize> = HashMap::new();
        let slots: Vec<usize> = texts
            .iter()
            .map(|text| {
                *slot_of.entry(text.as_str()).or_insert_with(|| {
                    distinct.push(text.as_str());
                    distinct.len() - 1
                })
            })
            .collect();

        let total = distinct.len();
        let processed = AtomicUsize::new(0);
        let processed = &processed;
        let progress_callback = &progress_callback;

        let mut results = stream::iter(distinct.iter().copied().enumerate())
            .map(|(index, text)| {
                let translator = Arc::clone(&self.translator);
                async move {
                    let result = translator.translate(text, languages).await;
                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);
                    (index, result)
                }
            })
            .buffer_unordered(self.max_concurrent_requests);

        let mut translated: Vec<Option<String>> = vec![None; total];
        let mut failures = 0;

        while let Some((index, result)) = results.next().await {
            let source = distinct[index];
            let result = result.and_then(|text| {
                if text.trim().is_empty() && !source.trim().is_empty() {
                    Err(TranslationError::EmptyTranslation(source.to_string()))
                } else {
                    Ok(text)
                }
            });

            match result {
                Ok(text) => translated[index] = Some(text),
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Fallback => {
                        failures += 1;
                        warn!(
                            "Keeping original text for '{}': {}",
                            preview(source),
                            e
                        );
                    }
                },
            }
        }

        debug!(
            "Translated {} distinct text(s) in {:?}, {} failed",
            total,
            start_time.elapsed(),
            failures
        );

        Ok(slots.into_iter().map(|slot| translated[slot].clone()).collect())
    }
}

fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(40).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
