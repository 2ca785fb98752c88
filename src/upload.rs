// Upload module - the category / language / file interaction
//
// Pure state machine, no IO. The TUI calls `submit` to get a request to send,
// runs it on a background task and feeds the outcome back through `complete`.
//
//   closed ──open──▶ open/idle ──submit──▶ open/busy ──complete──▶ closed (delivered)
//                        ▲                                  │
//                        └──────────── failed ◀─────────────┘
//
// Every submission carries a generation number. `open`, `dismiss` and
// `submit` bump it, so a completion for anything but the in-flight
// submission is reported as stale and ignored.

use crate::analysis::{
    AnalysisError, AnalysisRequest, AnalysisResponse, Category, ErrorKind, Language,
    SelectedFile,
};
use std::time::Instant;

/// A request handed to the caller to send, stamped with its generation
#[derive(Debug, Clone)]
pub struct Submission {
    pub generation: u64,
    pub request: AnalysisRequest,
}

/// What `complete` decided
#[derive(Debug)]
pub enum Completion {
    /// Result goes to the shell; the interaction is dismissed
    Delivered { response: AnalysisResponse },
    /// Alert text to show; the interaction stays open and idle
    Failed { alert: String, kind: ErrorKind },
    /// Superseded by a dismiss/reopen; nothing changes
    Stale,
}

#[derive(Debug)]
struct InFlight {
    generation: u64,
    category: Category,
    file_name: String,
    started: Instant,
}

#[derive(Debug)]
pub struct UploadInteraction {
    open: bool,
    category: Option<Category>,
    language: Language,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl UploadInteraction {
    pub fn new(language: Language) -> Self {
        Self {
            open: false,
            category: None,
            language,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Category of the submission in flight (for the busy message)
    pub fn busy_category(&self) -> Option<Category> {
        self.in_flight.as_ref().map(|f| f.category)
    }

    pub fn busy_file_name(&self) -> Option<&str> {
        self.in_flight.as_ref().map(|f| f.file_name.as_str())
    }

    pub fn busy_elapsed_secs(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.started.elapsed().as_secs())
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        self.category = None;
        self.in_flight = None;
        self.generation += 1;
    }

    /// Close the interaction. A submission still in flight becomes stale.
    pub fn dismiss(&mut self) {
        if !self.open {
            return;
        }
        if let Some(in_flight) = self.in_flight.take() {
            tracing::info!(
                generation = in_flight.generation,
                "Upload dismissed while busy, late response will be discarded"
            );
        }
        self.open = false;
        self.category = None;
        self.generation += 1;
    }

    /// Record the category. Returns true when the caller should prompt for a file.
    pub fn select_category(&mut self, category: Category) -> bool {
        if !self.open || self.is_busy() {
            return false;
        }
        self.category = Some(category);
        true
    }

    /// Ignored while busy; the in-flight request keeps its language
    pub fn select_language(&mut self, language: Language) {
        if self.is_busy() {
            return;
        }
        self.language = language;
    }

    /// Start a submission. No-op (None) when closed, busy, without a category
    /// or with an empty file.
    pub fn submit(&mut self, file: SelectedFile) -> Option<Submission> {
        if !self.open || self.is_busy() {
            return None;
        }
        let category = self.category?;
        if file.is_empty() {
            tracing::debug!(file = %file.name, "Ignoring empty file");
            return None;
        }

        self.generation += 1;
        let request = AnalysisRequest::new(category, self.language, &file);
        self.in_flight = Some(InFlight {
            generation: self.generation,
            category,
            file_name: file.name.clone(),
            started: Instant::now(),
        });

        tracing::info!(
            generation = self.generation,
            category = %category,
            lang = %self.language,
            file = %request.file_name,
            bytes = request.bytes.len(),
            "Submitting document for analysis"
        );

        Some(Submission {
            generation: self.generation,
            request,
        })
    }

    /// Apply the outcome of the submission stamped `generation`
    pub fn complete(
        &mut self,
        generation: u64,
        result: Result<AnalysisResponse, AnalysisError>,
    ) -> Completion {
        let matches = self
            .in_flight
            .as_ref()
            .is_some_and(|f| f.generation == generation);
        if !matches {
            tracing::debug!(generation, current = self.generation, "Discarding stale completion");
            return Completion::Stale;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return Completion::Stale;
        };
        let elapsed_ms = in_flight.started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                tracing::info!(
                    generation,
                    elapsed_ms,
                    file = %in_flight.file_name,
                    shape = response.kind(),
                    "Analysis delivered"
                );
                self.open = false;
                self.category = None;
                Completion::Delivered { response }
            }
            Err(e) => {
                let kind = e.kind();
                tracing::warn!(
                    generation,
                    elapsed_ms,
                    kind = kind.as_str(),
                    detail = %e.detail(),
                    "Analysis failed"
                );
                self.category = None;
                Completion::Failed {
                    alert: e.alert_message(),
                    kind,
                }
            }
        }
    }
}
