//! Analysis domain: what gets uploaded and what comes back
//!
//! - `AnalysisRequest`: category + language + image bytes, immutable once built
//! - `AnalysisResponse`: tagged union validated once at the boundary
//! - `AnalysisClient`: multipart POST to the external `/analyze` endpoint
//! - `DocumentPreview`: in-memory preview of the uploaded image

mod client;
mod preview;
mod response;

pub use client::{AnalysisClient, AnalysisError, ErrorKind};
pub use preview::{format_size, DocumentPreview, HalfBlock, HalfBlockImage, SelectedFile};
pub use response::{
    AnalysisResponse, AuditFinding, BillAudit, Closing, Finding, GenericAlternative,
    InvalidReason, MedicalReport, QuestionAudience, Questions, SavingsOpportunity,
};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

// ─────────────────────────────────────────────────────────────────────────────
// Category / Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Kind of document the user wants analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    MedicalReport,
    MedicalBill,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[Category::MedicalReport, Category::MedicalBill]
    }

    /// Backend mode derived from the category
    pub fn mode(self) -> Mode {
        match self {
            Category::MedicalReport => Mode::Report,
            Category::MedicalBill => Mode::Bill,
        }
    }

    /// Stable identifier ("medical_report" / "medical_bill")
    pub fn id(self) -> &'static str {
        match self {
            Category::MedicalReport => "medical_report",
            Category::MedicalBill => "medical_bill",
        }
    }

    /// Label shown on the category buttons
    pub fn label(self) -> &'static str {
        match self {
            Category::MedicalReport => "Medical Report",
            Category::MedicalBill => "Hospital Bill",
        }
    }

    pub fn blurb(self) -> &'static str {
        match self {
            Category::MedicalReport => "Extract insights from labs/scans",
            Category::MedicalBill => "Audit for errors & overcharges",
        }
    }

    /// Short noun for the busy message ("processing your Report")
    pub fn noun(self) -> &'static str {
        match self {
            Category::MedicalReport => "Report",
            Category::MedicalBill => "Bill",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts the category id or the backend mode name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "medical_report" | "report" => Ok(Category::MedicalReport),
            "medical_bill" | "bill" => Ok(Category::MedicalBill),
            other => Err(format!(
                "unknown category '{}' (expected report or bill)",
                other
            )),
        }
    }
}

/// Backend `mode` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Report,
    Bill,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Report => "report",
            Mode::Bill => "bill",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Language
// ─────────────────────────────────────────────────────────────────────────────

/// Language the backend writes its explanations in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Language {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
}

impl Language {
    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Hindi,
            Language::Spanish,
            Language::French,
        ]
    }

    /// Value sent as the `lang` query parameter
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Spanish => "Spanish",
            Language::French => "French",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|&l| l == self).unwrap_or(0);
        all[(current + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let current = all.iter().position(|&l| l == self).unwrap_or(0);
        all[(current + all.len() - 1) % all.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::all()
            .iter()
            .copied()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown language '{}' (expected English, Hindi, Spanish or French)",
                    s
                )
            })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────────────────────────────────────

/// One upload, fixed at submit time
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub category: Category,
    pub language: Language,
    pub file_name: String,
    pub mime: String,
    /// Shared with the preview so the bytes are held once
    pub bytes: Arc<[u8]>,
}

impl AnalysisRequest {
    pub fn new(category: Category, language: Language, file: &SelectedFile) -> Self {
        Self {
            category,
            language,
            file_name: file.name.clone(),
            mime: file.mime.clone(),
            bytes: file.bytes.clone(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.category.mode()
    }
}
