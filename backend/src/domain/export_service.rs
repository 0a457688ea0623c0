//! Export service domain logic for the waitlist.
//!
//! Renders the stored leads as one CSV document with a section per kind, in
//! the fixed order player, supply, facility. Each section has a title line, a
//! header row and one row per lead in insertion order. Kinds without leads
//! produce no section, and an empty store produces no export at all.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Component, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::commands::export::{CsvExport, ExportToPathCommand, ExportToPathResult};
use crate::domain::models::lead::DomainLead;
use crate::storage::SubmissionStorage;
use shared::LeadKind;

pub const EXPORT_FILE_PREFIX: &str = "middlo_submissions";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// How field values are quoted in exported rows.
///
/// `Verbatim` wraps every value in double quotes and leaves embedded quotes
/// and commas untouched, which is the historical export format. `Escaped`
/// also quotes every value but doubles embedded quotes per RFC 4180.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvQuoting {
    #[default]
    Verbatim,
    Escaped,
}

const PLAYER_HEADERS: &[&str] = &[
    "Type",
    "Name",
    "City",
    "Playing Level",
    "Current Booking Method",
    "Biggest Problem",
    "Willingness to Pay",
    "WhatsApp",
    "Submitted At",
];

const SUPPLY_HEADERS: &[&str] = &[
    "Type",
    "Name",
    "Role",
    "Experience",
    "City",
    "Hourly Rate",
    "Availability",
    "WhatsApp",
    "Submitted At",
];

const FACILITY_HEADERS: &[&str] = &[
    "Type",
    "Academy Name",
    "Location",
    "Number of Nets",
    "Free Hours",
    "Price per Hour",
    "Contact Name",
    "Contact Phone",
    "Submitted At",
];

pub fn section_title(kind: LeadKind) -> &'static str {
    match kind {
        LeadKind::Player => "PLAYER SUBMISSIONS",
        LeadKind::Supply => "SUPPLY SUBMISSIONS",
        LeadKind::Facility => "FACILITY SUBMISSIONS",
    }
}

pub fn section_headers(kind: LeadKind) -> &'static [&'static str] {
    match kind {
        LeadKind::Player => PLAYER_HEADERS,
        LeadKind::Supply => SUPPLY_HEADERS,
        LeadKind::Facility => FACILITY_HEADERS,
    }
}

/// Row values in header order, starting with the kind tag
fn row_values(lead: &DomainLead) -> Vec<String> {
    let kind = lead.kind().as_str().to_string();
    let submitted_at = lead.submitted_at().to_rfc3339_opts(SecondsFormat::Millis, true);

    match lead {
        DomainLead::Player(l) => vec![
            kind,
            l.name.clone(),
            l.city.clone(),
            l.playing_level.clone(),
            l.current_booking_method.clone(),
            l.biggest_problem.clone(),
            l.willingness_to_pay.clone(),
            l.whatsapp.clone(),
            submitted_at,
        ],
        DomainLead::Supply(l) => vec![
            kind,
            l.name.clone(),
            l.role.clone(),
            l.experience.clone(),
            l.city.clone(),
            l.hourly_rate.clone(),
            l.availability.clone(),
            l.whatsapp.clone(),
            submitted_at,
        ],
        DomainLead::Facility(l) => vec![
            kind,
            l.academy_name.clone(),
            l.location.clone(),
            l.number_of_nets.clone(),
            l.free_hours.clone(),
            l.price_per_hour.clone(),
            l.contact_name.clone(),
            l.contact_phone.clone(),
            submitted_at,
        ],
    }
}

/// Export file name for a given day, e.g. `middlo_submissions_2025-06-01.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("{}_{}.csv", EXPORT_FILE_PREFIX, date.format("%Y-%m-%d"))
}

/// Export service that handles all export-related business logic
#[derive(Clone)]
pub struct ExportService {
    storage: Arc<dyn SubmissionStorage>,
    quoting: CsvQuoting,
    default_directory: Option<PathBuf>,
}

impl ExportService {
    pub fn new(storage: Arc<dyn SubmissionStorage>, quoting: CsvQuoting) -> Self {
        Self {
            storage,
            quoting,
            default_directory: None,
        }
    }

    /// Directory used by `export_to_path` when the request names none
    pub fn with_default_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.default_directory = directory;
        self
    }

    pub fn quoting(&self) -> CsvQuoting {
        self.quoting
    }

    /// Render leads as sectioned CSV. Returns an empty string for no leads.
    pub fn render_csv(&self, leads: &[DomainLead]) -> Result<String> {
        let mut sections = Vec::new();

        for kind in LeadKind::ALL {
            let rows: Vec<Vec<String>> = leads
                .iter()
                .filter(|lead| lead.kind() == kind)
                .map(row_values)
                .collect();
            if rows.is_empty() {
                continue;
            }

            let mut section = String::new();
            section.push_str(section_title(kind));
            section.push('\n');
            section.push_str(&section_headers(kind).join(","));
            section.push('\n');
            for row in &rows {
                section.push_str(&self.render_row(row)?);
            }
            sections.push(section);
        }

        Ok(sections.join("\n"))
    }

    fn render_row(&self, values: &[String]) -> Result<String> {
        match self.quoting {
            CsvQuoting::Verbatim => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v)).collect();
                Ok(format!("{}\n", quoted.join(",")))
            }
            CsvQuoting::Escaped => {
                let mut writer = csv::WriterBuilder::new()
                    .quote_style(csv::QuoteStyle::Always)
                    .terminator(csv::Terminator::Any(b'\n'))
                    .from_writer(Vec::new());
                writer.write_record(values)?;
                let bytes = writer
                    .into_inner()
                    .map_err(|e| anyhow!("Failed to flush CSV row: {}", e.error()))?;
                String::from_utf8(bytes).context("CSV row is not valid UTF-8")
            }
        }
    }

    /// Export every stored lead. `None` means there is nothing to export.
    pub async fn export_csv(&self) -> Result<Option<CsvExport>> {
        let leads = self.storage.read_all().await?;
        if leads.is_empty() {
            info!("📄 EXPORT: No submissions to export");
            return Ok(None);
        }

        let content = self.render_csv(&leads)?;
        let export = CsvExport {
            content,
            filename: export_filename(Utc::now().date_naive()),
            lead_count: leads.len(),
        };

        info!(
            "✅ EXPORT: Rendered {} leads ({} bytes) as {}",
            export.lead_count,
            export.content.len(),
            export.filename
        );
        Ok(Some(export))
    }

    /// Write the export into the export root or a directory below it.
    pub async fn export_to_path(&self, command: ExportToPathCommand) -> Result<ExportToPathResult> {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", command.custom_path);

        let export = match self.export_csv().await? {
            Some(export) => export,
            None => return Ok(ExportToPathResult::NothingToExport),
        };

        let export_dir = match self.resolve_export_directory(command.custom_path.as_deref())? {
            Some(dir) => dir,
            None => {
                warn!(
                    "🚫 EXPORT: Refusing path outside the export directory: {:?}",
                    command.custom_path
                );
                return Ok(ExportToPathResult::PathNotAllowed {
                    requested: command.custom_path.unwrap_or_default(),
                });
            }
        };
        tokio::fs::create_dir_all(&export_dir)
            .await
            .with_context(|| {
                format!("Failed to create export directory {}", export_dir.display())
            })?;

        let file_path = export_dir.join(&export.filename);
        if let Err(e) = tokio::fs::write(&file_path, &export.content).await {
            error!("❌ EXPORT: Failed to write export file to {:?}: {}", file_path, e);
            return Err(e)
                .with_context(|| format!("Failed to write export file {}", file_path.display()));
        }

        info!("✅ EXPORT: Wrote {} leads to {}", export.lead_count, file_path.display());
        Ok(ExportToPathResult::Written {
            file_path,
            lead_count: export.lead_count,
        })
    }

    /// Directory every export must land in: the configured one, or the
    /// user's Documents (falling back to home)
    fn export_root(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.default_directory {
            return Ok(dir.clone());
        }
        match dirs::document_dir().or_else(dirs::home_dir) {
            Some(dir) => Ok(dir),
            None => bail!("Could not determine a default export directory"),
        }
    }

    /// Target directory for an export. A requested path is taken relative to
    /// the export root; `None` means it points outside of it.
    fn resolve_export_directory(&self, custom_path: Option<&str>) -> Result<Option<PathBuf>> {
        let root = self.export_root()?;
        let requested = match custom_path.filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(sanitize_path(path)),
            None => return Ok(Some(root)),
        };

        if requested.components().any(|c| matches!(c, Component::ParentDir)) {
            return Ok(None);
        }
        if requested.is_absolute() {
            return Ok(requested.starts_with(&root).then_some(requested));
        }
        Ok(Some(root.join(requested)))
    }
}

/// Basic path sanitization to handle common user input issues
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim().to_string();

    // Remove surrounding quotes (single or double)
    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
    }

    cleaned = cleaned.replace("\\ ", " ");

    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }

    if cleaned == "~" || cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
        if let Some(home) = dirs::home_dir() {
            cleaned = if cleaned == "~" {
                home.to_string_lossy().to_string()
            } else {
                home.join(&cleaned[2..]).to_string_lossy().to_string()
            };
        }
    }

    cleaned
}
