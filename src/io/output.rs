use std::io::Write;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::builders::regions;
use crate::core::{ConfiguredId, IdScheme, IsoCoefficients, IsolationFlavor};
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminal" => Some(Self::Terminal),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// One row of `phoid list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdSummary {
    pub id_name: String,
    pub fragment: String,
    pub scheme: IdScheme,
    pub hash: String,
    pub pog_approved: bool,
}

/// Everything `phoid show` reports for one ID.
#[derive(Debug, Clone, Serialize)]
pub struct IdDetail<'a> {
    pub fragment: &'a str,
    pub hash: String,
    pub id: &'a ConfiguredId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStatus {
    Matches,
    Differs,
    Undeclared,
}

/// Computed hash of one ID next to the hash its fragment declares.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashEntry {
    pub id_name: String,
    pub computed: String,
    pub declared: Option<String>,
    pub status: HashStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HashReport {
    pub fragment: String,
    pub entries: Vec<HashEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FragmentSummary {
    pub name: String,
    pub ids: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEntry {
    pub category: String,
    pub message: String,
}

/// Outcome of `phoid verify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyReport {
    pub fragments: Vec<FragmentSummary>,
    pub registered: usize,
    pub errors: Vec<ErrorEntry>,
}

impl VerifyReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub trait OutputWriter {
    fn write_id_list(&mut self, ids: &[IdSummary]) -> anyhow::Result<()>;
    fn write_id_detail(&mut self, detail: &IdDetail<'_>) -> anyhow::Result<()>;
    fn write_hash_report(&mut self, report: &HashReport) -> anyhow::Result<()>;
    fn write_verify_report(&mut self, report: &VerifyReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn emit<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_id_list(&mut self, ids: &[IdSummary]) -> anyhow::Result<()> {
        self.emit(ids)
    }

    fn write_id_detail(&mut self, detail: &IdDetail<'_>) -> anyhow::Result<()> {
        self.emit(detail)
    }

    fn write_hash_report(&mut self, report: &HashReport) -> anyhow::Result<()> {
        self.emit(report)
    }

    fn write_verify_report(&mut self, report: &VerifyReport) -> anyhow::Result<()> {
        self.emit(report)
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
        }
    }

    fn ok_marker(&self) -> String {
        self.formatter.success(&self.formatter.symbol("✓", "OK"))
    }

    fn fail_marker(&self) -> String {
        self.formatter.error(&self.formatter.symbol("✗", "FAIL"))
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_id_list(&mut self, ids: &[IdSummary]) -> anyhow::Result<()> {
        if ids.is_empty() {
            writeln!(self.writer, "No IDs registered.")?;
            return Ok(());
        }

        let width = ids.iter().map(|s| s.id_name.len()).max().unwrap_or(0);
        let mut current_fragment = None;
        for summary in ids {
            if current_fragment != Some(summary.fragment.as_str()) {
                if current_fragment.is_some() {
                    writeln!(self.writer)?;
                }
                let title = format!("{} ({})", summary.fragment, summary.scheme);
                writeln!(self.writer, "{}", self.formatter.header(&title))?;
                current_fragment = Some(summary.fragment.as_str());
            }
            let approved = if summary.pog_approved {
                self.formatter.success("approved")
            } else {
                self.formatter.dim("unapproved")
            };
            writeln!(
                self.writer,
                "  {:<width$}  {}  {}",
                summary.id_name,
                self.formatter.dim(&summary.hash),
                approved,
            )?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "{} IDs", ids.len())?;
        Ok(())
    }

    fn write_id_detail(&mut self, detail: &IdDetail<'_>) -> anyhow::Result<()> {
        let id = detail.id;
        writeln!(self.writer, "{}", self.formatter.header(id.id_name()))?;
        writeln!(self.writer, "  fragment: {}", detail.fragment)?;
        writeln!(self.writer, "  scheme:   {}", id.scheme())?;
        writeln!(self.writer, "  hash:     {}", detail.hash)?;
        writeln!(
            self.writer,
            "  approved: {}",
            if id.is_pog_approved() { "yes" } else { "no" }
        )?;
        writeln!(self.writer)?;

        let [(barrel_region, barrel), (endcap_region, endcap)] = regions(id);
        writeln!(
            self.writer,
            "  {:<28} {:<34} {}",
            self.formatter.bold("working point"),
            self.formatter.bold(barrel_region.as_str()),
            self.formatter.bold(endcap_region.as_str()),
        )?;
        let shape_rows = [
            (
                barrel.shower_shape().primary_name(),
                barrel.shower_shape().primary(),
                endcap.shower_shape().primary(),
            ),
            (
                "full5x5_sigma_ieta_ieta",
                barrel.shower_shape().full5x5_sigma_ieta_ieta(),
                endcap.shower_shape().full5x5_sigma_ieta_ieta(),
            ),
        ];
        for (name, eb, ee) in shape_rows {
            writeln!(self.writer, "  {:<28} {:<34} {}", name, eb, ee)?;
        }
        for flavor in IsolationFlavor::ALL {
            writeln!(
                self.writer,
                "  {:<28} {:<34} {}",
                flavor.label(id.scheme()),
                format_coefficients(&barrel.isolation().get(flavor)),
                format_coefficients(&endcap.isolation().get(flavor)),
            )?;
        }
        writeln!(self.writer)?;

        writeln!(self.writer, "  {}", self.formatter.bold("cut flow"))?;
        for (i, cut) in id.cut_flow().iter().enumerate() {
            writeln!(self.writer, "  {}. {}", i, self.formatter.info(cut.name()))?;
            for (param, value) in cut.parameters() {
                writeln!(self.writer, "       {} = {}", param, value)?;
            }
        }
        Ok(())
    }

    fn write_hash_report(&mut self, report: &HashReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header(&report.fragment))?;
        for entry in &report.entries {
            let status = match entry.status {
                HashStatus::Matches => self.ok_marker(),
                HashStatus::Differs => self.formatter.error(&format!(
                    "declared {}",
                    entry.declared.as_deref().unwrap_or_default()
                )),
                HashStatus::Undeclared => self.formatter.warning("not declared"),
            };
            writeln!(
                self.writer,
                "  {}  {}  {}",
                entry.computed, entry.id_name, status
            )?;
        }
        Ok(())
    }

    fn write_verify_report(&mut self, report: &VerifyReport) -> anyhow::Result<()> {
        let ok = self.ok_marker();
        for fragment in &report.fragments {
            writeln!(
                self.writer,
                "{} {} ({} IDs)",
                ok,
                fragment.name,
                fragment.ids
            )?;
        }

        if report.is_ok() {
            writeln!(
                self.writer,
                "{}",
                self.formatter.success(&format!(
                    "{} IDs verified against their declared hashes",
                    report.registered
                ))
            )?;
            return Ok(());
        }

        let fail = self.fail_marker();
        for error in &report.errors {
            writeln!(
                self.writer,
                "{} [{}] {}",
                fail,
                error.category,
                error.message
            )?;
        }
        writeln!(
            self.writer,
            "{}",
            self.formatter
                .error(&format!("verification failed with {} errors", report.errors.len()))
        )?;
        Ok(())
    }
}

/// `C1 + C2*pt`, with the `C3*pt^2` term when present.
pub fn format_coefficients(c: &IsoCoefficients) -> String {
    match c.c3 {
        Some(c3) => format!("{} + {}*pt + {}*pt^2", c.c1, c.c2, c3),
        None => format!("{} + {}*pt", c.c1, c.c2),
    }
}

pub fn create_writer(format: OutputFormat, formatting: FormattingConfig) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(std::io::stdout())),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(std::io::stdout(), formatting)),
    }
}
