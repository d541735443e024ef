//! One conversion run: load, resolve, write

use anyhow::{Context, Result};
use chrono::Local;
use serde_json::Value;
use std::path::Path;

use crate::config::{ConvertSettings, InputMode};
use crate::io::{load_json, save_json};
use crate::overrides::OverrideMap;
use crate::parser::PaimonExport;
use crate::reference::{fetch_all, Fetcher, ReferenceData, ALL_SOURCES};
use crate::uigf::{convert_v3_to_v4, UigfV3, V3Converter, TIME_FORMAT};
use crate::ui::{Phase, Ui};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Records in the v3 document (stage 1 output or the v3 input)
    pub v3_records: usize,
    pub v4_records: usize,
    /// Pulls dropped in stage 1 for a bad time
    pub dropped: usize,
    /// Distinct items with no rank after overrides
    pub unresolved: usize,
}

pub fn run_convert(
    settings: &ConvertSettings,
    fetcher: &impl Fetcher,
    ui: &mut impl Ui,
) -> Result<ConvertSummary> {
    settings.check()?;

    let mut summary = ConvertSummary::default();

    let v3 = match &settings.input {
        InputMode::Paimon(path) => paimon_to_v3(settings, path, fetcher, ui, &mut summary)?,
        InputMode::FromV3(path) => {
            ui.set_phase(Phase::Loading);
            ui.set_info(format!("UIGF v3: {}", path.display()));
            load_json::<UigfV3>(path)?
        }
    };
    summary.v3_records = v3.list.len();

    ui.set_phase(Phase::Writing);
    let v4 = convert_v3_to_v4(&v3, &settings.target_version)?;
    summary.v4_records = v4.hk4e.iter().map(|a| a.list.len()).sum();
    save_json(&settings.output, &v4)
        .with_context(|| format!("Failed to write UIGF {}", settings.target_version))?;
    ui.log(format!(
        "Wrote UIGF {} to {}",
        settings.target_version,
        settings.output.display()
    ));

    ui.set_phase(Phase::Complete);
    Ok(summary)
}

fn paimon_to_v3(
    settings: &ConvertSettings,
    path: &Path,
    fetcher: &impl Fetcher,
    ui: &mut impl Ui,
    summary: &mut ConvertSummary,
) -> Result<UigfV3> {
    ui.set_phase(Phase::Loading);
    ui.set_info(format!("Paimon.moe export: {}", path.display()));
    let raw: Value = load_json(path)?;
    let export = PaimonExport::from_json(&raw);

    let overrides = OverrideMap::load_or_empty(&settings.overrides_path);
    if !overrides.is_empty() {
        ui.log(format!("Loaded {} rank overrides", overrides.len()));
    }

    ui.set_phase(Phase::Fetching);
    let sources = fetch_all(fetcher, ALL_SOURCES, settings.fetch_workers, ui);
    let reference = ReferenceData::from_sources(&sources);

    ui.set_phase(Phase::Converting);
    let now = Local::now();
    let conversion = V3Converter::new(&reference, &overrides, &settings.app).convert(&export, now);
    summary.dropped = conversion.dropped;
    summary.unresolved = conversion.unresolved.len();
    ui.log(format!(
        "{} of {} pulls converted, {} without rank",
        conversion.document.list.len(),
        export.pull_count(),
        conversion.unresolved.len()
    ));

    if let Some(v3_out) = &settings.v3_out {
        save_json(v3_out, &conversion.document).context("Failed to write UIGF v3")?;
        ui.log(format!("Wrote UIGF v3 to {}", v3_out.display()));
    }

    if let Some(missing_out) = &settings.missing_rank_out {
        if !conversion.unresolved.is_empty() {
            let report = conversion
                .unresolved
                .into_report(now.format(TIME_FORMAT).to_string());
            save_json(missing_out, &report).context("Failed to write missing-rank report")?;
            ui.log(format!("Wrote missing-rank report to {}", missing_out.display()));
        }
    }

    Ok(conversion.document)
}
