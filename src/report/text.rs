use std::fmt::Write;

use super::{ReportError, ReportRenderer};
use crate::profile::PkProfile;

/// Plain-text report: title, threshold legend, and one line per annotation
///
/// ```text
/// Patient ID=105 PK profile from 2016-03-15 to 2016-03-22; Half-Life= 10 Volume of Distribution= 32dL
/// 0.62 %Above, 0.38 %Below, Threshold: 50
/// Peak: 93.75 IU/dL
/// Bleeds:
///   2016-03-17 19:10 Leftknee,Spontaneous,Major(very bad) (onset 18:12)
/// Treatments:
///   2016-03-15 08:05 Routine Prophylaxis, 1000 IUs
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl TextRenderer {
    pub fn new() -> Self {
        TextRenderer
    }

    /// The chart title line
    pub fn title(profile: &PkProfile) -> String {
        let summary = profile.summary();
        format!(
            "Patient ID={} PK profile from {} to {}; Half-Life= {} Volume of Distribution= {}dL",
            summary.patient_id,
            summary.from,
            summary.to,
            summary.half_life_hours,
            summary.volume_of_distribution
        )
    }

    /// The legend line with the threshold fractions
    pub fn legend(profile: &PkProfile) -> String {
        let stats = profile.stats();
        format!(
            "{:.2} %Above, {:.2} %Below, Threshold: {}",
            stats.fraction_above, stats.fraction_below, stats.threshold
        )
    }
}

impl ReportRenderer for TextRenderer {
    type Output = String;

    fn render(&self, profile: &PkProfile) -> Result<String, ReportError> {
        let mut out = String::new();
        writeln!(out, "{}", Self::title(profile))?;
        writeln!(out, "{}", Self::legend(profile))?;
        writeln!(
            out,
            "Peak: {:.2} IU/dL",
            profile.levels().max().unwrap_or(0.0)
        )?;

        if !profile.bleeds().is_empty() {
            writeln!(out, "Bleeds:")?;
            for (tick, bleed) in profile.bleeds() {
                writeln!(
                    out,
                    "  {} {},{},{} (onset {})",
                    tick.format("%Y-%m-%d %H:%M"),
                    bleed.location().replace(' ', ""),
                    bleed.cause(),
                    bleed.severity(),
                    bleed.onset().format("%H:%M")
                )?;
            }
        }

        if !profile.reasons().is_empty() {
            writeln!(out, "Treatments:")?;
            for (tick, reason) in profile.reasons() {
                let units = profile.doses().get(*tick).unwrap_or(0.0);
                writeln!(
                    out,
                    "  {} {}, {} IUs",
                    tick.format("%Y-%m-%d %H:%M"),
                    reason,
                    units
                )?;
            }
        }
        Ok(out)
    }
}
