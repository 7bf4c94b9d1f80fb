//! Sweep results and their output layouts.

use crate::{MainParameter, PopulationSummary, SimulatorConfig, SimulatorError};
use plaguesim_simulation::HazardMode;
use plaguesim_types::TopologyKind;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output layout for a sweep report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportLayout {
    /// Header `<parameter> <value>`, then `<population> <fraction>` per line.
    #[default]
    Fraction,
    /// Header as above, then `<population> <lower fraction> <upper fraction>`.
    Bounds,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Results of a population sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub main_parameter: MainParameter,
    pub main_parameter_value: f64,
    pub topology: TopologyKind,
    pub hazard_mode: HazardMode,
    pub seed: u64,
    pub summaries: Vec<PopulationSummary>,
}

impl SweepReport {
    pub fn new(config: &SimulatorConfig, summaries: Vec<PopulationSummary>) -> Self {
        Self {
            main_parameter: config.main_parameter,
            main_parameter_value: config.main_parameter.value(&config.contagion),
            topology: config.topology,
            hazard_mode: config.contagion.hazard_mode,
            seed: config.seed,
            summaries,
        }
    }

    /// Header line naming the studied parameter, e.g. `Gamma 1.1`.
    pub fn header(&self) -> String {
        format!("{} {}", self.main_parameter, self.main_parameter_value)
    }

    /// One data line for a summary in the given text layout.
    pub fn line(summary: &PopulationSummary, layout: ReportLayout) -> String {
        match layout {
            ReportLayout::Bounds => format!(
                "{} {:.5} {:.5}",
                summary.population,
                summary.lower_fraction(),
                summary.upper_fraction()
            ),
            ReportLayout::Fraction | ReportLayout::Json => {
                format!("{} {:.5}", summary.population, summary.fraction())
            }
        }
    }

    /// Write the report in `layout`.
    pub fn write_to<W: Write>(
        &self,
        mut out: W,
        layout: ReportLayout,
    ) -> Result<(), SimulatorError> {
        if layout == ReportLayout::Json {
            serde_json::to_writer_pretty(&mut out, self)?;
            writeln!(out)?;
            return Ok(());
        }
        writeln!(out, "{}", self.header())?;
        for summary in &self.summaries {
            writeln!(out, "{}", Self::line(summary, layout))?;
        }
        Ok(())
    }

    /// Render the report in `layout` as a string.
    pub fn render(&self, layout: ReportLayout) -> Result<String, SimulatorError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, layout)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plaguesim_simulation::ContagionParams;

    fn report() -> SweepReport {
        let config = SimulatorConfig::new(ContagionParams::new(1.1, 10.0, 1.0));
        let summaries = vec![
            PopulationSummary {
                population: 5,
                trials: 30,
                mean: 2.0,
                variance: 1.0,
                half_width: 0.5,
            },
            PopulationSummary {
                population: 10,
                trials: 42,
                mean: 3.0,
                variance: 2.0,
                half_width: 1.0,
            },
        ];
        SweepReport::new(&config, summaries)
    }

    #[test]
    fn test_fraction_layout() {
        let text = report().render(ReportLayout::Fraction).unwrap();
        assert_eq!(text, "Gamma 1.1\n5 0.40000\n10 0.30000\n");
    }

    #[test]
    fn test_bounds_layout() {
        let text = report().render(ReportLayout::Bounds).unwrap();
        assert_eq!(text, "Gamma 1.1\n5 0.30000 0.50000\n10 0.20000 0.40000\n");
    }

    #[test]
    fn test_json_layout_round_trips() {
        let original = report();
        let json = original.render(ReportLayout::Json).unwrap();
        let parsed: SweepReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }
}
