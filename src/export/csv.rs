//! CSV export
//!
//! One record per row of the on-screen table, amounts with two decimals and
//! shares as fractions.

use std::io::Write;

use crate::error::CashflowResult;
use crate::models::{Bucket, PeriodTotals};
use crate::services::{AllocationReport, AllocationRow, ScenarioComparison, WhatIfRow};

const BUCKET_HEADERS: [&str; 5] = ["PerDay", "PerWeek", "PerFortnight", "PerMonth", "PerYear"];

fn amounts(totals: &PeriodTotals) -> impl Iterator<Item = String> + '_ {
    Bucket::ALL.into_iter().map(|b| format!("{:.2}", totals.get(b)))
}

fn allocation_record(row: &AllocationRow) -> Vec<String> {
    let mut record = vec![row.name.clone(), format!("{:.6}", row.percent)];
    record.extend(amounts(&row.totals));
    record.push(format!("{:.0}", row.rounded_fortnight));
    record.push(format!("{:.6}", row.percent_to_100));
    record
}

/// Allocation rows followed by the total row
pub fn export_allocation_csv<W: Write>(report: &AllocationReport, writer: W) -> CashflowResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["Name", "Percent"];
    header.extend(BUCKET_HEADERS);
    header.extend(["RoundedFortnight", "PercentTo100"]);
    csv.write_record(&header)?;

    for row in &report.summary.rows {
        csv.write_record(allocation_record(row))?;
    }

    let mut total = allocation_record(&report.summary.total_row);
    total[7] = format!("{:.0}", report.summary.total_rounded);
    total[8] = format!("{:.6}", report.summary.total_rounded_percent);
    csv.write_record(total)?;

    csv.flush()?;
    Ok(())
}

/// Per-stream deltas, then the current, change and scenario totals
pub fn export_scenario_csv<W: Write>(
    comparison: &ScenarioComparison,
    rows: &[WhatIfRow],
    writer: W,
) -> CashflowResult<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["Row", "StreamId", "Included", "Frequency", "Current", "Proposed"];
    header.extend(BUCKET_HEADERS);
    csv.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.label.clone(),
            row.stream_id.to_string(),
            row.included.to_string(),
            row.frequency.clone(),
            format!("{:.2}", row.current_value),
            row.proposed.map(|p| format!("{:.2}", p)).unwrap_or_default(),
        ];
        record.extend(amounts(&row.delta.unwrap_or_default()));
        csv.write_record(record)?;
    }

    for (label, totals) in [
        ("Selected", &comparison.selected_totals),
        ("Delta", &comparison.delta_totals),
        ("Scenario", &comparison.scenario_totals),
    ] {
        let mut record: Vec<String> = vec![label.to_string()];
        record.extend(std::iter::repeat(String::new()).take(5));
        record.extend(amounts(totals));
        csv.write_record(record)?;
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AllocationBucket, IncomeStreamId};
    use crate::services::{summarize, CashFlowSummary};

    fn totals(per_fortnight: f64) -> PeriodTotals {
        PeriodTotals {
            per_fortnight,
            per_year: per_fortnight * 26.0,
            ..PeriodTotals::zero()
        }
    }

    #[test]
    fn test_allocation_csv() {
        let income = totals(2000.0);
        let expenses = totals(800.0);
        let report = AllocationReport {
            cash_flow: CashFlowSummary::default(),
            summary: summarize(&income, &expenses, &[AllocationBucket::new("Smile, Inc", 20.0)]),
        };

        let mut buffer = Vec::new();
        export_allocation_csv(&report, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Name,Percent,PerDay,PerWeek,PerFortnight,PerMonth,PerYear,RoundedFortnight,PercentTo100"
        );
        assert!(lines[1].starts_with("Leftover,0.400000"));
        assert!(lines[3].starts_with("\"Smile, Inc\",0.200000"));
        assert!(lines[4].starts_with("Total allocated,0.600000"));
        assert!(lines[4].contains(",1200,0.600000"));
    }

    #[test]
    fn test_scenario_csv() {
        let comparison = ScenarioComparison {
            selected_totals: totals(1000.0),
            delta_totals: totals(100.0),
            scenario_totals: totals(1100.0),
        };
        let rows = vec![WhatIfRow {
            stream_id: IncomeStreamId::new(2),
            label: "Salary".into(),
            included: true,
            frequency: "Fortnightly".into(),
            current_value: 1000.0,
            proposed: Some(1100.0),
            delta: Some(totals(100.0)),
        }];

        let mut buffer = Vec::new();
        export_scenario_csv(&comparison, &rows, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[1],
            "Salary,inc-2,true,Fortnightly,1000.00,1100.00,0.00,0.00,100.00,0.00,2600.00"
        );
        assert_eq!(lines[4], "Scenario,,,,,,0.00,0.00,1100.00,0.00,28600.00");
    }
}
