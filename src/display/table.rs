//! Bucket table rendering
//!
//! A bucket table has a label column, optional leading text columns and the
//! five bucket columns, with an optional separated footer row.

use crate::models::{format_currency, Bucket, PeriodTotals};

const AMOUNT_WIDTH: usize = 14;

/// Fraction shown as a percentage with two decimals, e.g. `0.4` → `40.00%`
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

struct Row {
    label: String,
    extra: Vec<String>,
    totals: PeriodTotals,
}

/// Builder for a table of labelled bucket rows
pub struct BucketTable {
    label_header: String,
    extra_headers: Vec<String>,
    symbol: String,
    rows: Vec<Row>,
    footer: Option<Row>,
}

impl BucketTable {
    pub fn new(label_header: impl Into<String>, symbol: impl Into<String>) -> Self {
        Self {
            label_header: label_header.into(),
            extra_headers: Vec::new(),
            symbol: symbol.into(),
            rows: Vec::new(),
            footer: None,
        }
    }

    /// Add a text column shown between the label and the buckets
    pub fn with_column(mut self, header: impl Into<String>) -> Self {
        self.extra_headers.push(header.into());
        self
    }

    pub fn row(&mut self, label: impl Into<String>, extra: Vec<String>, totals: PeriodTotals) {
        self.rows.push(Row {
            label: label.into(),
            extra,
            totals,
        });
    }

    pub fn footer(&mut self, label: impl Into<String>, extra: Vec<String>, totals: PeriodTotals) {
        self.footer = Some(Row {
            label: label.into(),
            extra,
            totals,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let label_width = self
            .rows
            .iter()
            .chain(self.footer.iter())
            .map(|r| r.label.chars().count())
            .chain(std::iter::once(self.label_header.chars().count()))
            .max()
            .unwrap_or(0);

        let extra_widths: Vec<usize> = self
            .extra_headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .chain(self.footer.iter())
                    .filter_map(|r| r.extra.get(i))
                    .map(|s| s.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut output = String::new();

        let mut header = format!("{:<label_width$}", self.label_header);
        for (h, width) in self.extra_headers.iter().zip(&extra_widths) {
            header.push_str(&format!("  {:<width$}", h, width = *width));
        }
        for bucket in Bucket::ALL {
            header.push_str(&format!("  {:>width$}", bucket.label(), width = AMOUNT_WIDTH));
        }
        output.push_str(header.trim_end());
        output.push('\n');

        let rule = self.rule(label_width, &extra_widths);
        output.push_str(&rule);

        for row in &self.rows {
            output.push_str(&self.render_row(row, label_width, &extra_widths));
        }

        if let Some(footer) = &self.footer {
            output.push_str(&rule);
            output.push_str(&self.render_row(footer, label_width, &extra_widths));
        }

        output
    }

    fn rule(&self, label_width: usize, extra_widths: &[usize]) -> String {
        let mut line = "-".repeat(label_width);
        for width in extra_widths {
            line.push_str("  ");
            line.push_str(&"-".repeat(*width));
        }
        for _ in Bucket::ALL {
            line.push_str("  ");
            line.push_str(&"-".repeat(AMOUNT_WIDTH));
        }
        line.push('\n');
        line
    }

    fn render_row(&self, row: &Row, label_width: usize, extra_widths: &[usize]) -> String {
        let mut line = format!("{:<label_width$}", row.label);
        for (i, width) in extra_widths.iter().enumerate() {
            let cell = row.extra.get(i).map(String::as_str).unwrap_or("");
            line.push_str(&format!("  {:<width$}", cell, width = *width));
        }
        for bucket in Bucket::ALL {
            let amount = format_currency(row.totals.get(bucket), &self.symbol);
            line.push_str(&format!("  {:>width$}", amount, width = AMOUNT_WIDTH));
        }
        line.push('\n');
        line
    }
}
