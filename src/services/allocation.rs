//! Allocation engine and allocation plan service
//!
//! Income is split, by fortnightly share, into three kinds of row: the share
//! already committed to enabled expenses ("Daily Expenses"), the user's manual
//! buckets, and whatever is left over. All shares are fractions of income;
//! bucket percentages are stored in percentage points and divided by 100 here.

use serde::Serialize;
use tracing::{debug, info};

use crate::audit::EntityType;
use crate::error::{CashflowError, CashflowResult};
use crate::models::{AllocationBucket, AllocationPlan, PeriodTotals};
use crate::storage::Storage;

use super::aggregate::{cash_flow_summary, CashFlowSummary};

pub const LEFTOVER_ROW: &str = "Leftover";
pub const DAILY_EXPENSES_ROW: &str = "Daily Expenses";
pub const TOTAL_ROW: &str = "Total allocated";

/// Shares before any rows are built
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationBase {
    pub target_expense_allocation: f64,
    pub total_allocated: f64,
    /// Never negative; over-allocation shows up in `total_allocated` instead
    pub leftover: f64,
}

/// Compute expense share, total allocated and leftover
pub fn allocation_base(
    income: &PeriodTotals,
    expenses: &PeriodTotals,
    buckets: &[AllocationBucket],
) -> AllocationBase {
    let target_expense_allocation = if income.per_fortnight == 0.0 {
        0.0
    } else {
        expenses.per_fortnight / income.per_fortnight
    };
    let manual_total: f64 = buckets.iter().map(AllocationBucket::fraction).sum();
    let total_allocated = target_expense_allocation + manual_total;

    AllocationBase {
        target_expense_allocation,
        total_allocated,
        leftover: (1.0 - total_allocated).max(0.0),
    }
}

/// One line of the allocation table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationRow {
    pub name: String,
    /// Share of income as a fraction
    pub percent: f64,
    #[serde(flatten)]
    pub totals: PeriodTotals,
    /// Fortnightly amount rounded to a whole currency unit
    pub rounded_fortnight: f64,
    /// `rounded_fortnight` as a fraction of fortnightly income
    pub percent_to_100: f64,
}

impl AllocationRow {
    pub fn build(name: impl Into<String>, percent: f64, income: &PeriodTotals) -> Self {
        let totals = income.scale(percent);
        let rounded_fortnight = totals.per_fortnight.round();
        Self {
            name: name.into(),
            percent,
            totals,
            rounded_fortnight,
            percent_to_100: share_of(rounded_fortnight, income.per_fortnight),
        }
    }
}

/// Full allocation table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationSummary {
    pub target_expense_allocation: f64,
    pub total_allocated: f64,
    pub leftover: f64,
    /// Leftover first, then Daily Expenses, then manual buckets in plan order
    pub rows: Vec<AllocationRow>,
    pub total_row: AllocationRow,
    /// Sum of rounded fortnightly amounts of every row except Leftover
    pub total_rounded: f64,
    pub total_rounded_percent: f64,
}

/// Build the allocation table for a bucket list
pub fn summarize(
    income: &PeriodTotals,
    expenses: &PeriodTotals,
    buckets: &[AllocationBucket],
) -> AllocationSummary {
    let base = allocation_base(income, expenses, buckets);

    let mut rows = Vec::with_capacity(buckets.len() + 2);
    rows.push(AllocationRow::build(LEFTOVER_ROW, base.leftover, income));
    rows.push(AllocationRow::build(
        DAILY_EXPENSES_ROW,
        base.target_expense_allocation,
        income,
    ));
    rows.extend(
        buckets
            .iter()
            .map(|b| AllocationRow::build(b.name.clone(), b.fraction(), income)),
    );

    let total_rounded: f64 = rows
        .iter()
        .filter(|row| row.name != LEFTOVER_ROW)
        .map(|row| row.rounded_fortnight)
        .sum();

    AllocationSummary {
        target_expense_allocation: base.target_expense_allocation,
        total_allocated: base.total_allocated,
        leftover: base.leftover,
        total_row: AllocationRow::build(TOTAL_ROW, base.total_allocated, income),
        total_rounded,
        total_rounded_percent: share_of(total_rounded, income.per_fortnight),
        rows,
    }
}

fn share_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        0.0
    } else {
        part / whole
    }
}

/// An in-progress split of the leftover share across chosen buckets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeftoverSplit {
    targets: Vec<String>,
    draft: Option<Vec<AllocationBucket>>,
}

impl LeftoverSplit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn draft(&self) -> Option<&[AllocationBucket]> {
        self.draft.as_deref()
    }

    /// Rebuild the draft for a new set of target bucket names.
    ///
    /// Targets are matched to committed buckets the way `AllocationPlan::find`
    /// matches names; unmatched and repeated targets are dropped. Each matched
    /// bucket gets an equal share of `leftover`, the leftover of the committed
    /// list (not of the previous draft). No matched targets clears the draft.
    pub fn update(&mut self, committed: &[AllocationBucket], leftover: f64, targets: Vec<String>) {
        let mut resolved: Vec<String> = Vec::with_capacity(targets.len());
        for target in &targets {
            let target = target.trim();
            let Some(bucket) = committed.iter().find(|b| b.name.eq_ignore_ascii_case(target)) else {
                continue;
            };
            if !resolved.contains(&bucket.name) {
                resolved.push(bucket.name.clone());
            }
        }

        if resolved.is_empty() {
            self.targets.clear();
            self.draft = None;
            return;
        }

        let extra_share = leftover * 100.0 / resolved.len() as f64;
        let draft = committed
            .iter()
            .map(|bucket| {
                if resolved.contains(&bucket.name) {
                    AllocationBucket::new(bucket.name.clone(), bucket.percent_share + extra_share)
                } else {
                    bucket.clone()
                }
            })
            .collect();

        debug!(targets = resolved.len(), extra_share, "updated leftover split");
        self.targets = resolved;
        self.draft = Some(draft);
    }

    /// The bucket list to display: the draft while one is active
    pub fn active<'a>(&'a self, committed: &'a [AllocationBucket]) -> &'a [AllocationBucket] {
        match &self.draft {
            Some(draft) if !self.targets.is_empty() => draft,
            _ => committed,
        }
    }

    /// Commit the draft into `plan`; returns whether anything changed
    pub fn apply(&mut self, plan: &mut AllocationPlan) -> CashflowResult<bool> {
        let draft = self.draft.take().unwrap_or_default();
        self.targets.clear();
        if draft.is_empty() {
            return Ok(false);
        }
        plan.replace(draft)
            .map_err(|e| CashflowError::Validation(e.to_string()))?;
        Ok(true)
    }

    /// Discard the draft without touching the committed list
    pub fn cancel(&mut self) {
        self.targets.clear();
        self.draft = None;
    }
}

/// Allocation table together with the cash flow it was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationReport {
    pub cash_flow: CashFlowSummary,
    pub summary: AllocationSummary,
}

/// Service for the persisted allocation plan
pub struct AllocationService<'a> {
    storage: &'a Storage,
}

impl<'a> AllocationService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn plan(&self) -> CashflowResult<AllocationPlan> {
        self.storage.allocations.get()
    }

    /// Cash flow from the current snapshot and its allocation table
    pub fn report(&self) -> CashflowResult<AllocationReport> {
        let plan = self.plan()?;
        Ok(self.report_for(&plan.buckets))
    }

    fn report_for(&self, buckets: &[AllocationBucket]) -> AllocationReport {
        let cash_flow = cash_flow_summary(self.storage.income_streams(), self.storage.expenses());
        AllocationReport {
            summary: summarize(&cash_flow.income, &cash_flow.expenses, buckets),
            cash_flow,
        }
    }

    /// Add a bucket or change an existing bucket's share
    pub fn set_bucket(&self, name: &str, percent_share: f64) -> CashflowResult<AllocationBucket> {
        let before = self.plan()?;
        let mut plan = before.clone();
        let previous = plan
            .set(name, percent_share)
            .map_err(|e| CashflowError::Validation(e.to_string()))?;

        self.commit(&before, &plan)?;

        let bucket = plan
            .find(name)
            .cloned()
            .ok_or_else(|| CashflowError::bucket_not_found(name))?;
        match previous {
            Some(old) => info!(bucket = %bucket.name, old, new = percent_share, "updated bucket"),
            None => info!(bucket = %bucket.name, percent = percent_share, "added bucket"),
        }
        Ok(bucket)
    }

    pub fn remove_bucket(&self, name: &str) -> CashflowResult<AllocationBucket> {
        let before = self.plan()?;
        let mut plan = before.clone();
        let removed = plan
            .remove(name)
            .ok_or_else(|| CashflowError::bucket_not_found(name))?;

        self.commit(&before, &plan)?;
        info!(bucket = %removed.name, "removed bucket");
        Ok(removed)
    }

    pub fn rename_bucket(&self, name: &str, new_name: &str) -> CashflowResult<AllocationBucket> {
        let before = self.plan()?;
        let mut plan = before.clone();
        let renamed = plan
            .rename(name, new_name)
            .map_err(|e| CashflowError::Validation(e.to_string()))?
            .ok_or_else(|| CashflowError::bucket_not_found(name))?;

        self.commit(&before, &plan)?;
        info!(from = name, to = %renamed.name, "renamed bucket");
        Ok(renamed)
    }

    /// Preview splitting the leftover across `targets`, optionally applying it.
    ///
    /// Returns the report for the list that is now active: the draft when
    /// previewing, the committed list after applying.
    pub fn split_leftover(&self, targets: Vec<String>, apply: bool) -> CashflowResult<AllocationReport> {
        let before = self.plan()?;
        for target in &targets {
            if before.find(target).is_none() {
                return Err(CashflowError::bucket_not_found(target.as_str()));
            }
        }

        let base = self.report_for(&before.buckets).summary;
        let mut split = LeftoverSplit::new();
        split.update(&before.buckets, base.leftover, targets);

        if !apply {
            return Ok(self.report_for(split.active(&before.buckets)));
        }

        let mut plan = before.clone();
        if split.apply(&mut plan)? {
            self.commit(&before, &plan)?;
            info!(buckets = plan.buckets.len(), "applied leftover split");
        }
        Ok(self.report_for(&plan.buckets))
    }

    fn commit(&self, before: &AllocationPlan, after: &AllocationPlan) -> CashflowResult<()> {
        self.storage.allocations.set(after.clone())?;
        self.storage.allocations.save()?;
        self.storage.log_update(
            EntityType::AllocationPlan,
            "allocations",
            None,
            before,
            after,
            Some(describe_change(before, after)),
        )
    }
}

fn describe_change(before: &AllocationPlan, after: &AllocationPlan) -> String {
    format!(
        "buckets: {} -> {}, manual share: {:.2}% -> {:.2}%",
        before.buckets.len(),
        after.buckets.len(),
        before.manual_percent(),
        after.manual_percent()
    )
}
