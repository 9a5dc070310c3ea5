//! Predefined reports
//!
//! Each report is a fixed script id plus a typed parameter list. The
//! fetcher methods here are thin wrappers over [`ReportFetcher::fetch`].

use super::parameters::ScriptParameter;
use crate::auth::SessionProvider;
use crate::error::{Error, Result};
use crate::report::{FetchOptions, ReportFetcher, ReportTable};
use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

/// Inclusive span of calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Fails when `end` is before `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(Error::invalid_value(
                "end_date",
                format!("{end} is before start date {start}"),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    fn parameters(&self) -> Vec<ScriptParameter> {
        vec![
            ScriptParameter::start_date(self.start),
            ScriptParameter::end_date(self.end),
        ]
    }
}

/// The dashboard scripts this crate knows how to call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    /// Script 8: stock items with their levels at one location
    StockItemsWithLevels { location: String },
    /// Script 9: orders processed in a date range
    OrdersBetweenDates(DateRange),
    /// Script 10: order totals in a date range
    OrderTotalsBetweenDates(DateRange),
    /// Script 11: order details in a date range, merged child orders excluded
    OrderDetailsBetweenDates(DateRange),
}

impl Report {
    pub fn stock_items_with_levels(location: impl Into<String>) -> Self {
        Self::StockItemsWithLevels {
            location: location.into(),
        }
    }

    pub fn orders_between_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(Self::OrdersBetweenDates(DateRange::new(start, end)?))
    }

    pub fn order_totals_between_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(Self::OrderTotalsBetweenDates(DateRange::new(start, end)?))
    }

    pub fn order_details_between_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Ok(Self::OrderDetailsBetweenDates(DateRange::new(start, end)?))
    }

    /// Server-side script id
    pub fn script_id(&self) -> &'static str {
        match self {
            Self::StockItemsWithLevels { .. } => "8",
            Self::OrdersBetweenDates(_) => "9",
            Self::OrderTotalsBetweenDates(_) => "10",
            Self::OrderDetailsBetweenDates(_) => "11",
        }
    }

    /// Snake-case report name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::StockItemsWithLevels { .. } => "stock_items_with_levels",
            Self::OrdersBetweenDates(_) => "orders_between_dates",
            Self::OrderTotalsBetweenDates(_) => "order_totals_between_dates",
            Self::OrderDetailsBetweenDates(_) => "order_details_between_dates",
        }
    }

    /// Parameter list sent with every page of this report
    pub fn parameters(&self) -> Vec<ScriptParameter> {
        match self {
            Self::StockItemsWithLevels { location } => {
                vec![ScriptParameter::select("locationName", location.as_str())]
            }
            Self::OrdersBetweenDates(range) | Self::OrderTotalsBetweenDates(range) => {
                range.parameters()
            }
            Self::OrderDetailsBetweenDates(range) => {
                let mut params = range.parameters();
                params.push(ScriptParameter::boolean(
                    "merged",
                    "Exclude merged child orders",
                    false,
                ));
                params
            }
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (script {})", self.name(), self.script_id())
    }
}

impl<S: SessionProvider> ReportFetcher<S> {
    /// Run a predefined report
    pub async fn run(&self, report: &Report, options: &FetchOptions) -> Result<ReportTable> {
        debug!(report = report.name(), script_id = report.script_id(), "Running report");
        self.fetch(report.script_id(), report.parameters(), options)
            .await
    }

    /// Stock items and their levels at `location`
    pub async fn stock_items_with_levels(&self, location: &str) -> Result<ReportTable> {
        self.run(
            &Report::stock_items_with_levels(location),
            &self.default_options(),
        )
        .await
    }

    /// Orders between two dates, both inclusive
    pub async fn orders_between_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportTable> {
        let report = Report::orders_between_dates(start, end)?;
        self.run(&report, &self.default_options()).await
    }

    /// Order totals between two dates, both inclusive
    pub async fn order_totals_between_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportTable> {
        let report = Report::order_totals_between_dates(start, end)?;
        self.run(&report, &self.default_options()).await
    }

    /// Order details between two dates, both inclusive
    pub async fn order_details_between_dates(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ReportTable> {
        let report = Report::order_details_between_dates(start, end)?;
        self.run(&report, &self.default_options()).await
    }
}
