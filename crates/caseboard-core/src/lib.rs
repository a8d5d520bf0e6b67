pub mod bucket;
pub mod case;
pub mod report;
pub mod source;

pub use bucket::{MonthKey, QuarterKey};
pub use case::{Case, CaseStatus, CaseUpdate, DocumentMetadata, NewCase, ParseStatusError};
pub use report::{ChartDataPoint, DashboardMetrics};
pub use source::{CaseSource, DocumentSource, SourceResponse};
