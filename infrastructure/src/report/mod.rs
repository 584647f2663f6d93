//! Filesystem report storage

mod fs_report_store;

pub use fs_report_store::FsReportStore;
