/// Column-name constants for the reporting tables.
/// Single source of truth - exported to Python via PyO3.

// ── Composite key columns ───────────────────────────────────────────────────
pub mod index {
    pub const ID: &str = "id";
    pub const DATE: &str = "date";
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const FACILITY_ID: &str = "facility_id";
    pub const FACILITY_NAME: &str = "facility_name";

    pub const ALL: [&str; 6] = [ID, DATE, YEAR, MONTH, FACILITY_ID, FACILITY_NAME];
}

// ── Population reference columns ────────────────────────────────────────────
pub mod population {
    pub const DISTRICT: &str = "district";
    pub const YEAR: &str = "year";
    pub const AGE: &str = "age";
}

// ── Population target specification columns ─────────────────────────────────
pub mod target {
    pub const INDICATOR: &str = "indicator";
    pub const SEX: &str = "sex";
    pub const AGES: &str = "ages";
}

// ── Reporting status labels ─────────────────────────────────────────────────
pub mod status {
    pub const POSITIVE: &str = "positive_indic";
    pub const NO_POSITIVE: &str = "no_positive_indic";
    pub const NO_FORM_REPORT: &str = "no_form_report";
}

// ── Aggregation modes ───────────────────────────────────────────────────────
pub mod mode {
    pub const ABSOLUTE: &str = "Absolute";
}
