pub mod display_state;
pub mod fix_report;
