pub mod dashboard_mapper;
pub mod lead_mapper;
