// Application layer - Use-case services and the repository seam
pub mod dashboard_service;
pub mod fleet_repository;
pub mod report_service;
pub mod vehicle_service;
