//! Project description and batch loading

mod data;
pub mod loader;

pub use data::{
    BuildingUsage, DeductibleTier, ProjectProfile, StructureClass, WorkType, WorksSchedule,
    DEFAULT_DURATION_MONTHS,
};
pub use loader::{load_projects, load_projects_from_reader, ProjectRecord};
