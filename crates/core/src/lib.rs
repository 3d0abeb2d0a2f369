pub mod config;
pub mod deadlines;
pub mod domain;
pub mod errors;
pub mod reference;
pub mod render;
pub mod session;
pub mod status;
pub mod temporal;
pub mod validation;

pub use deadlines::{DeadlineAggregator, DisplayFormat, ServiceInterval, TrackedVehicle};
pub use domain::deadline::{DeadlineItem, DeadlineKind, DeadlineReport};
pub use domain::form::{FormPatch, FormSnapshot};
pub use domain::maintenance::MaintenanceRecord;
pub use domain::theme::Theme;
pub use domain::thresholds::Thresholds;
pub use domain::vehicle::VehicleRecord;
pub use errors::{ApplicationError, ReferenceDataUnavailable};
pub use reference::{
    load_reference_data, normalize, Dataset, ReferenceData, ReferenceSource, RegionFeeTable,
};
pub use render::{GlobalIndicator, RenderOutcome};
pub use session::{evaluate, Evaluation, Session};
pub use status::Status;
pub use validation::{FormField, ValidationError, ValidationReason};
