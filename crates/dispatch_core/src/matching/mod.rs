pub mod first_available;
pub mod least_recent;
pub mod policy;
pub mod types;

pub use first_available::FirstAvailable;
pub use least_recent::LeastRecentlyActive;
pub use policy::DispatchPolicy;
pub use types::DriverCandidate;
