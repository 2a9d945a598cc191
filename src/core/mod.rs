pub mod branching_hierarchy;
pub mod calendar;
pub mod date_domain;
pub mod domain;
pub mod label_domain;
pub mod number_domain;
pub mod primitives;
pub mod types;

pub use branching_hierarchy::BranchingHierarchy;
pub use date_domain::DateDomain;
pub use domain::{AxisDomain, DomainAdapter, DomainSpec, DomainValue};
pub use label_domain::LabelDomain;
pub use number_domain::{MAX_NUMBER_INDEX_COUNT, NumberDomain};
pub use types::{AxisOrientation, AxisSpan, IndexRange, Point, Size, SurfaceSize, ViewRect};
