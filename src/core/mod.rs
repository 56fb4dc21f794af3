pub mod parser;
pub mod summary;

pub use crate::domain::model::{
    DependencyKind, RefreshPolicy, ServiceDependency, ServiceDescriptor, Slo, SloInterval, SloKind,
};
pub use crate::domain::ports::DocumentLoader;
pub use crate::utils::error::Result;
pub use parser::{parse_descriptor, DescriptorError, FieldPath};
