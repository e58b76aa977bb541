//! Business layer: accessor, per-entity services, request validation.

pub mod accessor;
pub mod product;
pub mod student;
pub mod validation;

pub use accessor::{Accessor, ListQuery};
pub use product::ProductService;
pub use student::StudentService;
pub use validation::{FieldRule, RequestValidator};
