pub mod dynamic_field_binder;
pub mod field_binding;
pub mod question_group;

pub use dynamic_field_binder::DynamicFieldBinder;
pub use field_binding::{BoundField, FieldBinding};
pub use question_group::{GroupLocator, QuestionLayout};
