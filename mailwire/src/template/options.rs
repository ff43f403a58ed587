use downcast_rs::{Downcast, impl_downcast};

/// The data bundle a caller hands to `render` or `send`. Parameters read
/// whatever fields they need off the concrete type via `downcast_ref`.
///
/// There is no compile-time binding between a template and an options
/// type. Wiring a template with parameters that expect a different
/// options type is a configuration mistake the parameter implementation
/// must tolerate on its own terms, typically by producing `Value::Null`.
pub trait TemplateOptions: Downcast + Send + Sync {}
impl_downcast!(TemplateOptions);
