//! Configuration sources: process properties, the environment and the external file.

mod environment;
mod properties;
mod property_source;
mod system;

pub use environment::{Environment, MapEnvironment, ProcessEnvironment};
pub use properties::parse as parse_properties;
pub use property_source::{
    DEFAULT_FILE_NAME, DEFAULT_PATH_ENV, DEFAULT_PATH_PROPERTY, PropertySource,
    PropertySourceBuilder,
};
pub use system::{
    install_from_args, remove_system_property, set_system_property, system_properties,
    system_property,
};
