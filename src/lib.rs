pub mod errors;
pub mod events;
pub mod export;
pub mod ignore;
pub mod logger;
pub mod plan;
pub mod settings;

pub use errors::ExportError;
pub use export::export_project;
pub use ignore::IgnoreRuleSet;
