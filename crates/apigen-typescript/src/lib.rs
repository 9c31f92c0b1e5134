pub mod declarations;
pub mod emit;
pub mod generator;
pub mod names;
pub mod resolver;
pub mod synthesizer;
pub mod type_mapper;

pub use declarations::{Declaration, Declarations};
pub use generator::{TypeScriptConfig, TypeScriptGenerator};
