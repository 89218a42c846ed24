pub mod alignment;
pub mod cache;
pub mod charclass;
pub mod config;
pub mod error;
pub mod parser;
pub mod render;
pub mod template;
pub mod token;
pub mod value;

// Re-export main types and functions
pub use alignment::{Alignment, AlignmentDirection};
pub use cache::{TemplateCache, parse_cached};
pub use config::CacheConfig;
pub use error::{Result, TemplateError};
pub use parser::{Parser, parse};
pub use render::{PropertySource, render_tokens};
pub use template::Template;
pub use token::{Destructuring, PropertyToken, TextToken, Token};
pub use value::{
    FormatProvider, InvariantCulture, PropertyValue, PropertyValueFactory, ScalarValue,
    ScalarValueFactory,
};
