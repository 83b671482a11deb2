//! Tool input schemas
//!
//! MCP servers describe tool inputs as JSON Schema documents. This module
//! compiles those documents into [`InputValidator`]s by walking the schema
//! tree once; no code is generated or evaluated.
//!
//! Supported: `type` (including type lists and `integer`), `nullable`,
//! `enum`, `const`, object keywords (`properties`, `required`,
//! `additionalProperties`, `min/maxProperties`), array keywords (`items` in
//! single and tuple form, `additionalItems`, `min/maxItems`, `uniqueItems`),
//! string keywords (`min/maxLength`, `pattern`), numeric bounds and
//! `multipleOf`, and the `anyOf`/`oneOf`/`allOf`/`not` combinators.
//! Keywords such as `$ref` or `if`/`then`/`else` fail compilation.

mod compiler;
mod error;
mod node;
mod sanitize;
mod validator;


pub use compiler::{SchemaCompiler, SchemaOptions};
pub use error::{SchemaError, ValidationError, ValidationIssue};
pub use node::SchemaType;
pub use sanitize::sanitize_json_schema;
pub use validator::InputValidator;
