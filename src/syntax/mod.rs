//! Pipeline step syntax
//!
//! Parses and renders the one-line snippet form of the deploy step:
//!
//! ```text
//! deploy adapters: [tomcat8(credentialsId: 'tomcat', url: 'http://ci:8080')], war: 'target/*.war'
//! ```

mod lexer;
mod parser;
mod step;

pub use parser::{parse_script, Call, Name, Script, Value};
pub use step::{parse_step, render_step, STEP_NAME};
