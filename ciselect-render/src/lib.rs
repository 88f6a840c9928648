//! Rendering of the CI configuration document from a template.
//!
//! Templates are Handlebars in strict mode: any reference to a variable the context does not
//! define is an error rather than an empty string. HTML escaping is off; the output is YAML.

mod context;
mod error;

pub use context::RenderContext;
pub use error::RenderError;

use handlebars::{Handlebars, RenderErrorReason};
use serde::Serialize;
use tracing::debug;

/// Render `source` (registered as `name`) against `data`.
///
/// The output ends with a newline exactly when `source` does.
pub fn render_str<T: Serialize>(
    name: &str,
    source: &str,
    data: &T,
) -> Result<String, RenderError> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(true);
    hb.register_escape_fn(handlebars::no_escape);

    hb.register_template_string(name, source).map_err(|e| RenderError::Template {
        name: name.to_string(),
        message: e.to_string(),
    })?;

    let output = hb.render(name, data).map_err(|e| match e.reason() {
        RenderErrorReason::MissingVariable(path) => RenderError::UndefinedVariable {
            name: name.to_string(),
            variable: path.clone().unwrap_or_else(|| "<unknown>".to_string()),
        },
        _ => RenderError::Render {
            name: name.to_string(),
            message: e.to_string(),
        },
    })?;

    debug!(template = name, bytes = output.len(), "rendered template");
    Ok(preserve_trailing_newline(source, output))
}

/// Make `output` end with a single `\n` iff `source` ends with one.
pub fn preserve_trailing_newline(source: &str, mut output: String) -> String {
    let want = source.ends_with('\n');
    let has = output.ends_with('\n');
    if want && !has {
        output.push('\n');
    } else if !want && has {
        output.pop();
        if output.ends_with('\r') {
            output.pop();
        }
    }
    output
}
