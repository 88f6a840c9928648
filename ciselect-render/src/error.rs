use thiserror::Error;

/// Every variant is fatal for the run.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid template {name}: {message}")]
    Template { name: String, message: String },

    #[error("template {name} references undefined variable `{variable}`")]
    UndefinedVariable { name: String, variable: String },

    #[error("failed to render {name}: {message}")]
    Render { name: String, message: String },
}
