use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template '{template}' references argument {{{index}}} but only {available} were supplied")]
    MissingArgument {
        template: String,
        index: usize,
        available: usize,
    },

    #[error("Template '{template}' has an unterminated placeholder at byte {position}")]
    Unterminated { template: String, position: usize },
}
