use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename, reducing parameter passing
/// in error factory functions.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create an invalid locale error.
    pub fn invalid_locale_error(
        &self,
        locale: impl Into<String>,
        reason: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidLocale {
            src: self.named_source(),
            span,
            locale: locale.into(),
            reason: reason.into(),
        })
    }

    /// Create an invalid browser target error.
    pub fn invalid_browser_error(
        &self,
        entry: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::InvalidBrowser {
            src: self.named_source(),
            span,
            entry: entry.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a preset.toml next to your project or pass --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse preset configuration")]
    #[diagnostic(code(ngpreset::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(ngpreset::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid locale '{locale}'")]
    #[diagnostic(
        code(ngpreset::invalid_locale),
        help("{reason}. Use a BCP 47 tag such as 'fr', 'en-US' or 'zh-Hant'.")
    )]
    InvalidLocale {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid locale")]
        span: Option<SourceSpan>,
        locale: String,
        reason: String,
    },

    #[error("invalid browser target '{entry}'")]
    #[diagnostic(
        code(ngpreset::invalid_browser),
        help("browser targets are browserslist entries such as 'safari 15.6', 'ios_saf 15.0-15.1' or 'Safari <=15'")
    )]
    InvalidBrowser {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected '<browser> [<op>]<version>'")]
        span: Option<SourceSpan>,
        entry: String,
    },

    #[error("failed to parse translation file '{path}'")]
    #[diagnostic(
        code(ngpreset::translation_parse),
        help("translation files use the JSON format: {{\"locale\": \"fr\", \"translations\": {{\"id\": \"text\"}}}}")
    )]
    TranslationParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse source map '{path}'")]
    #[diagnostic(code(ngpreset::source_map_parse))]
    SourceMapParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
