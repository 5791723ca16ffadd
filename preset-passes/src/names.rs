//! Transform identifiers understood by the host engine.

/// Environment-targeting preset.
pub const PRESET_ENV: &str = "@babel/preset-env";

/// Downlevels class fields; forced for browsers with the class field scope bug.
pub const CLASS_PROPERTIES: &str = "@babel/plugin-proposal-class-properties";
/// Downlevels private methods; forced together with [`CLASS_PROPERTIES`].
pub const PRIVATE_METHODS: &str = "@babel/plugin-proposal-private-methods";
/// Never run by the environment preset.
pub const TYPEOF_SYMBOL: &str = "transform-typeof-symbol";

pub const ASYNC_TO_GENERATOR: &str = "@babel/plugin-transform-async-to-generator";
pub const ASYNC_GENERATOR_FUNCTIONS: &str = "@babel/plugin-transform-async-generator-functions";

pub const MARK_TOP_LEVEL_PURE: &str = "mark-top-level-pure";
pub const ELIDE_ANGULAR_METADATA: &str = "elide-angular-metadata";
pub const ADJUST_TYPESCRIPT_ENUMS: &str = "adjust-typescript-enums";
pub const ADJUST_STATIC_MEMBERS: &str = "adjust-static-class-members";

pub const CODE_COVERAGE: &str = "add-code-coverage";

pub const TRANSFORM_RUNTIME: &str = "@babel/plugin-transform-runtime";

pub const ANGULAR_LINKER: &str = "angular-linker";

pub const LOCALIZE_TRANSLATE: &str = "localize-translate";
pub const LOCALIZE_LOCALE: &str = "localize-locale";
