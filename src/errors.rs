//! Error handling for trove.
//!
//! Path resolution never errors: a miss resolves to the caller-supplied
//! default, per the resolution contract. `TroveError` covers the three
//! fail-fast conditions left over: a `Serialize` impl that cannot be imaged
//! as a value tree, a missing field in `extract_collection`, and an
//! unrecognized comparison operator token.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum TroveError {
    #[error("cannot reflect source as a value tree: {source}")]
    #[diagnostic(
        code(trove::reflect),
        help("the type's Serialize impl must produce maps, sequences, and scalars; map keys must be strings")
    )]
    Reflect {
        #[from]
        source: serde_json::Error,
    },

    #[error("field '{field}' not found on source")]
    #[diagnostic(
        code(trove::field_not_found),
        help("extract_collection requires the named field to resolve on the reflected source")
    )]
    FieldNotFound { field: String },

    #[error("unknown comparison operator '{operator}'")]
    #[diagnostic(
        code(trove::unknown_operator),
        help("supported operators: =, ==, !=, <>, <, >, <=, >=, ===, !==")
    )]
    UnknownOperator { operator: String },
}
