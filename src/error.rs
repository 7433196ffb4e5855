use std::io;
use thiserror::Error;

/// Per-target failure. Recorded as a result entry; never aborts a run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{value} is not a valid filesystem path")]
    TypeMismatch { value: String },

    /// `diagnostic` is the utility's own stderr and already names the path.
    #[error("{diagnostic}")]
    NotFound { target: String, diagnostic: String },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {field} from {value:?}")]
    Parse { field: String, value: String },

    #[error("{target}: unrecognised output {output:?}")]
    MalformedOutput { target: String, output: String },
}

impl CheckError {
    /// Tag written in front of the message in the status log.
    pub fn tag(&self) -> &'static str {
        match self {
            CheckError::TypeMismatch { .. } => "TYPEMISMATCH",
            _                               => "ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_type_mismatch_has_its_own_tag() {
        let tm = CheckError::TypeMismatch { value: "42".into() };
        let nf = CheckError::NotFound { target: "/nope".into(), diagnostic: "df: /nope: No such file or directory".into() };
        assert_eq!(tm.tag(), "TYPEMISMATCH");
        assert_eq!(nf.tag(), "ERROR");
        assert_eq!(nf.to_string(), "df: /nope: No such file or directory");
    }
}
