use std::fmt::{Display, Formatter};

use equitick_core::EnvelopeMeta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request identifier (UUID v4) for end-to-end request tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Per-invocation metadata collected while a command runs.
#[derive(Debug, Clone)]
pub struct Metadata {
    pub request_id: RequestId,
    pub source: String,
    pub latency_ms: u64,
    pub warnings: Vec<String>,
}

impl Metadata {
    pub fn new(source: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            request_id: RequestId::new_v4(),
            source: source.into(),
            latency_ms,
            warnings: Vec::new(),
        }
    }

    pub fn push_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn into_envelope_meta(self) -> EnvelopeMeta {
        let mut meta = EnvelopeMeta::new(self.request_id.to_string(), self.source, self.latency_ms);
        for warning in self.warnings {
            meta.push_warning(warning);
        }
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_uuid_v4() {
        let request_id = RequestId::new_v4();
        assert_eq!(request_id.0.get_version_num(), 4);
    }

    #[test]
    fn warnings_survive_envelope_conversion() {
        let mut metadata = Metadata::new("yahoo", 12);
        metadata.push_warning("partial data");

        let meta = metadata.into_envelope_meta();
        assert_eq!(meta.source, "yahoo");
        assert_eq!(meta.warnings, vec![String::from("partial data")]);
    }
}
