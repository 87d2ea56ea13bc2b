use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Console stream a piece of engine-produced output belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Destination for text the engine emits on behalf of the debuggee,
/// e.g. rendered logpoint messages.
pub trait OutputSink {
    fn emit(&mut self, stream: OutputStream, text: Bytes);
}
