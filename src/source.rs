use std::collections::HashMap;
use std::rc::Rc;

use crate::breakpoint::Breakpoint;
use crate::frame::RawSource;
use crate::path::PathConverter;

/// Identity of a code unit breakpoints can be registered against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
    /// Client-visible path of a file-backed or labeled chunk.
    Path(Rc<str>),
    /// Opaque identity of an anonymous/dynamic chunk.
    Chunk(u64),
}

impl SourceKey {
    /// Classify a VM-reported source. File-backed and labeled chunks go
    /// through the path converter; anything else is keyed by the chunk's
    /// own identity.
    pub fn classify(source: &RawSource, paths: &mut impl PathConverter) -> Option<Self> {
        match source.name.as_bytes().first() {
            Some(b'@') | Some(b'=') => paths.to_client(source.name).map(SourceKey::Path),
            _ => Some(SourceKey::Chunk(source.id)),
        }
    }
}

/// Per-source mapping from line number to breakpoint.
#[derive(Debug, Default)]
pub struct SourceTable {
    pub(crate) lines: HashMap<u32, Breakpoint>,
}

impl SourceTable {
    pub fn breakpoint_at(&self, line: u32) -> Option<&Breakpoint> {
        self.lines.get(&line)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &Breakpoint)> {
        self.lines.iter().map(|(&line, breakpoint)| (line, breakpoint))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
