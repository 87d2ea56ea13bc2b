/// What the VM reports about the source of a chunk.
#[derive(Debug, Clone, Copy)]
pub struct RawSource<'a> {
    /// Raw chunk name: `@file` for file-backed chunks, `=label` for
    /// labeled ones, anything else is the chunk's own source text.
    pub name: &'a str,
    /// Stable numeric identity of the chunk's source string, used to key
    /// anonymous chunks.
    pub id: u64,
}

/// Introspection of the stack frame the VM is currently executing.
pub trait FrameInfo {
    /// Stable identity of the running function, e.g. its code object
    /// address. `None` when the VM cannot produce one.
    fn function_id(&self) -> Option<u64>;

    /// Source descriptor of the frame's chunk. Only consulted when the
    /// function identity misses the resolution cache.
    fn source(&self) -> Option<RawSource<'_>>;
}
