use std::cell::Cell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;

use bytes::Bytes;

use crate::breakpoint::{Breakpoint, BreakpointInfo};
use crate::eval::{render_log, FrameEval};
use crate::frame::FrameInfo;
use crate::line_table::LineTable;
use crate::output::{OutputSink, OutputStream};
use crate::path::PathConverter;
use crate::source::{SourceKey, SourceTable};

/// Resolved association between a running function and the source table
/// governing it.
///
/// A cheap handle, not a borrow into the registry: it stays valid across
/// `clear_source` and simply resolves to "no breakpoints" afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub key: SourceKey,
}

/// Breakpoint storage for every source the VM runs, plus the caches that
/// keep the per-line check cheap.
///
/// Mutation takes `&mut self` and hit evaluation `&self`, so a protocol
/// layer driving updates from another thread has to serialize them with
/// the VM's line hook; no half-applied update is ever observable.
#[derive(Debug, Default)]
pub struct SourceRegistry {
    files: HashMap<Rc<str>, SourceTable>,
    chunks: HashMap<u64, SourceTable>,
    presence: LineTable,
    // todo bound this; identities of collected closures pile up over a long session
    functions: HashMap<u64, Option<Binding>>,
    deep_probes: Cell<u64>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the breakpoint at `line`. Replacing keeps the
    /// hit count; only a clear followed by a fresh add resets it.
    pub fn add(&mut self, key: &SourceKey, line: u32, info: BreakpointInfo) {
        log::trace!("add breakpoint at {:?}:{}", key, line);

        let table = match key {
            SourceKey::Path(path) => self.files.entry(path.clone()).or_default(),
            SourceKey::Chunk(id) => self.chunks.entry(*id).or_default(),
        };

        match table.lines.entry(line) {
            Entry::Occupied(mut entry) => {
                let hits = entry.get().hit.get();
                entry.insert(Breakpoint::with_hits(info, hits));
            }
            Entry::Vacant(entry) => {
                entry.insert(Breakpoint::new(info));
                self.presence.incr(line);
            }
        }
    }

    /// Drop every table, the presence index and the resolution cache.
    pub fn clear_all(&mut self) {
        log::trace!("clear all breakpoints");

        self.files.clear();
        self.chunks.clear();
        self.presence.clear();
        self.functions.clear();
    }

    /// Drop one source's table, releasing its presence index slots.
    /// Breakpoints of other sources at the same line numbers are
    /// untouched.
    pub fn clear_source(&mut self, key: &SourceKey) {
        log::trace!("clear breakpoints of {:?}", key);

        let table = match key {
            SourceKey::Path(path) => self.files.remove(path.as_ref()),
            SourceKey::Chunk(id) => self.chunks.remove(id),
        };

        if let Some(table) = table {
            for &line in table.lines.keys() {
                self.presence.decr(line);
            }
        }
    }

    pub fn source_table(&self, key: &SourceKey) -> Option<&SourceTable> {
        match key {
            SourceKey::Path(path) => self.files.get(path.as_ref()),
            SourceKey::Chunk(id) => self.chunks.get(id),
        }
    }

    pub fn get_or_create(&mut self, key: &SourceKey) -> &mut SourceTable {
        match key {
            SourceKey::Path(path) => self.files.entry(path.clone()).or_default(),
            SourceKey::Chunk(id) => self.chunks.entry(*id).or_default(),
        }
    }

    /// Find which source governs the frame's function, creating the
    /// (possibly empty) table on first sight of the source.
    ///
    /// The outcome is memoized per function identity, including the
    /// "nothing governs it" outcome, so a function stays at one cache
    /// probe per resolution no matter how often it runs.
    pub fn resolve_for_frame(&mut self, frame: &impl FrameInfo, paths: &mut impl PathConverter) -> Option<Binding> {
        let function_id = frame.function_id()?;

        if let Some(binding) = self.functions.get(&function_id) {
            return binding.clone();
        }

        let binding = frame
            .source()
            .and_then(|source| SourceKey::classify(&source, paths))
            .map(|key| {
                self.get_or_create(&key);
                Binding { key }
            });

        log::trace!("resolved function {:#x} to {:?}", function_id, binding);
        self.functions.insert(function_id, binding.clone());

        binding
    }

    /// Decide whether execution should pause at `line`.
    ///
    /// The presence index answers the no-breakpoint case without touching
    /// any table. A positive count can come from another source sharing
    /// the line number, so the per-source lookup stays authoritative.
    pub fn evaluate_hit(&self, binding: &Binding, line: u32, eval: &mut impl FrameEval, sink: &mut impl OutputSink) -> bool {
        if !self.presence.any_at(line) {
            return false;
        }

        self.deep_probes.set(self.deep_probes.get() + 1);

        let breakpoint = match self.source_table(&binding.key).and_then(|table| table.breakpoint_at(line)) {
            Some(breakpoint) => breakpoint,
            None => return false,
        };

        if let Some(condition) = breakpoint.condition.as_deref() {
            if !eval.eval_bool(condition).holds() {
                return false;
            }
        }

        let hits = breakpoint.bump_hits();

        if let Some(hit_condition) = breakpoint.hit_condition.as_deref() {
            let check = format!("{} {}", hits, hit_condition);
            if !eval.eval_bool(&check).holds() {
                return false;
            }
        }

        if let Some(template) = breakpoint.log_message.as_deref() {
            log::trace!("logpoint at {:?}:{}", binding.key, line);
            let text = render_log(template, eval);
            sink.emit(OutputStream::Stdout, Bytes::from(text));
            return false;
        }

        log::trace!("breakpoint hit at {:?}:{}", binding.key, line);
        true
    }

    /// Number of exact per-source lookups performed, i.e. how often the
    /// presence index let a line through to the deep check.
    pub fn deep_probes(&self) -> u64 {
        self.deep_probes.get()
    }
}
