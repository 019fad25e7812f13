//! Text emission engine for generated sources.
//!
//! Templates use `$name$` placeholders; `$$` emits a literal dollar sign.
//! Indentation is tracked per line: every line started while indented is
//! prefixed with two spaces per level. When annotation is enabled the
//! printer records the byte span of the most recent substitution of each
//! variable, so the emitter can map generated identifiers back to their
//! originating schema file.

use crate::wire::Annotation;
use std::collections::HashMap;

const SPACES_PER_LEVEL: usize = 2;

pub struct Printer {
    buf: String,
    indent: usize,
    at_line_start: bool,
    record_spans: bool,
    /* variable -> byte span of its most recent substitution */
    last_spans: HashMap<String, (usize, usize)>,
    annotations: Vec<Annotation>,
}

impl Printer {
    pub fn new(record_spans: bool) -> Self {
        Self {
            buf: String::new(),
            indent: 0,
            at_line_start: true,
            record_spans,
            last_spans: HashMap::new(),
            annotations: Vec::new(),
        }
    }

    /* Emit a template, substituting `$name$` placeholders from `subs`.
     * A placeholder with no matching substitution is a programming error
     * in the emitter. */
    pub fn print(&mut self, template: &str, subs: &[(&str, &str)]) {
        let mut rest = template;
        while let Some(start) = rest.find('$') {
            let (literal, tail) = rest.split_at(start);
            self.emit(literal);
            let tail = &tail[1..];
            let end = tail
                .find('$')
                .unwrap_or_else(|| panic!("unterminated placeholder in template: {template:?}"));
            let name = &tail[..end];
            if name.is_empty() {
                self.emit("$");
            } else {
                let value = subs
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .unwrap_or_else(|| panic!("no substitution for '{name}' in {template:?}"));
                let begin = self.emit(value);
                if self.record_spans {
                    self.last_spans
                        .insert(name.to_string(), (begin, self.buf.len()));
                }
            }
            rest = &tail[end + 1..];
        }
        self.emit(rest);
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn outdent(&mut self) {
        debug_assert!(self.indent > 0, "outdent without matching indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /* Record an annotation tying the most recent substitution of `var`
     * back to `source_file`. No-op unless span recording is enabled. */
    pub fn annotate(&mut self, var: &str, source_file: &str) {
        if !self.record_spans {
            return;
        }
        if let Some(&(begin, end)) = self.last_spans.get(var) {
            self.annotations.push(Annotation {
                source_file: source_file.to_string(),
                begin: begin as u64,
                end: end as u64,
            });
        }
    }

    pub fn contents(&self) -> &str {
        &self.buf
    }

    pub fn into_parts(self) -> (String, Vec<Annotation>) {
        (self.buf, self.annotations)
    }

    /* Append text, inserting indentation at the start of every non-empty
     * line. Returns the byte offset where the text began. */
    fn emit(&mut self, text: &str) -> usize {
        let mut begin: Option<usize> = None;
        for ch in text.chars() {
            if ch == '\n' {
                begin.get_or_insert(self.buf.len());
                self.buf.push('\n');
                self.at_line_start = true;
                continue;
            }
            if self.at_line_start {
                for _ in 0..self.indent * SPACES_PER_LEVEL {
                    self.buf.push(' ');
                }
                self.at_line_start = false;
            }
            /* spans start after any inserted indentation */
            begin.get_or_insert(self.buf.len());
            self.buf.push(ch);
        }
        begin.unwrap_or(self.buf.len())
    }
}
