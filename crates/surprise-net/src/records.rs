//! Line splitting shared by the edge-list and partition readers.

/// Byte range inside the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: usize,
    pub len: usize,
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// One non-blank, non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record<'a> {
    /// 1-based line number.
    pub line: usize,
    /// The line without its terminator.
    pub span: Span,
    pub fields: Vec<Field<'a>>,
}

impl<'a> Record<'a> {
    /// The two fields of a `<a> <b>` line, or the number of fields found.
    pub fn pair(&self) -> Result<(Field<'a>, Field<'a>), usize> {
        match self.fields.as_slice() {
            [a, b] => Ok((*a, *b)),
            other => Err(other.len()),
        }
    }
}

/// Iterate over the meaningful lines of `source`. Blank lines and lines whose
/// first field starts with `#` are skipped.
pub(crate) fn records(source: &str) -> impl Iterator<Item = Record<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .filter_map(move |(idx, raw)| {
            let base = offset;
            offset += raw.len();
            let fields = split_fields(raw, base);
            if fields.first().map_or(true, |f| f.text.starts_with('#')) {
                return None;
            }
            Some(Record {
                line: idx + 1,
                span: Span {
                    start: base,
                    len: raw.trim_end().len(),
                },
                fields,
            })
        })
}

fn split_fields(line: &str, base: usize) -> Vec<Field<'_>> {
    let mut fields = Vec::new();
    let mut start = None;
    for (i, ch) in line.char_indices() {
        match (ch.is_whitespace(), start) {
            (true, Some(s)) => {
                fields.push(field(line, s, i, base));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        fields.push(field(line, s, line.len(), base));
    }
    fields
}

fn field(line: &str, from: usize, to: usize, base: usize) -> Field<'_> {
    Field {
        text: &line[from..to],
        span: Span {
            start: base + from,
            len: to - from,
        },
    }
}
