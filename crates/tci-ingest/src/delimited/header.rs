//! Quote-aware header line tokenizing.

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Splits one delimited line into fields, honoring double quotes.
///
/// A doubled quote inside a quoted field is an escaped quote. Fields are
/// trimmed.
pub fn split_delimited_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                // Check for escaped quote ("")
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            c if c == delimiter && !in_quotes => {
                fields.push(normalize_header(&current));
                current.clear();
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(normalize_header(&current));
    fields
}

/// Counts delimiter occurrences outside double-quoted fields.
pub fn count_delimiters(line: &str, delimiter: char) -> usize {
    let mut count = 0;
    let mut in_quotes = false;
    for c in line.chars() {
        if c == '"' {
            // An escaped "" toggles twice, which leaves the state unchanged.
            in_quotes = !in_quotes;
        } else if c == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

/// Makes header names unique and non-blank.
///
/// Blank headers become `Column <n>` (1-based position); repeats of an
/// earlier header (case-insensitive) get a ` (2)`, ` (3)`, ... suffix.
pub fn unique_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let base = normalize_header(header.as_ref());
        let base = if base.is_empty() {
            format!("Column {}", idx + 1)
        } else {
            base
        };
        let taken = |name: &str, out: &[String]| out.iter().any(|h| h.eq_ignore_ascii_case(name));
        let mut name = base.clone();
        let mut n = 2;
        while taken(&name, &out) {
            name = format!("{base} ({n})");
            n += 1;
        }
        out.push(name);
    }
    out
}
