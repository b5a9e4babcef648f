//! Line splitting with mixed line-ending support.

/// Split `content` into lines on `\r\n`, `\r` or `\n`, in any mix.
///
/// With `ignore_empty_lines`, lines that are exactly empty are dropped.
/// Whitespace-only lines are kept either way. A trailing terminator does
/// not produce a trailing empty line.
pub fn split_lines(content: &str, ignore_empty_lines: bool) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = content.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&content[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&content[start..i]);
                i += 1;
                if bytes.get(i) == Some(&b'\n') {
                    i += 1;
                }
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < bytes.len() {
        lines.push(&content[start..]);
    }

    if ignore_empty_lines {
        lines.retain(|line| !line.is_empty());
    }
    lines
}
