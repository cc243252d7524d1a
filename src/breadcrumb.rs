//! Source-path shortening used in every console block and report line.

/// Separator placed between path segments in a breadcrumb.
///
/// It is deliberately not a path separator, so a breadcrumb is never
/// mistaken for a real path (and re-applying [`breadcrumb`] is a no-op).
pub const SEGMENT_SEPARATOR: &str = " > ";

/// Shorten `raw_path` to the segments starting at the innermost
/// `root_marker` directory, joined with [`SEGMENT_SEPARATOR`].
///
/// When the marker is absent every segment is kept. Empty segments
/// (leading separator, doubled separators) are dropped.
///
/// ```
/// use crumb_log::breadcrumb::breadcrumb;
///
/// assert_eq!(
///     breadcrumb("/Users/dev/SetupProject/App/Views/Home.ext", "SetupProject"),
///     "SetupProject > App > Views > Home.ext"
/// );
/// assert_eq!(breadcrumb("/tmp/Other/File.ext", "SetupProject"), "tmp > Other > File.ext");
/// ```
pub fn breadcrumb(raw_path: &str, root_marker: &str) -> String {
    let segments: Vec<&str> = segments(raw_path).collect();
    let start = segments
        .iter()
        .rposition(|segment| *segment == root_marker)
        .unwrap_or(0);

    segments[start..].join(SEGMENT_SEPARATOR)
}

/// Last segment of `raw_path`, or the whole input if it has no segments.
pub fn leaf_name(raw_path: &str) -> &str {
    segments(raw_path).last().unwrap_or(raw_path)
}

fn segments(raw_path: &str) -> impl DoubleEndedIterator<Item = &str> {
    raw_path
        .split(std::path::is_separator)
        .filter(|segment| !segment.is_empty())
}
