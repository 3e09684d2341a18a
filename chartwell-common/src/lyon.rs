use lyon_path::Path;

/// Structural equality of two paths, event by event
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    a.iter().eq(b.iter())
}
