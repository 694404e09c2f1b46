use lyon_path::Path;

/// Structural path equality, event by event; lyon paths don't implement `PartialEq`
pub fn lyon_paths_equal(a: &Path, b: &Path) -> bool {
    a.iter().eq(b.iter())
}

/// Build a closed polygon path from vertices in drawing order
pub fn polygon_path(vertices: &[[f32; 2]]) -> Path {
    let mut builder = Path::builder();
    let mut iter = vertices.iter();
    if let Some(first) = iter.next() {
        builder.begin(lyon_path::geom::point(first[0], first[1]));
        for v in iter {
            builder.line_to(lyon_path::geom::point(v[0], v[1]));
        }
        builder.end(true);
    }
    builder.build()
}
