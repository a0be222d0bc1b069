//! Path-data builders: geometries -> SVG `d` strings.

use geo::{Coord, LineString, MultiLineString, Polygon};

/// Projection function: lon/lat -> SVG coords (x,y)
pub(crate) type Projection = dyn Fn(&Coord<f64>) -> (f64, f64);

/// Open polyline: "M x,y L x,y ..."
pub(crate) fn line_to_path(line: &LineString<f64>, project: &Projection, out: &mut String) {
    let mut coords = line.0.iter().map(|coord| project(coord));
    if let Some((x, y)) = coords.next() {
        if !out.is_empty() { out.push(' ') }
        out.push_str(&format!("M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!("L{x:.3},{y:.3}"));
        }
    }
}

/// Every line of a mesh as one path.
pub(crate) fn mesh_to_path(mesh: &MultiLineString<f64>, project: &Projection) -> String {
    let mut out = String::new();
    for line in &mesh.0 {
        line_to_path(line, project, &mut out);
    }
    out
}

/// Closed cell outline in planar coords: "Mx,yLx,y...Z" (closing vertex omitted).
pub(crate) fn cell_to_path(cell: &Polygon<f64>) -> String {
    let ring = &cell.exterior().0;
    let open = match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => &ring[..ring.len() - 1],
        _ => &ring[..],
    };

    let mut out = String::new();
    for (i, c) in open.iter().enumerate() {
        out.push(if i == 0 { 'M' } else { 'L' });
        out.push_str(&format!("{:.3},{:.3}", c.x, c.y));
    }
    if !out.is_empty() { out.push('Z') }
    out
}
