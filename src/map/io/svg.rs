use std::io::Write;

use anyhow::{Context, Result};
use geo::Coord;

use crate::{
    io::svg::{
        category20, cell_to_path, mesh_to_path, write_svg_footer, write_svg_header,
        write_svg_styles, xml_escape,
    },
    map::PreparedMap,
};

impl PreparedMap<'_> {
    /// Write the map as an SVG document: stops, boundary mesh, regions, then Voronoi cells.
    pub fn write_svg<W: Write>(&self, writer: &mut W) -> Result<()> {
        let config = self.config();
        let projection = *self.projection();
        let project = move |coord: &Coord<f64>| projection.project_xy(coord);

        write_svg_header(writer, config.width, config.height, self.bounds())?;
        write_svg_styles(writer, config.enable_zoom)?;
        writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;

        if config.enable_zoom {
            let [min, max] = config.zoom_extent;
            writeln!(writer, r#"<g class="zoom-layer" data-zoom-min="{min}" data-zoom-max="{max}">"#)?;
        }

        // --- Stops (every in-bounds stop, duplicates included) ---
        writeln!(writer, r#"<g class="stops">"#)?;
        for stop in self.stops_in_bounds() {
            let (cx, cy) = project(&stop.coord());
            writeln!(writer, r#"<circle class="stop" cx="{cx:.3}" cy="{cy:.3}" r="{r}" data-stop-name="{name}"/>"#,
                r = config.point_radius,
                name = xml_escape(&stop.name),
            )?;
        }
        writeln!(writer, "</g>")?;

        // --- Combined boundary ---
        writeln!(writer, r#"<path class="boundary" d="{}"/>"#, mesh_to_path(self.city().mesh(), &project))?;

        // --- Regions ---
        writeln!(writer, r#"<g class="regions">"#)?;
        for (i, region) in self.city().regions().iter().enumerate() {
            let name = xml_escape(&region.id);
            writeln!(writer, r#"<path class="region" stroke="{color}" data-name="{name}" d="{d}"><title>{name}</title></path>"#,
                color = category20(i),
                d = mesh_to_path(&region.boundary, &project),
            )?;
        }
        writeln!(writer, "</g>")?;

        // --- Voronoi cells, already in drawing coordinates ---
        writeln!(writer, r#"<g class="voronoi-polygons">"#)?;
        for cell in self.cells() {
            writeln!(writer, r#"<path class="voronoi-polygon" d="{}"/>"#, cell_to_path(cell))?;
        }
        writeln!(writer, "</g>")?;

        if config.enable_zoom {
            writeln!(writer, "</g>")?;
        }

        write_svg_footer(writer)?;
        writer.flush().context("[to_svg] Failed to flush SVG output")?;

        Ok(())
    }

    /// Render the SVG document into a string.
    pub fn to_svg_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_svg(&mut buf)?;
        String::from_utf8(buf).context("[to_svg] SVG output is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use geo::{LineString, MultiLineString, MultiPolygon, Polygon};

    use crate::{config::RenderConfig, map::{CityData, RegionGeometry}, stops::StopFeature};

    fn city() -> CityData {
        let west = LineString::from(vec![(8.40, 47.30), (8.50, 47.30), (8.50, 47.45), (8.40, 47.45), (8.40, 47.30)]);
        let east = LineString::from(vec![(8.50, 47.30), (8.60, 47.30), (8.60, 47.45), (8.50, 47.45), (8.50, 47.30)]);
        let regions = vec![
            RegionGeometry::from_shape("Kreis <1>", MultiPolygon::new(vec![Polygon::new(west.clone(), vec![])])),
            RegionGeometry::from_shape("Kreis 2", MultiPolygon::new(vec![Polygon::new(east.clone(), vec![])])),
        ];
        let stops = vec![
            StopFeature::new(8.45, 47.38, "Stauffacher & Co"),
            StopFeature::new(8.45, 47.38, "Stauffacher"),
            StopFeature::new(8.55, 47.40, "Bellevue"),
            StopFeature::new(9.00, 47.40, "Outside"),
        ];
        CityData::new(stops, regions, MultiLineString::new(vec![west, east]))
    }

    #[test]
    fn layers_appear_in_draw_order() {
        let data = city();
        let svg = data.prepare(&RenderConfig::default()).unwrap().to_svg_string().unwrap();

        let order = [r#"<g class="stops">"#, r#"class="boundary""#, r#"<g class="regions">"#, r#"<g class="voronoi-polygons">"#]
            .map(|needle| svg.find(needle).unwrap());
        assert!(order.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(svg.matches(r#"<circle class="stop""#).count(), 3);
        assert_eq!(svg.matches(r#"class="region""#).count(), 2);
        assert_eq!(svg.matches(r#"class="voronoi-polygon""#).count(), 2);
        assert!(!svg.contains("zoom-layer"));
        assert!(!svg.contains("Outside"));
    }

    #[test]
    fn names_are_escaped_and_regions_colored() {
        let data = city();
        let svg = data.prepare(&RenderConfig::default()).unwrap().to_svg_string().unwrap();

        assert!(svg.contains(r#"data-stop-name="Stauffacher &amp; Co""#));
        assert!(svg.contains(r#"data-name="Kreis &lt;1&gt;""#));
        assert!(svg.contains("<title>Kreis 2</title>"));
        assert!(svg.contains(r##"stroke="#1f77b4""##));
        assert!(svg.contains(r##"stroke="#aec7e8""##));
    }

    #[test]
    fn zoomable_wraps_layers() {
        let data = city();
        let svg = data.prepare(&RenderConfig::zoomable()).unwrap().to_svg_string().unwrap();

        assert!(svg.contains(r#"<g class="zoom-layer" data-zoom-min="1" data-zoom-max="8">"#));
        assert!(svg.contains("vector-effect: non-scaling-stroke"));
        assert!(svg.contains(r#"width="1200" height="800""#));
        assert!(svg.find("zoom-layer").unwrap() < svg.find(r#"<g class="stops">"#).unwrap());
    }

    #[test]
    fn cells_are_closed_paths() {
        let data = city();
        let svg = data.prepare(&RenderConfig::default()).unwrap().to_svg_string().unwrap();
        for line in svg.lines().filter(|l| l.contains("voronoi-polygon\" d=")) {
            assert!(line.contains(r#"d="M"#) && line.contains(r#"Z"/>"#), "{line}");
        }
    }
}
