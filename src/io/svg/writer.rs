//! SVG document scaffolding: header, styles, footer, escaping.

use std::io::Write;

use anyhow::Result;

use crate::geom::BoundingBox;

/// Escape text for use in XML attributes and text nodes.
pub(crate) fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Write the XML declaration and opening <svg> tag, tagged with the region bounds.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: u32, height: u32, bounds: &BoundingBox) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}"
        data-lon-min="{lon_min}" data-lon-max="{lon_max}"
        data-lat-min="{lat_min}" data-lat-max="{lat_max}">"##,
        lon_min = bounds.x_min,
        lon_max = bounds.x_max,
        lat_min = bounds.y_min,
        lat_max = bounds.y_max,
    )?;
    Ok(())
}

/// Write the stylesheet. Zoomable maps keep strokes at constant screen width.
pub(crate) fn write_svg_styles<W: Write>(writer: &mut W, non_scaling_stroke: bool) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .stop {{ fill: #111827; }}
    .boundary {{ fill: none; stroke: #111827; stroke-width: 1.5; }}
    .region {{ fill: none; stroke-width: 1; stroke-opacity: 0.8; }}
    .voronoi-polygon {{ fill: none; stroke: #2563eb; stroke-opacity: 0.35; stroke-width: 0.6; }}"##)?;
    if non_scaling_stroke {
        writeln!(writer, "    .boundary, .region, .voronoi-polygon {{ vector-effect: non-scaling-stroke; }}")?;
    }
    writeln!(writer, "</style>\n</defs>")?;
    Ok(())
}

/// Write the closing </svg> tag.
pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{write_svg_footer, write_svg_header, write_svg_styles, xml_escape};
    use crate::geom::BoundingBox;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(xml_escape(r#"Bahnhof "Enge" & <Tessinerplatz>"#),
            "Bahnhof &quot;Enge&quot; &amp; &lt;Tessinerplatz&gt;");
        assert_eq!(xml_escape("Zürich, Bürkliplatz"), "Zürich, Bürkliplatz");
    }

    #[test]
    fn document_scaffolding() {
        let bounds = BoundingBox { x_min: 8.4, y_min: 47.3, x_max: 8.6, y_max: 47.45 };
        let mut buf = Vec::new();
        write_svg_header(&mut buf, 960, 480, &bounds).unwrap();
        write_svg_styles(&mut buf, true).unwrap();
        write_svg_footer(&mut buf).unwrap();

        let svg = String::from_utf8(buf).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 960 480""#));
        assert!(svg.contains(r#"data-lon-min="8.4""#));
        assert!(svg.contains("non-scaling-stroke"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
