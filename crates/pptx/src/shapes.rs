//! Vector shape extraction.

use crate::color::solid_fill_color;
use crate::xml::XmlElement;
use deck_core::units::{parse_integer, parse_px};
use deck_core::{BoundingBox, Result, Shape, ThemePalette};

/// Guide values are expressed in 1/100000 of the reference length.
const GUIDE_SCALE: f64 = 100_000.0;

/// Extract the shapes (`p:sp`) of a slide in document order.
pub fn extract_shapes(slide: &XmlElement, palette: &ThemePalette) -> Result<Vec<Shape>> {
    let mut shapes = Vec::new();

    for sp in slide.descendants_named("sp") {
        let mut shape = Shape::default();

        if let Some(props) = sp.child("spPr") {
            if let Some(xfrm) = props.child("xfrm") {
                shape.bounding_box = bounding_box(xfrm)?;
            }

            shape.fill_color = solid_fill_color(props, palette);

            if let Some(line) = props.child("ln") {
                if let Some(width) = line.attr("w") {
                    shape.stroke_width_px = Some(parse_px("w", width)?);
                    shape.stroke_color = solid_fill_color(line, palette);
                }
            }

            if let Some(geometry) = props.child("prstGeom") {
                shape.corner_radius_px = corner_radius(geometry, &shape.bounding_box)?;
            }
        }

        shapes.push(shape);
    }

    Ok(shapes)
}

/// Position from `a:off` and size from `a:ext`, in pixels.
fn bounding_box(xfrm: &XmlElement) -> Result<BoundingBox> {
    let mut bbox = BoundingBox::default();

    if let Some((x, y)) = xfrm
        .child("off")
        .and_then(|e| Some((e.attr("x")?, e.attr("y")?)))
    {
        bbox.x = parse_px("x", x)?;
        bbox.y = parse_px("y", y)?;
    }

    if let Some((cx, cy)) = xfrm
        .child("ext")
        .and_then(|e| Some((e.attr("cx")?, e.attr("cy")?)))
    {
        bbox.width = parse_px("cx", cx)?;
        bbox.height = parse_px("cy", cy)?;
    }

    Ok(bbox)
}

/// Corner radius of a rounded rectangle, from its `adj` guide.
///
/// Other geometries, and rounded rectangles without an explicit guide,
/// have no radius.
fn corner_radius(geometry: &XmlElement, bbox: &BoundingBox) -> Result<Option<i64>> {
    let is_round_rect = geometry
        .attr("prst")
        .map(|prst| prst.to_ascii_lowercase().contains("roundrect"))
        .unwrap_or(false);
    if !is_round_rect {
        return Ok(None);
    }

    let adj = geometry
        .child("avLst")
        .and_then(|list| list.children("gd").find(|gd| gd.attr("name") == Some("adj")))
        .and_then(|gd| gd.attr("fmla"))
        .and_then(|fmla| fmla.strip_prefix("val "));

    let Some(adj) = adj else {
        return Ok(None);
    };

    let fraction = parse_integer("adj", adj)? as f64 / GUIDE_SCALE;
    let shorter = bbox.width.min(bbox.height) as f64;
    Ok(Some((fraction * shorter + 0.5).floor() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Error;

    fn shapes(body: &str) -> Result<Vec<Shape>> {
        let xml = format!(
            r#"<p:sld xmlns:a="urn:a" xmlns:p="urn:p"><p:cSld><p:spTree>{}</p:spTree></p:cSld></p:sld>"#,
            body
        );
        let slide = XmlElement::parse(&xml).unwrap();
        extract_shapes(&slide, &ThemePalette::default())
    }

    #[test]
    fn test_styled_shape() {
        let shapes = shapes(
            r#"<p:sp>
                <p:nvSpPr><p:cNvPr id="2" name="Rectangle 1"/></p:nvSpPr>
                <p:spPr>
                    <a:xfrm><a:off x="914400" y="457200"/><a:ext cx="1828800" cy="952500"/></a:xfrm>
                    <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
                    <a:solidFill><a:srgbClr val="336699"/></a:solidFill>
                    <a:ln w="19050"><a:solidFill><a:schemeClr val="accent2"/></a:solidFill></a:ln>
                </p:spPr>
            </p:sp>"#,
        )
        .unwrap();

        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(
            shape.bounding_box,
            BoundingBox {
                x: 96,
                y: 48,
                width: 192,
                height: 100
            }
        );
        assert_eq!(shape.fill_color.as_deref(), Some("#336699"));
        assert_eq!(shape.stroke_width_px, Some(2));
        assert_eq!(shape.stroke_color.as_deref(), Some("#ED7D31"));
        assert_eq!(shape.corner_radius_px, None);
    }

    #[test]
    fn test_shape_without_properties() {
        let shapes = shapes(r#"<p:sp><p:nvSpPr/><p:spPr/></p:sp><p:sp/>"#).unwrap();
        assert_eq!(shapes, vec![Shape::default(), Shape::default()]);
    }

    #[test]
    fn test_outline_without_width_has_no_stroke() {
        let shapes = shapes(
            r#"<p:sp><p:spPr><a:ln><a:solidFill><a:srgbClr val="000000"/></a:solidFill></a:ln></p:spPr></p:sp>"#,
        )
        .unwrap();
        assert_eq!(shapes[0].stroke_width_px, None);
        assert_eq!(shapes[0].stroke_color, None);
        assert_eq!(shapes[0].fill_color, None);
    }

    #[test]
    fn test_text_color_is_not_shape_fill() {
        let shapes = shapes(
            r#"<p:sp><p:spPr/><p:txBody><a:p><a:r><a:rPr><a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></a:rPr><a:t>x</a:t></a:r></a:p></p:txBody></p:sp>"#,
        )
        .unwrap();
        assert_eq!(shapes[0].fill_color, None);
    }

    #[test]
    fn test_round_rect_corner_radius() {
        let shapes = shapes(
            r#"<p:sp><p:spPr>
                <a:xfrm><a:off x="0" y="0"/><a:ext cx="1905000" cy="952500"/></a:xfrm>
                <a:prstGeom prst="roundRect"><a:avLst><a:gd name="adj" fmla="val 16667"/></a:avLst></a:prstGeom>
            </p:spPr></p:sp>
            <p:sp><p:spPr>
                <a:xfrm><a:off x="0" y="0"/><a:ext cx="1905000" cy="952500"/></a:xfrm>
                <a:prstGeom prst="roundRect"><a:avLst/></a:prstGeom>
            </p:spPr></p:sp>
            <p:sp><p:spPr>
                <a:xfrm><a:off x="0" y="0"/><a:ext cx="952500" cy="1905000"/></a:xfrm>
                <a:prstGeom prst="snipRoundRect"><a:avLst><a:gd name="adj" fmla="val 50000"/></a:avLst></a:prstGeom>
            </p:spPr></p:sp>
            <p:sp><p:spPr>
                <a:xfrm><a:off x="0" y="0"/><a:ext cx="952500" cy="952500"/></a:xfrm>
                <a:prstGeom prst="ellipse"><a:avLst><a:gd name="adj" fmla="val 50000"/></a:avLst></a:prstGeom>
            </p:spPr></p:sp>"#,
        )
        .unwrap();

        // 0.16667 * min(200, 100) = 16.667
        assert_eq!(shapes[0].corner_radius_px, Some(17));
        // No explicit guide
        assert_eq!(shapes[1].corner_radius_px, None);
        // 0.5 * min(100, 200)
        assert_eq!(shapes[2].corner_radius_px, Some(50));
        // Not a rounded rectangle
        assert_eq!(shapes[3].corner_radius_px, None);
    }

    #[test]
    fn test_shapes_in_document_order() {
        let shapes = shapes(
            r#"<p:sp><p:spPr><a:xfrm><a:off x="9525" y="0"/><a:ext cx="0" cy="0"/></a:xfrm></p:spPr></p:sp>
            <p:grpSp><p:sp><p:spPr><a:xfrm><a:off x="19050" y="0"/><a:ext cx="0" cy="0"/></a:xfrm></p:spPr></p:sp></p:grpSp>
            <p:pic><p:spPr/></p:pic>
            <p:sp><p:spPr><a:xfrm><a:off x="28575" y="0"/><a:ext cx="0" cy="0"/></a:xfrm></p:spPr></p:sp>"#,
        )
        .unwrap();
        let xs: Vec<i64> = shapes.iter().map(|s| s.bounding_box.x).collect();
        assert_eq!(xs, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_offset_is_an_error() {
        assert!(matches!(
            shapes(r#"<p:sp><p:spPr><a:xfrm><a:off x="left" y="0"/></a:xfrm></p:spPr></p:sp>"#),
            Err(Error::InvalidNumber { .. })
        ));
    }
}
