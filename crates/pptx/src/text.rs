//! Styled text run extraction.

use crate::color::solid_fill_color;
use crate::xml::XmlElement;
use deck_core::units::parse_integer;
use deck_core::{Result, TextRun, ThemePalette};

/// Extract the text runs (`a:r`) of a slide in document order.
///
/// Runs without an `a:t` element are skipped. Formatting comes from the
/// run's `a:rPr`; anything it does not declare is left unset.
pub fn extract_text_runs(slide: &XmlElement, palette: &ThemePalette) -> Result<Vec<TextRun>> {
    let mut runs = Vec::new();

    for run in slide.descendants_named("r") {
        let Some(text) = run.child("t") else {
            continue;
        };

        let mut text_run = TextRun::new(text.text());

        if let Some(props) = run.child("rPr") {
            if let Some(sz) = props.attr("sz") {
                // Hundredths of a point
                text_run.font_size_pt = Some(parse_integer("sz", sz)? as f64 / 100.0);
            }
            text_run.bold = is_on(props.attr("b"));
            text_run.italic = is_on(props.attr("i"));
            text_run.font_family = props
                .child("latin")
                .and_then(|e| e.attr("typeface"))
                .map(str::to_string);
            text_run.color = solid_fill_color(props, palette);
        }

        runs.push(text_run);
    }

    Ok(runs)
}

/// Boolean attribute written as `1` or `true`.
fn is_on(value: Option<&str>) -> bool {
    matches!(value, Some("1") | Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::Error;

    fn runs(body: &str) -> Result<Vec<TextRun>> {
        let xml = format!(
            r#"<p:sld xmlns:a="urn:a" xmlns:p="urn:p"><p:cSld><p:spTree><p:sp><p:txBody><a:p>{}</a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#,
            body
        );
        let slide = XmlElement::parse(&xml).unwrap();
        extract_text_runs(&slide, &ThemePalette::default())
    }

    #[test]
    fn test_formatted_run() {
        let runs = runs(
            r#"<a:r><a:rPr lang="en-US" sz="2400" b="1" i="true" dirty="0"><a:solidFill><a:srgbClr val="ff0000"/></a:solidFill><a:latin typeface="Calibri"/></a:rPr><a:t>Hello</a:t></a:r>"#,
        )
        .unwrap();

        assert_eq!(runs.len(), 1);
        let run = &runs[0];
        assert_eq!(run.text, "Hello");
        assert_eq!(run.font_size_pt, Some(24.0));
        assert!(run.bold);
        assert!(run.italic);
        assert_eq!(run.font_family.as_deref(), Some("Calibri"));
        assert_eq!(run.color.as_deref(), Some("#FF0000"));
    }

    #[test]
    fn test_unformatted_run() {
        let plain = runs("<a:r><a:t>Plain</a:t></a:r>").unwrap();
        assert_eq!(plain, vec![TextRun::new("Plain")]);

        let small = runs(r#"<a:r><a:rPr sz="1050" b="0" i="false"/><a:t>Small</a:t></a:r>"#).unwrap();
        assert_eq!(small[0].font_size_pt, Some(10.5));
        assert!(!small[0].bold);
        assert!(!small[0].italic);
        assert_eq!(small[0].font_family, None);
        assert_eq!(small[0].color, None);
    }

    #[test]
    fn test_run_without_text_is_skipped() {
        let runs = runs(
            r#"<a:r><a:t>One</a:t></a:r><a:r><a:rPr b="1"/></a:r><a:r><a:t>Two</a:t></a:r>"#,
        )
        .unwrap();
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_whitespace_and_entities_preserved() {
        let runs = runs(r#"<a:r><a:t xml:space="preserve"> A &lt;B&gt; </a:t></a:r><a:r><a:t/></a:r>"#).unwrap();
        assert_eq!(runs[0].text, " A <B> ");
        assert_eq!(runs[1].text, "");
    }

    #[test]
    fn test_scheme_color_resolution() {
        let runs = runs(
            r#"<a:r><a:rPr><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></a:rPr><a:t>Themed</a:t></a:r><a:r><a:rPr><a:solidFill><a:schemeClr val="tx1"/></a:solidFill></a:rPr><a:t>Text</a:t></a:r>"#,
        )
        .unwrap();
        assert_eq!(runs[0].color.as_deref(), Some("#4472C4"));
        assert_eq!(runs[1].color, None);
    }

    #[test]
    fn test_runs_across_shapes_in_document_order() {
        let xml = r#"<p:sld><p:cSld><p:spTree>
            <p:sp><p:txBody><a:p><a:r><a:t>first</a:t></a:r></a:p><a:p><a:r><a:t>second</a:t></a:r></a:p></p:txBody></p:sp>
            <p:grpSp><p:sp><p:txBody><a:p><a:fld id="1" type="slidenum"><a:t>3</a:t></a:fld><a:r><a:t>third</a:t></a:r></a:p></p:txBody></p:sp></p:grpSp>
        </p:spTree></p:cSld></p:sld>"#;
        let slide = XmlElement::parse(xml).unwrap();
        let runs = extract_text_runs(&slide, &ThemePalette::default()).unwrap();
        let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_invalid_font_size_is_an_error() {
        assert!(matches!(
            runs(r#"<a:r><a:rPr sz="big"/><a:t>x</a:t></a:r>"#),
            Err(Error::InvalidNumber { .. })
        ));
    }
}
