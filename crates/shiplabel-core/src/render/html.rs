//! Printable HTML output.

use super::{Barcode, RenderedLabel};

const STYLE: &str = r#"
  @page { size: 4in 6in; margin: 0; }
  body { margin: 0; background: #f1f5f9; font-family: Helvetica, Arial, sans-serif; }
  .label { width: 4in; height: 6in; box-sizing: border-box; margin: 0.25in auto; background: #fff;
           color: #000; border: 1px solid #e2e8f0; display: flex; flex-direction: column; }
  .from { padding: 12px; border-bottom: 4px solid #000; display: flex; justify-content: space-between; }
  .from h2 { font-size: 16px; margin: 0 0 4px; }
  .from .lines { font-family: monospace; font-size: 12px; line-height: 1.2; text-transform: uppercase; }
  .badge { display: flex; flex-direction: column; align-items: flex-end; font-size: 10px; font-weight: bold; }
  .qr { width: 56px; height: 56px; border: 2px solid #000; margin-bottom: 4px; }
  .to { flex: 1; padding: 12px; border-bottom: 4px solid #000; position: relative;
        display: flex; flex-direction: column; justify-content: center; }
  .to h2 { position: absolute; top: 6px; left: 12px; font-size: 12px; color: #64748b; margin: 0; }
  .to .lines { margin-left: 28px; margin-top: 12px; }
  .to .name { font-size: 22px; font-weight: bold; }
  .to .street { font-size: 18px; }
  .to .city { font-size: 22px; font-weight: bold; margin-top: 2px; }
  .to .country { font-size: 16px; }
  .to .tel { font-family: monospace; font-size: 12px; font-weight: bold; margin-top: 6px; }
  .service { height: 88px; border-bottom: 4px solid #000; display: flex; }
  .service .letter { width: 88px; border-right: 4px solid #000; display: flex; align-items: center;
                     justify-content: center; font-size: 64px; font-weight: 900; }
  .service .info { flex: 1; display: flex; flex-direction: column; justify-content: center; padding: 0 12px; }
  .service .name { font-size: 20px; font-weight: bold; }
  .service .tracking { font-family: monospace; font-size: 12px; }
  .barcode { padding: 16px; display: flex; flex-direction: column; align-items: center; }
  .barcode svg { width: 80%; height: 56px; margin-bottom: 6px; }
  .barcode .caption { font-family: monospace; font-size: 12px; font-weight: bold; letter-spacing: 0.2em; }
  .footer { border-top: 2px solid #000; padding: 6px; display: flex; justify-content: space-between;
            font-size: 10px; font-weight: bold; text-transform: uppercase; color: #475569; }
  @media print {
    body { background: #fff; }
    .label { margin: 0; border: none; }
  }
"#;

/// Escape text for inclusion in HTML content or attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl RenderedLabel {
    /// The label alone, as an HTML fragment.
    pub fn to_html_fragment(&self) -> String {
        let mut html = String::new();

        html.push_str("<div id=\"printable-label\" class=\"label\">\n");

        // Ship from
        html.push_str("  <section class=\"from\">\n    <div>\n      <h2>SHIP FROM:</h2>\n      <div class=\"lines\">\n");
        for line in &self.ship_from {
            html.push_str(&format!("        <div>{}</div>\n", escape_html(line)));
        }
        html.push_str("      </div>\n    </div>\n");
        html.push_str(&format!(
            "    <div class=\"badge\"><div class=\"qr\"></div><span>{}</span></div>\n",
            escape_html(&self.weight_badge)
        ));
        html.push_str("  </section>\n");

        // Ship to
        let to = &self.ship_to;
        html.push_str("  <section class=\"to\">\n    <h2>SHIP TO:</h2>\n    <div class=\"lines\">\n");
        html.push_str(&format!("      <div class=\"name\">{}</div>\n", escape_html(&to.full_name)));
        html.push_str(&format!("      <div class=\"street\">{}</div>\n", escape_html(&to.street)));
        html.push_str(&format!("      <div class=\"city\">{}</div>\n", escape_html(&to.city_state)));
        html.push_str(&format!("      <div class=\"country\">{}</div>\n", escape_html(&to.country)));
        if let Some(phone) = &to.phone {
            html.push_str(&format!("      <div class=\"tel\">{}</div>\n", escape_html(phone)));
        }
        html.push_str("    </div>\n  </section>\n");

        // Service level
        html.push_str(&format!(
            "  <section class=\"service\">\n    <div class=\"letter\">{}</div>\n    <div class=\"info\">\n      <span class=\"name\">{}</span>\n      <span class=\"tracking\">{}</span>\n    </div>\n  </section>\n",
            self.service_letter,
            escape_html(&self.service_name),
            escape_html(&self.tracking_badge)
        ));

        // Barcode
        html.push_str("  <section class=\"barcode\">\n");
        html.push_str(&barcode_svg(&self.barcode));
        html.push_str(&format!(
            "    <span class=\"caption\">{}</span>\n  </section>\n",
            escape_html(&self.barcode_caption)
        ));

        // Footer
        html.push_str(&format!(
            "  <footer class=\"footer\">\n    <span>{}</span>\n    <span>{}</span>\n    <span>{}</span>\n  </footer>\n",
            escape_html(&self.footer.billing),
            escape_html(&self.footer.reference),
            escape_html(&self.footer.dimensions)
        ));

        html.push_str("</div>\n");
        html
    }

    /// A complete, self-contained printable document.
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Shipping Label {}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape_html(&self.barcode_caption),
            STYLE,
            self.to_html_fragment()
        )
    }
}

fn barcode_svg(barcode: &Barcode) -> String {
    let width = barcode.total_width().max(1);
    let mut svg = format!(
        "    <svg viewBox=\"0 0 {} 64\" preserveAspectRatio=\"none\" xmlns=\"http://www.w3.org/2000/svg\" aria-hidden=\"true\">\n",
        width
    );

    let mut x = 0u32;
    for bar in &barcode.bars {
        if bar.visible {
            svg.push_str(&format!(
                "      <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"64\" fill=\"#000\"/>\n",
                x, bar.width
            ));
        }
        x += bar.width as u32 + 1;
    }

    svg.push_str("    </svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::render::tests::sample_label;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_document_contains_label_text() {
        let html = render(&sample_label(), 7).to_html();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("@media print"));
        assert!(html.contains("<div>ACME CORP</div>"));
        assert!(html.contains("<div class=\"name\">John Doe</div>"));
        assert!(html.contains("<div class=\"city\">AUSTIN, TX</div>"));
        assert!(html.contains("<div class=\"letter\">P</div>"));
        assert!(html.contains("Tracking #: 1ZAB12CD3401"));
        assert!(html.contains("<span class=\"caption\">1ZAB12CD3401</span>"));
        assert!(html.contains("<span>BILL SENDER</span>"));
        assert!(html.contains("<span>REF: 2024-03-15</span>"));
        assert!(!html.contains("class=\"tel\""));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let mut data = sample_label();
        data.receiver.full_name = "<script>alert(1)</script>".to_string();

        let html = render(&data, 7).to_html_fragment();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_svg_draws_visible_bars_only() {
        let label = render(&sample_label(), 7);
        let visible = label.barcode.bars.iter().filter(|b| b.visible).count();
        let html = label.to_html_fragment();
        assert_eq!(html.matches("<rect ").count(), visible);
    }

    #[test]
    fn test_fragment_is_one_element_per_line() {
        let label = render(&sample_label(), 7);
        let html = label.to_html_fragment();

        assert!(html.ends_with("</div>\n"));
        assert!(html
            .lines()
            .filter(|l| l.trim_start().starts_with("<rect "))
            .all(|l| l.trim_end().ends_with("/>")));
        assert!(html.lines().any(|l| l.trim() == "<div class=\"name\">John Doe</div>"));
        assert!(html.lines().any(|l| l.trim() == "<div class=\"city\">AUSTIN, TX</div>"));
    }
}
