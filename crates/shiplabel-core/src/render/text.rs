//! Plain-text preview for terminals.

use super::{Barcode, RenderedLabel};

/// Inner width of the text label, in characters.
const INNER: usize = 62;

impl RenderedLabel {
    /// Fixed-width preview of the label.
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        let rule = format!("+{}+", "-".repeat(INNER));

        out.push(rule.clone());
        out.push(split_row("SHIP FROM:", &self.weight_badge));
        for line in &self.ship_from {
            out.push(row(&format!("  {}", line)));
        }

        out.push(rule.clone());
        out.push(row("SHIP TO:"));
        for line in self.ship_to.lines() {
            out.push(row(&format!("    {}", line)));
        }

        out.push(rule.clone());
        out.push(row(&format!(" {}  | {}", self.service_letter, self.service_name)));
        out.push(row(&format!("    | {}", self.tracking_badge)));

        out.push(rule.clone());
        out.push(row(&barcode_row(&self.barcode)));
        out.push(row(&barcode_row(&self.barcode)));
        out.push(centered(&self.barcode_caption));

        out.push(rule.clone());
        out.push(footer_row(
            &self.footer.billing,
            &self.footer.reference,
            &self.footer.dimensions,
        ));
        out.push(rule);

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

fn fit(s: &str) -> String {
    let clipped: String = s.chars().take(INNER).collect();
    format!("{:<width$}", clipped, width = INNER)
}

fn row(s: &str) -> String {
    format!("|{}|", fit(s))
}

fn split_row(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count() + 2;
    let gap = INNER.saturating_sub(used);
    row(&format!(" {}{}{} ", left, " ".repeat(gap), right))
}

fn centered(s: &str) -> String {
    let len = s.chars().count().min(INNER);
    let pad = (INNER - len) / 2;
    row(&format!("{}{}", " ".repeat(pad), s))
}

fn footer_row(left: &str, middle: &str, right: &str) -> String {
    let used = left.chars().count() + middle.chars().count() + right.chars().count() + 2;
    let space = INNER.saturating_sub(used);
    let (a, b) = (space / 2, space - space / 2);
    row(&format!(" {}{}{}{}{} ", left, " ".repeat(a), middle, " ".repeat(b), right))
}

fn barcode_row(barcode: &Barcode) -> String {
    let bars: String = barcode
        .bars
        .iter()
        .map(|b| match (b.visible, b.width > 1) {
            (false, _) => ' ',
            (true, true) => '█',
            (true, false) => '▏',
        })
        .collect();

    let len = bars.chars().count().min(INNER);
    format!("{}{}", " ".repeat((INNER - len) / 2), bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::render;
    use crate::render::tests::sample_label;

    #[test]
    fn test_rows_have_fixed_width() {
        let text = render(&sample_label(), 9).to_text();
        for line in text.lines() {
            assert_eq!(line.chars().count(), INNER + 2, "bad row: {:?}", line);
        }
    }

    #[test]
    fn test_preview_contents() {
        let text = render(&sample_label(), 9).to_text();

        assert!(text.contains("SHIP FROM:"));
        assert!(text.contains("2 KG"));
        assert!(text.contains("ACME CORP"));
        assert!(text.contains("John Doe"));
        assert!(text.contains("AUSTIN, TX"));
        assert!(text.contains(" P  | PRIORITY"));
        assert!(text.contains("Tracking #: 1ZAB12CD3401"));
        assert!(text.contains("BILL SENDER"));
        assert!(text.contains("REF: 2024-03-15"));
        assert!(text.contains("12x8x4 in"));
        assert!(!text.contains("TEL: \n"));
    }

    #[test]
    fn test_long_lines_are_clipped() {
        let mut data = sample_label();
        data.receiver.street = "x".repeat(200);
        let text = render(&data, 9).to_text();
        assert!(text.lines().all(|l| l.chars().count() == INNER + 2));
    }
}
